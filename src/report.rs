use std::{
    fmt::{self, Display},
    io,
    process::ExitCode,
    time::Duration,
};

use crate::outcome::CaseOutcome;

/// Everything a suite run produced.
#[derive(Debug)]
#[non_exhaustive]
pub struct SuiteReport {
    pub name: String,

    /// One outcome per scope, in the order the scopes finished.
    /// The root scope of the suite is always last.
    pub outcomes: Vec<CaseOutcome>,
    pub duration: Duration,
    pub fmt_errors: Vec<io::Error>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.failed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.failed())
    }

    /// The outcome of the scope with the full name `name`.
    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name == name)
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.is_success() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}

/// Lists every failed scope with its messages.
impl Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for outcome in self.failures() {
            let Some(failure) = outcome.failure() else {
                continue;
            };
            if !failure.has_details() {
                continue;
            }

            if !first {
                writeln!(f)?;
            }
            first = false;

            write!(f, "--- FAIL: {}", outcome.name)?;
            for log in outcome.logs.iter() {
                write!(f, "\n    {log}")?;
            }
            for error in failure.errors.iter() {
                write!(f, "\n    {error}")?;
            }
            if let Some(panic) = &failure.panic {
                write!(f, "\n    panicked: {panic}")?;
            }
        }

        match first {
            true if self.is_success() => write!(f, "{}: ok", self.name),
            true => write!(f, "--- FAIL: {}", self.name),
            false => Ok(()),
        }
    }
}

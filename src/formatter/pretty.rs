use std::io;

use crate::{
    formatter::{
        ScopeFormatter,
        color::{ColorSetting, Paint, SupportsColor, colors::*},
    },
    outcome::CaseOutcome,
    report::SuiteReport,
};

/// The default formatter, mimicking the output of the built in test harness.
///
/// ```text
/// running divide
/// test divide/case 0 ... ok
/// test divide/case 1: bad_division ... FAILED
/// test divide ... FAILED
///
/// failures:
///
/// ---- divide/case 1: bad_division ----
/// error: cannot divide by zero
///
/// failures:
///     divide/case 1: bad_division
///     divide
///
/// test result: FAILED. 1 passed; 2 failed; finished in 0.00s
/// ```
#[derive(Debug)]
pub struct PrettyFormatter<W: io::Write> {
    target: W,
    color_setting: ColorSetting,
}

impl Default for PrettyFormatter<io::Stdout> {
    fn default() -> Self {
        Self {
            target: io::stdout(),
            color_setting: Default::default(),
        }
    }
}

impl<W: io::Write> PrettyFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> PrettyFormatter<WithTarget> {
        PrettyFormatter {
            target: with_target,
            color_setting: self.color_setting,
        }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        PrettyFormatter {
            color_setting: color_setting.into(),
            ..self
        }
    }

    pub fn target(&self) -> &W {
        &self.target
    }

    pub fn into_target(self) -> W {
        self.target
    }
}

impl<W: io::Write + SupportsColor> PrettyFormatter<W> {
    /// Return whether this formatter will currently emit colored output.
    pub fn use_color(&self) -> bool {
        self.color_setting.use_color(&self.target)
    }

    fn status(&self, passed: bool) -> Paint<'static> {
        match passed {
            true => Paint {
                text: "ok",
                color: GREEN,
                enabled: self.use_color(),
            },
            false => Paint {
                text: "FAILED",
                color: RED,
                enabled: self.use_color(),
            },
        }
    }
}

impl<W: io::Write + SupportsColor> ScopeFormatter for PrettyFormatter<W> {
    fn fmt_suite_start(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.target, "\nrunning {name}")
    }

    fn fmt_scope_outcome(&mut self, outcome: &CaseOutcome) -> io::Result<()> {
        let status = self.status(outcome.passed());
        writeln!(self.target, "test {} ... {status}", outcome.name)
    }

    fn fmt_suite_outcomes(&mut self, report: &SuiteReport) -> io::Result<()> {
        let failures: Vec<_> = report.failures().collect();
        if !failures.is_empty() {
            writeln!(self.target)?;
            writeln!(self.target, "failures:")?;
            for outcome in failures.iter() {
                let Some(failure) = outcome.failure() else {
                    continue;
                };
                if !failure.has_details() && outcome.logs.is_empty() {
                    continue;
                }

                writeln!(self.target)?;
                writeln!(self.target, "---- {} ----", outcome.name)?;
                for log in outcome.logs.iter() {
                    writeln!(self.target, "{log}")?;
                }
                for error in failure.errors.iter() {
                    writeln!(self.target, "error: {error}")?;
                }
                if let Some(panic) = &failure.panic {
                    writeln!(self.target, "panicked: {panic}")?;
                }
            }

            writeln!(self.target)?;
            writeln!(self.target, "failures:")?;
            for outcome in failures.iter() {
                writeln!(self.target, "    {}", outcome.name)?;
            }
        }

        writeln!(self.target)?;
        let status = self.status(report.is_success());
        writeln!(
            self.target,
            "test result: {status}. {} passed; {} failed; finished in {:.2}s",
            report.passed(),
            report.failed(),
            report.duration.as_secs_f64()
        )?;
        writeln!(self.target)
    }
}

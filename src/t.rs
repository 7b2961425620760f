//! The test context bundled with this crate.
//!
//! A [`T`] is the handle of one scope of a suite. The suite creates the root
//! scope, every other scope is opened with [`T::run`]. A scope fails when it
//! reports an error, panics or contains a failing scope. Each scope is
//! recorded as a [`CaseOutcome`] when it finishes.

use std::{
    cell::RefCell,
    fmt::{self, Debug, Display},
    io, mem,
    panic::resume_unwind,
    rc::Rc,
    time::Instant,
};

use tracing::debug;

use crate::{
    context::TestContext,
    formatter::ScopeFormatter,
    outcome::{CaseFailure, CaseOutcome, CaseStatus},
    panic::{Fatal, PanicHandler, Unwound},
};

/// State shared by all scopes of one suite run.
pub(crate) struct Shared {
    pub formatter: RefCell<Box<dyn ScopeFormatter>>,
    pub panic_handler: Box<dyn PanicHandler>,
    pub outcomes: RefCell<Vec<CaseOutcome>>,
    pub fmt_errors: RefCell<Vec<io::Error>>,
}

impl Shared {
    pub fn new(formatter: Box<dyn ScopeFormatter>, panic_handler: Box<dyn PanicHandler>) -> Self {
        Self {
            formatter: RefCell::new(formatter),
            panic_handler,
            outcomes: RefCell::default(),
            fmt_errors: RefCell::default(),
        }
    }

    fn record(&self, outcome: CaseOutcome) {
        if let Err(err) = self.formatter.borrow_mut().fmt_scope_outcome(&outcome) {
            self.fmt_errors.borrow_mut().push(err);
        }
        self.outcomes.borrow_mut().push(outcome);
    }
}

/// Handle of a running scope.
pub struct T {
    name: String,
    failed: bool,
    errors: Vec<String>,
    logs: Vec<String>,
    shared: Rc<Shared>,
}

impl T {
    pub(crate) fn new(name: String, shared: Rc<Shared>) -> Self {
        Self {
            name,
            failed: false,
            errors: Vec::new(),
            logs: Vec::new(),
            shared,
        }
    }

    /// The full name of this scope, including the names of all enclosing scopes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record a message, shown if the scope fails.
    pub fn log(&mut self, message: impl Display) {
        self.logs.push(message.to_string());
    }

    /// Record an error and mark the scope failed, but keep running.
    pub fn error(&mut self, message: impl Display) {
        self.errors.push(message.to_string());
        self.failed = true;
    }

    /// Record an error and stop this scope.
    ///
    /// Only the current scope is left, the enclosing scope continues after
    /// its call to [`run`](Self::run). The next table case still runs.
    pub fn fatal(&mut self, message: impl Display) -> ! {
        self.error(message);
        resume_unwind(Box::new(Fatal))
    }

    /// Mark the scope failed without a message.
    pub fn fail(&mut self) {
        self.failed = true;
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Run `f` in a nested scope called `{self.name}/{name}`.
    ///
    /// If the nested scope fails, this scope fails as well. Returns whether
    /// the nested scope passed.
    pub fn run<F: FnOnce(&mut T)>(&mut self, name: &str, f: F) -> bool {
        let child = T::new(format!("{}/{name}", self.name), Rc::clone(&self.shared));
        let passed = child.execute(f);
        if !passed {
            self.failed = true;
        }
        passed
    }

    /// Execute `f` as the body of this scope and record its outcome.
    pub(crate) fn execute<F: FnOnce(&mut T)>(mut self, f: F) -> bool {
        let now = Instant::now();
        let shared = Rc::clone(&self.shared);

        let panic = match shared.panic_handler.handle(Box::new(|| f(&mut self))) {
            Ok(()) | Err(Unwound::Fatal) => None,
            Err(Unwound::Panicked(msg)) => Some(msg),
        };
        if panic.is_some() {
            self.failed = true;
        }

        let status = match self.failed {
            false => CaseStatus::Passed,
            true => {
                debug!(
                    scope = %self.name,
                    errors = self.errors.len(),
                    panicked = panic.is_some(),
                    "scope failed"
                );
                CaseStatus::Failed(CaseFailure {
                    errors: mem::take(&mut self.errors),
                    panic,
                })
            }
        };

        let passed = status.passed();
        shared.record(CaseOutcome {
            name: mem::take(&mut self.name),
            status,
            duration: now.elapsed(),
            logs: mem::take(&mut self.logs),
        });
        passed
    }
}

impl Debug for T {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("T")
            .field("name", &self.name)
            .field("failed", &self.failed)
            .field("errors", &self.errors)
            .field("logs", &self.logs)
            .finish_non_exhaustive()
    }
}

impl TestContext for T {
    fn run<F: FnOnce(&mut Self)>(&mut self, name: &str, f: F) -> bool {
        T::run(self, name, f)
    }

    fn error(&mut self, message: impl Display) {
        T::error(self, message)
    }
}

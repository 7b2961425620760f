use std::{borrow::Cow, rc::Rc, time::Instant};

use tracing::debug;

use crate::{
    formatter::ScopeFormatter,
    panic,
    report::SuiteReport,
    t::{Shared, T},
};

/// A named run of one root scope, configured with builder methods.
///
/// Created with [`suite`](crate::suite).
#[derive(Debug)]
pub struct Suite<Formatter, PanicHandler> {
    pub(crate) name: Cow<'static, str>,
    pub(crate) formatter: Formatter,
    pub(crate) panic_handler: PanicHandler,
}

impl<Formatter, PanicHandler> Suite<Formatter, PanicHandler>
where
    Formatter: ScopeFormatter + 'static,
    PanicHandler: panic::PanicHandler + 'static,
{
    /// Run `f` in the root scope of the suite.
    ///
    /// Every scope is reported to the formatter as it finishes. Panics are
    /// handled by the configured panic handler, so with the default handler
    /// this always returns, even if scopes panicked.
    pub fn run(self, f: impl FnOnce(&mut T)) -> SuiteReport {
        let now = Instant::now();
        let name = self.name.into_owned();

        let mut formatter = self.formatter;
        let mut fmt_errors = Vec::new();
        if let Err(err) = formatter.fmt_suite_start(&name) {
            fmt_errors.push(err);
        }

        let shared = Rc::new(Shared::new(
            Box::new(formatter),
            Box::new(self.panic_handler),
        ));
        T::new(name.clone(), Rc::clone(&shared)).execute(f);
        fmt_errors.extend(shared.fmt_errors.take());

        let mut report = SuiteReport {
            name,
            outcomes: shared.outcomes.take(),
            duration: now.elapsed(),
            fmt_errors,
        };
        if let Err(err) = shared.formatter.borrow_mut().fmt_suite_outcomes(&report) {
            report.fmt_errors.push(err);
        }

        debug!(
            suite = %report.name,
            passed = report.passed(),
            failed = report.failed(),
            "suite finished"
        );
        report
    }
}

impl<Formatter, PanicHandler> Suite<Formatter, PanicHandler> {
    pub fn with_formatter<WithFormatter: ScopeFormatter>(
        self,
        formatter: WithFormatter,
    ) -> Suite<WithFormatter, PanicHandler> {
        Suite {
            name: self.name,
            formatter,
            panic_handler: self.panic_handler,
        }
    }

    pub fn with_panic_handler<WithPanicHandler: panic::PanicHandler>(
        self,
        panic_handler: WithPanicHandler,
    ) -> Suite<Formatter, WithPanicHandler> {
        Suite {
            name: self.name,
            formatter: self.formatter,
            panic_handler,
        }
    }
}

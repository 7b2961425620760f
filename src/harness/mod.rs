use std::{borrow::Cow, io};

mod suite;
pub use suite::Suite;

use crate::{
    formatter::{NoFormatter, PrettyFormatter},
    panic::DefaultPanicHandler,
    t::T,
};

/// Create a suite with the default strategies.
///
/// Scopes are printed to stdout by a [`PrettyFormatter`] and panics are
/// isolated per scope by the [`DefaultPanicHandler`].
pub fn suite(
    name: impl Into<Cow<'static, str>>,
) -> Suite<PrettyFormatter<io::Stdout>, DefaultPanicHandler> {
    Suite {
        name: name.into(),
        formatter: PrettyFormatter::default(),
        panic_handler: DefaultPanicHandler,
    }
}

/// Run `f` as a silent suite from inside a regular `#[test]`.
///
/// # Panics
/// Panics with every failed scope and its messages if any scope failed.
///
/// ```
/// tabtest::test("divide", |t| {
///     tabtest::run_with_args(
///         t,
///         [tabtest::args![10, 2, 5], tabtest::args!["@negative", -9, 3, -3]],
///         |_: &mut tabtest::T, a: i64, b: i64, want: i64| {
///             assert_eq!(a / b, want);
///         },
///     );
/// });
/// ```
pub fn test(name: impl Into<Cow<'static, str>>, f: impl FnOnce(&mut T)) {
    let report = suite(name).with_formatter(NoFormatter).run(f);
    if !report.is_success() {
        panic!("{report}");
    }
}

#[cfg(test)]
mod tests {
    use std::panic::catch_unwind;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{outcome::CaseStatus, panic::NoPanicHandler};

    #[test]
    fn suite_records_root_last() {
        let report = suite("root").with_formatter(NoFormatter).run(|t| {
            t.run("a", |_| {});
            t.run("b", |t| t.error("nope"));
        });
        let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["root/a", "root/b", "root"]);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());
        assert_eq!(report.exit_code(), std::process::ExitCode::FAILURE);
        assert!(report.outcome("root/a").is_some_and(|o| o.status == CaseStatus::Passed));
    }

    #[test]
    fn report_lists_failure_messages() {
        let report = suite("root").with_formatter(NoFormatter).run(|t| {
            t.run("a", |t| {
                t.log("context");
                t.error("first");
                t.error("second");
            });
            t.run("b", |_| panic!("boom"));
        });
        assert_eq!(
            report.to_string(),
            "--- FAIL: root/a\n    context\n    first\n    second\n\
             --- FAIL: root/b\n    panicked: boom"
        );
    }

    #[test]
    fn passing_report_is_short() {
        let report = suite("fine").with_formatter(NoFormatter).run(|_| {});
        assert_eq!(report.to_string(), "fine: ok");
        assert_eq!(report.exit_code(), std::process::ExitCode::SUCCESS);
    }

    #[test]
    fn no_panic_handler_lets_panics_escape() {
        let escaped = catch_unwind(|| {
            suite("root")
                .with_formatter(NoFormatter)
                .with_panic_handler(NoPanicHandler)
                .run(|t| {
                    t.run("fatal", |t| t.fatal("stops the scope"));
                    t.run("panic", |_| panic!("escapes"));
                })
        });
        assert!(escaped.is_err());
    }

    #[test]
    fn test_panics_with_failures() {
        let err = catch_unwind(|| test("failing", |t| t.error("bad"))).unwrap_err();
        let message = crate::panic::payload_as_string(err);
        assert_eq!(message, "--- FAIL: failing\n    bad");

        test("passing", |t| t.log("nothing to see"));
    }
}

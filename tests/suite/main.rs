use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use serde::Serialize;
use tabtest::{
    Args, T, args,
    formatter::{NoFormatter, PrettyFormatter},
    outcome::CaseStatus,
    panic::NoPanicHandler,
};

mod lib;
use lib::*;

fn divide(a: i64, b: i64) -> Result<i64, String> {
    match b {
        0 => Err("cannot divide by zero".into()),
        b => Ok(a / b),
    }
}

fn check_divide(t: &mut T, a: i64, b: i64, want: i64, want_err: Option<String>) {
    match divide(a, b) {
        Ok(got) if want_err.is_some() => t.error(format!("got {got}, want error {want_err:?}")),
        Ok(got) if got != want => t.error(format!("got {got}, want {want}")),
        Ok(_) => {}
        Err(err) if Some(&err) != want_err.as_ref() => t.error(format!("unexpected error: {err}")),
        Err(_) => {}
    }
}

#[test]
fn divide_table() {
    let actual = Buffer::default();
    let report = tabtest::suite("divide")
        .with_formatter(PrettyFormatter::default().with_target(actual.clone()))
        .run(|t| {
            tabtest::run_with_args(
                t,
                [
                    args![4, 2, 2, ()],
                    args!["@bad_division", 1, 0, 0, "cannot divide by zero"],
                    args![9, 3, 4, ()],
                ],
                check_divide,
            )
        });

    let actual = actual.try_to_string().unwrap();
    assert_eq!(
        sanitize_duration(&actual),
        lines(&[
            "",
            "running divide",
            "test divide/case 0 ... ok",
            "test divide/case 1: bad_division ... ok",
            "test divide/case 2 ... FAILED",
            "test divide ... FAILED",
            "",
            "failures:",
            "",
            "---- divide/case 2 ----",
            "error: got 3, want 4",
            "",
            "failures:",
            "    divide/case 2",
            "    divide",
            "",
            "test result: FAILED. 2 passed; 2 failed; finished in <duration>",
            "",
            "",
        ])
    );
    assert!(report.fmt_errors.is_empty());
    assert_eq!(report.exit_code(), std::process::ExitCode::FAILURE);
}

#[test]
fn passing_suite_summary() {
    let actual = Buffer::default();
    let report = tabtest::suite("counted")
        .with_formatter(PrettyFormatter::default().with_target(actual.clone()))
        .run(|t| tabtest::run(t, 2, |t: &mut T, i| t.log(i)));

    assert!(report.is_success());
    assert_eq!(
        sanitize_duration(&actual.try_to_string().unwrap()),
        lines(&[
            "",
            "running counted",
            "test counted/case 0 ... ok",
            "test counted/case 1 ... ok",
            "test counted ... ok",
            "",
            "test result: ok. 3 passed; 0 failed; finished in <duration>",
            "",
            "",
        ])
    );
}

#[test]
fn colored_status() {
    let actual = Buffer::default();
    tabtest::suite("colored")
        .with_formatter(
            PrettyFormatter::default()
                .with_target(actual.clone())
                .with_color_setting(true),
        )
        .run(|_| {});

    let actual = actual.try_to_string().unwrap();
    assert!(actual.contains("test colored ... \x1b[32mok\x1b[0m\n"));
    assert!(actual.contains("test result: \x1b[32mok\x1b[0m. 1 passed"));
}

#[test]
fn fatal_and_panics_stay_in_their_case() {
    let report = tabtest::suite("isolated")
        .with_formatter(NoFormatter)
        .run(|t| {
            tabtest::run(t, 4, |t: &mut T, i| match i {
                1 => t.fatal("stopped"),
                2 => panic!("case {i} panicked"),
                _ => t.log("ran to the end"),
            })
        });

    let statuses: Vec<_> = report
        .outcomes
        .iter()
        .map(|outcome| (outcome.name.as_str(), outcome.passed()))
        .collect();
    assert_eq!(
        statuses,
        [
            ("isolated/case 0", true),
            ("isolated/case 1", false),
            ("isolated/case 2", false),
            ("isolated/case 3", true),
            ("isolated", false),
        ]
    );

    let fatal = report.outcome("isolated/case 1").unwrap();
    assert_eq!(fatal.failure().unwrap().errors, ["stopped"]);
    let panicked = report.outcome("isolated/case 2").unwrap();
    assert_eq!(
        panicked.failure().unwrap().panic.as_deref(),
        Some("case 2 panicked")
    );
    assert_eq!(report.outcome("isolated/case 3").unwrap().logs, ["ran to the end"]);
}

#[test]
fn malformed_table_fails_the_enclosing_scope() {
    let report = tabtest::suite("malformed")
        .with_formatter(NoFormatter)
        .run(|t| {
            tabtest::run_with_args(
                t,
                [args![1.5, 2], args![2.3, "x", 4]],
                |_: &mut T, _: i64, _: String| {},
            )
        });

    assert_eq!(report.outcomes.len(), 1);
    let panic = report.outcomes[0].failure().unwrap().panic.clone().unwrap();
    let lines: Vec<_> = panic.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "tabtest: case 0: arg 2: cannot convert from signed integer to String"
    );
    assert!(lines[1].starts_with("tabtest: case 1: func "));
    assert!(lines[1].ends_with("takes 2 argument(s) after the context, but 3 were given"));
}

#[test]
fn fatal_without_panic_isolation() {
    let report = tabtest::suite("strict")
        .with_formatter(NoFormatter)
        .with_panic_handler(NoPanicHandler)
        .run(|t| {
            tabtest::run(t, 2, |t: &mut T, i| {
                if i == 0 {
                    t.fatal("first case stops");
                }
                t.log("second case runs");
            })
        });

    assert_eq!(report.failed(), 2);
    assert_eq!(report.passed(), 1);
    assert_eq!(
        report.outcome("strict/case 1").unwrap().status,
        CaseStatus::Passed
    );
}

#[test]
fn configurations_name_their_cases() {
    #[derive(Debug, Serialize)]
    struct Cfg {
        #[serde(rename = "CaseName")]
        name: &'static str,
        input: i32,
        want: i32,
    }

    let report = tabtest::suite("cfgs")
        .with_formatter(NoFormatter)
        .run(|t| {
            tabtest::run_with_cfgs(
                t,
                [
                    Cfg {
                        name: "double",
                        input: 2,
                        want: 4,
                    },
                    Cfg {
                        name: "",
                        input: -3,
                        want: -6,
                    },
                ],
                |t: &mut T, cfg: Cfg| {
                    if cfg.input * 2 != cfg.want {
                        t.error(format!("{cfg:?}"));
                    }
                },
            );
            tabtest::run_with_cfgs(
                t,
                [BTreeMap::from([("CaseName", "from a map")])],
                |_: &mut T, _| {},
            );
        });

    let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "cfgs/case 0: double",
            "cfgs/case 1",
            "cfgs/case 0: from a map",
            "cfgs"
        ]
    );
    assert!(report.is_success());
}

#[test]
fn cases_built_at_runtime() {
    let cases = (1..=3).map(|n| {
        let mut case = Args::new();
        case.push(format!("@square of {n}"));
        case.push(n);
        case.push(n * n);
        case
    });

    tabtest::test("squares", |t| {
        tabtest::run_with_args(t, cases, |t: &mut T, n: u32, want: u64| {
            if u64::from(n * n) != want {
                t.error(format!("{n}² is not {want}"));
            }
        });
        assert_eq!(t.name(), "squares");
    });
}

fn calculate(a: i64, b: i64, op: &str) -> Result<i64, String> {
    match op {
        "+" => Ok(a + b),
        "/" if b == 0 => Err("division by zero".into()),
        "/" => Ok(a / b),
        op => Err(format!("unknown operator {op}")),
    }
}

#[test]
fn calculator_cases_observe_results_and_errors() {
    let report = tabtest::suite("calculate")
        .with_formatter(NoFormatter)
        .run(|t| {
            tabtest::run_with_args(
                t,
                [
                    args![2, 2, "+", 4, ""],
                    args![2, 0, "/", 0, "division by zero"],
                    args![2, 2, "?", 0, "unknown operator ?"],
                ],
                |t: &mut T, a: i64, b: i64, op: String, want: i64, want_err: String| {
                    match calculate(a, b, &op) {
                        Ok(got) => {
                            t.log(format!("{a} {op} {b} = {got}"));
                            if got != want || !want_err.is_empty() {
                                t.error(format!("got {got}, want {want} {want_err:?}"));
                            }
                        }
                        Err(err) => {
                            t.log(format!("{a} {op} {b} failed: {err}"));
                            if err != want_err {
                                t.error(format!("got error {err:?}, want {want_err:?}"));
                            }
                        }
                    }
                },
            )
        });

    assert!(report.is_success(), "{report}");
    let logs: Vec<_> = report
        .outcomes
        .iter()
        .map(|outcome| (outcome.name.as_str(), outcome.logs.clone()))
        .collect();
    assert_eq!(
        logs,
        [
            ("calculate/case 0", vec!["2 + 2 = 4".to_string()]),
            (
                "calculate/case 1",
                vec!["2 / 0 failed: division by zero".to_string()]
            ),
            (
                "calculate/case 2",
                vec!["2 ? 2 failed: unknown operator ?".to_string()]
            ),
            ("calculate", vec![]),
        ]
    );
}

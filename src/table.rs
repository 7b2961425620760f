//! Running tables of test cases.
//!
//! There are three ways to describe a table:
//!
//! - [`run`] calls the test function a number of times with the case index
//! - [`run_with_args`] binds each positional case ([`Args`]) to the test
//!   function's parameters
//! - [`run_with_cfgs`] passes each configuration value through as is
//!
//! Each case runs in its own scope of the [`TestContext`], named
//! `case {index}` or `case {index}: {custom}` (see [`case_name`](crate::case_name)).
//! Before the first case runs the whole table is validated. If anything is
//! wrong, no case runs at all and every problem is reported in one [`Error`].
//!
//! The free functions panic with that error, since a malformed table is a bug
//! in the test itself. The builders ([`Counted`], [`WithArgs`], [`WithCfgs`])
//! return it from `try_run` instead.

use tracing::{debug, trace};

use crate::{
    bind::{ArgsFn, bind_cases},
    case_name::{CaseName, CaseNamed},
    context::TestContext,
    error::{Error, Mismatch},
    guard::{guard, missing},
    test::TestResult,
    value::Args,
};

/// The number of cases of a counted table.
///
/// Accepts any primitive integer so that a negative count can be reported
/// instead of being rejected by the compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Count(pub i128);

macro_rules! impl_count_from {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Count {
            fn from(value: $ty) -> Self {
                Count(value as i128)
            }
        }
    )*};
}

impl_count_from![i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize];

impl Count {
    fn cases(self) -> Result<usize, Mismatch> {
        match self.0 < 0 {
            true => Err(Mismatch::NegativeCount { num: self.0 }),
            false => Ok(usize::try_from(self.0).unwrap_or(usize::MAX)),
        }
    }
}

/// Run `f` once for every index in `0..num`.
///
/// # Panics
/// Panics if `num` is negative.
pub fn run<C, F, R>(t: &mut C, num: impl Into<Count>, f: F)
where
    C: TestContext,
    F: Fn(&mut C, usize) -> R,
    R: Into<TestResult>,
{
    Counted::new().with_context(t).with_num(num).with_test(f).run()
}

/// Run `f` once per positional case, with the case's values as arguments.
///
/// # Panics
/// Panics if any case does not match the parameters of `f`, listing every
/// mismatching case and argument.
pub fn run_with_args<C, F, Sig>(t: &mut C, args: impl IntoIterator<Item = Args>, f: F)
where
    C: TestContext,
    F: ArgsFn<C, Sig>,
{
    WithArgs::new()
        .with_context(t)
        .with_args(args)
        .with_test(f)
        .run::<Sig>()
}

/// Run `f` once per configuration value.
///
/// A configuration names its case through [`CaseNamed`]. Serializable
/// configurations do so with a `CaseName` field or map entry, an empty name
/// counts as no name and leaves the scope at `case {index}`. Other
/// configurations implement [`CaseNamed`] themselves.
pub fn run_with_cfgs<C, Cfg, F, R>(t: &mut C, cfgs: impl IntoIterator<Item = Cfg>, f: F)
where
    C: TestContext,
    Cfg: CaseNamed,
    F: Fn(&mut C, Cfg) -> R,
    R: Into<TestResult>,
{
    WithCfgs::new()
        .with_context(t)
        .with_cfgs(cfgs)
        .with_test(f)
        .run()
}

fn run_case<C: TestContext>(
    t: &mut C,
    name: &CaseName,
    f: impl FnOnce(&mut C) -> TestResult,
) -> bool {
    let name = name.to_string();
    trace!(case = %name, "running case");
    t.run(&name, |t| {
        if let Err(message) = f(t).0 {
            t.error(message);
        }
    })
}

fn panic_on_error(result: Result<(), Error>) {
    if let Err(err) = result {
        panic!("{err}");
    }
}

/// A counted table, see [`run`].
#[derive(Debug)]
pub struct Counted<'t, C, F> {
    t: Option<&'t mut C>,
    num: Count,
    f: Option<F>,
}

impl<'t, C, F> Default for Counted<'t, C, F> {
    fn default() -> Self {
        Self {
            t: None,
            num: Count::default(),
            f: None,
        }
    }
}

impl<'t, C, F> Counted<'t, C, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(self, t: &'t mut C) -> Self {
        Self { t: Some(t), ..self }
    }

    pub fn with_num(self, num: impl Into<Count>) -> Self {
        Self {
            num: num.into(),
            ..self
        }
    }

    pub fn with_test(self, f: F) -> Self {
        Self { f: Some(f), ..self }
    }
}

impl<'t, C, F, R> Counted<'t, C, F>
where
    C: TestContext,
    F: Fn(&mut C, usize) -> R,
    R: Into<TestResult>,
{
    /// Run all cases, or report why the table cannot run.
    ///
    /// A missing context is reported as `t`, a missing test function as `f`.
    pub fn try_run(self) -> Result<(), Error> {
        let (t, f) = match (self.t, self.f) {
            (Some(t), Some(f)) => (t, f),
            (t, f) => return guard([missing(&t, "t"), missing(&f, "f")]),
        };
        let num = self.num.cases()?;

        debug!(cases = num, "running counted table");
        for index in 0..num {
            run_case(t, &CaseName::new(index, None), |t| f(t, index).into());
        }
        Ok(())
    }

    /// Like [`try_run`](Self::try_run), but panics with the error.
    pub fn run(self) {
        panic_on_error(self.try_run())
    }
}

/// A table of positional cases, see [`run_with_args`].
#[derive(Debug)]
pub struct WithArgs<'t, C, F> {
    t: Option<&'t mut C>,
    args: Option<Vec<Args>>,
    f: Option<F>,
}

impl<'t, C, F> Default for WithArgs<'t, C, F> {
    fn default() -> Self {
        Self {
            t: None,
            args: None,
            f: None,
        }
    }
}

impl<'t, C, F> WithArgs<'t, C, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(self, t: &'t mut C) -> Self {
        Self { t: Some(t), ..self }
    }

    pub fn with_args(self, args: impl IntoIterator<Item = Args>) -> Self {
        Self {
            args: Some(args.into_iter().collect()),
            ..self
        }
    }

    pub fn with_test(self, f: F) -> Self {
        Self { f: Some(f), ..self }
    }
}

impl<'t, C: TestContext, F> WithArgs<'t, C, F> {
    /// Validate every case, then run all of them, or report why the table cannot run.
    ///
    /// Missing inputs are reported as `t`, `args` and `f`.
    pub fn try_run<Sig>(self) -> Result<(), Error>
    where
        F: ArgsFn<C, Sig>,
    {
        let (t, args, f) = match (self.t, self.args, self.f) {
            (Some(t), Some(args), Some(f)) => (t, args, f),
            (t, args, f) => {
                return guard([
                    missing(&t, "t"),
                    missing(&args, "args"),
                    missing(&f, "f"),
                ]);
            }
        };

        let cases = bind_cases::<C, F, Sig>(args)?;
        debug!(cases = cases.len(), "running table");
        for case in cases {
            run_case(t, &case.name, |t| f.invoke(t, case.bound));
        }
        Ok(())
    }

    /// Like [`try_run`](Self::try_run), but panics with the error.
    pub fn run<Sig>(self)
    where
        F: ArgsFn<C, Sig>,
    {
        panic_on_error(self.try_run::<Sig>())
    }
}

/// A table of configuration values, see [`run_with_cfgs`].
#[derive(Debug)]
pub struct WithCfgs<'t, C, Cfg, F> {
    t: Option<&'t mut C>,
    cfgs: Option<Vec<Cfg>>,
    f: Option<F>,
}

impl<'t, C, Cfg, F> Default for WithCfgs<'t, C, Cfg, F> {
    fn default() -> Self {
        Self {
            t: None,
            cfgs: None,
            f: None,
        }
    }
}

impl<'t, C, Cfg, F> WithCfgs<'t, C, Cfg, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(self, t: &'t mut C) -> Self {
        Self { t: Some(t), ..self }
    }

    pub fn with_cfgs(self, cfgs: impl IntoIterator<Item = Cfg>) -> Self {
        Self {
            cfgs: Some(cfgs.into_iter().collect()),
            ..self
        }
    }

    pub fn with_test(self, f: F) -> Self {
        Self { f: Some(f), ..self }
    }
}

impl<'t, C, Cfg, F, R> WithCfgs<'t, C, Cfg, F>
where
    C: TestContext,
    Cfg: CaseNamed,
    F: Fn(&mut C, Cfg) -> R,
    R: Into<TestResult>,
{
    /// Run all cases, or report why the table cannot run.
    ///
    /// Missing inputs are reported as `t`, `cfgs` and `f`.
    pub fn try_run(self) -> Result<(), Error> {
        let (t, cfgs, f) = match (self.t, self.cfgs, self.f) {
            (Some(t), Some(cfgs), Some(f)) => (t, cfgs, f),
            (t, cfgs, f) => {
                return guard([
                    missing(&t, "t"),
                    missing(&cfgs, "cfgs"),
                    missing(&f, "f"),
                ]);
            }
        };

        debug!(cases = cfgs.len(), "running configuration table");
        for (index, cfg) in cfgs.into_iter().enumerate() {
            let name = CaseName::new(index, cfg.case_name());
            run_case(t, &name, |t| f(t, cfg).into());
        }
        Ok(())
    }

    /// Like [`try_run`](Self::try_run), but panics with the error.
    pub fn run(self) {
        panic_on_error(self.try_run())
    }
}

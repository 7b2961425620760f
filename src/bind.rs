//! Binding positional cases to a test function's parameters.
//!
//! A test function for [`run_with_args`](crate::table::run_with_args) takes
//! the context first and any number of [`Coerce`] parameters after it. That
//! it takes the context at all is checked by the compiler. Whether every case
//! provides one value per parameter, and whether each value coerces into its
//! parameter type, is only known at runtime and checked here.
//!
//! Binding is all or nothing: [`bind_cases`] validates every case and either
//! returns a bound call for each of them or every mismatch it found.

use std::any;

use tracing::debug;

use crate::{
    case_name::{CaseName, take_marker},
    coerce::{Coerce, coerce},
    error::{Error, Mismatch},
    test::TestResult,
    value::{Args, Value},
};

/// A test function that can be called with a bound positional case.
///
/// Implemented for every `Fn(&mut C, A1, .., An) -> R` with up to twelve
/// parameters after the context, where each `Ai` implements [`Coerce`] and
/// `R` converts into a [`TestResult`]. `Sig` is a marker for the signature
/// (`fn(A1, .., An) -> R`) and is always inferred.
pub trait ArgsFn<C, Sig> {
    /// The coerced arguments, ready to be passed to the function.
    type Bound;

    /// Number of parameters after the context.
    const ARITY: usize;

    /// The parameter types after the context, as used in diagnostics.
    fn param_types() -> Vec<String>;

    /// Coerce exactly [`ARITY`](Self::ARITY) values into the parameter types.
    ///
    /// Every value that does not coerce is reported, wrapped with its
    /// parameter position. The context is position `0`, so the first value is
    /// position `1`.
    fn bind(values: Vec<Value>) -> Result<Self::Bound, Vec<Mismatch>>;

    fn invoke(&self, t: &mut C, bound: Self::Bound) -> TestResult;
}

/// A validated case, ready to run.
#[derive(Debug)]
pub struct BoundCase<B> {
    pub name: CaseName,
    pub bound: B,
}

/// Validate all cases against `F`.
///
/// A case with the wrong number of values is reported once and not coerced.
/// Cases are never skipped, so a defect in the last case is found even when
/// the first case is broken as well.
pub fn bind_cases<C, F, Sig>(
    cases: impl IntoIterator<Item = Args>,
) -> Result<Vec<BoundCase<F::Bound>>, Error>
where
    F: ArgsFn<C, Sig>,
{
    let func = any::type_name::<F>();
    let mut bound_cases = Vec::new();
    let mut mismatches = Vec::new();

    for (index, mut args) in cases.into_iter().enumerate() {
        let custom = take_marker(&mut args);
        if args.len() != F::ARITY {
            mismatches.push(
                Mismatch::Arity {
                    func,
                    expected: F::ARITY,
                    given: args.len(),
                }
                .in_case(index),
            );
            continue;
        }

        match F::bind(args.0) {
            Ok(bound) => bound_cases.push(BoundCase {
                name: CaseName::new(index, custom),
                bound,
            }),
            Err(errs) => mismatches.extend(errs.into_iter().map(|err| err.in_case(index))),
        }
    }

    if let Some(err) = Error::join(mismatches) {
        debug!(func, params = ?F::param_types(), mismatches = err.len(), "rejected table");
        return Err(err);
    }

    Ok(bound_cases)
}

macro_rules! impl_args_fn {
    ($arity:literal; $($param:ident $value:ident),*) => {
        impl<C, F, R, $($param,)*> ArgsFn<C, fn($($param),*) -> R> for F
        where
            F: Fn(&mut C, $($param),*) -> R,
            R: Into<TestResult>,
            $($param: Coerce,)*
        {
            type Bound = ($($param,)*);

            const ARITY: usize = $arity;

            fn param_types() -> Vec<String> {
                vec![$($param::type_name().into_owned()),*]
            }

            #[allow(unused_mut, unused_variables)]
            fn bind(values: Vec<Value>) -> Result<Self::Bound, Vec<Mismatch>> {
                let mut values = values.into_iter();
                let mut position = 0;
                let mut mismatches = Vec::new();
                $(
                    position += 1;
                    let $value = match coerce::<$param>(values.next().unwrap_or_default()) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            mismatches.push(Mismatch::from(err).in_arg(position));
                            None
                        }
                    };
                )*

                match ($($value,)*) {
                    ($(Some($value),)*) => Ok(($($value,)*)),
                    #[allow(unreachable_patterns)]
                    _ => Err(mismatches),
                }
            }

            fn invoke(&self, t: &mut C, ($($value,)*): Self::Bound) -> TestResult {
                (self)(t, $($value),*).into()
            }
        }
    };
}

impl_args_fn!(0;);
impl_args_fn!(1; A1 a1);
impl_args_fn!(2; A1 a1, A2 a2);
impl_args_fn!(3; A1 a1, A2 a2, A3 a3);
impl_args_fn!(4; A1 a1, A2 a2, A3 a3, A4 a4);
impl_args_fn!(5; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_args_fn!(6; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_args_fn!(7; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_args_fn!(8; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);
impl_args_fn!(9; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9);
impl_args_fn!(10; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9, A10 a10);
impl_args_fn!(11; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9, A10 a10, A11 a11);
impl_args_fn!(12; A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8, A9 a9, A10 a10, A11 a11, A12 a12);

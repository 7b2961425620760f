//! Table driven tests.
//!
//! A table is a list of cases run against one test function, each case in its
//! own named scope of a test context:
//!
//! ```
//! use tabtest::{T, args};
//!
//! fn divide(a: i64, b: i64) -> Result<i64, String> {
//!     match b {
//!         0 => Err("cannot divide by zero".into()),
//!         b => Ok(a / b),
//!     }
//! }
//!
//! tabtest::test("divide", |t| {
//!     tabtest::run_with_args(
//!         t,
//!         [
//!             args![4, 2, 2, ()],
//!             args!["@bad_division", 1, 0, 0, "cannot divide by zero"],
//!         ],
//!         |t: &mut T, a: i64, b: i64, want: i64, want_err: Option<String>| {
//!             match (divide(a, b), want_err) {
//!                 (Ok(got), None) if got == want => {}
//!                 (Err(got), Some(want_err)) if got == want_err => {}
//!                 (got, want_err) => t.error(format!("got {got:?}, want {want} / {want_err:?}")),
//!             }
//!         },
//!     );
//! });
//! ```
//!
//! Tables come in three shapes, see [`run`], [`run_with_args`] and
//! [`run_with_cfgs`]. A malformed table is rejected as a whole before any case
//! runs, with one [`Error`] listing every problem.
//!
//! Cases run in a [`TestContext`]. [`T`] is the bundled one, run it with
//! [`suite`] for formatted output or with [`test()`] inside a regular
//! `#[test]`.

pub mod bind;
pub mod case_name;
pub mod coerce;
pub mod context;
pub mod error;
pub mod formatter;
pub mod guard;
pub mod outcome;
pub mod panic;
pub mod t;
pub mod table;
pub mod value;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

pub use case_name::CaseNamed;
pub use coerce::Coerce;
pub use context::TestContext;
pub use error::{Error, Mismatch};
pub use t::T;
pub use table::{run, run_with_args, run_with_cfgs};
pub use value::{Args, Value};

#[cfg(test)]
mod test_support;

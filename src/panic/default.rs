use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::panic::{Fatal, PanicHandler, Unwound, payload_as_string};

/// The default [`PanicHandler`] used by [`suite`](crate::suite).
///
/// Catches every panic of a scope body, similar to how the built in Rust test
/// harness catches panics of a test. The scope is then reported as failed with
/// the panic message, and the next scope runs normally.
///
/// State the body touched before it panicked is kept as is, a scope that
/// panicked is never run again.
#[derive(Debug, Default, Clone)]
pub struct DefaultPanicHandler;

impl PanicHandler for DefaultPanicHandler {
    fn handle(&self, f: Box<dyn FnOnce() + '_>) -> Result<(), Unwound> {
        catch_unwind(AssertUnwindSafe(f)).map_err(|err| match err.is::<Fatal>() {
            true => Unwound::Fatal,
            false => Unwound::Panicked(payload_as_string(err)),
        })
    }
}

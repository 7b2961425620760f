use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

use crate::panic::{Fatal, PanicHandler, Unwound};

/// A [`PanicHandler`] that does not isolate panics.
///
/// A panic in any scope unwinds through the whole suite, like a panic in a
/// plain test function would. Only the unwind of
/// [`T::fatal`](crate::t::T::fatal) is stopped, since it is part of normal
/// control flow.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoPanicHandler;

impl PanicHandler for NoPanicHandler {
    fn handle(&self, f: Box<dyn FnOnce() + '_>) -> Result<(), Unwound> {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(()) => Ok(()),
            Err(err) if err.is::<Fatal>() => Err(Unwound::Fatal),
            Err(err) => resume_unwind(err),
        }
    }
}

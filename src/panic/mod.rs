//! Panic handling for scopes.
//!
//! Test functions can panic, and a panic in one table case should not take
//! down the cases after it. A panic handler executes the body of a scope and
//! reports whether it unwound, so that [`T`](crate::t::T) can record the
//! panic as a failure of that scope only.
//!
//! [`T::fatal`](crate::t::T::fatal) also unwinds, with a [`Fatal`] payload.
//! Every handler must stop that unwind at the scope it was raised in.
//!
//! Implement [`PanicHandler`] to change how scope bodies are executed.

use std::any::Any;

mod default;
pub use default::*;

mod no;
pub use no::*;

/// Payload of the unwind started by [`T::fatal`](crate::t::T::fatal).
///
/// Raised with [`std::panic::resume_unwind`], so the panic hook is not called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fatal;

/// Why a scope body did not return normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unwound {
    /// The body called [`T::fatal`](crate::t::T::fatal).
    Fatal,

    /// The body panicked with this message.
    Panicked(String),
}

/// A strategy for executing the body of a scope.
///
/// The body is boxed so that handlers can be stored behind a trait object by
/// the suite.
pub trait PanicHandler {
    /// Execute `f`, returning how it unwound if it did not return.
    fn handle(&self, f: Box<dyn FnOnce() + '_>) -> Result<(), Unwound>;
}

/// Convert a panic payload into a string.
///
/// This matches the common payload types produced by `panic!` (`&'static str` and `String`).
/// Other payload types are formatted as a generic placeholder.
pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
    err.downcast::<&'static str>()
        .map(|s| s.to_string())
        .or_else(|err| err.downcast::<String>().map(|s| *s))
        .unwrap_or_else(|_| String::from("Box<dyn Any>"))
}

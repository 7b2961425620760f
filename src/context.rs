//! The test context a table runs its cases in.
//!
//! A context is the handle of the host test framework. Tables never create
//! one, they receive it from the caller, open one named nested scope per case
//! and pass the nested handle on to the test function.
//!
//! [`T`](crate::t::T) is the context bundled with this crate. Implement
//! [`TestContext`] to run tables inside another harness.

use std::fmt::Display;

pub trait TestContext: Sized {
    /// Run `f` in a new nested scope called `name`.
    ///
    /// The scope's failures must not abort the caller, a failing case is
    /// reported and the next case runs. Returns whether the scope passed.
    fn run<F: FnOnce(&mut Self)>(&mut self, name: &str, f: F) -> bool;

    /// Mark the current scope as failed with a message, and keep running.
    fn error(&mut self, message: impl Display);
}

use std::fmt::Display;

use crate::context::TestContext;

/// A [`TestContext`] that records what a table did with it.
///
/// Scopes run inline on the same recorder, a scope failed if it reported an error.
#[derive(Debug, Default)]
pub struct Recorder {
    pub scopes: Vec<String>,
    pub failed_scopes: Vec<String>,
    pub errors: Vec<String>,
}

impl TestContext for Recorder {
    fn run<F: FnOnce(&mut Self)>(&mut self, name: &str, f: F) -> bool {
        self.scopes.push(name.to_string());
        let errors = self.errors.len();
        f(self);
        let passed = self.errors.len() == errors;
        if !passed {
            self.failed_scopes.push(name.to_string());
        }
        passed
    }

    fn error(&mut self, message: impl Display) {
        self.errors.push(message.to_string());
    }
}

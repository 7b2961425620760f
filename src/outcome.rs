//! What running a scope produced.

use std::time::Duration;

/// The outcome of one scope of a suite.
///
/// Scopes are the root of the suite and every nested scope opened with
/// [`T::run`](crate::t::T::run), one per table case for example.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CaseOutcome {
    /// Full name of the scope, nested names are joined with `/`.
    pub name: String,
    pub status: CaseStatus,
    pub duration: Duration,

    /// Messages passed to [`T::log`](crate::t::T::log).
    pub logs: Vec<String>,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn failed(&self) -> bool {
        self.status.failed()
    }

    /// The failure, if the scope failed.
    pub fn failure(&self) -> Option<&CaseFailure> {
        match &self.status {
            CaseStatus::Passed => None,
            CaseStatus::Failed(failure) => Some(failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed(CaseFailure),
}

impl CaseStatus {
    pub fn passed(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, CaseStatus::Failed(_))
    }
}

/// Why a scope failed.
///
/// Both fields are empty if the scope only failed because one of its nested
/// scopes failed, or because of [`T::fail`](crate::t::T::fail).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFailure {
    /// Messages passed to [`T::error`](crate::t::T::error) and
    /// [`T::fatal`](crate::t::T::fatal), in order.
    pub errors: Vec<String>,

    /// The panic message, if the scope panicked.
    pub panic: Option<String>,
}

impl CaseFailure {
    /// Whether the failure carries its own messages.
    pub fn has_details(&self) -> bool {
        !self.errors.is_empty() || self.panic.is_some()
    }
}

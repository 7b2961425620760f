use crate::formatter::ScopeFormatter;

/// A formatter that produces no output.
///
/// Useful when running a suite inside a plain `#[test]`, where only the
/// [`SuiteReport`](crate::SuiteReport) matters, see
/// [`test`](crate::test()).
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

impl ScopeFormatter for NoFormatter {}

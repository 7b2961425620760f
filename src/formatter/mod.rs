//! Formatting of suite progress.
//!
//! A suite reports to its formatter while it runs: once when it starts, once
//! per finished scope and once with the final [`SuiteReport`]. Scopes finish
//! inside out, so a table case is reported before the scope that ran the
//! table.
//!
//! Every method has a default implementation that writes nothing, a formatter
//! only implements the events it cares about. Errors returned by a formatter
//! do not stop the suite, they are collected in
//! [`SuiteReport::fmt_errors`](crate::SuiteReport::fmt_errors).

use std::io;

use crate::{outcome::CaseOutcome, report::SuiteReport};

pub mod color;

mod no;
pub use no::*;

mod pretty;
pub use pretty::*;

pub trait ScopeFormatter {
    fn fmt_suite_start(&mut self, name: &str) -> io::Result<()> {
        let _ = name;
        Ok(())
    }

    fn fmt_scope_outcome(&mut self, outcome: &CaseOutcome) -> io::Result<()> {
        let _ = outcome;
        Ok(())
    }

    fn fmt_suite_outcomes(&mut self, report: &SuiteReport) -> io::Result<()> {
        let _ = report;
        Ok(())
    }
}

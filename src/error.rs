//! Diagnostics for misused tables.
//!
//! Every problem found while validating a table is a [`Mismatch`]. Mismatches
//! found for different cases or arguments are wrapped with their position and
//! collected into one [`Error`], so a table author sees every defect of a
//! table at once instead of fixing them one run at a time.

use std::{
    borrow::Cow,
    fmt::{self, Display},
};

use thiserror::Error;

use crate::value::Kind;

/// A value could not be converted into the type a parameter requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert from {from} to {to}")]
pub struct CoercionError {
    pub from: Cow<'static, str>,
    pub to: Cow<'static, str>,
}

impl CoercionError {
    pub fn new(from: Kind, to: impl Into<Cow<'static, str>>) -> Self {
        Self {
            from: from.to_string().into(),
            to: to.into(),
        }
    }
}

/// One structured reason why a table cannot be run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Mismatch {
    /// A required input of an entry point was never provided.
    #[error("{name} is missing")]
    Missing { name: &'static str },

    #[error("number of cycles cannot be negative: {num}")]
    NegativeCount { num: i128 },

    /// A positional case does not provide one value per parameter.
    #[error("func {func} takes {expected} argument(s) after the context, but {given} were given")]
    Arity {
        func: &'static str,
        expected: usize,
        given: usize,
    },

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error("case {index}: {source}")]
    Case {
        index: usize,
        #[source]
        source: Box<Mismatch>,
    },

    /// `index` counts function parameters, so the first argument after the context is `1`.
    #[error("arg {index}: {source}")]
    Arg {
        index: usize,
        #[source]
        source: Box<Mismatch>,
    },
}

impl Mismatch {
    pub fn missing(name: &'static str) -> Self {
        Self::Missing { name }
    }

    pub fn in_case(self, index: usize) -> Self {
        Self::Case {
            index,
            source: Box::new(self),
        }
    }

    pub fn in_arg(self, index: usize) -> Self {
        Self::Arg {
            index,
            source: Box::new(self),
        }
    }

    /// The innermost record, with all case and argument wrappers removed.
    pub fn root(&self) -> &Mismatch {
        match self {
            Mismatch::Case { source, .. } | Mismatch::Arg { source, .. } => source.root(),
            other => other,
        }
    }

    /// The case index this record was attributed to, if any.
    pub fn case_index(&self) -> Option<usize> {
        match self {
            Mismatch::Case { index, .. } => Some(*index),
            Mismatch::Arg { source, .. } => source.case_index(),
            _ => None,
        }
    }
}

/// All mismatches found while validating one call of an entry point.
///
/// An `Error` is never empty, use [`Error::join`] to turn a possibly empty
/// list of mismatches into an optional error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    mismatches: Vec<Mismatch>,
}

impl Error {
    pub fn join(mismatches: impl IntoIterator<Item = Mismatch>) -> Option<Self> {
        let mismatches: Vec<_> = mismatches.into_iter().collect();
        match mismatches.is_empty() {
            true => None,
            false => Some(Self { mismatches }),
        }
    }

    /// Like [`join`](Self::join), but as a result that is `Ok` for no mismatches.
    pub fn check(mismatches: impl IntoIterator<Item = Mismatch>) -> Result<(), Self> {
        match Self::join(mismatches) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn into_mismatches(self) -> Vec<Mismatch> {
        self.mismatches
    }

    pub fn len(&self) -> usize {
        self.mismatches.len()
    }
}

impl From<Mismatch> for Error {
    fn from(value: Mismatch) -> Self {
        Self {
            mismatches: vec![value],
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mismatch) in self.mismatches.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "tabtest: {mismatch}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

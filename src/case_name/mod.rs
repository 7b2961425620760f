//! Naming of table cases.
//!
//! Every case runs in a sub-test scope named `case {index}`. A case may add a
//! custom suffix, resulting in `case {index}: {custom}`:
//!
//! - positional cases name themselves with a leading string argument that starts
//!   with [`CASE_NAME_PREFIX`], the marker is removed before binding
//! - configuration cases name themselves with a string field or map entry called
//!   [`CASE_NAME_FIELD`] (or [`CASE_NAME_FIELD_SNAKE`])

use std::fmt::{self, Display};

use serde::Serialize;

use crate::value::{Args, Value};

mod probe;

/// Marks the leading argument of a positional case as its custom name.
pub const CASE_NAME_PREFIX: &str = "@";

/// The field or map key that holds the custom name of a configuration case.
pub const CASE_NAME_FIELD: &str = "CaseName";

/// Snake case spelling of [`CASE_NAME_FIELD`], for structs following Rust naming.
pub const CASE_NAME_FIELD_SNAKE: &str = "case_name";

/// The name of the sub-test scope a case runs in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseName {
    pub index: usize,
    pub custom: Option<String>,
}

impl CaseName {
    /// An empty custom name is treated as no custom name.
    pub fn new(index: usize, custom: Option<String>) -> Self {
        Self {
            index,
            custom: custom.filter(|custom| !custom.is_empty()),
        }
    }
}

impl Display for CaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.custom {
            None => write!(f, "case {}", self.index),
            Some(custom) => write!(f, "case {}: {custom}", self.index),
        }
    }
}

/// Remove a leading name marker from a positional case.
///
/// Only a [`Value::Str`] counts as marker, other values are left in place even
/// if they would coerce into a string.
pub fn take_marker(args: &mut Args) -> Option<String> {
    let custom = args
        .0
        .first()
        .and_then(Value::as_str)
        .and_then(|first| first.strip_prefix(CASE_NAME_PREFIX))
        .map(str::to_string)?;
    args.0.remove(0);
    Some(custom)
}

/// Values that may carry a custom case name.
///
/// Implemented for every [`Serialize`] type. Structs are searched by field
/// name, maps by a key that serializes as a string. The value must serialize
/// as a string as well, newtype wrappers around strings count as strings.
/// Any other shape has no custom name.
///
/// Configurations that cannot be serialized, for example because they hold a
/// function pointer, implement this directly:
///
/// ```
/// use tabtest::CaseNamed;
///
/// struct Cfg {
///     name: &'static str,
///     check: fn(i64) -> bool,
/// }
///
/// impl CaseNamed for Cfg {
///     fn case_name(&self) -> Option<String> {
///         Some(self.name.to_string())
///     }
/// }
///
/// let cfg = Cfg { name: "even", check: |n| n % 2 == 0 };
/// assert!((cfg.check)(4));
/// assert_eq!(cfg.case_name().as_deref(), Some("even"));
/// ```
pub trait CaseNamed {
    fn case_name(&self) -> Option<String>;
}

impl<T: Serialize + ?Sized> CaseNamed for T {
    fn case_name(&self) -> Option<String> {
        probe::find_case_name(self)
    }
}

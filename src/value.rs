//! Dynamically typed case values.
//!
//! A positional case is a list of heterogeneous values. Since Rust has no
//! runtime type introspection for arbitrary values, every argument is carried
//! as a [`Value`]: a small tagged variant with one arm per primitive kind and
//! a [`Dynamic`] arm for everything else.
//!
//! Values are converted back into concrete parameter types by
//! [`coerce`](crate::coerce::coerce).

use std::{
    any::{self, Any},
    borrow::Cow,
    fmt::{self, Debug, Display},
    ops::Deref,
    vec,
};

/// A single dynamically typed argument of a positional case.
#[derive(Debug, Default)]
pub enum Value {
    /// The absent value, coerced into the zero value of the parameter type.
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(String),
    List(Vec<Value>),
    /// Any other `'static` value, passed through when the parameter type matches.
    Dyn(Dynamic),
}

impl Value {
    /// Wrap an arbitrary value so that it can be passed through a positional case.
    pub fn dynamic<T: Any>(value: T) -> Self {
        Self::Dyn(Dynamic::new(value))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The kind of this value, used in diagnostics.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Char(_) => Kind::Char,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Dyn(d) => Kind::Dyn(d.type_name()),
        }
    }
}

/// The kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Uint,
    Float,
    Char,
    Str,
    List,
    Dyn(&'static str),
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Int => "signed integer",
            Kind::Uint => "unsigned integer",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::Str => "string",
            Kind::List => "list",
            Kind::Dyn(name) => name,
        })
    }
}

/// A boxed value of any `'static` type together with its type name.
pub struct Dynamic {
    type_name: &'static str,
    value: Box<dyn Any>,
}

impl Dynamic {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_name: any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Take the inner value out if it is a `T`, otherwise hand `self` back.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|value| Self { type_name, value })
    }

    /// Unbox primitives and strings into their tagged [`Value`], so they can
    /// be converted like any other value of that kind.
    pub fn into_value(self) -> Value {
        macro_rules! unbox {
            ($dynamic:ident: $($ty:ty),* $(,)?) => {$(
                let $dynamic = match $dynamic.downcast::<$ty>() {
                    Ok(value) => return Value::from(value),
                    Err(dynamic) => dynamic,
                };
            )*};
        }

        let dynamic = self;
        unbox!(dynamic: i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
        unbox!(dynamic: f32, f64, bool, char, String, &'static str);
        Value::Dyn(dynamic)
    }
}

impl Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dynamic({})", self.type_name)
    }
}

macro_rules! impl_value_from {
    ($($variant:ident($target:ty) <- [$($source:ty),* $(,)?]),* $(,)?) => {$($(
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                Value::$variant(value as $target)
            }
        }
    )*)*};
}

impl_value_from![
    Int(i64) <- [i8, i16, i32, i64, isize],
    Uint(u64) <- [u8, u16, u32, u64, usize],
    Float(f64) <- [f32, f64],
];

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Value::Str(value.into_owned())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Nil)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Dynamic> for Value {
    fn from(value: Dynamic) -> Self {
        Value::Dyn(value)
    }
}

/// The inputs of one positional case.
///
/// Usually built with the [`args!`](crate::args) macro. A leading string
/// starting with [`CASE_NAME_PREFIX`](crate::case_name::CASE_NAME_PREFIX)
/// names the case instead of being passed to the test function.
#[derive(Debug, Default)]
pub struct Args(pub Vec<Value>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }
}

impl Deref for Args {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Value>> for Args {
    fn from(value: Vec<Value>) -> Self {
        Self(value)
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Args {
    type Item = Value;
    type IntoIter = vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Build an [`Args`] case from a list of expressions convertible into [`Value`].
///
/// ```
/// use tabtest::args;
///
/// let case = args!["@addition", 2, 2, "+", 4, ""];
/// assert_eq!(case.len(), 6);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::value::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::value::Args::from(::std::vec![$($crate::value::Value::from($value)),+])
    };
}

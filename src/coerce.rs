//! Best-effort conversion of [`Value`]s into parameter types.
//!
//! The rules mirror what a Rust `as` cast or a lossless `From` conversion
//! would allow for the value's kind:
//!
//! - [`Value::Nil`] becomes the zero value of the parameter type
//! - a [`Value::Dyn`] holding exactly the parameter type is passed through
//! - a [`Value::Dyn`] holding a primitive or string is unboxed first
//! - everything else goes through [`Coerce::convert`]
//!
//! Numeric conversions are not range checked. `1.9` coerced into an `i32`
//! is `1`, and `300` coerced into a `u8` is `44`, the same as with `as`.

use std::{borrow::Cow, path::PathBuf, rc::Rc, sync::Arc};

use crate::{
    error::CoercionError,
    value::{Kind, Value},
};

/// A type that can be bound to a positional argument.
///
/// Primitives, strings, [`Option`], [`Vec`] and [`Value`] implement this
/// already. Caller types opt in with an empty impl, which accepts only values
/// created with [`Value::dynamic`] of exactly that type:
///
/// ```
/// use tabtest::coerce::Coerce;
///
/// struct Op(char);
/// impl Coerce for Op {}
/// ```
///
/// Newtypes may override [`convert`](Coerce::convert) to accept the values
/// their inner type accepts.
pub trait Coerce: Sized + 'static {
    /// The name used for this type in diagnostics.
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// The value used when a case passes [`Value::Nil`].
    ///
    /// Types without a zero value reject `Nil`.
    fn zero() -> Option<Self> {
        None
    }

    /// Convert a non-nil value, returning `None` if the kind is not convertible.
    fn convert(value: Value) -> Option<Self> {
        let _ = value;
        None
    }
}

/// Coerce `value` into `T`.
pub fn coerce<T: Coerce>(value: Value) -> Result<T, CoercionError> {
    let (kind, value) = match value {
        Value::Nil => {
            return T::zero().ok_or_else(|| CoercionError::new(Kind::Nil, T::type_name()));
        }
        Value::Dyn(dynamic) => match dynamic.downcast::<T>() {
            Ok(value) => return Ok(value),
            Err(dynamic) => (Kind::Dyn(dynamic.type_name()), dynamic.into_value()),
        },
        value => (value.kind(), value),
    };

    T::convert(value).ok_or_else(|| CoercionError::new(kind, T::type_name()))
}

macro_rules! impl_coerce_int {
    ($($ty:ty),* $(,)?) => {$(
        impl Coerce for $ty {
            fn type_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($ty))
            }

            fn zero() -> Option<Self> {
                Some(0)
            }

            fn convert(value: Value) -> Option<Self> {
                match value {
                    Value::Int(v) => Some(v as $ty),
                    Value::Uint(v) => Some(v as $ty),
                    Value::Float(v) => Some(v as $ty),
                    Value::Bool(v) => Some(v as $ty),
                    Value::Char(v) => Some(v as u32 as $ty),
                    _ => None,
                }
            }
        }
    )*};
}

impl_coerce_int![i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize];

macro_rules! impl_coerce_float {
    ($($ty:ty),* $(,)?) => {$(
        impl Coerce for $ty {
            fn type_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($ty))
            }

            fn zero() -> Option<Self> {
                Some(0.0)
            }

            fn convert(value: Value) -> Option<Self> {
                match value {
                    Value::Int(v) => Some(v as $ty),
                    Value::Uint(v) => Some(v as $ty),
                    Value::Float(v) => Some(v as $ty),
                    _ => None,
                }
            }
        }
    )*};
}

impl_coerce_float![f32, f64];

impl Coerce for bool {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }

    fn zero() -> Option<Self> {
        Some(false)
    }

    fn convert(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl Coerce for char {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("char")
    }

    fn zero() -> Option<Self> {
        Some('\0')
    }

    fn convert(value: Value) -> Option<Self> {
        match value {
            Value::Char(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_coerce_string {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl Coerce for $ty {
            fn type_name() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            fn zero() -> Option<Self> {
                Some(<$ty>::from(String::new()))
            }

            fn convert(value: Value) -> Option<Self> {
                match value {
                    Value::Str(v) => Some(<$ty>::from(v)),
                    Value::Char(v) => Some(<$ty>::from(v.to_string())),
                    _ => None,
                }
            }
        }
    )*};
}

impl_coerce_string![
    String => "String",
    Box<str> => "Box<str>",
    Rc<str> => "Rc<str>",
    Arc<str> => "Arc<str>",
    Cow<'static, str> => "Cow<str>",
    PathBuf => "PathBuf",
];

impl<T: Coerce> Coerce for Option<T> {
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("Option<{}>", T::type_name()))
    }

    fn zero() -> Option<Self> {
        Some(None)
    }

    fn convert(value: Value) -> Option<Self> {
        coerce::<T>(value).ok().map(Some)
    }
}

impl<T: Coerce> Coerce for Vec<T> {
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("Vec<{}>", T::type_name()))
    }

    fn zero() -> Option<Self> {
        Some(Vec::new())
    }

    fn convert(value: Value) -> Option<Self> {
        match value {
            Value::List(values) => values
                .into_iter()
                .map(|value| coerce::<T>(value).ok())
                .collect(),
            _ => None,
        }
    }
}

impl Coerce for Value {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Value")
    }

    fn zero() -> Option<Self> {
        Some(Value::Nil)
    }

    fn convert(value: Value) -> Option<Self> {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nil_becomes_zero_value() {
        assert_eq!(coerce::<String>(Value::Nil).unwrap(), "");
        assert_eq!(coerce::<i32>(Value::Nil).unwrap(), 0);
        assert_eq!(coerce::<Option<i32>>(Value::Nil).unwrap(), None);
        assert_eq!(coerce::<Vec<i32>>(Value::Nil).unwrap(), Vec::<i32>::new());
        assert!(coerce::<Value>(Value::Nil).unwrap().is_nil());
    }

    #[test]
    fn nil_is_rejected_without_zero_value() {
        #[derive(Debug)]
        struct Opaque;
        impl Coerce for Opaque {}

        let err = coerce::<Opaque>(Value::Nil).unwrap_err();
        assert_eq!(err.from, "nil");
        assert!(err.to.ends_with("Opaque"));
    }

    #[test]
    fn float_narrows_into_integer() {
        assert_eq!(coerce::<i64>(Value::from(1.1234)).unwrap(), 1);
        assert_eq!(coerce::<i32>(Value::from(32.9)).unwrap(), 32);
        assert_eq!(coerce::<u8>(Value::from(300)).unwrap(), 44);
        assert_eq!(coerce::<f32>(Value::from(2)).unwrap(), 2.0);
    }

    #[test]
    fn float_does_not_become_text() {
        let err = coerce::<String>(Value::from(2.3)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert from float to String");
    }

    #[test]
    fn text_like_types_accept_strings() {
        assert_eq!(coerce::<Box<str>>(Value::from("op")).unwrap().as_ref(), "op");
        assert_eq!(coerce::<String>(Value::from('+')).unwrap(), "+");
        assert_eq!(
            coerce::<PathBuf>(Value::from("a/b")).unwrap(),
            PathBuf::from("a/b")
        );
        assert!(coerce::<bool>(Value::from("true")).is_err());
    }

    #[test]
    fn exact_dynamic_type_passes_through() {
        #[derive(Debug, PartialEq)]
        struct Op(char);
        impl Coerce for Op {}

        assert_eq!(coerce::<Op>(Value::dynamic(Op('/'))).unwrap(), Op('/'));
        assert_eq!(coerce::<u16>(Value::dynamic(7u16)).unwrap(), 7);

        let err = coerce::<Op>(Value::dynamic(7u16)).unwrap_err();
        assert_eq!(err.from, "u16");
    }

    #[test]
    fn boxed_primitives_are_converted_by_kind() {
        assert_eq!(coerce::<i64>(Value::dynamic(3i32)).unwrap(), 3);
        assert_eq!(coerce::<f64>(Value::dynamic(2u8)).unwrap(), 2.0);
        assert_eq!(coerce::<Option<u64>>(Value::dynamic(5i16)).unwrap(), Some(5));
        assert_eq!(
            coerce::<Box<str>>(Value::dynamic(String::from("op")))
                .unwrap()
                .as_ref(),
            "op"
        );
        assert_eq!(coerce::<String>(Value::dynamic("text")).unwrap(), "text");

        let err = coerce::<bool>(Value::dynamic(3i32)).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert from i32 to bool");
    }

    #[test]
    fn containers_convert_element_wise() {
        assert_eq!(
            coerce::<Vec<i32>>(Value::from(vec![1.5, 2.5])).unwrap(),
            vec![1, 2]
        );
        assert_eq!(coerce::<Option<u8>>(Value::from(3)).unwrap(), Some(3));
        let err = coerce::<Vec<bool>>(Value::from(vec![1])).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert from list to Vec<bool>");
    }
}

use serde::{
    Serialize,
    ser::{Impossible, SerializeMap, SerializeStruct, Serializer},
};
use thiserror::Error;

use super::{CASE_NAME_FIELD, CASE_NAME_FIELD_SNAKE};

pub(super) fn find_case_name<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    value.serialize(NameProbe).ok()
}

/// Any shape that does not carry a case name ends the probe with this error.
#[derive(Debug, Error)]
#[error("value carries no case name")]
pub(super) struct NotNamed;

impl serde::ser::Error for NotNamed {
    fn custom<T: std::fmt::Display>(_: T) -> Self {
        NotNamed
    }
}

macro_rules! reject {
    ($($method:ident($($arg:ty),*) -> $ret:ty;)*) => {$(
        fn $method(self, $(_: $arg),*) -> Result<$ret, NotNamed> {
            Err(NotNamed)
        }
    )*};
}

macro_rules! reject_scalars {
    () => {
        reject! {
            serialize_bool(bool) -> String;
            serialize_i8(i8) -> String;
            serialize_i16(i16) -> String;
            serialize_i32(i32) -> String;
            serialize_i64(i64) -> String;
            serialize_u8(u8) -> String;
            serialize_u16(u16) -> String;
            serialize_u32(u32) -> String;
            serialize_u64(u64) -> String;
            serialize_f32(f32) -> String;
            serialize_f64(f64) -> String;
            serialize_char(char) -> String;
            serialize_bytes(&[u8]) -> String;
            serialize_none() -> String;
            serialize_unit() -> String;
            serialize_unit_struct(&'static str) -> String;
            serialize_unit_variant(&'static str, u32, &'static str) -> String;
            serialize_seq(Option<usize>) -> Self::SerializeSeq;
            serialize_tuple(usize) -> Self::SerializeTuple;
            serialize_tuple_struct(&'static str, usize) -> Self::SerializeTupleStruct;
            serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
            serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
        }

        fn serialize_some<T: ?Sized + Serialize>(self, _: &T) -> Result<String, NotNamed> {
            Err(NotNamed)
        }

        fn serialize_newtype_variant<T: ?Sized + Serialize>(
            self,
            _: &'static str,
            _: u32,
            _: &'static str,
            _: &T,
        ) -> Result<String, NotNamed> {
            Err(NotNamed)
        }
    };
}

/// Accepts values of string kind only, looking through newtype wrappers.
struct StrProbe;

impl Serializer for StrProbe {
    type Ok = String;
    type Error = NotNamed;
    type SerializeSeq = Impossible<String, NotNamed>;
    type SerializeTuple = Impossible<String, NotNamed>;
    type SerializeTupleStruct = Impossible<String, NotNamed>;
    type SerializeTupleVariant = Impossible<String, NotNamed>;
    type SerializeMap = Impossible<String, NotNamed>;
    type SerializeStruct = Impossible<String, NotNamed>;
    type SerializeStructVariant = Impossible<String, NotNamed>;

    reject_scalars!();

    reject! {
        serialize_map(Option<usize>) -> Self::SerializeMap;
        serialize_struct(&'static str, usize) -> Self::SerializeStruct;
    }

    fn serialize_str(self, v: &str) -> Result<String, NotNamed> {
        Ok(v.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<String, NotNamed> {
        value.serialize(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Exact,
    Snake,
}

impl Field {
    fn matching(name: &str) -> Option<Self> {
        match name {
            CASE_NAME_FIELD => Some(Field::Exact),
            CASE_NAME_FIELD_SNAKE => Some(Field::Snake),
            _ => None,
        }
    }
}

/// The custom names found in a struct or map. The exact spelling wins.
#[derive(Debug, Default)]
struct Found {
    exact: Option<String>,
    snake: Option<String>,
}

impl Found {
    fn record<T: ?Sized + Serialize>(&mut self, field: Field, value: &T) {
        let slot = match field {
            Field::Exact => &mut self.exact,
            Field::Snake => &mut self.snake,
        };
        if slot.is_none() {
            *slot = value.serialize(StrProbe).ok();
        }
    }

    fn finish(self) -> Result<String, NotNamed> {
        self.exact.or(self.snake).ok_or(NotNamed)
    }
}

/// Looks for the case name field of a struct or entry of a map.
struct NameProbe;

impl Serializer for NameProbe {
    type Ok = String;
    type Error = NotNamed;
    type SerializeSeq = Impossible<String, NotNamed>;
    type SerializeTuple = Impossible<String, NotNamed>;
    type SerializeTupleStruct = Impossible<String, NotNamed>;
    type SerializeTupleVariant = Impossible<String, NotNamed>;
    type SerializeMap = MapProbe;
    type SerializeStruct = StructProbe;
    type SerializeStructVariant = Impossible<String, NotNamed>;

    reject_scalars!();

    fn serialize_str(self, _: &str) -> Result<String, NotNamed> {
        Err(NotNamed)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<String, NotNamed> {
        value.serialize(self)
    }

    fn serialize_map(self, _: Option<usize>) -> Result<MapProbe, NotNamed> {
        Ok(MapProbe::default())
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<StructProbe, NotNamed> {
        Ok(StructProbe::default())
    }
}

#[derive(Debug, Default)]
struct StructProbe {
    found: Found,
}

impl SerializeStruct for StructProbe {
    type Ok = String;
    type Error = NotNamed;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), NotNamed> {
        if let Some(field) = Field::matching(key) {
            self.found.record(field, value);
        }
        Ok(())
    }

    fn end(self) -> Result<String, NotNamed> {
        self.found.finish()
    }
}

#[derive(Debug, Default)]
struct MapProbe {
    pending: Option<Field>,
    found: Found,
}

impl SerializeMap for MapProbe {
    type Ok = String;
    type Error = NotNamed;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), NotNamed> {
        // keys of any other kind are skipped, they can never match
        self.pending = key
            .serialize(StrProbe)
            .ok()
            .and_then(|key| Field::matching(&key));
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), NotNamed> {
        if let Some(field) = self.pending.take() {
            self.found.record(field, value);
        }
        Ok(())
    }

    fn end(self) -> Result<String, NotNamed> {
        self.found.finish()
    }
}

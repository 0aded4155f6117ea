//! Serde deserializer for converting `Value` to Rust types.

use serde::de::{self, DeserializeSeed, IntoDeserializer, Visitor};

use super::error::SerdeError;
use crate::value::Value;

/// Deserializer that converts `Value` to Rust types.
pub struct ValueDeserializer<'de> {
    value: &'de Value,
}

impl<'de> ValueDeserializer<'de> {
    /// Create a new deserializer from a `Value`.
    pub fn new(value: &'de Value) -> Self {
        ValueDeserializer { value }
    }

    /// Deserialize a `Value` to the target type.
    pub fn deserialize<T: de::Deserialize<'de>>(value: &'de Value) -> Result<T, SerdeError> {
        T::deserialize(ValueDeserializer::new(value))
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = SerdeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::Bool(v) => visitor.visit_bool(*v),
            Value::I8(v) => visitor.visit_i8(*v),
            Value::I16(v) => visitor.visit_i16(*v),
            Value::I32(v) => visitor.visit_i32(*v),
            Value::I64(v) => visitor.visit_i64(*v),
            Value::U8(v) => visitor.visit_u8(*v),
            Value::U16(v) => visitor.visit_u16(*v),
            Value::U32(v) => visitor.visit_u32(*v),
            Value::U64(v) => visitor.visit_u64(*v),
            Value::F32(v) => visitor.visit_f32(*v),
            Value::F64(v) | Value::Timestamp(v) => visitor.visit_f64(*v),
            Value::Str(v) => visitor.visit_borrowed_str(v),
            Value::Bytes(v) => visitor.visit_borrowed_bytes(v),
            Value::Seq(_) | Value::Set(_) => self.deserialize_seq(visitor),
            Value::Map(_) | Value::Record(_) => self.deserialize_map(visitor),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value.as_bool() {
            Some(v) => visitor.visit_bool(v),
            None => Err(SerdeError::mismatch("bool", self.value)),
        }
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            // Large unsigned values are range-checked by the visitor.
            Value::U64(v) => visitor.visit_u64(*v),
            other => match other.as_i64() {
                Some(v) => visitor.visit_i64(v),
                None => Err(SerdeError::mismatch("integer", other)),
            },
        }
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value.as_u64() {
            Some(v) => visitor.visit_u64(v),
            // Negative integers reach the visitor so it reports the range error.
            None => match self.value.as_i64() {
                Some(v) => visitor.visit_i64(v),
                None => Err(SerdeError::mismatch("unsigned integer", self.value)),
            },
        }
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::F32(v) => visitor.visit_f32(*v),
            _ => self.deserialize_f64(visitor),
        }
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::F32(v) => visitor.visit_f64(*v as f64),
            Value::F64(v) | Value::Timestamp(v) => visitor.visit_f64(*v),
            other => match other.as_i64() {
                Some(v) => visitor.visit_f64(v as f64),
                None => Err(SerdeError::mismatch("float", other)),
            },
        }
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => visitor.visit_char(c),
                    _ => Err(SerdeError::Custom(format!(
                        "expected a single character, got string of length {}",
                        s.len()
                    ))),
                }
            }
            other => Err(SerdeError::mismatch("char", other)),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::Str(s) => visitor.visit_borrowed_str(s),
            other => Err(SerdeError::mismatch("string", other)),
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::Bytes(b) => visitor.visit_borrowed_bytes(b),
            Value::Seq(_) => self.deserialize_seq(visitor),
            other => Err(SerdeError::mismatch("bytes", other)),
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::Bytes(b) => visitor.visit_byte_buf(b.to_vec()),
            _ => self.deserialize_bytes(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        // Absent fields never reach here; a present value is always Some.
        visitor.visit_some(self)
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::Record(fields) if fields.is_empty() => visitor.visit_unit(),
            other => Err(SerdeError::mismatch("unit", other)),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value.as_elements() {
            Some(items) => visitor.visit_seq(SeqAccess::new(items)),
            None => Err(SerdeError::mismatch("seq", self.value)),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.value {
            Value::Record(fields) => visitor.visit_map(RecordAccess::new(fields)),
            Value::Map(entries) => visitor.visit_map(EntryAccess::new(entries)),
            other => Err(SerdeError::mismatch("map", other)),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self.value {
            // Only unit variants are representable.
            Value::Str(s) => {
                let variant: de::value::StrDeserializer<'_, SerdeError> =
                    s.as_str().into_deserializer();
                visitor.visit_enum(variant)
            }
            _ => Err(SerdeError::UnsupportedType(
                "enums must be encoded as variant names",
            )),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_unit()
    }
}

/// Sequence access for sequences and sets.
struct SeqAccess<'de> {
    iter: std::slice::Iter<'de, Value>,
}

impl<'de> SeqAccess<'de> {
    fn new(items: &'de [Value]) -> Self {
        SeqAccess { iter: items.iter() }
    }
}

impl<'de> de::SeqAccess<'de> for SeqAccess<'de> {
    type Error = SerdeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, Self::Error> {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Map access over record fields, keyed by field name.
struct RecordAccess<'de> {
    iter: std::slice::Iter<'de, (String, Value)>,
    current_value: Option<&'de Value>,
}

impl<'de> RecordAccess<'de> {
    fn new(fields: &'de [(String, Value)]) -> Self {
        RecordAccess {
            iter: fields.iter(),
            current_value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for RecordAccess<'de> {
    type Error = SerdeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, Self::Error> {
        match self.iter.next() {
            Some((name, value)) => {
                self.current_value = Some(value);
                let key: de::value::BorrowedStrDeserializer<'de, SerdeError> =
                    de::value::BorrowedStrDeserializer::new(name);
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> Result<V::Value, Self::Error> {
        let value = self.current_value.take().ok_or_else(|| {
            SerdeError::Custom("next_value_seed called before next_key_seed".into())
        })?;
        seed.deserialize(ValueDeserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Map access over map entries with arbitrary keys.
struct EntryAccess<'de> {
    iter: std::slice::Iter<'de, (Value, Value)>,
    current_value: Option<&'de Value>,
}

impl<'de> EntryAccess<'de> {
    fn new(entries: &'de [(Value, Value)]) -> Self {
        EntryAccess {
            iter: entries.iter(),
            current_value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for EntryAccess<'de> {
    type Error = SerdeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, Self::Error> {
        match self.iter.next() {
            Some((key, value)) => {
                self.current_value = Some(value);
                seed.deserialize(ValueDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> Result<V::Value, Self::Error> {
        let value = self.current_value.take().ok_or_else(|| {
            SerdeError::Custom("next_value_seed called before next_key_seed".into())
        })?;
        seed.deserialize(ValueDeserializer::new(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

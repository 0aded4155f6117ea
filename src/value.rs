use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;

use crate::codec::graph;
use crate::codec::reader::Reader;
use crate::codec::schema::{Field, Schema};
use crate::codec::wire::{put_le, write_varint};
use crate::error::{DecodeError, GraphError};
use crate::traits::{Convertible, Element};

/// Dynamic value tree, similar to `serde_json::Value`.
///
/// Represents any value that can appear in a graph. Its static schema is
/// `any`, so a `Vec<Value>` may hold heterogeneous elements, and
/// `Value::from_bytes` accepts every well-formed graph.
#[derive(Clone, Debug)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Bytes),
    /// Seconds since the Unix epoch.
    Timestamp(f64),
    /// An ordered sequence.
    Seq(Vec<Value>),
    /// Unique elements, in encounter order. Repeats are dropped on encode.
    Set(Vec<Value>),
    /// Unique keys, in encounter order. On encode a repeated key keeps its
    /// first position and its last value.
    Map(Vec<(Value, Value)>),
    /// Named fields in declaration order. Repeated names are merged on encode
    /// the same way as map keys.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// Helper to build a record from name-value pairs.
    pub fn record(fields: Vec<(&str, Value)>) -> Self {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    /// Get a field from a record value, returns None if not a record or field missing.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up a map entry by key.
    pub fn get_key(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Any integer that fits in an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(v) => Some(v as i64),
            Value::I16(v) => Some(v as i64),
            Value::I32(v) => Some(v as i64),
            Value::I64(v) => Some(v),
            Value::U8(v) => Some(v as i64),
            Value::U16(v) => Some(v as i64),
            Value::U32(v) => Some(v as i64),
            Value::U64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Any non-negative integer that fits in a u64.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U8(v) => Some(v as u64),
            Value::U16(v) => Some(v as u64),
            Value::U32(v) => Some(v as u64),
            Value::U64(v) => Some(v),
            _ => self.as_i64().and_then(|v| u64::try_from(v).ok()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(v) => Some(v as f64),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(&v[..]),
            _ => None,
        }
    }

    /// Elements of a sequence or set.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(v) | Value::Set(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Returns a short type description string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Timestamp(_) => "timestamp",
            Value::Seq(_) => "seq",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// The schema written in front of this node: scalars are exact, children
    /// of containers and records are `any`.
    pub fn shallow_schema(&self) -> Schema {
        match self {
            Value::Bool(_) => Schema::Bool,
            Value::I8(_) => Schema::I8,
            Value::I16(_) => Schema::I16,
            Value::I32(_) => Schema::I32,
            Value::I64(_) => Schema::I64,
            Value::U8(_) => Schema::U8,
            Value::U16(_) => Schema::U16,
            Value::U32(_) => Schema::U32,
            Value::U64(_) => Schema::U64,
            Value::F32(_) => Schema::F32,
            Value::F64(_) => Schema::F64,
            Value::Str(_) => Schema::Str,
            Value::Bytes(_) => Schema::Bytes,
            Value::Timestamp(_) => Schema::Timestamp,
            Value::Seq(_) => Schema::seq(Schema::Any),
            Value::Set(_) => Schema::set(Schema::Any),
            Value::Map(_) => Schema::map(Schema::Any, Schema::Any),
            Value::Record(fields) => Schema::Record(
                last_wins(fields.iter().map(|(name, value)| (name.as_str(), value)))
                    .into_iter()
                    .map(|(name, _)| Field::new(name, Schema::Any))
                    .collect(),
            ),
        }
    }

    /// Append the payload matching `shallow_schema`.
    fn encode_body(&self, out: &mut Vec<u8>) {
        match self {
            Value::Bool(v) => out.push(*v as u8),
            Value::I8(v) => put_le(out, v.to_le_bytes()),
            Value::I16(v) => put_le(out, v.to_le_bytes()),
            Value::I32(v) => put_le(out, v.to_le_bytes()),
            Value::I64(v) => put_le(out, v.to_le_bytes()),
            Value::U8(v) => out.push(*v),
            Value::U16(v) => put_le(out, v.to_le_bytes()),
            Value::U32(v) => put_le(out, v.to_le_bytes()),
            Value::U64(v) => put_le(out, v.to_le_bytes()),
            Value::F32(v) => put_le(out, v.to_bits().to_le_bytes()),
            Value::F64(v) | Value::Timestamp(v) => put_le(out, v.to_bits().to_le_bytes()),
            Value::Str(v) => {
                write_varint(out, v.len() as u64);
                out.extend_from_slice(v.as_bytes());
            }
            Value::Bytes(v) => {
                write_varint(out, v.len() as u64);
                out.extend_from_slice(v);
            }
            Value::Seq(items) => {
                write_varint(out, items.len() as u64);
                for item in items {
                    item.encode_payload(out);
                }
            }
            Value::Set(items) => {
                let mut seen = HashSet::with_capacity(items.len());
                let unique: Vec<&Value> = items.iter().filter(|item| seen.insert(*item)).collect();
                write_varint(out, unique.len() as u64);
                for item in unique {
                    item.encode_payload(out);
                }
            }
            Value::Map(entries) => {
                let unique = last_wins(entries.iter().map(|(key, value)| (key, value)));
                write_varint(out, unique.len() as u64);
                for (key, value) in unique {
                    key.encode_payload(out);
                    value.encode_payload(out);
                }
            }
            Value::Record(fields) => {
                let unique = last_wins(fields.iter().map(|(name, value)| (name.as_str(), value)));
                for (_, value) in unique {
                    value.encode_payload(out);
                }
            }
        }
    }

    /// Decode a node written under `schema`.
    fn read(r: &mut Reader<'_>, schema: &Schema) -> Result<Value, GraphError> {
        let value = match schema {
            Schema::Any => {
                r.enter()?;
                let inner = Schema::read(r)?;
                let value = Value::read(r, &inner)?;
                r.leave();
                value
            }
            // Non-zero is true, as for top-level bool.
            Schema::Bool => Value::Bool(r.read_u8()? != 0),
            Schema::I8 => Value::I8(i8::from_le_bytes(r.read_array()?)),
            Schema::I16 => Value::I16(i16::from_le_bytes(r.read_array()?)),
            Schema::I32 => Value::I32(i32::from_le_bytes(r.read_array()?)),
            Schema::I64 => Value::I64(i64::from_le_bytes(r.read_array()?)),
            Schema::U8 => Value::U8(r.read_u8()?),
            Schema::U16 => Value::U16(u16::from_le_bytes(r.read_array()?)),
            Schema::U32 => Value::U32(u32::from_le_bytes(r.read_array()?)),
            Schema::U64 => Value::U64(u64::from_le_bytes(r.read_array()?)),
            Schema::F32 => Value::F32(f32::from_bits(u32::from_le_bytes(r.read_array()?))),
            Schema::F64 => Value::F64(f64::from_bits(u64::from_le_bytes(r.read_array()?))),
            Schema::Timestamp => {
                Value::Timestamp(f64::from_bits(u64::from_le_bytes(r.read_array()?)))
            }
            Schema::Str => Value::Str(r.read_str()?.to_owned()),
            Schema::Bytes => Value::Bytes(Bytes::copy_from_slice(r.read_bytes()?)),
            Schema::Seq(elem) => Value::Seq(read_items(r, elem)?),
            Schema::Set(elem) => {
                let items = read_items(r, elem)?;
                ensure_unique(items.iter(), "set element")?;
                Value::Set(items)
            }
            Schema::Map(key, value) => {
                r.enter()?;
                let count = r.read_count(key.min_payload_len() + value.min_payload_len())?;
                let mut entries = Vec::with_capacity(count.min(r.remaining()));
                for _ in 0..count {
                    let k = Value::read(r, key)?;
                    let v = Value::read(r, value)?;
                    entries.push((k, v));
                }
                r.leave();
                ensure_unique(entries.iter().map(|(k, _)| k), "map key")?;
                Value::Map(entries)
            }
            Schema::Record(fields) => {
                r.enter()?;
                let mut out = Vec::with_capacity(fields.len());
                for field in fields {
                    out.push((field.name.clone(), Value::read(r, &field.schema)?));
                }
                r.leave();
                Value::Record(out)
            }
        };
        Ok(value)
    }
}

fn read_items(r: &mut Reader<'_>, elem: &Schema) -> Result<Vec<Value>, GraphError> {
    r.enter()?;
    let count = r.read_count(elem.min_payload_len())?;
    let mut items = Vec::with_capacity(count.min(r.remaining()));
    for _ in 0..count {
        items.push(Value::read(r, elem)?);
    }
    r.leave();
    Ok(items)
}

/// Collapse repeated keys: first position, last value.
fn last_wins<'a, K, I>(entries: I) -> Vec<(&'a K, &'a Value)>
where
    K: Eq + Hash + ?Sized,
    I: Iterator<Item = (&'a K, &'a Value)>,
{
    let mut index: HashMap<&K, usize> = HashMap::new();
    let mut out: Vec<(&K, &Value)> = Vec::new();
    for (key, value) in entries {
        match index.get(key) {
            Some(&i) => out[i].1 = value,
            None => {
                index.insert(key, out.len());
                out.push((key, value));
            }
        }
    }
    out
}

fn ensure_unique<'a, I>(values: I, what: &'static str) -> Result<(), GraphError>
where
    I: Iterator<Item = &'a Value>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(GraphError::DuplicateEntry(what));
        }
    }
    Ok(())
}

impl Element for Value {
    fn schema() -> Schema {
        Schema::Any
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        self.shallow_schema().write(out);
        self.encode_body(out);
    }

    fn decode_payload(r: &mut Reader<'_>, encoded: &Schema) -> Result<Self, GraphError> {
        Value::read(r, encoded)
    }
}

impl Convertible for Value {
    fn to_bytes(&self) -> Vec<u8> {
        graph::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(graph::from_bytes(bytes)?)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Bool(v) => v.hash(state),
            Value::I8(v) => v.hash(state),
            Value::I16(v) => v.hash(state),
            Value::I32(v) => v.hash(state),
            Value::I64(v) => v.hash(state),
            Value::U8(v) => v.hash(state),
            Value::U16(v) => v.hash(state),
            Value::U32(v) => v.hash(state),
            Value::U64(v) => v.hash(state),
            Value::F32(v) => v.to_bits().hash(state),
            Value::F64(v) | Value::Timestamp(v) => v.to_bits().hash(state),
            Value::Str(v) => v.hash(state),
            Value::Bytes(v) => v.hash(state),
            Value::Seq(v) | Value::Set(v) => v.hash(state),
            Value::Map(v) => v.hash(state),
            Value::Record(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "\"{}\"", v),
            Value::Bytes(v) => write!(f, "<bytes {}>", v.len()),
            Value::Timestamp(v) => write!(f, "@{}", v),
            Value::Seq(items) => write_list(f, "[", items.iter(), "]"),
            Value::Set(items) => write_list(f, "#{", items.iter(), "}"),
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Record(fields) => {
                write!(f, "{{ ")?;
                for (i, (name, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, v)?;
                }
                write!(f, " }}")
            }
        }
    }
}

fn write_list<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, v) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", v)?;
    }
    write!(f, "{}", close)
}

// Conversion traits
macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    )*};
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
    Bytes => Bytes,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        v.as_i64().ok_or("expected integer")
    }
}

impl TryFrom<Value> for u64 {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        v.as_u64().ok_or("expected unsigned integer")
    }
}

impl TryFrom<Value> for f64 {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        v.as_f64().ok_or("expected float")
    }
}

impl TryFrom<Value> for bool {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        v.as_bool().ok_or("expected bool")
    }
}

impl TryFrom<Value> for String {
    type Error = &'static str;
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Str(s) => Ok(s),
            _ => Err("expected string"),
        }
    }
}

//! Type descriptors embedded at the front of every aggregate graph.

use std::collections::HashSet;
use std::fmt;

use super::reader::Reader;
use super::wire::write_varint;
use crate::error::GraphError;

pub const TAG_ANY: u8 = 0x00;
pub const TAG_BOOL: u8 = 0x01;
pub const TAG_I8: u8 = 0x02;
pub const TAG_I16: u8 = 0x03;
pub const TAG_I32: u8 = 0x04;
pub const TAG_I64: u8 = 0x05;
pub const TAG_U8: u8 = 0x06;
pub const TAG_U16: u8 = 0x07;
pub const TAG_U32: u8 = 0x08;
pub const TAG_U64: u8 = 0x09;
pub const TAG_F32: u8 = 0x0A;
pub const TAG_F64: u8 = 0x0B;
pub const TAG_STR: u8 = 0x0C;
pub const TAG_BYTES: u8 = 0x0D;
pub const TAG_TIMESTAMP: u8 = 0x0E;
pub const TAG_SEQ: u8 = 0x10;
pub const TAG_SET: u8 = 0x11;
pub const TAG_MAP: u8 = 0x12;
pub const TAG_RECORD: u8 = 0x13;

/// The shape of a value inside a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    /// Each value carries its own schema in front of its payload.
    Any,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Str,
    Bytes,
    /// Seconds since the Unix epoch as an f64.
    Timestamp,
    Seq(Box<Schema>),
    Set(Box<Schema>),
    Map(Box<Schema>, Box<Schema>),
    /// Named fields, encoded in declaration order.
    Record(Vec<Field>),
}

/// A named record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

impl Field {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Field {
            name: name.into(),
            schema,
        }
    }
}

impl Schema {
    pub fn seq(elem: Schema) -> Self {
        Schema::Seq(Box::new(elem))
    }

    pub fn set(elem: Schema) -> Self {
        Schema::Set(Box::new(elem))
    }

    pub fn map(key: Schema, value: Schema) -> Self {
        Schema::Map(Box::new(key), Box::new(value))
    }

    /// Wire tag of this schema node.
    pub fn tag(&self) -> u8 {
        match self {
            Schema::Any => TAG_ANY,
            Schema::Bool => TAG_BOOL,
            Schema::I8 => TAG_I8,
            Schema::I16 => TAG_I16,
            Schema::I32 => TAG_I32,
            Schema::I64 => TAG_I64,
            Schema::U8 => TAG_U8,
            Schema::U16 => TAG_U16,
            Schema::U32 => TAG_U32,
            Schema::U64 => TAG_U64,
            Schema::F32 => TAG_F32,
            Schema::F64 => TAG_F64,
            Schema::Str => TAG_STR,
            Schema::Bytes => TAG_BYTES,
            Schema::Timestamp => TAG_TIMESTAMP,
            Schema::Seq(_) => TAG_SEQ,
            Schema::Set(_) => TAG_SET,
            Schema::Map(..) => TAG_MAP,
            Schema::Record(_) => TAG_RECORD,
        }
    }

    /// Width in bytes of a fixed-width payload, `None` for variable width.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            Schema::Bool | Schema::I8 | Schema::U8 => Some(1),
            Schema::I16 | Schema::U16 => Some(2),
            Schema::I32 | Schema::U32 | Schema::F32 => Some(4),
            Schema::I64 | Schema::U64 | Schema::F64 | Schema::Timestamp => Some(8),
            _ => None,
        }
    }

    /// Smallest number of payload bytes any value of this schema occupies.
    ///
    /// Used to reject element counts that cannot fit in the remaining input.
    pub fn min_payload_len(&self) -> usize {
        match self {
            Schema::Any => 1,
            Schema::Str | Schema::Bytes | Schema::Seq(_) | Schema::Set(_) | Schema::Map(..) => 1,
            Schema::Record(fields) => fields.iter().map(|f| f.schema.min_payload_len()).sum(),
            fixed => fixed.fixed_width().unwrap_or(1),
        }
    }

    /// Whether a value encoded with `encoded` can be decoded as `self`.
    ///
    /// Structures must be identical except that `Any` accepts everything.
    pub fn accepts(&self, encoded: &Schema) -> bool {
        match (self, encoded) {
            (Schema::Any, _) => true,
            (Schema::Seq(a), Schema::Seq(b)) | (Schema::Set(a), Schema::Set(b)) => a.accepts(b),
            (Schema::Map(ka, va), Schema::Map(kb, vb)) => ka.accepts(kb) && va.accepts(vb),
            (Schema::Record(a), Schema::Record(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(fa, fb)| fa.name == fb.name && fa.schema.accepts(&fb.schema))
            }
            (Schema::Seq(_), _)
            | (Schema::Set(_), _)
            | (Schema::Map(..), _)
            | (Schema::Record(_), _) => false,
            (a, b) => a == b,
        }
    }

    /// Append the descriptor bytes for this schema.
    pub fn write(&self, out: &mut Vec<u8>) {
        out.push(self.tag());
        match self {
            Schema::Seq(elem) | Schema::Set(elem) => elem.write(out),
            Schema::Map(key, value) => {
                key.write(out);
                value.write(out);
            }
            Schema::Record(fields) => {
                write_varint(out, fields.len() as u64);
                for field in fields {
                    write_varint(out, field.name.len() as u64);
                    out.extend_from_slice(field.name.as_bytes());
                    field.schema.write(out);
                }
            }
            _ => {}
        }
    }

    /// Parse a descriptor from the reader.
    pub fn read(r: &mut Reader<'_>) -> Result<Schema, GraphError> {
        let tag = r.read_u8()?;
        let schema = match tag {
            TAG_ANY => Schema::Any,
            TAG_BOOL => Schema::Bool,
            TAG_I8 => Schema::I8,
            TAG_I16 => Schema::I16,
            TAG_I32 => Schema::I32,
            TAG_I64 => Schema::I64,
            TAG_U8 => Schema::U8,
            TAG_U16 => Schema::U16,
            TAG_U32 => Schema::U32,
            TAG_U64 => Schema::U64,
            TAG_F32 => Schema::F32,
            TAG_F64 => Schema::F64,
            TAG_STR => Schema::Str,
            TAG_BYTES => Schema::Bytes,
            TAG_TIMESTAMP => Schema::Timestamp,
            TAG_SEQ | TAG_SET | TAG_MAP | TAG_RECORD => {
                r.enter()?;
                let schema = match tag {
                    TAG_SEQ => Schema::seq(Schema::read(r)?),
                    TAG_SET => Schema::set(Schema::read(r)?),
                    TAG_MAP => {
                        let key = Schema::read(r)?;
                        Schema::map(key, Schema::read(r)?)
                    }
                    _ => Schema::Record(read_fields(r)?),
                };
                r.leave();
                schema
            }
            other => return Err(GraphError::UnknownTag(other)),
        };
        Ok(schema)
    }
}

fn read_fields(r: &mut Reader<'_>) -> Result<Vec<Field>, GraphError> {
    // Each field needs at least a name length byte and a schema tag.
    let count = r.read_count(2)?;
    let mut fields = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    for _ in 0..count {
        let name = r.read_str()?.to_owned();
        if !seen.insert(name.clone()) {
            return Err(GraphError::DuplicateField(name));
        }
        let schema = Schema::read(r)?;
        fields.push(Field { name, schema });
    }
    Ok(fields)
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Any => write!(f, "any"),
            Schema::Bool => write!(f, "bool"),
            Schema::I8 => write!(f, "i8"),
            Schema::I16 => write!(f, "i16"),
            Schema::I32 => write!(f, "i32"),
            Schema::I64 => write!(f, "i64"),
            Schema::U8 => write!(f, "u8"),
            Schema::U16 => write!(f, "u16"),
            Schema::U32 => write!(f, "u32"),
            Schema::U64 => write!(f, "u64"),
            Schema::F32 => write!(f, "f32"),
            Schema::F64 => write!(f, "f64"),
            Schema::Str => write!(f, "string"),
            Schema::Bytes => write!(f, "bytes"),
            Schema::Timestamp => write!(f, "timestamp"),
            Schema::Seq(elem) => write!(f, "seq<{}>", elem),
            Schema::Set(elem) => write!(f, "set<{}>", elem),
            Schema::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            Schema::Record(fields) => {
                write!(f, "record {{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.schema)?;
                }
                write!(f, " }}")
            }
        }
    }
}

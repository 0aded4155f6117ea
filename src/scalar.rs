//! Fixed-width little-endian codec for numbers and booleans.
//!
//! Every scalar encodes to exactly its width in bytes, always little-endian
//! regardless of the host. Floats keep their exact bit pattern, NaN payloads
//! included. Pointer-width integers always use 8 bytes.

use crate::codec::reader::Reader;
use crate::codec::schema::Schema;
use crate::codec::wire::put_le;
use crate::error::{DecodeError, GraphError};
use crate::traits::{Convertible, Element};

/// Copy `bytes` into a fixed array, failing with `SizeMismatch` on any other length.
pub(crate) fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], DecodeError> {
    bytes.try_into().map_err(|_| DecodeError::SizeMismatch {
        expected: N,
        actual: bytes.len(),
    })
}

macro_rules! impl_integer {
    ($($ty:ty => $schema:ident),* $(,)?) => {$(
        impl Convertible for $ty {
            fn to_bytes(&self) -> Vec<u8> {
                self.to_le_bytes().to_vec()
            }

            fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                Ok(<$ty>::from_le_bytes(fixed(bytes)?))
            }
        }

        impl Element for $ty {
            fn schema() -> Schema {
                Schema::$schema
            }

            fn encode_payload(&self, out: &mut Vec<u8>) {
                put_le(out, self.to_le_bytes());
            }

            fn decode_payload(r: &mut Reader<'_>, _encoded: &Schema) -> Result<Self, GraphError> {
                Ok(<$ty>::from_le_bytes(r.read_array()?))
            }
        }
    )*};
}

impl_integer! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

macro_rules! impl_float {
    ($($ty:ty => $bits:ty, $schema:ident),* $(,)?) => {$(
        impl Convertible for $ty {
            fn to_bytes(&self) -> Vec<u8> {
                self.to_bits().to_le_bytes().to_vec()
            }

            fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                Ok(<$ty>::from_bits(<$bits>::from_le_bytes(fixed(bytes)?)))
            }
        }

        impl Element for $ty {
            fn schema() -> Schema {
                Schema::$schema
            }

            fn encode_payload(&self, out: &mut Vec<u8>) {
                put_le(out, self.to_bits().to_le_bytes());
            }

            fn decode_payload(r: &mut Reader<'_>, _encoded: &Schema) -> Result<Self, GraphError> {
                Ok(<$ty>::from_bits(<$bits>::from_le_bytes(r.read_array()?)))
            }
        }
    )*};
}

impl_float! {
    f32 => u32, F32,
    f64 => u64, F64,
}

// Pointer-width integers travel as their 64-bit counterparts.
macro_rules! impl_pointer_width {
    ($($ty:ident => $wide:ty, $schema:ident),* $(,)?) => {$(
        impl Convertible for $ty {
            fn to_bytes(&self) -> Vec<u8> {
                (*self as $wide).to_le_bytes().to_vec()
            }

            fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                let wide = <$wide>::from_le_bytes(fixed(bytes)?);
                $ty::try_from(wide).map_err(|_| DecodeError::OutOfRange {
                    type_name: stringify!($ty),
                })
            }
        }

        impl Element for $ty {
            fn schema() -> Schema {
                Schema::$schema
            }

            fn encode_payload(&self, out: &mut Vec<u8>) {
                put_le(out, (*self as $wide).to_le_bytes());
            }

            fn decode_payload(r: &mut Reader<'_>, _encoded: &Schema) -> Result<Self, GraphError> {
                let wide = <$wide>::from_le_bytes(r.read_array()?);
                $ty::try_from(wide).map_err(|_| GraphError::OutOfRange(stringify!($ty)))
            }
        }
    )*};
}

impl_pointer_width! {
    isize => i64, I64,
    usize => u64, U64,
}

impl Convertible for bool {
    fn to_bytes(&self) -> Vec<u8> {
        vec![*self as u8]
    }

    /// Any non-zero byte decodes as `true`.
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let [b] = fixed::<1>(bytes)?;
        Ok(b != 0)
    }
}

impl Element for bool {
    fn schema() -> Schema {
        Schema::Bool
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        out.push(*self as u8);
    }

    /// Lenient like `from_bytes`: any non-zero byte is `true`, and re-encodes as `1`.
    fn decode_payload(r: &mut Reader<'_>, _encoded: &Schema) -> Result<Self, GraphError> {
        Ok(r.read_u8()? != 0)
    }
}

//! The conversion contract.

use crate::codec::reader::Reader;
use crate::codec::schema::Schema;
use crate::error::{DecodeError, GraphError};

/// A value that converts to and from a raw byte sequence.
///
/// Scalars, text, raw bytes and timestamps use fixed, untagged layouts.
/// Collections and derived records use the self-describing graph format of
/// [`crate::codec`].
///
/// # Example
///
/// ```rust
/// use convertible::Convertible;
///
/// let bytes = 42i64.to_bytes();
/// assert_eq!(bytes, [0x2a, 0, 0, 0, 0, 0, 0, 0]);
/// assert_eq!(i64::from_bytes(&bytes).unwrap(), 42);
/// ```
pub trait Convertible: Sized {
    /// Encode this value. Never fails.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode a value from bytes produced by `to_bytes`.
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError>;
}

/// A value that can appear inside an aggregate graph.
///
/// Implemented for every scalar, `String`, `Bytes`, both timestamp types,
/// the collection types, `Value`, and `#[derive(Convertible)]` structs.
pub trait Element: Sized {
    /// The schema written in front of values of this type.
    fn schema() -> Schema;

    /// Append the payload (no schema) for this value.
    fn encode_payload(&self, out: &mut Vec<u8>);

    /// Read a payload written under `encoded`.
    ///
    /// Callers guarantee `Self::schema().accepts(encoded)`.
    fn decode_payload(r: &mut Reader<'_>, encoded: &Schema) -> Result<Self, GraphError>;
}

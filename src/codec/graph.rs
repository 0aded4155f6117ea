use crate::error::GraphError;
use crate::limits::DecodeLimits;
use crate::traits::Element;

use super::reader::Reader;
use super::schema::Schema;
use super::wire::*;

/// Encode a value as a complete graph: header, schema, payload.
pub fn to_bytes<T: Element>(value: &T) -> Vec<u8> {
    let mut out = Vec::with_capacity(SIZEOF_HEADER + 16);
    out.push(MAGIC);
    out.push(FORMAT_VERSION);
    T::schema().write(&mut out);
    value.encode_payload(&mut out);
    out
}

/// Decode a complete graph with default limits.
pub fn from_bytes<T: Element>(data: &[u8]) -> Result<T, GraphError> {
    from_bytes_with_limits(data, DecodeLimits::default())
}

/// Decode a complete graph, rejecting input that exceeds `limits`.
pub fn from_bytes_with_limits<T: Element>(
    data: &[u8],
    limits: DecodeLimits,
) -> Result<T, GraphError> {
    decode_graph(data, limits).inspect_err(|e| {
        tracing::trace!(error = %e, len = data.len(), "rejected graph");
    })
}

fn decode_graph<T: Element>(data: &[u8], limits: DecodeLimits) -> Result<T, GraphError> {
    let mut r = Reader::new(data, limits);
    let magic = r.read_u8()?;
    if magic != MAGIC {
        return Err(GraphError::BadMagic(magic));
    }
    let version = r.read_u8()?;
    if version != FORMAT_VERSION {
        return Err(GraphError::UnsupportedVersion(version));
    }

    let encoded = Schema::read(&mut r)?;
    let expected = T::schema();
    if !expected.accepts(&encoded) {
        return Err(mismatch(&expected, &encoded));
    }

    let value = T::decode_payload(&mut r, &encoded)?;
    if r.remaining() > 0 {
        return Err(GraphError::TrailingBytes(r.remaining()));
    }
    Ok(value)
}

/// Read the schema of the graph without decoding the payload.
pub fn peek_schema(data: &[u8]) -> Result<Schema, GraphError> {
    let mut r = Reader::new(data, DecodeLimits::default());
    let magic = r.read_u8()?;
    if magic != MAGIC {
        return Err(GraphError::BadMagic(magic));
    }
    let version = r.read_u8()?;
    if version != FORMAT_VERSION {
        return Err(GraphError::UnsupportedVersion(version));
    }
    Schema::read(&mut r)
}

/// Build a `SchemaMismatch` error.
pub fn mismatch(expected: &Schema, found: &Schema) -> GraphError {
    GraphError::SchemaMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

//! Raw byte sequences pass through unchanged.

use bytes::Bytes;

use crate::codec::reader::Reader;
use crate::codec::schema::Schema;
use crate::codec::wire::{varint_len, write_varint};
use crate::error::{DecodeError, GraphError};
use crate::traits::{Convertible, Element};

impl Convertible for Bytes {
    fn to_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(Bytes::copy_from_slice(bytes))
    }
}

impl Element for Bytes {
    fn schema() -> Schema {
        Schema::Bytes
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        out.reserve(varint_len(self.len() as u64) + self.len());
        write_varint(out, self.len() as u64);
        out.extend_from_slice(self);
    }

    fn decode_payload(r: &mut Reader<'_>, _encoded: &Schema) -> Result<Self, GraphError> {
        Ok(Bytes::copy_from_slice(r.read_bytes()?))
    }
}

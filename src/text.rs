//! UTF-8 text codec.
//!
//! At the top level the empty string is written as a single NUL byte, and
//! decoding strips every leading and trailing NUL. Text that itself starts or
//! ends with NUL characters therefore does not round-trip through
//! `to_bytes`/`from_bytes`. Inside a graph, text is length-prefixed and
//! round-trips unchanged.

use crate::codec::reader::Reader;
use crate::codec::schema::Schema;
use crate::codec::wire::{varint_len, write_varint};
use crate::error::{DecodeError, GraphError};
use crate::traits::{Convertible, Element};

const NUL: char = '\0';

impl Convertible for String {
    fn to_bytes(&self) -> Vec<u8> {
        if self.is_empty() {
            return vec![0];
        }
        self.as_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(text.trim_matches(NUL).to_owned())
    }
}

impl Element for String {
    fn schema() -> Schema {
        Schema::Str
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        out.reserve(varint_len(self.len() as u64) + self.len());
        write_varint(out, self.len() as u64);
        out.extend_from_slice(self.as_bytes());
    }

    fn decode_payload(r: &mut Reader<'_>, _encoded: &Schema) -> Result<Self, GraphError> {
        Ok(r.read_str()?.to_owned())
    }
}

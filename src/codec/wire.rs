//! Little-endian wire format utilities for the graph encoder/decoder.

/// First byte of every aggregate graph.
pub const MAGIC: u8 = 0xC7;
/// Current graph format version.
pub const FORMAT_VERSION: u8 = 1;
/// Size of the graph header (magic + version).
pub const SIZEOF_HEADER: usize = 2;
/// Longest valid LEB128 encoding of a u64.
pub const MAX_VARINT_LEN: usize = 10;

/// Append a fixed-width little-endian value.
#[inline]
pub fn put_le<const N: usize>(out: &mut Vec<u8>, bytes: [u8; N]) {
    out.extend_from_slice(&bytes);
}

/// Copy exactly `N` bytes out of `buf`, or `None` if the length differs.
#[inline]
pub fn exact<const N: usize>(buf: &[u8]) -> Option<[u8; N]> {
    buf.try_into().ok()
}

/// Append an unsigned LEB128 varint.
pub fn write_varint(out: &mut Vec<u8>, mut val: u64) {
    while val >= 0x80 {
        out.push((val as u8) | 0x80);
        val >>= 7;
    }
    out.push(val as u8);
}

/// Decode an unsigned LEB128 varint from the front of `buf`.
///
/// Returns the value and the number of bytes consumed. `Ok(None)` means the
/// buffer ended mid-varint.
pub fn read_varint(buf: &[u8]) -> Result<Option<(u64, usize)>, VarintOverflow> {
    let mut result = 0u64;
    for (i, &byte) in buf.iter().enumerate().take(MAX_VARINT_LEN) {
        let low = (byte & 0x7F) as u64;
        // The tenth byte may only carry the top bit of a u64.
        if i == MAX_VARINT_LEN - 1 && low > 1 {
            return Err(VarintOverflow);
        }
        result |= low << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some((result, i + 1)));
        }
    }
    if buf.len() >= MAX_VARINT_LEN {
        return Err(VarintOverflow);
    }
    Ok(None)
}

/// Marker for a varint longer than 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarintOverflow;

/// Number of bytes `write_varint` produces for `val`.
pub fn varint_len(val: u64) -> usize {
    let bits = 64 - (val | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

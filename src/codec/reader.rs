use crate::error::GraphError;
use crate::limits::{DecodeLimits, MAX_SAFE_DEPTH};

use super::wire::{exact, read_varint};

/// Cursor over graph bytes that enforces `DecodeLimits`.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: usize,
    empty_left: usize,
    limits: DecodeLimits,
}

impl<'a> Reader<'a> {
    /// Nesting is capped at `MAX_SAFE_DEPTH` whatever `limits` asks for.
    pub fn new(buf: &'a [u8], limits: DecodeLimits) -> Self {
        let limits = DecodeLimits {
            max_depth: limits.max_depth.min(MAX_SAFE_DEPTH),
            ..limits
        };
        Reader {
            buf,
            pos: 0,
            depth: 0,
            empty_left: limits.max_empty_elements,
            limits,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], GraphError> {
        if n > self.remaining() {
            return Err(GraphError::Truncated {
                need: self.pos.saturating_add(n),
                have: self.buf.len(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, GraphError> {
        Ok(self.take(1)?[0])
    }

    /// Consume exactly `N` bytes as an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], GraphError> {
        let bytes = self.take(N)?;
        exact(bytes).ok_or(GraphError::Truncated {
            need: self.pos,
            have: self.buf.len(),
        })
    }

    pub fn read_varint(&mut self) -> Result<u64, GraphError> {
        match read_varint(&self.buf[self.pos..]) {
            Ok(Some((value, used))) => {
                self.pos += used;
                Ok(value)
            }
            Ok(None) => Err(GraphError::Truncated {
                need: self.buf.len() + 1,
                have: self.buf.len(),
            }),
            Err(_) => Err(GraphError::VarintOverflow),
        }
    }

    /// Read a length prefix and check it against `max_len`.
    pub fn read_len(&mut self) -> Result<usize, GraphError> {
        let len = self.read_varint()?;
        if len > self.limits.max_len as u64 {
            return Err(GraphError::LengthExceeded {
                limit: self.limits.max_len,
                found: len,
            });
        }
        usize::try_from(len).map_err(|_| GraphError::LengthExceeded {
            limit: self.limits.max_len,
            found: len,
        })
    }

    /// Read an element count where every element occupies at least
    /// `min_elem_len` bytes.
    ///
    /// The returned count is safe to use as a capacity hint. Zero-width
    /// elements are charged against `max_empty_elements` for the whole graph.
    pub fn read_count(&mut self, min_elem_len: usize) -> Result<usize, GraphError> {
        let count = self.read_len()?;
        if min_elem_len == 0 {
            self.empty_left = self
                .empty_left
                .checked_sub(count)
                .ok_or(GraphError::TooManyEmptyElements(self.limits.max_empty_elements))?;
            return Ok(count);
        }
        let need = count.saturating_mul(min_elem_len);
        if need > self.remaining() {
            return Err(GraphError::Truncated {
                need: self.pos.saturating_add(need),
                have: self.buf.len(),
            });
        }
        Ok(count)
    }

    /// Read a length-prefixed byte slice.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], GraphError> {
        let len = self.read_len()?;
        self.take(len)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<&'a str, GraphError> {
        let bytes = self.read_bytes()?;
        Ok(std::str::from_utf8(bytes)?)
    }

    /// Descend one nesting level.
    pub fn enter(&mut self) -> Result<(), GraphError> {
        if self.depth >= self.limits.max_depth {
            return Err(GraphError::DepthExceeded(self.limits.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

//! Bounds-checked forward cursor over an input buffer.

use crate::errors::{CodecError, CodecResult};

/// Forward-only reader that reports underruns as [`CodecError::TruncatedInput`].
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unconsumed tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> CodecResult<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.truncated(1))
    }

    /// Consume one byte.
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consume exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(self.truncated(n));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read an unsigned big-endian integer of `n` bytes (n <= 8).
    pub fn read_be(&mut self, n: usize) -> CodecResult<u64> {
        debug_assert!(n <= 8);
        Ok(self
            .read_bytes(n)?
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    fn truncated(&self, needed: usize) -> CodecError {
        CodecError::TruncatedInput {
            offset: self.pos,
            needed,
            available: self.remaining(),
        }
    }
}

//! Codec error types.

use thiserror::Error;

/// Errors raised while packing or unpacking seal byte structures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Length prefix uses a form other than short, `0x81`, `0x82` or `0x83`
    #[error("Malformed DER length byte 0x{first_byte:02x} at offset {offset}")]
    MalformedLength {
        /// The offending first length byte
        first_byte: u8,
        /// Offset of the length byte in the input
        offset: usize,
    },

    /// Input ended before a structure was complete
    #[error("Truncated input: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedInput {
        /// Offset at which the read started
        offset: usize,
        /// Bytes required
        needed: usize,
        /// Bytes remaining
        available: usize,
    },

    /// Value does not fit in the largest supported DER length form
    #[error("Value too long for DER-TLV: {len} bytes (max 16777215)")]
    ValueTooLong {
        /// Value length in bytes
        len: usize,
    },

    /// Character outside the C40 alphabet
    #[error("Character {0:?} cannot be C40 encoded")]
    InvalidC40Character(char),

    /// Packed C40 word decodes to a value outside the alphabet
    #[error("Invalid C40 word 0x{0:04x}")]
    InvalidC40Value(u16),

    /// Date outside the packable range or not a calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Masked date string not of the form yyyy-MM-dd with optional 'x'
    #[error("Malformed masked date: {0:?}")]
    MalformedMaskedDate(String),

    /// Transport string contains a non-byte code point or bad Base32
    #[error("Invalid transport encoding: {0}")]
    InvalidTransport(String),
}

/// Shorthand result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

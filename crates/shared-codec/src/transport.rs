//! # Transport Strings
//!
//! Text forms handed to and from the barcode rendering side.
//!
//! - **Base-256**: each byte becomes the code point of the same value. Used
//!   for VDS DataMatrix content.
//! - **Base32** (RFC 4648, `=` padding): used for ICAO barcode payloads.

use crate::errors::{CodecError, CodecResult};
use data_encoding::BASE32;

/// Map bytes 1:1 onto code points `U+0000..=U+00FF`.
pub fn to_base256(data: &[u8]) -> String {
    data.iter().map(|&b| char::from(b)).collect()
}

/// Inverse of [`to_base256`]. Fails on code points above `U+00FF`.
pub fn from_base256(text: &str) -> CodecResult<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                CodecError::InvalidTransport(format!("code point U+{:04X} exceeds one byte", c as u32))
            })
        })
        .collect()
}

/// RFC 4648 Base32 with padding.
pub fn to_base32(data: &[u8]) -> String {
    BASE32.encode(data)
}

/// Decode RFC 4648 Base32 with padding.
pub fn from_base32(text: &str) -> CodecResult<Vec<u8>> {
    BASE32
        .decode(text.as_bytes())
        .map_err(|e| CodecError::InvalidTransport(e.to_string()))
}

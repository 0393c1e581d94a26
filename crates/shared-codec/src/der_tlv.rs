//! # DER-TLV Framing
//!
//! Single-byte tags, minimal DER length forms, no outer framing. The caller
//! hands over exactly the bytes of a message zone.
//!
//! | Value length      | Length bytes             |
//! |-------------------|--------------------------|
//! | `<= 0x7F`         | `len`                    |
//! | `<= 0xFF`         | `0x81 len`               |
//! | `<= 0xFFFF`       | `0x82 hi lo`             |
//! | `<= 0xFFFFFF`     | `0x83 b2 b1 b0`          |

use crate::errors::{CodecError, CodecResult};
use crate::reader::ByteReader;
use serde::{Deserialize, Serialize};

/// Tag reserved for the signature in a VDS message zone.
pub const SIGNATURE_TAG: u8 = 0xFF;

/// Largest value length expressible with the `0x83` form.
pub const MAX_VALUE_LEN: usize = 0x00FF_FFFF;

/// A single tag-length-value element. Tags are scoped to a document type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerTlv {
    /// One-byte tag
    pub tag: u8,
    /// Raw value bytes
    pub value: Vec<u8>,
}

impl DerTlv {
    /// Element with the given tag and value.
    pub fn new(tag: u8, value: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    /// Serialize as tag, length, value.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        encode(self.tag, &self.value)
    }

    /// Size of the encoded element.
    pub fn encoded_len(&self) -> CodecResult<usize> {
        Ok(1 + encode_length(self.value.len())?.len() + self.value.len())
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encode one element.
pub fn encode(tag: u8, value: &[u8]) -> CodecResult<Vec<u8>> {
    let len_bytes = encode_length(value.len())?;
    let mut out = Vec::with_capacity(1 + len_bytes.len() + value.len());
    out.push(tag);
    out.extend_from_slice(&len_bytes);
    out.extend_from_slice(value);
    Ok(out)
}

/// Encode a sequence of elements back to back.
pub fn encode_all(tlvs: &[DerTlv]) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    for tlv in tlvs {
        out.extend(tlv.encode()?);
    }
    Ok(out)
}

/// Encode a length in the minimal DER form.
pub fn encode_length(len: usize) -> CodecResult<Vec<u8>> {
    match len {
        0..=0x7F => Ok(vec![len as u8]),
        0x80..=0xFF => Ok(vec![0x81, len as u8]),
        0x100..=0xFFFF => Ok(vec![0x82, (len >> 8) as u8, len as u8]),
        0x1_0000..=MAX_VALUE_LEN => Ok(vec![0x83, (len >> 16) as u8, (len >> 8) as u8, len as u8]),
        _ => Err(CodecError::ValueTooLong { len }),
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode every element until the buffer is exhausted.
pub fn decode_all(data: &[u8]) -> CodecResult<Vec<DerTlv>> {
    let mut reader = ByteReader::new(data);
    let mut tlvs = Vec::new();
    while !reader.is_empty() {
        tlvs.push(read_tlv(&mut reader)?);
    }
    Ok(tlvs)
}

/// Read one element from the reader.
pub fn read_tlv(reader: &mut ByteReader<'_>) -> CodecResult<DerTlv> {
    let tag = reader.read_u8()?;
    let len = read_length(reader)?;
    let value = reader.read_bytes(len)?.to_vec();
    Ok(DerTlv { tag, value })
}

/// Read a DER length field.
pub fn read_length(reader: &mut ByteReader<'_>) -> CodecResult<usize> {
    let offset = reader.position();
    let first = reader.read_u8()?;
    let len = match first {
        0x00..=0x7F => u64::from(first),
        0x81 => reader.read_be(1)?,
        0x82 => reader.read_be(2)?,
        0x83 => reader.read_be(3)?,
        _ => {
            return Err(CodecError::MalformedLength {
                first_byte: first,
                offset,
            })
        }
    };
    Ok(len as usize)
}

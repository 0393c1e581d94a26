//! # DER Signature Conversion
//!
//! Seals store raw `r || s`; X.509 tooling expects
//! `SEQUENCE { INTEGER r, INTEGER s }`.

use crate::CryptoError;
use shared_codec::der_tlv;

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

/// Convert a raw `r || s` signature to DER.
pub fn raw_to_der(raw: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if raw.is_empty() || raw.len() % 2 != 0 {
        return Err(CryptoError::InvalidSignatureFormat);
    }
    let (r, s) = raw.split_at(raw.len() / 2);

    let mut body = integer(r)?;
    body.extend(integer(s)?);
    der_tlv::encode(SEQUENCE_TAG, &body).map_err(|e| CryptoError::MalformedDerSignature(e.to_string()))
}

/// Convert a DER signature to raw `r || s`, each left-padded to `field_size_bytes`.
pub fn der_to_raw(der: &[u8], field_size_bytes: usize) -> Result<Vec<u8>, CryptoError> {
    let malformed = |msg: &str| CryptoError::MalformedDerSignature(msg.to_string());

    let outer = der_tlv::decode_all(der).map_err(|e| CryptoError::MalformedDerSignature(e.to_string()))?;
    let [sequence] = outer.as_slice() else {
        return Err(malformed("expected a single SEQUENCE"));
    };
    if sequence.tag != SEQUENCE_TAG {
        return Err(malformed("outer tag is not SEQUENCE"));
    }

    let parts = der_tlv::decode_all(&sequence.value)
        .map_err(|e| CryptoError::MalformedDerSignature(e.to_string()))?;
    let [r, s] = parts.as_slice() else {
        return Err(malformed("expected two INTEGERs"));
    };
    if r.tag != INTEGER_TAG || s.tag != INTEGER_TAG {
        return Err(malformed("component is not an INTEGER"));
    }

    let mut raw = Vec::with_capacity(2 * field_size_bytes);
    raw.extend(left_pad(&r.value, field_size_bytes)?);
    raw.extend(left_pad(&s.value, field_size_bytes)?);
    Ok(raw)
}

/// Minimal positive INTEGER encoding of an unsigned big-endian value.
fn integer(value: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let first_nonzero = value.iter().position(|&b| b != 0).unwrap_or(value.len());
    let trimmed = &value[first_nonzero..];

    let mut content = Vec::with_capacity(trimmed.len() + 1);
    if trimmed.first().map_or(true, |&b| b & 0x80 != 0) {
        content.push(0x00);
    }
    content.extend_from_slice(trimmed);
    der_tlv::encode(INTEGER_TAG, &content).map_err(|e| CryptoError::MalformedDerSignature(e.to_string()))
}

fn left_pad(value: &[u8], width: usize) -> Result<Vec<u8>, CryptoError> {
    let first_nonzero = value.iter().position(|&b| b != 0).unwrap_or(value.len());
    let trimmed = &value[first_nonzero..];
    if trimmed.len() > width {
        return Err(CryptoError::MalformedDerSignature(format!(
            "integer of {} bytes exceeds field size {width}",
            trimmed.len()
        )));
    }
    let mut out = vec![0u8; width - trimmed.len()];
    out.extend_from_slice(trimmed);
    Ok(out)
}

//! # Message Values
//!
//! One sum type for every coding. [`MessageValue::from_bytes`] is the single
//! decode entry point; [`MessageValue::to_bytes`] checks the variant against
//! the definition's coding before packing.

use crate::domain::coding::Coding;
use crate::domain::errors::{RegistryError, RegistryResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_codec::{c40, date};
use std::fmt;

/// A typed message value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageValue {
    Byte(u8),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    /// `yyyy-MM-dd` with `x` for unknown digits
    MaskedDate(String),
    /// MRZ text, lines separated by `\n` once formatted
    Mrz(String),
}

impl MessageValue {
    /// Decode raw message bytes according to `coding`.
    ///
    /// `Coding::Unknown` has no value representation and is rejected.
    pub fn from_bytes(coding: Coding, bytes: &[u8]) -> RegistryResult<Self> {
        let value = match coding {
            Coding::C40 => MessageValue::Text(c40::decode(bytes)?),
            Coding::Mrz => MessageValue::Mrz(c40::decode(bytes)?),
            Coding::Utf8String => MessageValue::Text(
                String::from_utf8(bytes.to_vec()).map_err(|e| RegistryError::InvalidValue {
                    coding,
                    reason: e.to_string(),
                })?,
            ),
            Coding::Bytes => MessageValue::Bytes(bytes.to_vec()),
            Coding::Byte => match bytes {
                [b] => MessageValue::Byte(*b),
                _ => {
                    return Err(RegistryError::InvalidValue {
                        coding,
                        reason: format!("expected 1 byte, got {}", bytes.len()),
                    })
                }
            },
            Coding::Date => MessageValue::Date(date::decode_date(bytes)?),
            Coding::MaskedDate => MessageValue::MaskedDate(date::decode_masked_date(bytes)?),
            Coding::Unknown => {
                return Err(RegistryError::InvalidValue {
                    coding,
                    reason: "coding has no value representation".to_string(),
                })
            }
        };
        Ok(value)
    }

    /// Pack the value for a message named `name` with `coding`.
    pub fn to_bytes(&self, name: &str, coding: Coding) -> RegistryResult<Vec<u8>> {
        let bytes = match (coding, self) {
            (Coding::C40, MessageValue::Text(s) | MessageValue::Mrz(s)) => c40::encode(s)?,
            (Coding::Mrz, MessageValue::Mrz(s) | MessageValue::Text(s)) => {
                c40::encode(&strip_line_breaks(s))?
            }
            (Coding::Utf8String, MessageValue::Text(s)) => s.as_bytes().to_vec(),
            (Coding::Bytes, MessageValue::Bytes(b)) => b.clone(),
            (Coding::Byte, MessageValue::Byte(b)) => vec![*b],
            (Coding::Date, MessageValue::Date(d)) => date::encode_date(*d)?.to_vec(),
            (Coding::MaskedDate, MessageValue::MaskedDate(s)) => {
                date::encode_masked_date(s)?.to_vec()
            }
            _ => {
                return Err(RegistryError::ValueCodingMismatch {
                    name: name.to_string(),
                    coding,
                    value_kind: self.kind(),
                })
            }
        };
        Ok(bytes)
    }

    /// Length used for constraint checks, if the variant has one.
    pub fn constraint_length(&self) -> Option<usize> {
        match self {
            MessageValue::Text(s) => Some(s.chars().count()),
            MessageValue::Mrz(s) => Some(strip_line_breaks(s).chars().count()),
            MessageValue::Bytes(b) => Some(b.len()),
            MessageValue::Byte(_) | MessageValue::Date(_) | MessageValue::MaskedDate(_) => None,
        }
    }

    /// Lay out an MRZ value as OCR lines of `total_length` characters.
    pub fn into_mrz_layout(self, total_length: usize) -> Self {
        match self {
            MessageValue::Mrz(raw) => MessageValue::Mrz(c40::format_mrz(&raw, total_length)),
            other => other,
        }
    }

    /// Variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageValue::Byte(_) => "Byte",
            MessageValue::Text(_) => "Text",
            MessageValue::Bytes(_) => "Bytes",
            MessageValue::Date(_) => "Date",
            MessageValue::MaskedDate(_) => "MaskedDate",
            MessageValue::Mrz(_) => "Mrz",
        }
    }
}

impl fmt::Display for MessageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageValue::Byte(b) => write!(f, "{b}"),
            MessageValue::Text(s) | MessageValue::MaskedDate(s) | MessageValue::Mrz(s) => {
                f.write_str(s)
            }
            MessageValue::Bytes(b) => {
                for byte in b {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            MessageValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

fn strip_line_breaks(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

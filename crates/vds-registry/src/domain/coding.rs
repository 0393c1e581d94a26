//! # Codings and Constraints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte representation of a message value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Coding {
    /// C40-packed upper-case text
    C40,
    /// C40-packed MRZ, laid out as OCR lines on decode
    #[serde(rename = "MRZ")]
    Mrz,
    /// Raw UTF-8 text
    Utf8String,
    /// Opaque bytes
    Bytes,
    /// Single byte
    Byte,
    /// Packed `MMDDYYYY` date
    Date,
    /// Masked date with unknown digits
    MaskedDate,
    /// Not decodable; messages with this coding are skipped on decode
    Unknown,
}

impl Coding {
    pub fn name(&self) -> &'static str {
        match self {
            Coding::C40 => "C40",
            Coding::Mrz => "MRZ",
            Coding::Utf8String => "UTF8_STRING",
            Coding::Bytes => "BYTES",
            Coding::Byte => "BYTE",
            Coding::Date => "DATE",
            Coding::MaskedDate => "MASKED_DATE",
            Coding::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Length bounds for a message value.
///
/// Text lengths count characters (MRZ line breaks excluded), everything else
/// counts bytes. `max_length` on an MRZ message is also the OCR layout length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
}

impl Constraints {
    /// No bounds.
    pub const NONE: Constraints = Constraints {
        min_length: None,
        max_length: None,
    };

    /// Exactly `len`.
    pub const fn fixed(len: usize) -> Self {
        Self {
            min_length: Some(len),
            max_length: Some(len),
        }
    }

    /// At most `len`.
    pub const fn max(len: usize) -> Self {
        Self {
            min_length: None,
            max_length: Some(len),
        }
    }

    /// `Err(detail)` when `length` is out of bounds.
    pub fn check(&self, length: usize) -> Result<(), String> {
        if let Some(min) = self.min_length {
            if length < min {
                return Err(format!("minimum is {min}"));
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return Err(format!("maximum is {max}"));
            }
        }
        Ok(())
    }
}

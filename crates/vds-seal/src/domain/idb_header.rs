//! # IDB Header
//!
//! ```text
//! C40(country)                                        unsigned
//! C40(country) | algorithm | certRef[5] | sigDate[3]  signed
//! ```
//!
//! Whether the signed form is present is decided by the barcode flag, not
//! by the header itself.

use crate::domain::errors::{SealError, SealResult};
use chrono::NaiveDate;
use shared_codec::{c40, date, ByteReader};
use shared_crypto::DigestAlgorithm;

/// Size of the IDB certificate reference.
pub const IDB_CERT_REF_LEN: usize = 5;

/// Digest announced in a signed IDB header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdbSignatureAlgorithm {
    EcdsaSha256,
    EcdsaSha384,
    EcdsaSha512,
}

impl IdbSignatureAlgorithm {
    pub fn byte(self) -> u8 {
        match self {
            IdbSignatureAlgorithm::EcdsaSha256 => 0x01,
            IdbSignatureAlgorithm::EcdsaSha384 => 0x02,
            IdbSignatureAlgorithm::EcdsaSha512 => 0x03,
        }
    }

    pub fn from_byte(byte: u8) -> SealResult<Self> {
        match byte {
            0x01 => Ok(IdbSignatureAlgorithm::EcdsaSha256),
            0x02 => Ok(IdbSignatureAlgorithm::EcdsaSha384),
            0x03 => Ok(IdbSignatureAlgorithm::EcdsaSha512),
            other => Err(SealError::UnsupportedSignatureAlgorithm(other)),
        }
    }

    /// Algorithm matching the digest a key of `field_bits` signs with.
    pub fn for_field_size(field_bits: usize) -> SealResult<Self> {
        match DigestAlgorithm::for_field_size(field_bits)? {
            DigestAlgorithm::Sha256 => Ok(IdbSignatureAlgorithm::EcdsaSha256),
            DigestAlgorithm::Sha384 => Ok(IdbSignatureAlgorithm::EcdsaSha384),
            DigestAlgorithm::Sha512 => Ok(IdbSignatureAlgorithm::EcdsaSha512),
            DigestAlgorithm::Sha224 => Err(SealError::InvalidHeaderField {
                field: "signature_algorithm",
                reason: format!("no IDB algorithm for {field_bits}-bit keys"),
            }),
        }
    }

    pub fn digest(self) -> DigestAlgorithm {
        match self {
            IdbSignatureAlgorithm::EcdsaSha256 => DigestAlgorithm::Sha256,
            IdbSignatureAlgorithm::EcdsaSha384 => DigestAlgorithm::Sha384,
            IdbSignatureAlgorithm::EcdsaSha512 => DigestAlgorithm::Sha512,
        }
    }
}

/// Signature fields of a signed IDB header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdbSignatureInfo {
    pub algorithm: IdbSignatureAlgorithm,
    pub certificate_reference: [u8; IDB_CERT_REF_LEN],
    pub signature_date: NaiveDate,
}

/// An immutable IDB header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdbHeader {
    issuing_country: String,
    signature_info: Option<IdbSignatureInfo>,
}

impl IdbHeader {
    /// Validating constructor. The country is upper-cased and `<`-padded.
    pub fn new(issuing_country: &str, signature_info: Option<IdbSignatureInfo>) -> SealResult<Self> {
        let mut country = issuing_country.to_uppercase().replace(' ', "<");
        if country.is_empty() || country.chars().count() > 3 {
            return Err(SealError::InvalidHeaderField {
                field: "issuing_country",
                reason: "must have 1-3 characters".to_string(),
            });
        }
        while country.chars().count() < 3 {
            country.push('<');
        }
        c40::encode(&country).map_err(|e| SealError::InvalidHeaderField {
            field: "issuing_country",
            reason: e.to_string(),
        })?;
        if let Some(info) = &signature_info {
            date::encode_date(info.signature_date)?;
        }

        Ok(Self {
            issuing_country: country,
            signature_info,
        })
    }

    pub fn encode(&self) -> SealResult<Vec<u8>> {
        let mut out = c40::encode(&self.issuing_country)?;
        if let Some(info) = &self.signature_info {
            out.push(info.algorithm.byte());
            out.extend_from_slice(&info.certificate_reference);
            out.extend(date::encode_date(info.signature_date)?);
        }
        Ok(out)
    }

    /// Parse from the start of `data`; `signed` comes from the barcode flag.
    pub fn parse(data: &[u8], signed: bool) -> SealResult<(Self, usize)> {
        let mut reader = ByteReader::new(data);
        let issuing_country = c40::decode(reader.read_bytes(2)?)?.replace(' ', "<");

        let signature_info = if signed {
            let algorithm = IdbSignatureAlgorithm::from_byte(reader.read_u8()?)?;
            let mut certificate_reference = [0u8; IDB_CERT_REF_LEN];
            certificate_reference.copy_from_slice(reader.read_bytes(IDB_CERT_REF_LEN)?);
            let signature_date = date::decode_date(reader.read_bytes(date::DATE_LEN)?)?;
            Some(IdbSignatureInfo {
                algorithm,
                certificate_reference,
                signature_date,
            })
        } else {
            None
        };

        Ok((
            Self {
                issuing_country,
                signature_info,
            },
            reader.position(),
        ))
    }

    pub fn issuing_country(&self) -> &str {
        &self.issuing_country
    }

    pub fn signature_info(&self) -> Option<&IdbSignatureInfo> {
        self.signature_info.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature_info.is_some()
    }
}

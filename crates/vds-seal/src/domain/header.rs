//! # VDS Header
//!
//! ```text
//! DC | version | C40(country) | C40(signer + certRef) | issuingDate | sigDate | feature | category
//! ```
//!
//! The version byte fixes how signer and certificate reference are packed:
//!
//! | Version | Byte | Signer/certRef block |
//! |---------|------|----------------------|
//! | v3 | `0x02` | 4-char signer + 5-char zero-padded certRef, 6 bytes |
//! | v4 | `0x03` | 4-char signer + 2 hex digits length + certRef of that length |
//!
//! Some issuers write v4 headers whose certRef is always 5 characters,
//! whatever the length field says. Signers matching a prefix from
//! [`SealConfig::fixed_cert_ref_prefixes`] are read that way.

use crate::domain::config::SealConfig;
use crate::domain::errors::{SealError, SealResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_codec::{c40, date, ByteReader};
use tracing::{debug, warn};

/// Leading byte of every VDS.
pub const VDS_MAGIC: u8 = 0xDC;

const SIGNER_ID_LEN: usize = 4;
const FIXED_CERT_REF_LEN: usize = 5;
const COUNTRY_LEN: usize = 3;

// =============================================================================
// VERSION AND LAYOUT
// =============================================================================

/// Supported header versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderVersion {
    V3,
    V4,
}

impl HeaderVersion {
    /// Wire value of the version byte.
    pub fn byte(self) -> u8 {
        match self {
            HeaderVersion::V3 => 0x02,
            HeaderVersion::V4 => 0x03,
        }
    }

    pub fn from_byte(version: u8) -> SealResult<Self> {
        match version {
            0x02 => Ok(HeaderVersion::V3),
            0x03 => Ok(HeaderVersion::V4),
            _ => Err(SealError::UnsupportedHeaderVersion { version }),
        }
    }
}

/// How the certificate reference is packed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CertRefLayout {
    /// v3: 5 characters, no length field
    Fixed,
    /// v4: length field followed by that many characters
    Variable,
    /// v4 with the issuer convention: length field ignored, 5 characters
    IssuerFixed,
}

/// Bytes occupied by `len` C40 characters that start on a word boundary.
///
/// A declared length of zero still occupies one word.
fn cert_ref_byte_len(len: usize) -> usize {
    (len.saturating_sub(1) / 3 * 2) + 2
}

// =============================================================================
// HEADER
// =============================================================================

/// Construction parameters for [`VdsHeader::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VdsHeaderParams {
    /// `None` selects [`SealConfig::default_header_version`]
    pub version: Option<HeaderVersion>,
    pub issuing_country: String,
    pub signer_identifier: String,
    pub certificate_reference: String,
    pub issuing_date: NaiveDate,
    pub signature_date: NaiveDate,
    /// `(docFeatureRef << 8) | docTypeCat`
    pub document_ref: u16,
}

/// An immutable VDS header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VdsHeader {
    version: HeaderVersion,
    issuing_country: String,
    signer_identifier: String,
    certificate_reference: String,
    issuing_date: NaiveDate,
    signature_date: NaiveDate,
    doc_feature_ref: u8,
    doc_type_cat: u8,
    layout: CertRefLayout,
}

impl VdsHeader {
    /// Validate and normalize header fields.
    ///
    /// Text fields are upper-cased, the country is padded with `<` and
    /// fixed-length certificate references are left-padded with `0`.
    pub fn new(params: VdsHeaderParams, config: &SealConfig) -> SealResult<Self> {
        let version = params.version.unwrap_or(config.default_header_version);

        let mut issuing_country = params.issuing_country.to_uppercase().replace(' ', "<");
        if issuing_country.is_empty() || issuing_country.chars().count() > COUNTRY_LEN {
            return Err(invalid("issuing_country", "must have 1-3 characters"));
        }
        while issuing_country.chars().count() < COUNTRY_LEN {
            issuing_country.push('<');
        }
        check_c40("issuing_country", &issuing_country)?;

        let signer_identifier = params.signer_identifier.to_uppercase();
        if signer_identifier.chars().count() != SIGNER_ID_LEN {
            return Err(invalid("signer_identifier", "must have exactly 4 characters"));
        }
        check_c40("signer_identifier", &signer_identifier)?;

        let layout = match version {
            HeaderVersion::V3 => CertRefLayout::Fixed,
            HeaderVersion::V4 if config.uses_fixed_cert_ref(&signer_identifier) => {
                CertRefLayout::IssuerFixed
            }
            HeaderVersion::V4 => CertRefLayout::Variable,
        };

        let mut certificate_reference = params.certificate_reference.to_uppercase();
        let cert_len = certificate_reference.chars().count();
        match layout {
            CertRefLayout::Fixed | CertRefLayout::IssuerFixed => {
                if cert_len > FIXED_CERT_REF_LEN {
                    return Err(invalid(
                        "certificate_reference",
                        "must have at most 5 characters",
                    ));
                }
                certificate_reference = format!("{certificate_reference:0>5}");
            }
            CertRefLayout::Variable => {
                if cert_len == 0 || cert_len > 0xFF {
                    return Err(invalid(
                        "certificate_reference",
                        "must have 1-255 characters",
                    ));
                }
            }
        }
        check_c40("certificate_reference", &certificate_reference)?;

        // Dates must be packable before the header is accepted
        date::encode_date(params.issuing_date)?;
        date::encode_date(params.signature_date)?;

        Ok(Self {
            version,
            issuing_country,
            signer_identifier,
            certificate_reference,
            issuing_date: params.issuing_date,
            signature_date: params.signature_date,
            doc_feature_ref: (params.document_ref >> 8) as u8,
            doc_type_cat: (params.document_ref & 0xFF) as u8,
            layout,
        })
    }

    /// Serialize to wire bytes.
    pub fn encode(&self) -> SealResult<Vec<u8>> {
        let mut out = vec![VDS_MAGIC, self.version.byte()];
        out.extend(c40::encode(&self.issuing_country)?);

        let block = match self.layout {
            CertRefLayout::Fixed => {
                format!("{}{}", self.signer_identifier, self.certificate_reference)
            }
            CertRefLayout::Variable | CertRefLayout::IssuerFixed => format!(
                "{}{:02X}{}",
                self.signer_identifier,
                self.certificate_reference.chars().count(),
                self.certificate_reference
            ),
        };
        out.extend(c40::encode(&block)?);

        out.extend(date::encode_date(self.issuing_date)?);
        out.extend(date::encode_date(self.signature_date)?);
        out.push(self.doc_feature_ref);
        out.push(self.doc_type_cat);
        Ok(out)
    }

    /// Parse a header from the start of `data`.
    ///
    /// Returns the header and the number of bytes it occupied.
    pub fn parse(data: &[u8], config: &SealConfig) -> SealResult<(Self, usize)> {
        let mut reader = ByteReader::new(data);

        let magic = reader.read_u8()?;
        if magic != VDS_MAGIC {
            return Err(SealError::InvalidMagic { found: magic });
        }
        let version = HeaderVersion::from_byte(reader.read_u8()?)?;

        let issuing_country = c40::decode(reader.read_bytes(2)?)?.replace(' ', "<");

        let (signer_identifier, certificate_reference, layout) = match version {
            HeaderVersion::V3 => {
                let block = c40::decode(reader.read_bytes(6)?)?;
                let (signer, cert_ref) = split_signer(&block)?;
                (signer, cert_ref.to_string(), CertRefLayout::Fixed)
            }
            HeaderVersion::V4 => {
                let prefix = c40::decode(reader.read_bytes(4)?)?;
                let (signer, length_field) = split_signer(&prefix)?;
                let declared = usize::from_str_radix(length_field, 16).map_err(|_| {
                    invalid(
                        "certificate_reference",
                        &format!("length field {length_field:?} is not hex"),
                    )
                })?;

                let (byte_len, layout) = if config.uses_fixed_cert_ref(&signer) {
                    if declared != FIXED_CERT_REF_LEN {
                        warn!(
                            signer = %signer,
                            declared,
                            "Ignoring certificate reference length field for fixed-length signer"
                        );
                    }
                    (cert_ref_byte_len(FIXED_CERT_REF_LEN), CertRefLayout::IssuerFixed)
                } else {
                    (cert_ref_byte_len(declared), CertRefLayout::Variable)
                };
                let cert_ref = c40::decode(reader.read_bytes(byte_len)?)?;
                (signer, cert_ref, layout)
            }
        };

        let issuing_date = date::decode_date(reader.read_bytes(date::DATE_LEN)?)?;
        let signature_date = date::decode_date(reader.read_bytes(date::DATE_LEN)?)?;
        let doc_feature_ref = reader.read_u8()?;
        let doc_type_cat = reader.read_u8()?;

        let header = Self {
            version,
            issuing_country,
            signer_identifier,
            certificate_reference,
            issuing_date,
            signature_date,
            doc_feature_ref,
            doc_type_cat,
            layout,
        };
        debug!(
            version = ?header.version,
            signer = %header.signer_cert_ref(),
            document_ref = format_args!("0x{:04x}", header.document_ref()),
            "Parsed VDS header"
        );
        Ok((header, reader.position()))
    }

    pub fn version(&self) -> HeaderVersion {
        self.version
    }

    /// Issuing country, `<`-padded to 3 characters.
    pub fn issuing_country(&self) -> &str {
        &self.issuing_country
    }

    pub fn signer_identifier(&self) -> &str {
        &self.signer_identifier
    }

    pub fn certificate_reference(&self) -> &str {
        &self.certificate_reference
    }

    pub fn issuing_date(&self) -> NaiveDate {
        self.issuing_date
    }

    pub fn signature_date(&self) -> NaiveDate {
        self.signature_date
    }

    pub fn doc_feature_ref(&self) -> u8 {
        self.doc_feature_ref
    }

    pub fn doc_type_cat(&self) -> u8 {
        self.doc_type_cat
    }

    pub fn cert_ref_layout(&self) -> CertRefLayout {
        self.layout
    }

    /// Registry key: `(docFeatureRef << 8) | docTypeCat`.
    pub fn document_ref(&self) -> u16 {
        (u16::from(self.doc_feature_ref) << 8) | u16::from(self.doc_type_cat)
    }

    /// Key for locating the signing certificate: signer identifier followed by
    /// the certificate reference without leading zeros (`"0"` if nothing is left).
    pub fn signer_cert_ref(&self) -> String {
        let stripped = self.certificate_reference.trim_start_matches('0');
        let cert_ref = if stripped.is_empty() { "0" } else { stripped };
        format!("{}{}", self.signer_identifier, cert_ref).to_uppercase()
    }
}

fn split_signer(block: &str) -> SealResult<(String, &str)> {
    if block.len() < SIGNER_ID_LEN || !block.is_ascii() {
        return Err(invalid("signer_identifier", "decoded block too short"));
    }
    let (signer, rest) = block.split_at(SIGNER_ID_LEN);
    Ok((signer.to_string(), rest))
}

fn check_c40(field: &'static str, value: &str) -> SealResult<()> {
    c40::encode(value)
        .map(|_| ())
        .map_err(|e| invalid(field, &e.to_string()))
}

fn invalid(field: &'static str, reason: &str) -> SealError {
    SealError::InvalidHeaderField {
        field,
        reason: reason.to_string(),
    }
}

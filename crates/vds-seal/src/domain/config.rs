//! # Seal Configuration

use crate::domain::errors::{SealError, SealResult};
use crate::domain::header::HeaderVersion;
use serde::Deserialize;

// =============================================================================
// SEAL CONFIGURATION
// =============================================================================

/// Codec-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SealConfig {
    /// Header version for new VDS seals when none is given
    pub default_header_version: HeaderVersion,
    /// Signer identifier prefixes whose v4 headers carry a fixed
    /// 5-character certificate reference regardless of the length field
    pub fixed_cert_ref_prefixes: Vec<String>,
    /// Prefix of ICAO barcode transport strings
    pub idb_barcode_identifier: String,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            default_header_version: HeaderVersion::V4,
            fixed_cert_ref_prefixes: vec!["DE".to_string()],
            idb_barcode_identifier: "NDB1".to_string(),
        }
    }
}

impl SealConfig {
    /// Check invariants the codec relies on.
    pub fn validate(&self) -> SealResult<()> {
        if self.idb_barcode_identifier.is_empty() || !self.idb_barcode_identifier.is_ascii() {
            return Err(SealError::InvalidConfig(format!(
                "barcode identifier {:?} must be non-empty ASCII",
                self.idb_barcode_identifier
            )));
        }
        for prefix in &self.fixed_cert_ref_prefixes {
            if prefix.is_empty() || prefix.len() > 4 {
                return Err(SealError::InvalidConfig(format!(
                    "signer prefix {prefix:?} must have 1-4 characters"
                )));
            }
        }
        Ok(())
    }

    /// Whether `signer_identifier` follows the fixed-length v4 convention.
    pub fn uses_fixed_cert_ref(&self, signer_identifier: &str) -> bool {
        self.fixed_cert_ref_prefixes
            .iter()
            .any(|p| signer_identifier.to_ascii_uppercase().starts_with(&p.to_ascii_uppercase()))
    }
}

//! # Seal Service
//!
//! Application service implementing [`SealCodecApi`].
//!
//! ## Architecture
//!
//! - Implements the inbound port (`SealCodecApi`)
//! - Calls the outbound port (`SealSigner`) while building
//! - Takes one registry snapshot per call and delegates to `domain::assembly`

use crate::domain::assembly;
use crate::domain::config::SealConfig;
use crate::domain::errors::{SealError, SealResult};
use crate::domain::header::{VdsHeader, VdsHeaderParams};
use crate::domain::idb_header::{IdbHeader, IdbSignatureAlgorithm, IdbSignatureInfo};
use crate::domain::seal::{
    IdbSealParams, MessageInput, Seal, IDB_SIGNATURE_TAG, IDB_SIGNER_CERTIFICATE_TAG,
};
use crate::ports::inbound::SealCodecApi;
use crate::ports::outbound::SealSigner;
use shared_codec::{der_tlv, transport, DerTlv, SIGNATURE_TAG};
use shared_crypto::{
    batch_verify, ecdsa, BatchVerificationResult, DigestAlgorithm, EcPublicKey,
    VerificationOutcome, VerificationRequest,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vds_registry::{
    Message, MessageRegistryApi, MessageValue, RegistryError, SealRegistry, ICAO_BARCODE,
};

/// Seal codec service.
///
/// Generic over the registry so hosts can plug in their own loader; the
/// registry is shared so tables can be swapped while the service runs.
pub struct SealService<R: MessageRegistryApi> {
    registry: Arc<R>,
    config: SealConfig,
}

impl<R: MessageRegistryApi> SealService<R> {
    /// Create a service after validating `config`.
    pub fn new(registry: Arc<R>, config: SealConfig) -> SealResult<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub fn config(&self) -> &SealConfig {
        &self.config
    }

    /// Transport string for `seal` under this service's configuration.
    pub fn transport_string(&self, seal: &Seal) -> String {
        seal.to_transport_string(&self.config)
    }

    fn sign(&self, signer: &dyn SealSigner, data: &[u8]) -> SealResult<Vec<u8>> {
        let digest = DigestAlgorithm::for_field_size(signer.field_size_bits())?;
        debug!(
            digest = digest.name(),
            bytes = data.len(),
            "Signing seal"
        );
        signer
            .sign(data)
            .map_err(|e| SealError::SigningFailed(e.to_string()))
    }

    /// Outcome decided without running ECDSA, if any.
    fn precheck(seal: &Seal, public_key: &EcPublicKey) -> Option<VerificationOutcome> {
        if seal.signature().is_none() {
            debug!(document_type = seal.document_type(), "Seal carries no signature");
            return Some(VerificationOutcome::Invalid);
        }

        let announced = seal
            .as_idb()
            .and_then(|idb| idb.header().signature_info())
            .map(|info| info.algorithm);
        if let Some(algorithm) = announced {
            match DigestAlgorithm::for_field_size(public_key.field_size_bits()) {
                Ok(digest) if digest != algorithm.digest() => {
                    warn!(
                        announced = algorithm.digest().name(),
                        key_digest = digest.name(),
                        "Barcode algorithm does not match the verification key"
                    );
                    return Some(VerificationOutcome::Invalid);
                }
                Err(e) => return Some(VerificationOutcome::Error(e)),
                Ok(_) => {}
            }
        }
        None
    }
}

impl SealService<SealRegistry> {
    /// Service over the built-in registry tables and default configuration.
    pub fn with_defaults() -> SealResult<Self> {
        Self::new(Arc::new(SealRegistry::with_defaults()?), SealConfig::default())
    }
}

impl<R: MessageRegistryApi> SealCodecApi for SealService<R> {
    fn build_vds(
        &self,
        header: VdsHeaderParams,
        messages: &[MessageInput],
        signer: &dyn SealSigner,
    ) -> SealResult<Seal> {
        let tables = self.registry.snapshot();
        let definition = tables.types.by_ref(header.document_ref).ok_or_else(|| {
            RegistryError::UnknownType {
                document_type: format!("0x{:04x}", header.document_ref),
            }
        })?;

        let header = VdsHeader::new(header, &self.config)?;
        let tlvs = assembly::encode_messages(&tables, &definition.name, messages)?;

        let mut data = header.encode()?;
        data.extend(assembly::message_zone(&tlvs, definition.wrapper_tag)?);
        let signature = self.sign(signer, &data)?;
        let encoded = assembly::append_signature(data, SIGNATURE_TAG, &signature)?;

        info!(
            document_type = %definition.name,
            version = ?header.version(),
            messages = tlvs.len(),
            bytes = encoded.len(),
            "Built VDS"
        );
        assembly::parse_vds(&encoded, &self.config, &tables)
    }

    fn build_idb(
        &self,
        params: IdbSealParams,
        messages: &[MessageInput],
        signer: Option<&dyn SealSigner>,
    ) -> SealResult<Seal> {
        if signer.is_none() && params.signer_certificate.is_some() {
            return Err(SealError::MalformedSeal(
                "signer certificate requires a signed barcode".to_string(),
            ));
        }
        let tables = self.registry.snapshot();

        let signature_info = match signer {
            Some(signer) => Some(IdbSignatureInfo {
                algorithm: IdbSignatureAlgorithm::for_field_size(signer.field_size_bits())?,
                certificate_reference: params.certificate_reference,
                signature_date: params.signature_date,
            }),
            None => None,
        };
        let header = IdbHeader::new(&params.issuing_country, signature_info)?;
        let tlvs = assembly::encode_messages(&tables, ICAO_BARCODE, messages)?;

        let mut payload = header.encode()?;
        payload.extend(assembly::idb_message_group(&tlvs)?);
        if let Some(signer) = signer {
            let signature = self.sign(signer, &payload)?;
            if let Some(certificate) = &params.signer_certificate {
                payload.extend(der_tlv::encode(IDB_SIGNER_CERTIFICATE_TAG, certificate)?);
            }
            payload = assembly::append_signature(payload, IDB_SIGNATURE_TAG, &signature)?;
        }

        info!(
            signed = signer.is_some(),
            messages = tlvs.len(),
            bytes = payload.len(),
            "Built ICAO barcode"
        );
        let seal = assembly::parse_idb_payload(payload, signer.is_some(), &tables)?;
        Ok(Seal::IdbBarcode(seal))
    }

    fn parse_vds(&self, data: &[u8]) -> SealResult<Seal> {
        assembly::parse_vds(data, &self.config, &self.registry.snapshot())
    }

    fn parse_idb(&self, text: &str) -> SealResult<Seal> {
        assembly::parse_idb(text, &self.config, &self.registry.snapshot())
    }

    fn parse_transport(&self, text: &str) -> SealResult<Seal> {
        if text.starts_with(self.config.idb_barcode_identifier.as_str()) {
            self.parse_idb(text)
        } else {
            self.parse_vds(&transport::from_base256(text)?)
        }
    }

    fn verify(&self, seal: &Seal, public_key: &EcPublicKey) -> VerificationOutcome {
        if let Some(outcome) = Self::precheck(seal, public_key) {
            return outcome;
        }
        let signature = seal.signature().unwrap_or_default();
        ecdsa::verify(public_key, seal.signed_data(), signature)
    }

    fn verify_batch(&self, seals: &[(&Seal, &EcPublicKey)]) -> BatchVerificationResult {
        let mut decided = Vec::with_capacity(seals.len());
        let mut requests = Vec::new();
        for (seal, public_key) in seals {
            let outcome = Self::precheck(seal, public_key);
            if outcome.is_none() {
                requests.push(VerificationRequest {
                    public_key: (*public_key).clone(),
                    message: seal.signed_data().to_vec(),
                    signature: seal.signature().unwrap_or_default().to_vec(),
                });
            }
            decided.push(outcome);
        }

        let mut verified = batch_verify(&requests).outcomes.into_iter();
        let outcomes = decided
            .into_iter()
            .map(|outcome| {
                outcome
                    .or_else(|| verified.next())
                    .unwrap_or(VerificationOutcome::Invalid)
            })
            .collect();

        let result = BatchVerificationResult::from_outcomes(outcomes);
        info!(
            total = seals.len(),
            valid = result.valid_count,
            invalid = result.invalid_count,
            errors = result.error_count,
            "Batch verification complete"
        );
        result
    }

    fn encode_message(
        &self,
        document_type: &str,
        name: &str,
        value: &MessageValue,
    ) -> SealResult<DerTlv> {
        Ok(self.registry.encode_message(document_type, name, value)?)
    }

    fn decode_message(
        &self,
        document_type: &str,
        overlay: Option<&Uuid>,
        tlv: &DerTlv,
    ) -> SealResult<Option<Message>> {
        Ok(self.registry.decode_message(document_type, overlay, tlv)?)
    }
}

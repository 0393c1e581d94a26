//! # Inbound Ports (Driving Ports / API)
//!
//! The seal codec as seen by issuing and reading applications.

use crate::domain::errors::SealResult;
use crate::domain::header::VdsHeaderParams;
use crate::domain::seal::{IdbSealParams, MessageInput, Seal};
use crate::ports::outbound::SealSigner;
use shared_codec::DerTlv;
use shared_crypto::{BatchVerificationResult, EcPublicKey, VerificationOutcome};
use uuid::Uuid;
use vds_registry::{Message, MessageValue};

/// Seal codec API.
///
/// Implementations must be thread-safe (`Send + Sync`). Every call works on
/// one registry snapshot from start to finish.
pub trait SealCodecApi: Send + Sync {
    // =========================================================================
    // Building
    // =========================================================================

    /// Build and sign a VDS.
    ///
    /// The document type is looked up by `header.document_ref`; its wrapper
    /// setting selects the legacy or the message-group layout.
    ///
    /// # Errors
    /// * `Registry(UnknownType)` - `documentRef` or overlay not registered
    /// * `Registry(..)` - a message was rejected
    /// * `InvalidHeaderField` - header not representable
    /// * `SigningFailed` - the signer failed
    fn build_vds(
        &self,
        header: VdsHeaderParams,
        messages: &[MessageInput],
        signer: &dyn SealSigner,
    ) -> SealResult<Seal>;

    /// Build an ICAO barcode. Without a signer the barcode is unsigned.
    fn build_idb(
        &self,
        params: IdbSealParams,
        messages: &[MessageInput],
        signer: Option<&dyn SealSigner>,
    ) -> SealResult<Seal>;

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parse binary VDS content.
    fn parse_vds(&self, data: &[u8]) -> SealResult<Seal>;

    /// Parse an ICAO barcode transport string.
    fn parse_idb(&self, text: &str) -> SealResult<Seal>;

    /// Parse barcode content of either format.
    ///
    /// Text starting with the barcode identifier is an IDB, anything else is
    /// Base-256 VDS content.
    fn parse_transport(&self, text: &str) -> SealResult<Seal>;

    // =========================================================================
    // Verification
    // =========================================================================

    /// Verify the seal signature. An unsigned seal is `Invalid`.
    fn verify(&self, seal: &Seal, public_key: &EcPublicKey) -> VerificationOutcome;

    /// Verify many seals in parallel. Outcomes keep input order.
    fn verify_batch(&self, seals: &[(&Seal, &EcPublicKey)]) -> BatchVerificationResult;

    // =========================================================================
    // Single Messages
    // =========================================================================

    /// Encode one message of `document_type`.
    fn encode_message(
        &self,
        document_type: &str,
        name: &str,
        value: &MessageValue,
    ) -> SealResult<DerTlv>;

    /// Decode one message of `document_type`, optionally through an overlay.
    fn decode_message(
        &self,
        document_type: &str,
        overlay: Option<&Uuid>,
        tlv: &DerTlv,
    ) -> SealResult<Option<Message>>;
}

//! Shared test fixtures.

use chrono::NaiveDate;
use shared_crypto::{Curve, EcPrivateKey};
use std::sync::{Arc, Once};
use vds_registry::{MessageValue, SealRegistry};
use vds_seal::{KeySigner, MessageInput, SealConfig, SealService, VdsHeaderParams};
use vds_telemetry::{init_logging, TelemetryConfig};

static LOGGING: Once = Once::new();

/// Install the test subscriber once per process. Another harness may
/// already have installed one; that is not a failure here.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::from_env()
        };
        let _ = init_logging(&config);
    });
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Service over a fresh default registry.
pub fn service() -> SealService<SealRegistry> {
    init_test_logging();
    SealService::with_defaults().expect("default tables are valid")
}

/// Service over a caller-owned registry, so tests can swap its tables.
pub fn service_with(registry: Arc<SealRegistry>) -> SealService<SealRegistry> {
    init_test_logging();
    SealService::new(registry, SealConfig::default()).expect("default config is valid")
}

pub fn p256_signer() -> KeySigner {
    KeySigner::new(EcPrivateKey::generate(Curve::P256))
}

/// ICAO visa header from the Utopia test issuer.
pub fn visa_header() -> VdsHeaderParams {
    VdsHeaderParams {
        version: None,
        issuing_country: "UTO".to_string(),
        signer_identifier: "UTTS".to_string(),
        certificate_reference: "5".to_string(),
        issuing_date: date(2020, 1, 1),
        signature_date: date(2020, 1, 2),
        document_ref: 0x5d01,
    }
}

pub fn visa_messages() -> Vec<MessageInput> {
    let mrz = format!(
        "{:<44}{:<44}",
        "VCD<<DENT<<ARTHUR<PHILIP",
        "12345678<8D<<6908061F9406236ZE184226B<<<<<<"
    )
    .replace(' ', "<");
    vec![
        MessageInput::new("MRZ_MRVA", MessageValue::Mrz(mrz)),
        MessageInput::new("NUMBER_OF_ENTRIES", MessageValue::Byte(0)),
        MessageInput::new("DURATION_OF_STAY", MessageValue::Bytes(vec![0xff, 0xff, 0xff])),
        MessageInput::new("PASSPORT_NUMBER", MessageValue::Text("47110815P".to_string())),
    ]
}

//! # Build → Transport → Parse
//!
//! Seals built by the service must come back identical after a trip through
//! their barcode transport string, for every header layout and framing.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{
        date, p256_signer, service, service_with, visa_header, visa_messages,
    };
    use std::sync::Arc;
    use vds_registry::{
        DocumentTypeRecord, MessageRegistryApi, MessageValue, RegistryError, SealRegistry,
        ICAO_BARCODE_REF, ICAO_VISA, RESIDENCE_PERMIT, UNKNOWN_DOCUMENT_TYPE,
    };
    use vds_seal::{
        CertRefLayout, HeaderVersion, MessageInput, Seal, SealCodecApi, SealError,
        VdsHeaderParams,
    };

    fn records(json: &str) -> Vec<DocumentTypeRecord> {
        serde_json::from_str(json).expect("valid registry records")
    }

    // =========================================================================
    // HEADER LAYOUTS
    // =========================================================================

    #[test]
    fn test_v4_visa_roundtrip() {
        let service = service();
        let seal = service
            .build_vds(visa_header(), &visa_messages(), &p256_signer())
            .unwrap();

        let text = service.transport_string(&seal);
        let parsed = service.parse_transport(&text).unwrap();
        assert_eq!(parsed, seal);

        let header = parsed.as_vds().unwrap().header();
        assert_eq!(header.version(), HeaderVersion::V4);
        assert_eq!(header.cert_ref_layout(), CertRefLayout::Variable);
        assert_eq!(header.signer_cert_ref(), "UTTS5");
        assert_eq!(header.issuing_date(), date(2020, 1, 1));
        assert_eq!(parsed.document_type(), ICAO_VISA);

        assert_eq!(parsed.message("NUMBER_OF_ENTRIES"), Some(&MessageValue::Byte(0)));
        match parsed.message("MRZ_MRVA") {
            Some(MessageValue::Mrz(mrz)) => {
                let lines: Vec<&str> = mrz.lines().collect();
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].len(), 44);
                assert!(lines[0].starts_with("VCD<<DENT<<ARTHUR<PHILIP"));
            }
            other => panic!("unexpected MRZ {other:?}"),
        }
    }

    #[test]
    fn test_v3_header_pads_cert_ref() {
        let service = service();
        let header = VdsHeaderParams {
            version: Some(HeaderVersion::V3),
            ..visa_header()
        };
        let seal = service.build_vds(header, &visa_messages(), &p256_signer()).unwrap();

        assert_eq!(seal.encoded()[..2], [0xdc, 0x02]);
        let header = seal.as_vds().unwrap().header();
        assert_eq!(header.certificate_reference(), "00005");
        assert_eq!(header.cert_ref_layout(), CertRefLayout::Fixed);

        let parsed = service.parse_vds(seal.encoded()).unwrap();
        assert_eq!(parsed.messages(), seal.messages());
    }

    #[test]
    fn test_issuer_fixed_cert_ref_header_bytes() {
        let service = service();
        let header = VdsHeaderParams {
            version: Some(HeaderVersion::V4),
            issuing_country: "D".to_string(),
            signer_identifier: "DETS".to_string(),
            certificate_reference: "32".to_string(),
            issuing_date: date(2024, 3, 18),
            signature_date: date(2024, 3, 19),
            document_ref: 0xfb06,
        };
        let seal = service
            .build_vds(
                header,
                &[MessageInput::new(
                    "PASSPORT_NUMBER",
                    MessageValue::Text("UD1234567".to_string()),
                )],
                &p256_signer(),
            )
            .unwrap();

        assert_eq!(
            hex::encode(&seal.encoded()[..20]),
            "dc036abc6d32c8aa19a52cb1308dc830b4d8fb06"
        );
        assert_eq!(seal.document_type(), RESIDENCE_PERMIT);
        let header = seal.as_vds().unwrap().header();
        assert_eq!(header.issuing_country(), "D<<");
        assert_eq!(header.cert_ref_layout(), CertRefLayout::IssuerFixed);
        assert_eq!(header.signer_cert_ref(), "DETS32");
    }

    // =========================================================================
    // FRAMING
    // =========================================================================

    #[test]
    fn test_legacy_wrapper_from_loaded_records() {
        let registry = Arc::new(SealRegistry::with_defaults().unwrap());
        registry
            .load_document_types(records(
                r#"[{
                    "documentType": "TEMPORARY_PASSPORT",
                    "documentRef": "0x5e02",
                    "wrapperTag": 1,
                    "messages": [
                        {"tag": 2, "name": "HOLDER", "coding": "UTF8_STRING", "constraints": {"maxLength": 40}},
                        {"tag": 3, "name": "BIRTH_DATE", "coding": "MASKED_DATE"},
                        {"tag": 4, "name": "VALID_UNTIL", "coding": "DATE"}
                    ]
                }]"#,
            ))
            .unwrap();
        let service = service_with(registry);

        let header = VdsHeaderParams {
            document_ref: 0x5e02,
            ..visa_header()
        };
        let inputs = [
            MessageInput::new("HOLDER", MessageValue::Text("Ørjan Ødegård".to_string())),
            MessageInput::new("BIRTH_DATE", MessageValue::MaskedDate("19xx-xx-01".to_string())),
            MessageInput::new("VALID_UNTIL", MessageValue::Date(date(2031, 7, 14))),
        ];
        let seal = service.build_vds(header, &inputs, &p256_signer()).unwrap();

        assert!(matches!(seal, Seal::LegacySingleMessage(_)));
        // The zone after the header is one 0x01 TLV
        let header_len = seal.as_vds().unwrap().header().encode().unwrap().len();
        assert_eq!(seal.encoded()[header_len], 0x01);

        let parsed = service
            .parse_transport(&service.transport_string(&seal))
            .unwrap();
        assert_eq!(parsed.raw_messages().len(), 3);
        assert_eq!(
            parsed.message("holder"),
            Some(&MessageValue::Text("Ørjan Ødegård".to_string()))
        );
        assert_eq!(
            parsed.message("BIRTH_DATE"),
            Some(&MessageValue::MaskedDate("19xx-xx-01".to_string()))
        );
        assert_eq!(
            parsed.message("VALID_UNTIL"),
            Some(&MessageValue::Date(date(2031, 7, 14)))
        );
    }

    #[test]
    fn test_unregistered_document_ref_reads_as_unknown() {
        let registry = Arc::new(SealRegistry::with_defaults().unwrap());
        registry
            .load_document_types(records(
                r#"[{
                    "documentType": "PILOT_LICENSE",
                    "documentRef": "7a01",
                    "messages": [{"tag": 1, "name": "LICENSE_NUMBER", "coding": "C40"}]
                }]"#,
            ))
            .unwrap();
        let issuer = service_with(registry);
        let signer = p256_signer();
        let header = VdsHeaderParams {
            document_ref: 0x7a01,
            ..visa_header()
        };
        let seal = issuer
            .build_vds(
                header,
                &[MessageInput::new(
                    "LICENSE_NUMBER",
                    MessageValue::Text("LBA12345".to_string()),
                )],
                &signer,
            )
            .unwrap();

        let reader = service();
        let parsed = reader.parse_transport(&issuer.transport_string(&seal)).unwrap();
        assert_eq!(parsed.document_type(), UNKNOWN_DOCUMENT_TYPE);
        assert!(parsed.messages().is_empty());
        assert_eq!(parsed.raw_messages(), seal.raw_messages());
        // The signature still covers the same bytes
        assert!(reader
            .verify(&parsed, &signer.public_key().unwrap())
            .is_valid());
    }

    #[test]
    fn test_zero_document_ref_is_not_the_barcode_set() {
        let service = service();
        let signer = p256_signer();

        let zero_ref = VdsHeaderParams {
            document_ref: ICAO_BARCODE_REF,
            ..visa_header()
        };
        assert!(matches!(
            service.build_vds(zero_ref, &[], &signer),
            Err(SealError::Registry(RegistryError::UnknownType { .. }))
        ));

        // Rewrite feature ref and type category of a visa seal to 00 00
        let seal = service
            .build_vds(visa_header(), &visa_messages(), &signer)
            .unwrap();
        let header_len = seal.as_vds().unwrap().header().encode().unwrap().len();
        let mut patched = seal.encoded().to_vec();
        patched[header_len - 2] = 0x00;
        patched[header_len - 1] = 0x00;

        let parsed = service.parse_vds(&patched).unwrap();
        assert_eq!(parsed.document_type(), UNKNOWN_DOCUMENT_TYPE);
        assert!(parsed.messages().is_empty());
    }

    #[test]
    fn test_message_rejected_by_constraints() {
        let service = service();
        let inputs = [MessageInput::new(
            "PASSPORT_NUMBER",
            MessageValue::Text("1234567890".to_string()),
        )];
        assert!(service
            .build_vds(visa_header(), &inputs, &p256_signer())
            .is_err());
    }
}

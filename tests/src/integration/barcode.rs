//! # ICAO Barcode Flows
//!
//! Signed and unsigned IDB payloads through the Base32 transport, and the
//! transport dispatch between IDB and VDS content.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{date, p256_signer, service, visa_header, visa_messages};
    use shared_codec::transport;
    use shared_crypto::{Curve, EcPrivateKey};
    use vds_registry::{MessageValue, ICAO_BARCODE};
    use vds_seal::{
        IdbSealParams, IdbSignatureAlgorithm, KeySigner, MessageInput, Seal, SealCodecApi,
        SealError,
    };

    fn params() -> IdbSealParams {
        IdbSealParams {
            issuing_country: "UTO".to_string(),
            certificate_reference: [0x0a, 0x0b, 0x0c, 0x0d, 0x0e],
            signature_date: date(2025, 2, 11),
            signer_certificate: None,
        }
    }

    fn td1_inputs() -> Vec<MessageInput> {
        let mrz = format!(
            "{:<30}{:<30}{:<30}",
            "I<UTOD231458907",
            "7408122F1204159UTO",
            "ERIKSSON<<ANNA<MARIA"
        )
        .replace(' ', "<");
        vec![
            MessageInput::new("MRZ_TD1", MessageValue::Mrz(mrz)),
            MessageInput::new("CAN", MessageValue::Text("424242".to_string())),
            MessageInput::new("EXPIRY_DATE", MessageValue::Date(date(2032, 4, 15))),
        ]
    }

    #[test]
    fn test_signed_p384_barcode() {
        let service = service();
        let signer = KeySigner::new(EcPrivateKey::generate(Curve::P384));
        let seal = service
            .build_idb(params(), &td1_inputs(), Some(&signer))
            .unwrap();

        let text = service.transport_string(&seal);
        assert!(text.starts_with("NDB1B"));

        let parsed = service.parse_transport(&text).unwrap();
        assert!(matches!(parsed, Seal::IdbBarcode(_)));
        assert_eq!(parsed.document_type(), ICAO_BARCODE);

        let info = parsed.as_idb().unwrap().header().signature_info().unwrap();
        assert_eq!(info.algorithm, IdbSignatureAlgorithm::EcdsaSha384);
        assert_eq!(info.certificate_reference, [0x0a, 0x0b, 0x0c, 0x0d, 0x0e]);
        assert_eq!(parsed.signature().map(<[u8]>::len), Some(96));
        assert!(service.verify(&parsed, &signer.public_key().unwrap()).is_valid());

        match parsed.message("MRZ_TD1") {
            Some(MessageValue::Mrz(mrz)) => {
                let lines: Vec<&str> = mrz.lines().collect();
                assert_eq!(lines.len(), 3);
                assert!(lines.iter().all(|l| l.len() == 30));
                assert_eq!(lines[2], "ERIKSSON<<ANNA<MARIA<<<<<<<<<<");
            }
            other => panic!("unexpected MRZ {other:?}"),
        }
        assert_eq!(
            parsed.message("EXPIRY_DATE"),
            Some(&MessageValue::Date(date(2032, 4, 15)))
        );
    }

    #[test]
    fn test_unsigned_barcode() {
        let service = service();
        let seal = service.build_idb(params(), &td1_inputs(), None).unwrap();

        let text = service.transport_string(&seal);
        assert!(text.starts_with("NDB1A"));

        let parsed = service.parse_idb(&text).unwrap();
        assert!(parsed.signature().is_none());
        assert!(parsed.as_idb().unwrap().header().signature_info().is_none());
        assert_eq!(parsed.signed_data(), parsed.encoded());
        assert_eq!(parsed.messages().len(), 3);
    }

    #[test]
    fn test_embedded_signer_certificate() {
        let service = service();
        let signer = p256_signer();
        let certificate = vec![0x30, 0x82, 0x00, 0x01, 0x00];
        let seal = service
            .build_idb(
                IdbSealParams {
                    signer_certificate: Some(certificate.clone()),
                    ..params()
                },
                &td1_inputs(),
                Some(&signer),
            )
            .unwrap();

        let parsed = service
            .parse_transport(&service.transport_string(&seal))
            .unwrap();
        assert_eq!(
            parsed.as_idb().unwrap().signer_certificate(),
            Some(certificate.as_slice())
        );
        // The certificate is outside the signed bytes
        assert!(service.verify(&parsed, &signer.public_key().unwrap()).is_valid());
    }

    #[test]
    fn test_compressed_flags_unsupported() {
        let service = service();
        for flag in ['C', 'D'] {
            assert_eq!(
                service.parse_idb(&format!("NDB1{flag}ABCD")),
                Err(SealError::UnsupportedBarcodeFlag(flag))
            );
        }
    }

    #[test]
    fn test_transport_dispatch() {
        let service = service();
        let signer = p256_signer();

        let vds = service
            .build_vds(visa_header(), &visa_messages(), &signer)
            .unwrap();
        let idb = service.build_idb(params(), &td1_inputs(), None).unwrap();

        let as_vds = service.parse_transport(&service.transport_string(&vds)).unwrap();
        assert!(matches!(as_vds, Seal::MessageGroup(_)));

        let as_idb = service.parse_transport(&service.transport_string(&idb)).unwrap();
        assert!(matches!(as_idb, Seal::IdbBarcode(_)));

        // Base-256 text that is not a VDS
        let garbage = transport::to_base256(&[0x01, 0x02, 0x03]);
        assert!(matches!(
            service.parse_transport(&garbage),
            Err(SealError::InvalidMagic { found: 0x01 })
        ));
    }
}

//! # Registry Updates and Extended Definitions
//!
//! Overlays loaded at runtime must take precedence over base messages, and
//! swapping tables must never disturb a seal that is already resolved.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{date, p256_signer, service_with, visa_header};
    use std::sync::Arc;
    use uuid::Uuid;
    use vds_registry::{
        ExtendedDefinitionRecord, MessageRegistryApi, MessageValue, RegistryError, SealRegistry,
        ADMINISTRATIVE_DOCUMENTS,
    };
    use vds_seal::{MessageInput, SealCodecApi, SealError, VdsHeaderParams};

    const PARKING_PERMIT: &str = "5f1a0c5e-8f3b-4c2a-9d7e-0b6a4e2f9c11";

    fn parking_overlay() -> Vec<ExtendedDefinitionRecord> {
        serde_json::from_str(&format!(
            r#"[{{
                "definitionId": "{PARKING_PERMIT}",
                "definitionName": "PARKING_PERMIT",
                "baseDocumentType": "ADMINISTRATIVE_DOCUMENTS",
                "messages": [
                    {{"tag": 1, "name": "PERMIT_HOLDER", "coding": "UTF8_STRING"}},
                    {{"tag": 3, "name": "LICENSE_PLATE", "coding": "C40", "constraints": {{"maxLength": 10}}}},
                    {{"tag": 4, "name": "ZONE", "coding": "BYTE"}}
                ]
            }}]"#
        ))
        .expect("valid overlay records")
    }

    fn admin_header() -> VdsHeaderParams {
        VdsHeaderParams {
            document_ref: 0xf60d,
            ..visa_header()
        }
    }

    fn permit_inputs(id: Uuid) -> Vec<MessageInput> {
        vec![
            MessageInput::new("DEFINITION_UUID", MessageValue::Bytes(id.as_bytes().to_vec())),
            MessageInput::new("PERMIT_HOLDER", MessageValue::Text("Jane Roe".to_string())),
            MessageInput::new("VALID_UNTIL", MessageValue::Date(date(2027, 12, 31))),
            MessageInput::new("LICENSE_PLATE", MessageValue::Text("B AB 1234".to_string())),
            MessageInput::new("ZONE", MessageValue::Byte(7)),
        ]
    }

    #[test]
    fn test_overlay_takes_precedence() {
        let registry = Arc::new(SealRegistry::with_defaults().unwrap());
        registry.load_extended_definitions(parking_overlay()).unwrap();
        let service = service_with(registry);
        let id = Uuid::parse_str(PARKING_PERMIT).unwrap();

        let seal = service
            .build_vds(admin_header(), &permit_inputs(id), &p256_signer())
            .unwrap();
        let parsed = service
            .parse_transport(&service.transport_string(&seal))
            .unwrap();

        assert_eq!(parsed.document_type(), ADMINISTRATIVE_DOCUMENTS);
        assert_eq!(parsed.as_vds().unwrap().extended_definition(), Some(id));
        // Tag 1 resolves through the overlay, not as ISSUING_AUTHORITY
        assert_eq!(
            parsed.message("PERMIT_HOLDER"),
            Some(&MessageValue::Text("Jane Roe".to_string()))
        );
        assert!(parsed.message("ISSUING_AUTHORITY").is_none());
        // Tag 2 is only in the base type
        assert_eq!(
            parsed.message("VALID_UNTIL"),
            Some(&MessageValue::Date(date(2027, 12, 31)))
        );
        assert_eq!(parsed.message("ZONE"), Some(&MessageValue::Byte(7)));
    }

    #[test]
    fn test_removed_overlay_falls_back_to_base() {
        let registry = Arc::new(SealRegistry::with_defaults().unwrap());
        registry.load_extended_definitions(parking_overlay()).unwrap();
        let service = service_with(registry.clone());
        let id = Uuid::parse_str(PARKING_PERMIT).unwrap();

        let seal = service
            .build_vds(admin_header(), &permit_inputs(id), &p256_signer())
            .unwrap();

        registry.reset_to_defaults().unwrap();
        let parsed = service.parse_vds(seal.encoded()).unwrap();

        assert_eq!(parsed.as_vds().unwrap().extended_definition(), None);
        assert_eq!(
            parsed.message("ISSUING_AUTHORITY"),
            Some(&MessageValue::Text("Jane Roe".to_string()))
        );
        // Overlay-only tags are dropped, the raw TLVs stay
        assert!(parsed.message("LICENSE_PLATE").is_none());
        assert_eq!(parsed.messages().len(), 3);
        assert_eq!(parsed.raw_messages().len(), 5);

        // The seal resolved before the swap keeps its view
        assert_eq!(seal.message("ZONE"), Some(&MessageValue::Byte(7)));
    }

    #[test]
    fn test_unregistered_overlay_rejected_on_build() {
        let service = service_with(Arc::new(SealRegistry::with_defaults().unwrap()));
        let result = service.build_vds(admin_header(), &permit_inputs(Uuid::new_v4()), &p256_signer());
        assert!(matches!(
            result,
            Err(SealError::Registry(RegistryError::UnknownType { .. }))
        ));
    }

    #[test]
    fn test_failed_load_keeps_previous_overlays() {
        let registry = Arc::new(SealRegistry::with_defaults().unwrap());
        registry.load_extended_definitions(parking_overlay()).unwrap();

        let mut broken = parking_overlay();
        broken[0].definition_id = "not-a-uuid".to_string();
        assert!(registry.load_extended_definitions(broken).is_err());

        let service = service_with(registry);
        let id = Uuid::parse_str(PARKING_PERMIT).unwrap();
        assert!(service
            .build_vds(admin_header(), &permit_inputs(id), &p256_signer())
            .is_ok());
    }

    #[test]
    fn test_single_message_api_uses_overlay() {
        let registry = Arc::new(SealRegistry::with_defaults().unwrap());
        registry.load_extended_definitions(parking_overlay()).unwrap();
        let service = service_with(registry);
        let id = Uuid::parse_str(PARKING_PERMIT).unwrap();

        let tlv = service
            .encode_message(ADMINISTRATIVE_DOCUMENTS, "ISSUING_AUTHORITY", &MessageValue::Text("Amt".to_string()))
            .unwrap();
        assert_eq!(tlv.tag, 1);

        let through_overlay = service
            .decode_message(ADMINISTRATIVE_DOCUMENTS, Some(&id), &tlv)
            .unwrap()
            .unwrap();
        assert_eq!(through_overlay.name, "PERMIT_HOLDER");

        let base = service
            .decode_message(ADMINISTRATIVE_DOCUMENTS, None, &tlv)
            .unwrap()
            .unwrap();
        assert_eq!(base.name, "ISSUING_AUTHORITY");
    }
}

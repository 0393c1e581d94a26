//! # Signature Verification
//!
//! Tri-state outcomes, batch verification and digest selection checked
//! against an independent ECDSA implementation.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{date, p256_signer, service, visa_header, visa_messages};
    use p256::ecdsa::signature::hazmat::PrehashVerifier;
    use p256::ecdsa::{Signature, VerifyingKey};
    use sha2::{Digest, Sha256};
    use shared_crypto::{Curve, EcPrivateKey, EcPublicKey, VerificationOutcome};
    use vds_seal::{IdbSealParams, KeySigner, Seal, SealCodecApi};

    #[test]
    fn test_p256_seal_signed_over_sha256() {
        let service = service();
        let signer = p256_signer();
        let public_key = signer.public_key().unwrap();
        let seal = service
            .build_vds(visa_header(), &visa_messages(), &signer)
            .unwrap();

        let verifying_key = VerifyingKey::from_sec1_bytes(public_key.as_bytes()).unwrap();
        let signature = Signature::from_slice(seal.signature().unwrap()).unwrap();
        let digest = Sha256::digest(seal.signed_data());
        assert!(verifying_key.verify_prehash(&digest, &signature).is_ok());
    }

    #[test]
    fn test_secp256k1_signer() {
        let service = service();
        let signer = KeySigner::new(EcPrivateKey::generate(Curve::Secp256k1));
        let seal = service
            .build_vds(visa_header(), &visa_messages(), &signer)
            .unwrap();
        assert!(service.verify(&seal, &signer.public_key().unwrap()).is_valid());
    }

    #[test]
    fn test_tampered_message_is_invalid() {
        let service = service();
        let signer = p256_signer();
        let seal = service
            .build_vds(visa_header(), &visa_messages(), &signer)
            .unwrap();

        // DURATION_OF_STAY: tag 4, length 3, ff ff ff
        let mut tampered = seal.encoded().to_vec();
        let at = tampered
            .windows(5)
            .position(|w| w == [0x04, 0x03, 0xff, 0xff, 0xff])
            .unwrap();
        tampered[at + 4] = 0xfe;

        let parsed = service.parse_vds(&tampered).unwrap();
        assert_eq!(
            service.verify(&parsed, &signer.public_key().unwrap()),
            VerificationOutcome::Invalid
        );
    }

    #[test]
    fn test_batch_mixed_outcomes() {
        let service = service();
        let alice = p256_signer();
        let bob = KeySigner::new(EcPrivateKey::generate(Curve::P384));
        let alice_key = alice.public_key().unwrap();
        let bob_key = bob.public_key().unwrap();
        let off_curve = EcPublicKey::from_sec1_bytes(Curve::P256, vec![0x04; 65]);

        let from_alice = service
            .build_vds(visa_header(), &visa_messages(), &alice)
            .unwrap();
        let from_bob = service
            .build_vds(visa_header(), &visa_messages(), &bob)
            .unwrap();
        let unsigned = service
            .build_idb(
                IdbSealParams {
                    issuing_country: "UTO".to_string(),
                    certificate_reference: [0; 5],
                    signature_date: date(2025, 1, 1),
                    signer_certificate: None,
                },
                &[],
                None,
            )
            .unwrap();

        let batch: Vec<(&Seal, &EcPublicKey)> = vec![
            (&from_alice, &alice_key),
            (&from_bob, &bob_key),
            (&from_bob, &alice_key),
            (&unsigned, &alice_key),
            (&from_alice, &off_curve),
        ];
        let result = service.verify_batch(&batch);

        assert_eq!(result.outcomes.len(), 5);
        assert!(result.outcomes[0].is_valid());
        assert!(result.outcomes[1].is_valid());
        // A 96-byte signature cannot verify under a 256-bit key
        assert_eq!(result.outcomes[2], VerificationOutcome::Invalid);
        assert_eq!(result.outcomes[3], VerificationOutcome::Invalid);
        assert!(matches!(result.outcomes[4], VerificationOutcome::Error(_)));
        assert_eq!(result.valid_count, 2);
        assert_eq!(result.invalid_count, 2);
        assert_eq!(result.error_count, 1);
        assert!(!result.all_valid);
    }

    #[test]
    fn test_batch_of_valid_seals() {
        let service = service();
        let signer = p256_signer();
        let key = signer.public_key().unwrap();
        let seals: Vec<Seal> = (0..8)
            .map(|_| {
                service
                    .build_vds(visa_header(), &visa_messages(), &signer)
                    .unwrap()
            })
            .collect();

        let batch: Vec<(&Seal, &EcPublicKey)> = seals.iter().map(|s| (s, &key)).collect();
        let result = service.verify_batch(&batch);
        assert!(result.all_valid);
        assert_eq!(result.valid_count, 8);
    }
}

//! In-memory signer.

use crate::ports::outbound::{SealSigner, SignerError};
use shared_crypto::{ecdsa, EcPrivateKey, EcPublicKey};

/// Signs with a private key held in process memory.
///
/// The scalar is zeroized when the signer is dropped.
#[derive(Clone, Debug)]
pub struct KeySigner {
    key: EcPrivateKey,
}

impl KeySigner {
    pub fn new(key: EcPrivateKey) -> Self {
        Self { key }
    }

    /// Public half of the signing key.
    pub fn public_key(&self) -> Result<EcPublicKey, SignerError> {
        Ok(self.key.public_key()?)
    }
}

impl From<EcPrivateKey> for KeySigner {
    fn from(key: EcPrivateKey) -> Self {
        Self::new(key)
    }
}

impl SealSigner for KeySigner {
    fn field_size_bits(&self) -> usize {
        self.key.field_size_bits()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignerError> {
        Ok(ecdsa::sign(&self.key, data)?)
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Error, FhePrimitive, Result};
use alloy::primitives::{keccak256, Bytes, B256};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::info;
use zeroize::Zeroizing;

/// Serialized FHE public key. Cheap to clone.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(Bytes);

impl PublicKey {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Short identifier for logs and lookups
    pub fn id(&self) -> B256 {
        keccak256(&self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("id", &self.id())
            .field("len", &self.0.len())
            .finish()
    }
}

/// Serialized FHE secret key, zeroized on drop.
///
/// Not serializable and never printed. Only the client reads the bytes.
pub struct PrivateKey(Zeroizing<Vec<u8>>);

impl PrivateKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    pub(crate) fn expose_secret(&self) -> &[u8] {
        &self.0
    }
}

impl From<Zeroizing<Vec<u8>>> for PrivateKey {
    fn from(value: Zeroizing<Vec<u8>>) -> Self {
        Self(value)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

#[derive(Debug)]
pub struct KeyPair {
    public_key: PublicKey,
    private_key: PrivateKey,
}

impl KeyPair {
    /// Assemble a pair from keys generated elsewhere under the same FHE parameters
    pub fn from_parts(public_key: PublicKey, private_key: PrivateKey) -> Self {
        Self {
            public_key,
            private_key,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub(crate) fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}

/// Creates key pairs from operating system entropy
pub struct KeyManager {
    primitive: Arc<dyn FhePrimitive>,
}

impl KeyManager {
    pub fn new(primitive: Arc<dyn FhePrimitive>) -> Self {
        Self { primitive }
    }

    pub fn generate(&self) -> Result<KeyPair> {
        let mut seed = Zeroizing::new([0u8; 32]);
        OsRng.try_fill_bytes(&mut seed[..]).map_err(|e| {
            Error::KeyGenerationFailed(format!("operating system entropy unavailable: {e}"))
        })?;

        let (public_key, private_key) = self
            .primitive
            .generate_keys(&seed)
            .map_err(|e| Error::KeyGenerationFailed(format!("{e:#}")))?;

        let pair = KeyPair::from_parts(PublicKey::new(public_key), private_key.into());
        info!(public_key_id = %pair.public_key().id(), "Generated FHE key pair");
        Ok(pair)
    }

    pub fn public_key_of(pair: &KeyPair) -> &PublicKey {
        pair.public_key()
    }
}

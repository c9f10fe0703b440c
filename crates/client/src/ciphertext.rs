// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    codec, CiphertextHandle, Error, FhePrimitive, FheType, FheValue, KeyPair, PublicKey, Result,
};
use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// An encrypted input ready to be handed to a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPayload {
    ciphertext: Bytes,
    handle: CiphertextHandle,
    fhe_type: FheType,
    public_key: PublicKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<Bytes>,
}

impl EncryptedPayload {
    pub fn ciphertext(&self) -> &Bytes {
        &self.ciphertext
    }

    /// `0x` prefixed ciphertext, the form contract calls take it in
    pub fn to_hex(&self) -> String {
        self.ciphertext.to_string()
    }

    pub fn handle(&self) -> CiphertextHandle {
        self.handle
    }

    pub fn fhe_type(&self) -> FheType {
        self.fhe_type
    }

    /// The key the ciphertext was encrypted under
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Proof of input validity attached by whoever verified the ciphertext
    pub fn signature(&self) -> Option<&Bytes> {
        self.signature.as_ref()
    }

    pub fn with_signature(mut self, signature: impl Into<Bytes>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

/// Encodes plaintexts and encrypts them into [`EncryptedPayload`]s
pub struct CiphertextBuilder {
    primitive: Arc<dyn FhePrimitive>,
    chain_id: u64,
}

impl CiphertextBuilder {
    pub fn new(primitive: Arc<dyn FhePrimitive>, chain_id: u64) -> Self {
        Self {
            primitive,
            chain_id,
        }
    }

    pub fn build_ciphertext(
        &self,
        input: &FheValue,
        fhe_type: FheType,
        key_pair: &KeyPair,
    ) -> Result<EncryptedPayload> {
        let plaintext = Zeroizing::new(codec::encode(input, fhe_type)?);

        if !self.primitive.supports(fhe_type) {
            return Err(Error::UnsupportedType(fhe_type));
        }

        let public_key = key_pair.public_key();
        let ciphertext = self
            .primitive
            .encrypt(&plaintext, public_key.as_bytes(), fhe_type)
            .map_err(|e| Error::EncryptionFailed(format!("{e:#}")))?;

        let handle = CiphertextHandle::derive(&ciphertext, fhe_type, self.chain_id);
        debug!(
            %handle,
            %fhe_type,
            public_key_id = %public_key.id(),
            ciphertext_len = ciphertext.len(),
            "Encrypted input"
        );

        Ok(EncryptedPayload {
            ciphertext: ciphertext.into(),
            handle,
            fhe_type,
            public_key: public_key.clone(),
            signature: None,
        })
    }
}

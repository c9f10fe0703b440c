// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    primitives::{Address, Bytes, Signature},
    signers::{local::PrivateKeySigner, SignerSync},
};
use async_trait::async_trait;
use fhevm_client::{
    eip712::attestation_hash, CiphertextHandle, DecryptionGateway, DecryptionRequest,
    EncryptedPayload, FhePrimitive, FheType, GatewayError, GatewayRequest, GatewayResponse,
    SigningPayload,
};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use tokio::sync::RwLock;
use tracing::debug;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayMode {
    #[default]
    Honest,
    /// Answer with a handle other than the requested one
    WrongHandle,
    /// Attest results with a key other than the advertised one
    ForgedAttestation,
    /// Refuse every request
    Refuse,
    Unavailable,
    /// Never answer
    Hang,
}

/// Gateway holding the decryption key and the ciphertexts registered with it.
///
/// Verifies the user's signature like a real gateway would. Clones share state.
#[derive(Clone)]
pub struct MockGateway {
    primitive: Arc<dyn FhePrimitive>,
    secret_key: Arc<Zeroizing<Vec<u8>>>,
    attestor: PrivateKeySigner,
    ciphertexts: Arc<RwLock<HashMap<CiphertextHandle, Bytes>>>,
    mode: GatewayMode,
    calls: Arc<AtomicUsize>,
}

impl MockGateway {
    pub fn new(primitive: impl FhePrimitive + 'static, secret_key: Zeroizing<Vec<u8>>) -> Self {
        Self {
            primitive: Arc::new(primitive),
            secret_key: Arc::new(secret_key),
            attestor: PrivateKeySigner::random(),
            ciphertexts: Arc::new(RwLock::new(HashMap::new())),
            mode: GatewayMode::Honest,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_mode(mut self, mode: GatewayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Address results are attested with
    pub fn signer_address(&self) -> Address {
        self.attestor.address()
    }

    /// Make a ciphertext known, as if a contract had stored it
    pub async fn register(&self, payload: &EncryptedPayload) {
        self.ciphertexts
            .write()
            .await
            .insert(payload.handle(), payload.ciphertext().clone());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_user_signature(
        &self,
        request: &GatewayRequest,
        payload: &SigningPayload,
    ) -> Result<(), GatewayError> {
        let signature = Signature::try_from(&request.signature[..])
            .map_err(|e| GatewayError::Rejected(format!("Malformed user signature: {e}")))?;
        let signer = signature
            .recover_address_from_prehash(&payload.signing_hash())
            .map_err(|e| GatewayError::Rejected(format!("Unrecoverable user signature: {e}")))?;
        if signer != request.user_address {
            return Err(GatewayError::Rejected(format!(
                "Request signed by {signer}, not by {}",
                request.user_address
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DecryptionGateway for MockGateway {
    async fn user_decrypt(&self, request: &GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(handle = %request.handle, mode = ?self.mode, "Mock gateway received request");

        match self.mode {
            GatewayMode::Unavailable => {
                return Err(GatewayError::Unavailable("Connection refused".to_string()))
            }
            GatewayMode::Hang => std::future::pending::<()>().await,
            GatewayMode::Refuse => {
                return Err(GatewayError::Rejected(
                    "User is not allowed to decrypt this handle".to_string(),
                ))
            }
            _ => {}
        }

        let payload = SigningPayload::new(
            &DecryptionRequest::new(request.contract_address, request.handle, request.user_address),
            request.chain_id,
        );
        self.check_user_signature(request, &payload)?;

        let ciphertext = self
            .ciphertexts
            .read()
            .await
            .get(&request.handle)
            .cloned()
            .ok_or_else(|| GatewayError::Rejected(format!("Unknown handle {}", request.handle)))?;

        let plaintext = self
            .primitive
            .decrypt(&ciphertext, &self.secret_key)
            .map_err(|e| GatewayError::Rejected(format!("Decryption failed: {e}")))?;
        let value = Bytes::copy_from_slice(&plaintext);

        let handle = match self.mode {
            GatewayMode::WrongHandle => {
                CiphertextHandle::derive(b"someone else", FheType::Uint8, request.chain_id)
            }
            _ => request.handle,
        };

        let hash = attestation_hash(payload.domain(), handle, request.user_address, &value);
        let attestation = match self.mode {
            GatewayMode::ForgedAttestation => PrivateKeySigner::random().sign_hash_sync(&hash),
            _ => self.attestor.sign_hash_sync(&hash),
        }
        .map_err(|e| GatewayError::Unavailable(format!("Failed to sign result: {e}")))?;

        Ok(GatewayResponse {
            value,
            handle,
            signature: Bytes::copy_from_slice(&attestation.as_bytes()),
        })
    }
}

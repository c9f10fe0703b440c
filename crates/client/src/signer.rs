// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::SigningPayload;
use alloy::{
    primitives::{Address, Signature},
    signers::{local::PrivateKeySigner, Signer},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Unavailable(String),
}

/// Whoever holds the user's Ethereum key, usually a wallet.
///
/// Signing may take arbitrarily long, a human might have to approve it.
#[async_trait]
pub trait DecryptionSigner: Send + Sync {
    fn address(&self) -> Address;

    async fn sign_payload(&self, payload: &SigningPayload) -> Result<Signature, SignerError>;
}

#[async_trait]
impl DecryptionSigner for PrivateKeySigner {
    fn address(&self) -> Address {
        Signer::address(self)
    }

    async fn sign_payload(&self, payload: &SigningPayload) -> Result<Signature, SignerError> {
        Signer::sign_hash(self, &payload.signing_hash())
            .await
            .map_err(|e| SignerError::Unavailable(format!("Failed to sign payload: {e}")))
    }
}

#[async_trait]
impl<S: DecryptionSigner + ?Sized> DecryptionSigner for Arc<S> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn sign_payload(&self, payload: &SigningPayload) -> Result<Signature, SignerError> {
        (**self).sign_payload(payload).await
    }
}

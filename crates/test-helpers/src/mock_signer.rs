// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    primitives::{Address, Signature},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use fhevm_client::{DecryptionSigner, SignerError, SigningPayload};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerMode {
    Approve,
    Reject,
    Unavailable,
    /// Approve after waiting
    Delay(Duration),
    /// Sign with a key other than the one whose address is reported
    WrongKey,
}

/// Wallet stand-in backed by a local key
#[derive(Debug, Clone)]
pub struct MockSigner {
    key: PrivateKeySigner,
    mode: SignerMode,
    calls: Arc<AtomicUsize>,
}

impl MockSigner {
    pub fn new(mode: SignerMode) -> Self {
        Self::with_key(PrivateKeySigner::random(), mode)
    }

    pub fn with_key(key: PrivateKeySigner, mode: SignerMode) -> Self {
        Self {
            key,
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn approving() -> Self {
        Self::new(SignerMode::Approve)
    }

    pub fn rejecting() -> Self {
        Self::new(SignerMode::Reject)
    }

    pub fn unavailable() -> Self {
        Self::new(SignerMode::Unavailable)
    }

    pub fn slow(delay: Duration) -> Self {
        Self::new(SignerMode::Delay(delay))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecryptionSigner for MockSigner {
    fn address(&self) -> Address {
        self.key.address()
    }

    async fn sign_payload(&self, payload: &SigningPayload) -> Result<Signature, SignerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            SignerMode::Approve => self.key.sign_payload(payload).await,
            SignerMode::Reject => Err(SignerError::Rejected("User denied signature".to_string())),
            SignerMode::Unavailable => {
                Err(SignerError::Unavailable("Wallet disconnected".to_string()))
            }
            SignerMode::Delay(delay) => {
                tokio::time::sleep(delay).await;
                self.key.sign_payload(payload).await
            }
            SignerMode::WrongKey => PrivateKeySigner::random().sign_payload(payload).await,
        }
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{CiphertextHandle, FheType};
use alloy::primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Client not initialized. Call init() first.")]
    ClientNotInitialized,

    #[error("FHE type {0} is not supported by the encryption primitive")]
    UnsupportedType(FheType),

    #[error("A {found} value cannot be encoded as {expected}")]
    TypeMismatch {
        expected: FheType,
        found: &'static str,
    },

    #[error("Value does not fit into {0}")]
    Overflow(FheType),

    #[error("Invalid length for {fhe_type}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        fhe_type: FheType,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed value: {0}")]
    MalformedValue(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Signer rejected the decryption request: {0}")]
    SigningRejected(String),

    #[error("Signer unavailable: {0}")]
    SigningUnavailable(String),

    #[error("Signature recovers to {actual}, request was made for {expected}")]
    SignerMismatch { expected: Address, actual: Address },

    #[error("Gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("No decryption gateway configured")]
    GatewayNotConfigured,

    #[error("Gateway answered for handle {actual}, request was for {expected}")]
    HandleMismatch {
        expected: CiphertextHandle,
        actual: CiphertextHandle,
    },

    #[error("Gateway attestation invalid: {0}")]
    AttestationInvalid(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Provider reports chain id {actual}, client is configured for {expected}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Errors worth retrying later. Nothing in the client retries on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::SigningUnavailable(_) | Error::GatewayUnavailable(_) | Error::Network(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

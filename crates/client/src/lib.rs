// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Client for encrypting inputs to FHE smart contracts and for authenticated decryption of
//! the ciphertext handles those contracts produce.

mod ciphertext;
mod client;
pub mod codec;
mod decryption;
pub mod eip712;
mod error;
mod fhe_type;
mod gateway;
mod handle;
mod keys;
mod primitive;
mod provider;
mod signer;
mod value;

pub use ciphertext::{CiphertextBuilder, EncryptedPayload};
pub use client::{FhevmClient, FhevmClientBuilder};
pub use decryption::{DecryptionRequest, DecryptionResult, SignedRequest, UnsignedRequest};
pub use eip712::SigningPayload;
pub use error::{Error, Result};
pub use fhe_type::FheType;
pub use gateway::{DecryptionGateway, GatewayError, GatewayRequest, GatewayResponse, HttpGateway};
pub use handle::{CiphertextHandle, HANDLE_VERSION};
pub use keys::{KeyManager, KeyPair, PrivateKey, PublicKey};
pub use primitive::{BfvPrimitive, FhePrimitive};
pub use provider::ProviderConfig;
pub use signer::{DecryptionSigner, SignerError};
pub use value::FheValue;

pub use fhevm_config::ClientConfig;

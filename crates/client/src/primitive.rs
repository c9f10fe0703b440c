// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::FheType;
use anyhow::{Context, Result};
use fhevm_bfv_client::{bfv_decrypt, bfv_encrypt, bfv_generate_keys};
use fhevm_fhe_params::{BfvParamSet, BfvPreset};
use zeroize::Zeroizing;

/// The homomorphic encryption scheme the client encrypts under.
///
/// Keys and ciphertexts cross this boundary as opaque serialized bytes.
pub trait FhePrimitive: Send + Sync {
    /// Whether values of `fhe_type` can be encrypted at all
    fn supports(&self, fhe_type: FheType) -> bool;

    /// Derive a key pair deterministically from `seed`. Returns the public and secret key.
    fn generate_keys(&self, seed: &[u8; 32]) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>;

    fn encrypt(&self, plaintext: &[u8], public_key: &[u8], fhe_type: FheType) -> Result<Vec<u8>>;

    fn decrypt(&self, ciphertext: &[u8], secret_key: &[u8]) -> Result<Zeroizing<Vec<u8>>>;
}

/// BFV encryption with one plaintext byte per polynomial coefficient
#[derive(Debug, Clone, Copy)]
pub struct BfvPrimitive {
    param_set: BfvParamSet,
}

impl BfvPrimitive {
    pub fn new(preset: BfvPreset) -> Self {
        Self {
            param_set: preset.param_set(),
        }
    }

    pub fn param_set(&self) -> BfvParamSet {
        self.param_set
    }
}

impl Default for BfvPrimitive {
    fn default() -> Self {
        Self::new(BfvPreset::default())
    }
}

impl FhePrimitive for BfvPrimitive {
    fn supports(&self, fhe_type: FheType) -> bool {
        // variable length byte strings are bounded at encryption time
        fhe_type
            .encoded_len()
            .map_or(true, |len| len <= self.param_set.max_input_len())
    }

    fn generate_keys(&self, seed: &[u8; 32]) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        bfv_generate_keys(self.param_set, *seed).context("Failed to generate BFV keys")
    }

    fn encrypt(&self, plaintext: &[u8], public_key: &[u8], _fhe_type: FheType) -> Result<Vec<u8>> {
        bfv_encrypt(plaintext, public_key, self.param_set)
    }

    fn decrypt(&self, ciphertext: &[u8], secret_key: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        bfv_decrypt(ciphertext, secret_key, self.param_set)
    }
}

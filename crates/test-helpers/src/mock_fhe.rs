// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::keccak256;
use anyhow::{bail, Result};
use fhevm_client::{FhePrimitive, FheType};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Barrier,
};
use zeroize::Zeroizing;

const MAGIC: &[u8; 4] = b"MOCK";
const HEADER_LEN: usize = MAGIC.len() + 1 + 8;

#[derive(Debug, Default)]
struct Calls {
    keygen: AtomicUsize,
    encrypt: AtomicUsize,
    decrypt: AtomicUsize,
}

/// XOR "encryption" where the public and the secret key are the same bytes.
///
/// Clones share their call counters.
#[derive(Debug, Clone, Default)]
pub struct MockFhe {
    unsupported: Vec<FheType>,
    fail_encryption: bool,
    keygen_barrier: Option<Arc<Barrier>>,
    calls: Arc<Calls>,
}

impl MockFhe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without(mut self, fhe_type: FheType) -> Self {
        self.unsupported.push(fhe_type);
        self
    }

    pub fn failing_encryption(mut self) -> Self {
        self.fail_encryption = true;
        self
    }

    /// Key generation waits on `barrier` twice: once to announce it has started and once
    /// more before it returns.
    pub fn with_keygen_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.keygen_barrier = Some(barrier);
        self
    }

    pub fn keygen_calls(&self) -> usize {
        self.calls.keygen.load(Ordering::SeqCst)
    }

    pub fn encrypt_calls(&self) -> usize {
        self.calls.encrypt.load(Ordering::SeqCst)
    }

    pub fn decrypt_calls(&self) -> usize {
        self.calls.decrypt.load(Ordering::SeqCst)
    }
}

fn xor(data: &[u8], key: &[u8], nonce: &[u8; 8]) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, b)| b ^ key[i % key.len()] ^ nonce[i % nonce.len()])
        .collect()
}

impl FhePrimitive for MockFhe {
    fn supports(&self, fhe_type: FheType) -> bool {
        !self.unsupported.contains(&fhe_type)
    }

    fn generate_keys(&self, seed: &[u8; 32]) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        self.calls.keygen.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.keygen_barrier {
            barrier.wait();
            barrier.wait();
        }
        let key = keccak256(seed).to_vec();
        Ok((key.clone(), Zeroizing::new(key)))
    }

    fn encrypt(&self, plaintext: &[u8], public_key: &[u8], fhe_type: FheType) -> Result<Vec<u8>> {
        let count = self.calls.encrypt.fetch_add(1, Ordering::SeqCst);
        if self.fail_encryption {
            bail!("mock encryption failure");
        }
        if public_key.is_empty() {
            bail!("empty public key");
        }

        let nonce = (count as u64).to_be_bytes();
        let mut out = Vec::with_capacity(HEADER_LEN + plaintext.len());
        out.extend_from_slice(MAGIC);
        out.push(fhe_type.id());
        out.extend_from_slice(&nonce);
        out.extend(xor(plaintext, public_key, &nonce));
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], secret_key: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        self.calls.decrypt.fetch_add(1, Ordering::SeqCst);
        if ciphertext.len() < HEADER_LEN || &ciphertext[..MAGIC.len()] != MAGIC {
            bail!("not a mock ciphertext");
        }
        if secret_key.is_empty() {
            bail!("empty secret key");
        }

        let mut nonce = [0u8; 8];
        nonce.copy_from_slice(&ciphertext[MAGIC.len() + 1..HEADER_LEN]);
        Ok(Zeroizing::new(xor(&ciphertext[HEADER_LEN..], secret_key, &nonce)))
    }
}

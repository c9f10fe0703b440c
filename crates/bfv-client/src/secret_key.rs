// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use fhe::bfv::{BfvParameters, SecretKey};
use std::sync::Arc;
use zeroize::{Zeroize, Zeroizing};

/// The `fhe` crate does not serialize secret keys so we carry the coefficients ourselves.
#[derive(serde::Serialize, serde::Deserialize)]
struct SecretKeyData {
    coeffs: Box<[i64]>,
}

impl Drop for SecretKeyData {
    fn drop(&mut self) {
        self.coeffs.zeroize();
    }
}

pub(crate) struct SecretKeySerializer;

impl SecretKeySerializer {
    pub fn to_bytes(secret_key: &SecretKey) -> Result<Zeroizing<Vec<u8>>> {
        let data = SecretKeyData {
            coeffs: secret_key.coeffs.clone(),
        };
        Ok(Zeroizing::new(bincode::serialize(&data)?))
    }

    pub fn from_bytes(bytes: &[u8], params: &Arc<BfvParameters>) -> Result<SecretKey> {
        let data: SecretKeyData = bincode::deserialize(bytes)?;
        Ok(SecretKey::new(data.coeffs.to_vec(), params))
    }
}

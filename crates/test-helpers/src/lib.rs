// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod canned_http;
mod mock_fhe;
mod mock_gateway;
mod mock_signer;

pub use canned_http::*;
pub use mock_fhe::*;
pub use mock_gateway::*;
pub use mock_signer::*;

use fhevm_client::{FhePrimitive, KeyPair, PrivateKey, PublicKey};
use zeroize::Zeroizing;

/// A key pair for the client plus a copy of its secret for a mock gateway, as if both had
/// been handed the same network key.
pub fn shared_key_pair(
    primitive: &dyn FhePrimitive,
    seed: [u8; 32],
) -> anyhow::Result<(KeyPair, Zeroizing<Vec<u8>>)> {
    let (public_key, secret_key) = primitive.generate_keys(&seed)?;
    let gateway_copy = Zeroizing::new(secret_key.to_vec());
    let pair = KeyPair::from_parts(PublicKey::new(public_key), PrivateKey::from(secret_key));
    Ok((pair, gateway_copy))
}

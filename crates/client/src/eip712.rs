// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Typed data the user signs to ask for a decryption, and the typed data the gateway signs
//! over the result.

use crate::{CiphertextHandle, DecryptionRequest};
use alloy::{
    primitives::{Address, Bytes, B256, U256},
    sol,
    sol_types::{Eip712Domain, SolStruct},
};
use serde_json::{json, Value};
use std::borrow::Cow;

pub const DOMAIN_NAME: &str = "FHEVM";
pub const DOMAIN_VERSION: &str = "1";

// Field names and order are part of the protocol, changing them breaks every gateway.
sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Decryption {
        bytes32 handle;
        address user;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct DecryptionAttestation {
        bytes32 handle;
        address user;
        bytes value;
    }
}

pub fn decryption_domain(chain_id: u64, verifying_contract: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(DOMAIN_NAME)),
        Some(Cow::Borrowed(DOMAIN_VERSION)),
        Some(U256::from(chain_id)),
        Some(verifying_contract),
        None,
    )
}

/// Hash the gateway signs when it returns `value` for `handle` to `user`
pub fn attestation_hash(
    domain: &Eip712Domain,
    handle: CiphertextHandle,
    user: Address,
    value: &Bytes,
) -> B256 {
    DecryptionAttestation {
        handle: handle.as_b256(),
        user,
        value: value.clone(),
    }
    .eip712_signing_hash(domain)
}

/// What a user signs to authorize the decryption of one handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningPayload {
    chain_id: u64,
    domain: Eip712Domain,
    message: Decryption,
}

impl SigningPayload {
    pub fn new(request: &DecryptionRequest, chain_id: u64) -> Self {
        Self {
            chain_id,
            domain: decryption_domain(chain_id, request.contract_address),
            message: Decryption {
                handle: request.handle.as_b256(),
                user: request.user_address,
            },
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    pub fn message(&self) -> &Decryption {
        &self.message
    }

    pub fn signing_hash(&self) -> B256 {
        self.message.eip712_signing_hash(&self.domain)
    }

    /// The payload as `eth_signTypedData_v4` JSON, for wallets that sign typed data themselves
    pub fn typed_data(&self) -> Value {
        let verifying_contract = self
            .domain
            .verifying_contract
            .map(|a| a.to_checksum(None))
            .unwrap_or_default();

        json!({
            "types": {
                "EIP712Domain": [
                    { "name": "name", "type": "string" },
                    { "name": "version", "type": "string" },
                    { "name": "chainId", "type": "uint256" },
                    { "name": "verifyingContract", "type": "address" }
                ],
                "Decryption": [
                    { "name": "handle", "type": "bytes32" },
                    { "name": "user", "type": "address" }
                ]
            },
            "primaryType": "Decryption",
            "domain": {
                "name": DOMAIN_NAME,
                "version": DOMAIN_VERSION,
                "chainId": self.chain_id,
                "verifyingContract": verifying_contract
            },
            "message": {
                "handle": self.message.handle.to_string(),
                "user": self.message.user.to_checksum(None)
            }
        })
    }
}

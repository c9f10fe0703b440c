// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

#![allow(dead_code)]

use alloy::primitives::Address;
use anyhow::Result;
use fhevm_client::{
    ClientConfig, DecryptionRequest, DecryptionSigner, EncryptedPayload, FhevmClient,
};
use fhevm_test_helpers::{shared_key_pair, GatewayMode, MockFhe, MockGateway};

pub const CHAIN_ID: u64 = 31337;

pub fn config() -> ClientConfig {
    ClientConfig::new("http://localhost:8545", CHAIN_ID)
}

pub fn contract() -> Address {
    Address::repeat_byte(0xc0)
}

pub struct Harness {
    pub client: FhevmClient,
    pub fhe: MockFhe,
    pub gateway: MockGateway,
}

impl Harness {
    pub fn new(mode: GatewayMode) -> Result<Self> {
        Self::with_fhe(MockFhe::new(), mode)
    }

    /// Initialized client whose key is shared with a mock gateway that attests its results
    pub fn with_fhe(fhe: MockFhe, mode: GatewayMode) -> Result<Self> {
        let (key_pair, secret) = shared_key_pair(&fhe, [1u8; 32])?;
        let gateway = MockGateway::new(fhe.clone(), secret).with_mode(mode);
        let client = FhevmClient::builder(config().with_gateway_signer(gateway.signer_address()))
            .primitive(fhe.clone())
            .gateway(gateway.clone())
            .build()?;
        client.init(Some(key_pair))?;

        Ok(Self {
            client,
            fhe,
            gateway,
        })
    }

    pub fn request_for(
        &self,
        payload: &EncryptedPayload,
        signer: &dyn DecryptionSigner,
    ) -> DecryptionRequest {
        DecryptionRequest::new(contract(), payload.handle(), signer.address())
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::rpc::{RpcAuth, RPC};
use alloy_primitives::Address;
use anyhow::{bail, Context, Result};
use fhevm_fhe_params::BfvPreset;
use serde::{Deserialize, Serialize};
use url::Url;

/// Everything a client needs to know about the network it encrypts for.
///
/// Read once when the client is constructed and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the network, eg. `http://localhost:8545`
    pub provider_url: String,
    /// Chain the contracts live on, part of every signing domain
    pub chain_id: u64,
    /// Decryption gateway endpoint, user decryption is unavailable without one
    #[serde(default)]
    pub gateway_url: Option<String>,
    /// Access control list contract
    #[serde(default)]
    pub acl_address: Option<Address>,
    /// Address the gateway signs decryption results with. When set every result must carry
    /// a valid attestation from it.
    #[serde(default)]
    pub gateway_signer: Option<Address>,
    #[serde(default)]
    pub rpc_auth: RpcAuth,
    /// BFV parameters inputs are encrypted under
    #[serde(default)]
    pub fhe_preset: BfvPreset,
}

impl ClientConfig {
    pub fn new(provider_url: impl Into<String>, chain_id: u64) -> Self {
        Self {
            provider_url: provider_url.into(),
            chain_id,
            gateway_url: None,
            acl_address: None,
            gateway_signer: None,
            rpc_auth: RpcAuth::None,
            fhe_preset: BfvPreset::default(),
        }
    }

    pub fn with_gateway_url(mut self, gateway_url: impl Into<String>) -> Self {
        self.gateway_url = Some(gateway_url.into());
        self
    }

    pub fn with_acl_address(mut self, acl_address: Address) -> Self {
        self.acl_address = Some(acl_address);
        self
    }

    pub fn with_gateway_signer(mut self, gateway_signer: Address) -> Self {
        self.gateway_signer = Some(gateway_signer);
        self
    }

    pub fn with_rpc_auth(mut self, rpc_auth: RpcAuth) -> Self {
        self.rpc_auth = rpc_auth;
        self
    }

    pub fn with_fhe_preset(mut self, fhe_preset: BfvPreset) -> Self {
        self.fhe_preset = fhe_preset;
        self
    }

    /// Parsed provider endpoint
    pub fn rpc(&self) -> Result<RPC> {
        RPC::from_url(&self.provider_url)
            .with_context(|| format!("Failed to parse provider URL '{}'", self.provider_url))
    }

    /// Parsed gateway endpoint if one is configured
    pub fn gateway(&self) -> Result<Option<Url>> {
        let Some(gateway_url) = &self.gateway_url else {
            return Ok(None);
        };

        let url = Url::parse(gateway_url)
            .with_context(|| format!("Failed to parse gateway URL '{}'", gateway_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!("Gateway URL must use http:// or https://");
        }

        Ok(Some(url))
    }

    /// Check every field that can be wrong without talking to the network
    pub fn validate(&self) -> Result<()> {
        if self.chain_id == 0 {
            bail!("chain_id must not be zero");
        }
        self.rpc()?;
        self.gateway()?;
        Ok(())
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    providers::{Provider, ProviderBuilder},
    rpc::client::RpcClient,
    transports::http::{
        reqwest::{
            header::{HeaderMap, HeaderValue, AUTHORIZATION},
            Client,
        },
        Http,
    },
};
use anyhow::{Context, Result};
use fhevm_config::{ClientConfig, RpcAuth, RPC};

/// Read-only JSON-RPC access to the network the client encrypts for
#[derive(Clone)]
pub struct ProviderConfig {
    rpc: RPC,
    auth: RpcAuth,
}

impl ProviderConfig {
    pub fn new(rpc: RPC, auth: RpcAuth) -> Self {
        Self { rpc, auth }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(config.rpc()?, config.rpc_auth.clone()))
    }

    pub fn rpc(&self) -> &RPC {
        &self.rpc
    }

    /// Websocket endpoints are reached over their http(s) equivalent
    pub fn create_readonly_provider(&self) -> Result<impl Provider + Clone> {
        Ok(ProviderBuilder::new().connect_client(self.create_http_client()?))
    }

    fn create_http_client(&self) -> Result<RpcClient> {
        let mut headers = HeaderMap::new();
        if let Some(auth) = self.auth.header_value() {
            let value = HeaderValue::from_str(&auth).context("Invalid RPC credentials")?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let http = Http::with_client(client, self.rpc.as_http_url()?);
        Ok(RpcClient::new(http, self.rpc.is_local()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_config() -> Result<()> {
        let config = ClientConfig::new("ws://localhost:8545", 31337)
            .with_rpc_auth(RpcAuth::Bearer("token".to_string()));
        let provider_config = ProviderConfig::from_config(&config)?;
        assert!(provider_config.rpc().is_local());
        provider_config.create_readonly_provider()?;
        Ok(())
    }

    #[test]
    fn test_bad_credentials() -> Result<()> {
        let config = ClientConfig::new("http://localhost:8545", 1)
            .with_rpc_auth(RpcAuth::Bearer("line\nbreak".to_string()));
        assert!(ProviderConfig::from_config(&config)?
            .create_readonly_provider()
            .is_err());
        Ok(())
    }
}

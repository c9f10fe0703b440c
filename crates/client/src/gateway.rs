// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::CiphertextHandle;
use alloy::primitives::{Address, Bytes};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// A signed user decryption request as the gateway receives it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub handle: CiphertextHandle,
    pub contract_address: Address,
    pub user_address: Address,
    pub chain_id: u64,
    pub signature: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    /// Canonical encoding of the plaintext
    pub value: Bytes,
    /// The handle the gateway decrypted, must echo the requested one
    pub handle: CiphertextHandle,
    /// Gateway signature over the result
    pub signature: Bytes,
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Rejected(String),
}

/// The off-chain service that holds the decryption keys
#[async_trait]
pub trait DecryptionGateway: Send + Sync {
    async fn user_decrypt(
        &self,
        request: &GatewayRequest,
    ) -> std::result::Result<GatewayResponse, GatewayError>;
}

#[async_trait]
impl<G: DecryptionGateway + ?Sized> DecryptionGateway for Arc<G> {
    async fn user_decrypt(
        &self,
        request: &GatewayRequest,
    ) -> std::result::Result<GatewayResponse, GatewayError> {
        (**self).user_decrypt(request).await
    }
}

/// Gateway reached over HTTP with JSON bodies
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: Url,
}

impl HttpGateway {
    pub const USER_DECRYPT_PATH: &'static str = "v1/user-decrypt";

    pub fn new(base_url: &Url) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &Url) -> Result<Self> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(Self::USER_DECRYPT_PATH)
            .with_context(|| format!("Failed to build gateway endpoint from '{base_url}'"))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DecryptionGateway for HttpGateway {
    async fn user_decrypt(
        &self,
        request: &GatewayRequest,
    ) -> std::result::Result<GatewayResponse, GatewayError> {
        debug!(endpoint = %self.endpoint, handle = %request.handle, "Posting user decryption request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(format!("Request failed: {e}")))?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::Unavailable(format!(
                "Gateway answered {status}"
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(GatewayError::Rejected(format!(
                "Gateway answered {status}: {body}"
            )));
        }

        response
            .json::<GatewayResponse>()
            .await
            .map_err(|e| GatewayError::Rejected(format!("Malformed gateway response: {e}")))
    }
}

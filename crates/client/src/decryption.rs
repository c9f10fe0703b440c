// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    codec,
    eip712::attestation_hash,
    CiphertextHandle, DecryptionGateway, DecryptionSigner, Error, FheValue, GatewayError,
    GatewayRequest, GatewayResponse, Result, SignerError, SigningPayload,
};
use alloy::primitives::{Address, Bytes, Signature};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Ask for the plaintext behind `handle`, held by `contract_address`, on behalf of
/// `user_address`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptionRequest {
    pub contract_address: Address,
    pub handle: CiphertextHandle,
    pub user_address: Address,
}

impl DecryptionRequest {
    pub fn new(contract_address: Address, handle: CiphertextHandle, user_address: Address) -> Self {
        Self {
            contract_address,
            handle,
            user_address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptionResult {
    pub value: FheValue,
    pub handle: CiphertextHandle,
    /// The user's signature that authorized the decryption
    pub signature: Signature,
    /// The gateway's signature over the result
    pub attestation: Bytes,
}

/// A request whose signing payload is built but not yet signed
#[derive(Debug, Clone)]
pub struct UnsignedRequest {
    request: DecryptionRequest,
    payload: SigningPayload,
}

impl UnsignedRequest {
    pub fn new(request: DecryptionRequest, chain_id: u64) -> Self {
        let payload = SigningPayload::new(&request, chain_id);
        Self { request, payload }
    }

    pub fn request(&self) -> &DecryptionRequest {
        &self.request
    }

    pub fn payload(&self) -> &SigningPayload {
        &self.payload
    }

    /// Have `signer` sign the payload. The signature has to come from the requesting user.
    #[instrument(
        name = "sign",
        skip_all,
        fields(handle = %self.request.handle, user = %self.request.user_address)
    )]
    pub async fn sign<S: DecryptionSigner + ?Sized>(self, signer: &S) -> Result<SignedRequest> {
        let expected = self.request.user_address;
        let claimed = signer.address();
        if claimed != expected {
            return Err(Error::SignerMismatch {
                expected,
                actual: claimed,
            });
        }

        let signature = signer
            .sign_payload(&self.payload)
            .await
            .map_err(|e| match e {
                SignerError::Rejected(reason) => Error::SigningRejected(reason),
                SignerError::Unavailable(reason) => Error::SigningUnavailable(reason),
            })?;

        let actual = signature
            .recover_address_from_prehash(&self.payload.signing_hash())
            .map_err(|e| Error::SigningRejected(format!("Unrecoverable signature: {e}")))?;
        if actual != expected {
            warn!(%actual, "Signature does not belong to the requesting user");
            return Err(Error::SignerMismatch { expected, actual });
        }

        Ok(SignedRequest {
            request: self.request,
            payload: self.payload,
            signature,
        })
    }
}

/// A request carrying the user's signature, ready for the gateway
#[derive(Debug, Clone)]
pub struct SignedRequest {
    request: DecryptionRequest,
    payload: SigningPayload,
    signature: Signature,
}

impl SignedRequest {
    pub fn request(&self) -> &DecryptionRequest {
        &self.request
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn gateway_request(&self) -> GatewayRequest {
        GatewayRequest {
            handle: self.request.handle,
            contract_address: self.request.contract_address,
            user_address: self.request.user_address,
            chain_id: self.payload.chain_id(),
            signature: Bytes::copy_from_slice(&self.signature.as_bytes()),
        }
    }

    /// Send the request to `gateway` and validate what comes back
    #[instrument(name = "submit", skip_all, fields(handle = %self.request.handle))]
    pub async fn submit<G: DecryptionGateway + ?Sized>(
        self,
        gateway: &G,
        gateway_signer: Option<Address>,
    ) -> Result<DecryptionResult> {
        let response = gateway
            .user_decrypt(&self.gateway_request())
            .await
            .map_err(|e| match e {
                GatewayError::Unavailable(reason) => Error::GatewayUnavailable(reason),
                GatewayError::Rejected(reason) => Error::DecryptionFailed(reason),
            })?;

        self.validate(response, gateway_signer)
    }

    /// Check a gateway response against this request.
    ///
    /// The echoed handle must match, the attestation must come from `gateway_signer` when one
    /// is given, and the value must decode as the type embedded in the handle.
    pub fn validate(
        self,
        response: GatewayResponse,
        gateway_signer: Option<Address>,
    ) -> Result<DecryptionResult> {
        let expected = self.request.handle;
        if response.handle != expected {
            warn!(%expected, actual = %response.handle, "Discarding response for another handle");
            return Err(Error::HandleMismatch {
                expected,
                actual: response.handle,
            });
        }

        if let Some(gateway_signer) = gateway_signer {
            self.verify_attestation(&response, gateway_signer)?;
        }

        let fhe_type = expected.fhe_type().ok_or_else(|| {
            Error::DecryptionFailed(format!("Handle {expected} does not carry a known type"))
        })?;
        let value = codec::decode(&response.value, fhe_type).map_err(|e| {
            Error::DecryptionFailed(format!("Gateway value is not a valid {fhe_type}: {e}"))
        })?;

        info!(handle = %expected, %fhe_type, "Decryption resolved");
        Ok(DecryptionResult {
            value,
            handle: expected,
            signature: self.signature,
            attestation: response.signature,
        })
    }

    fn verify_attestation(
        &self,
        response: &GatewayResponse,
        gateway_signer: Address,
    ) -> Result<()> {
        let signature = Signature::try_from(&response.signature[..])
            .map_err(|e| Error::AttestationInvalid(format!("Malformed signature: {e}")))?;

        let hash = attestation_hash(
            self.payload.domain(),
            response.handle,
            self.request.user_address,
            &response.value,
        );
        let recovered = signature
            .recover_address_from_prehash(&hash)
            .map_err(|e| Error::AttestationInvalid(format!("Unrecoverable signature: {e}")))?;

        if recovered != gateway_signer {
            return Err(Error::AttestationInvalid(format!(
                "Signed by {recovered}, expected {gateway_signer}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eip712::decryption_domain, FheType};
    use alloy::{
        primitives::U256,
        signers::{local::PrivateKeySigner, SignerSync},
    };

    const CHAIN_ID: u64 = 31337;

    fn request_for(user: Address) -> DecryptionRequest {
        DecryptionRequest::new(
            Address::repeat_byte(0x42),
            CiphertextHandle::derive(b"ct", FheType::Uint32, CHAIN_ID),
            user,
        )
    }

    async fn signed(user: &PrivateKeySigner) -> Result<SignedRequest> {
        UnsignedRequest::new(request_for(user.address()), CHAIN_ID)
            .sign(user)
            .await
    }

    fn response_for(
        request: &DecryptionRequest,
        value: u32,
        gateway: &PrivateKeySigner,
    ) -> anyhow::Result<GatewayResponse> {
        let value = Bytes::from(codec::encode(&FheValue::from(value), FheType::Uint32)?);
        let hash = attestation_hash(
            &decryption_domain(CHAIN_ID, request.contract_address),
            request.handle,
            request.user_address,
            &value,
        );
        let signature = gateway.sign_hash_sync(&hash)?;
        Ok(GatewayResponse {
            value,
            handle: request.handle,
            signature: Bytes::copy_from_slice(&signature.as_bytes()),
        })
    }

    #[tokio::test]
    async fn test_sign_and_validate() -> anyhow::Result<()> {
        let user = PrivateKeySigner::random();
        let gateway = PrivateKeySigner::random();
        let signed = signed(&user).await?;
        let response = response_for(signed.request(), 42, &gateway)?;

        let gateway_request = signed.gateway_request();
        assert_eq!(gateway_request.chain_id, CHAIN_ID);
        assert_eq!(gateway_request.signature.len(), 65);

        let result = signed.validate(response, Some(gateway.address()))?;
        assert_eq!(result.value.to_u256(), Some(U256::from(42)));
        Ok(())
    }

    #[tokio::test]
    async fn test_signer_must_be_the_user() -> anyhow::Result<()> {
        let user = PrivateKeySigner::random();
        let other = PrivateKeySigner::random();
        let result = UnsignedRequest::new(request_for(user.address()), CHAIN_ID)
            .sign(&other)
            .await;
        assert!(matches!(result, Err(Error::SignerMismatch { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_handle_mismatch_is_rejected() -> anyhow::Result<()> {
        let user = PrivateKeySigner::random();
        let gateway = PrivateKeySigner::random();
        let signed = signed(&user).await?;
        let mut response = response_for(signed.request(), 7, &gateway)?;
        response.handle = CiphertextHandle::derive(b"other", FheType::Uint32, CHAIN_ID);

        let result = signed.validate(response, None);
        assert!(matches!(result, Err(Error::HandleMismatch { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_attestation_from_wrong_key() -> anyhow::Result<()> {
        let user = PrivateKeySigner::random();
        let gateway = PrivateKeySigner::random();
        let impostor = PrivateKeySigner::random();
        let signed = signed(&user).await?;
        let response = response_for(signed.request(), 7, &impostor)?;

        let result = signed.clone().validate(response.clone(), Some(gateway.address()));
        assert!(matches!(result, Err(Error::AttestationInvalid(_))));

        // without a configured gateway signer the attestation is passed through unchecked
        let result = signed.validate(response, None)?;
        assert_eq!(result.value, FheValue::from(7u32));
        Ok(())
    }

    #[tokio::test]
    async fn test_tampered_value_breaks_attestation() -> anyhow::Result<()> {
        let user = PrivateKeySigner::random();
        let gateway = PrivateKeySigner::random();
        let signed = signed(&user).await?;
        let mut response = response_for(signed.request(), 7, &gateway)?;
        response.value = Bytes::from(codec::encode(&FheValue::from(8u32), FheType::Uint32)?);

        let result = signed.validate(response, Some(gateway.address()));
        assert!(matches!(result, Err(Error::AttestationInvalid(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_undecodable_value() -> anyhow::Result<()> {
        let user = PrivateKeySigner::random();
        let signed = signed(&user).await?;
        let response = GatewayResponse {
            value: Bytes::from(vec![1u8, 2, 3]),
            handle: signed.request().handle,
            signature: Bytes::new(),
        };
        let result = signed.validate(response, None);
        assert!(matches!(result, Err(Error::DecryptionFailed(_))));
        Ok(())
    }
}

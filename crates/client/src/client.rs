// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    codec, BfvPrimitive, CiphertextBuilder, ClientConfig, DecryptionGateway, DecryptionRequest,
    DecryptionResult, DecryptionSigner, EncryptedPayload, Error, FhePrimitive, FheType, FheValue,
    HttpGateway, KeyManager, KeyPair, ProviderConfig, PublicKey, Result, SigningPayload,
    UnsignedRequest,
};
use alloy::providers::Provider;
use std::sync::{Arc, PoisonError, RwLock, TryLockError};
use tracing::{info, instrument};

fn config_error(e: anyhow::Error) -> Error {
    Error::Config(format!("{e:#}"))
}

pub struct FhevmClientBuilder {
    config: ClientConfig,
    primitive: Option<Arc<dyn FhePrimitive>>,
    gateway: Option<Arc<dyn DecryptionGateway>>,
}

impl FhevmClientBuilder {
    /// Encrypt with `primitive` instead of BFV under the configured preset
    pub fn primitive(mut self, primitive: impl FhePrimitive + 'static) -> Self {
        self.primitive = Some(Arc::new(primitive));
        self
    }

    /// Decrypt through `gateway` instead of the configured gateway URL
    pub fn gateway(mut self, gateway: impl DecryptionGateway + 'static) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    pub fn build(self) -> Result<FhevmClient> {
        let FhevmClientBuilder {
            config,
            primitive,
            gateway,
        } = self;

        config.validate().map_err(config_error)?;

        let primitive = primitive.unwrap_or_else(|| {
            Arc::new(BfvPrimitive::new(config.fhe_preset)) as Arc<dyn FhePrimitive>
        });

        let gateway = match gateway {
            Some(gateway) => Some(gateway),
            None => match config.gateway().map_err(config_error)? {
                Some(url) => Some(Arc::new(HttpGateway::new(&url).map_err(config_error)?)
                    as Arc<dyn DecryptionGateway>),
                None => None,
            },
        };

        Ok(FhevmClient {
            keys: KeyManager::new(primitive.clone()),
            ciphertexts: CiphertextBuilder::new(primitive.clone(), config.chain_id),
            primitive,
            gateway,
            config,
            session: RwLock::new(None),
        })
    }
}

/// Encrypts inputs for and requests decryptions from one network.
///
/// Nothing works before [`FhevmClient::init`] has completed. The client can be shared
/// between threads, concurrent calls never block on each other.
pub struct FhevmClient {
    config: ClientConfig,
    primitive: Arc<dyn FhePrimitive>,
    keys: KeyManager,
    ciphertexts: CiphertextBuilder,
    gateway: Option<Arc<dyn DecryptionGateway>>,
    session: RwLock<Option<Arc<KeyPair>>>,
}

impl FhevmClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> FhevmClientBuilder {
        FhevmClientBuilder {
            config,
            primitive: None,
            gateway: None,
        }
    }

    /// Start a key session, generating a fresh key pair unless one is supplied.
    ///
    /// Calling it again replaces the session key. Calls made while it runs fail with
    /// [`Error::ClientNotInitialized`], and so do all calls after a failed attempt. That
    /// includes the moment a re-init is queued behind in-flight readers: an initialized
    /// client then briefly reports `is_initialized() == false`.
    #[instrument(name = "init", skip_all, fields(chain_id = self.config.chain_id))]
    pub fn init(&self, key_pair: Option<KeyPair>) -> Result<()> {
        let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
        *session = None;

        let key_pair = match key_pair {
            Some(key_pair) => key_pair,
            None => self.keys.generate()?,
        };

        info!(public_key_id = %key_pair.public_key().id(), "Client initialized");
        *session = Some(Arc::new(key_pair));
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.session().is_ok()
    }

    fn session(&self) -> Result<Arc<KeyPair>> {
        let guard = match self.session.try_read() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(Error::ClientNotInitialized),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };
        guard.clone().ok_or(Error::ClientNotInitialized)
    }

    pub fn public_key(&self) -> Result<PublicKey> {
        Ok(self.session()?.public_key().clone())
    }

    #[instrument(name = "encrypt", skip_all, fields(fhe_type = %fhe_type))]
    pub fn encrypt(
        &self,
        input: impl Into<FheValue>,
        fhe_type: FheType,
    ) -> Result<EncryptedPayload> {
        let session = self.session()?;
        self.ciphertexts
            .build_ciphertext(&input.into(), fhe_type, &session)
    }

    /// The payload a signer is asked to sign for `request`
    pub fn signing_payload(&self, request: &DecryptionRequest) -> SigningPayload {
        SigningPayload::new(request, self.config.chain_id)
    }

    /// Decrypt a handle the user is allowed to see.
    ///
    /// The user signs the request through `signer`, the gateway decrypts and the result is
    /// validated against the request before it is returned. Dropping the future abandons the
    /// request.
    #[instrument(
        name = "user_decrypt",
        skip_all,
        fields(handle = %request.handle, user = %request.user_address)
    )]
    pub async fn user_decrypt<S: DecryptionSigner + ?Sized>(
        &self,
        request: DecryptionRequest,
        signer: &S,
    ) -> Result<DecryptionResult> {
        self.session()?;
        let gateway = self.gateway.as_ref().ok_or(Error::GatewayNotConfigured)?;

        let handle = request.handle;
        if handle.fhe_type().is_none() {
            return Err(Error::MalformedValue(format!(
                "Handle {handle} does not encode a known FHE type"
            )));
        }
        if handle.chain_id() != self.config.chain_id {
            return Err(Error::ChainMismatch {
                expected: self.config.chain_id,
                actual: handle.chain_id(),
            });
        }

        UnsignedRequest::new(request, self.config.chain_id)
            .sign(signer)
            .await?
            .submit(gateway.as_ref(), self.config.gateway_signer)
            .await
    }

    /// Decrypt a ciphertext under the session key, for values already revealed to this client
    pub fn public_decrypt(&self, ciphertext: &[u8], fhe_type: FheType) -> Result<FheValue> {
        let session = self.session()?;
        let plaintext = self
            .primitive
            .decrypt(ciphertext, session.private_key().expose_secret())
            .map_err(|e| Error::DecryptionFailed(format!("{e:#}")))?;
        codec::decode(&plaintext, fhe_type)
    }

    /// JSON-RPC provider for the configured network
    pub fn provider(&self) -> Result<impl Provider + Clone> {
        ProviderConfig::from_config(&self.config)
            .and_then(|provider| provider.create_readonly_provider())
            .map_err(config_error)
    }

    /// Ask the provider which chain it serves and compare with the configured chain id
    pub async fn verify_chain_id(&self) -> Result<u64> {
        let actual = self
            .provider()?
            .get_chain_id()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if actual != self.config.chain_id {
            return Err(Error::ChainMismatch {
                expected: self.config.chain_id,
                actual,
            });
        }
        Ok(actual)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/*
[INPUT]:  Merchant credentials, timeouts, injected transport/nonce/clock
[OUTPUT]: Configured gateway client ready for signed API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::auth::{Clock, NonceSource, RequestSigner};
use crate::callback::CallbackVerifier;
use crate::http::envelope::{EnvelopeBuilder, SignedRequest};
use crate::http::response::ResponseDecoder;
use crate::http::transport::{HttpTransport, Transport};
use crate::http::{GatewayError, Result};
use crate::types::{GatewayMethod, GatewayResponse};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Fail on a non-200 `code` field in response bodies
    pub strict_gateway_errors: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            strict_gateway_errors: false,
        }
    }
}

/// Merchant credentials issued by the gateway
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub merchant_id: String,
    /// API key used as the signing secret
    pub shared_secret: String,
    pub gateway_base_url: String,
    /// URL the gateway posts deposit/withdrawal callbacks to
    pub callback_url: String,
}

impl Credentials {
    pub fn new(
        merchant_id: impl Into<String>,
        shared_secret: impl Into<String>,
        gateway_base_url: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            shared_secret: shared_secret.into(),
            gateway_base_url: gateway_base_url.into(),
            callback_url: callback_url.into(),
        }
    }

    /// Base URL with a single trailing slash removed, after validation
    fn normalized_base_url(&self) -> Result<String> {
        Url::parse(&self.gateway_base_url)?;
        Ok(self
            .gateway_base_url
            .strip_suffix('/')
            .unwrap_or(&self.gateway_base_url)
            .to_string())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("shared_secret", &"<redacted>")
            .field("gateway_base_url", &self.gateway_base_url)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// Main HTTP client for the ByteWallet gateway
pub struct GatewayClient {
    credentials: Credentials,
    envelope_builder: EnvelopeBuilder,
    transport: Arc<dyn Transport>,
    decoder: ResponseDecoder,
}

impl GatewayClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        if credentials.merchant_id.trim().is_empty() {
            return Err(GatewayError::Config("merchant id must not be empty".to_string()));
        }
        if credentials.shared_secret.is_empty() {
            return Err(GatewayError::Config("shared secret must not be empty".to_string()));
        }

        let base_url = credentials.normalized_base_url()?;
        let signer = RequestSigner::new(credentials.shared_secret.clone());

        Ok(Self {
            envelope_builder: EnvelopeBuilder::new(base_url, signer),
            transport: Arc::new(HttpTransport::new(&config)?),
            decoder: ResponseDecoder::new(config.strict_gateway_errors),
            credentials,
        })
    }

    /// Replace the network transport
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the nonce source
    pub fn with_nonce_source(mut self, nonce_source: Arc<dyn NonceSource>) -> Self {
        self.envelope_builder = self.envelope_builder.with_nonce_source(nonce_source);
        self
    }

    /// Replace the timestamp clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.envelope_builder = self.envelope_builder.with_clock(clock);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn envelope_builder(&self) -> &EnvelopeBuilder {
        &self.envelope_builder
    }

    /// Verifier sharing this client's secret, for the inbound callback path
    pub fn callback_verifier(&self) -> CallbackVerifier {
        CallbackVerifier::new(RequestSigner::new(self.credentials.shared_secret.clone()))
    }

    /// Sign and send a business body, then decode the response
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: GatewayMethod,
        body: &B,
    ) -> Result<GatewayResponse> {
        let request = self.envelope_builder.build(method, body)?;
        self.execute(&request).await
    }

    /// Like [`request`](Self::request) for a path string such as `/mch/withdraw`
    pub async fn request_path<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<GatewayResponse> {
        let request = self.envelope_builder.build_path(path, body)?;
        self.execute(&request).await
    }

    async fn execute(&self, request: &SignedRequest) -> Result<GatewayResponse> {
        let bytes = self.transport.send(request).await?;
        self.decoder.decode(&bytes)
    }
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("credentials", &self.credentials)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

/*
[INPUT]:  Gateway method, business body, signer, nonce source and clock
[OUTPUT]: Signed outbound envelopes ready for the transport
[POS]:    HTTP layer - request envelope assembly (encode, sign, wrap)
[UPDATE]: When envelope fields or body encoding rules change
*/

use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::auth::{Clock, NonceSource, RandomNonce, RequestSigner, SystemClock};
use crate::http::Result;
use crate::types::{BodyEncoding, GatewayMethod};

/// Outer JSON object posted to the gateway.
///
/// `body` holds the already-encoded business body as a string, so the
/// wire form is double-encoded JSON. The signature covers that inner string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEnvelope {
    pub timestamp: String,
    pub nonce: String,
    pub sign: String,
    pub body: String,
}

/// A fully built request: HTTP method, target URL and envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: Method,
    pub url: String,
    pub envelope: OutboundEnvelope,
}

impl SignedRequest {
    /// JSON text sent as the request body
    pub fn payload(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.envelope)?)
    }
}

/// Builds signed envelopes for a single merchant
#[derive(Clone)]
pub struct EnvelopeBuilder {
    base_url: String,
    signer: RequestSigner,
    nonce_source: Arc<dyn NonceSource>,
    clock: Arc<dyn Clock>,
}

impl EnvelopeBuilder {
    /// Builder with the default six-digit random nonce and the system clock
    pub fn new(base_url: impl Into<String>, signer: RequestSigner) -> Self {
        Self {
            base_url: base_url.into(),
            signer,
            nonce_source: Arc::new(RandomNonce::new()),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_nonce_source(mut self, nonce_source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = nonce_source;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Encode, sign and wrap a business body with a fresh nonce
    pub fn build<B: Serialize + ?Sized>(&self, method: GatewayMethod, body: &B) -> Result<SignedRequest> {
        let nonce = self.nonce_source.next_nonce();
        self.build_with_nonce(method, body, &nonce)
    }

    /// Same as [`build`](Self::build) with a caller-supplied nonce (idempotency key)
    pub fn build_with_nonce<B: Serialize + ?Sized>(
        &self,
        method: GatewayMethod,
        body: &B,
        nonce: &str,
    ) -> Result<SignedRequest> {
        self.build_raw(method.path(), method.body_encoding(), body, nonce)
    }

    /// Build for a gateway path given as a string.
    ///
    /// Known paths use their method's encoding; unknown ones are array-wrapped
    /// like every endpoint except support-coins.
    pub fn build_path<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<SignedRequest> {
        let encoding = GatewayMethod::from_path(path)
            .map(GatewayMethod::body_encoding)
            .unwrap_or(BodyEncoding::WrappedArray);
        let nonce = self.nonce_source.next_nonce();
        self.build_raw(path, encoding, body, &nonce)
    }

    /// Build against an arbitrary path with an explicit body encoding
    pub fn build_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        encoding: BodyEncoding,
        body: &B,
        nonce: &str,
    ) -> Result<SignedRequest> {
        let timestamp = self.clock.unix_timestamp().to_string();
        let body = encoding.encode(body)?;
        let sign = self.signer.sign(&body, &timestamp, nonce);

        Ok(SignedRequest {
            method: Method::POST,
            url: format!("{}{}", self.base_url, path),
            envelope: OutboundEnvelope {
                timestamp,
                nonce: nonce.to_string(),
                sign,
                body,
            },
        })
    }
}

impl std::fmt::Debug for EnvelopeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeBuilder")
            .field("base_url", &self.base_url)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

/*
[INPUT]:  Inbound callback fields and the merchant shared secret
[OUTPUT]: Authenticated, parsed callback bodies or a rejection
[POS]:    Callback layer - signature check before any payload is trusted
[UPDATE]: When callback signing or body schema changes
*/

use thiserror::Error;

use crate::auth::RequestSigner;
use crate::types::{CallbackBody, InboundCallback};

/// Why a callback was turned away. Not an error of this crate: forged or
/// corrupted callbacks are an expected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackRejection {
    #[error("callback signature does not match")]
    SignatureMismatch,

    #[error("callback body is not valid JSON: {0}")]
    MalformedBody(String),
}

impl CallbackRejection {
    /// Short diagnostic returned to the gateway
    pub fn response_text(&self) -> &'static str {
        match self {
            CallbackRejection::SignatureMismatch => "Signature error",
            CallbackRejection::MalformedBody(_) => "Invalid body",
        }
    }
}

/// Checks callback signatures with the same canonical string as outbound signing
#[derive(Debug, Clone)]
pub struct CallbackVerifier {
    signer: RequestSigner,
}

impl CallbackVerifier {
    pub fn new(signer: RequestSigner) -> Self {
        Self { signer }
    }

    pub fn from_secret(secret: impl Into<String>) -> Self {
        Self::new(RequestSigner::new(secret))
    }

    /// `true` when `signature` equals the recomputed one
    pub fn verify_fields(&self, body: &str, timestamp: &str, nonce: &str, signature: &str) -> bool {
        self.signer.verify(body, timestamp, nonce, signature)
    }

    pub fn verify(&self, callback: &InboundCallback) -> bool {
        self.verify_fields(
            &callback.body,
            &callback.timestamp,
            &callback.nonce,
            &callback.sign,
        )
    }

    /// Verify, then parse the inner body
    pub fn authenticate(
        &self,
        callback: &InboundCallback,
    ) -> std::result::Result<CallbackBody, CallbackRejection> {
        if !self.verify(callback) {
            return Err(CallbackRejection::SignatureMismatch);
        }
        CallbackBody::parse(&callback.body)
            .map_err(|e| CallbackRejection::MalformedBody(e.to_string()))
    }
}

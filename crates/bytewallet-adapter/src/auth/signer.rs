/*
[INPUT]:  Serialized body, timestamp, nonce and the merchant shared secret
[OUTPUT]: Lowercase hex MD5 signatures and verification results
[POS]:    Auth layer - signing shared by outbound requests and inbound callbacks
[UPDATE]: When the gateway changes its canonical signing string
*/

use std::fmt;

use md5::{Digest, Md5};

/// Signs and verifies gateway payloads with the merchant shared secret.
///
/// Canonical string: `body || secret || nonce || timestamp`, no separators.
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    /// Create a signer for the given shared secret (the merchant API key)
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign a serialized body; returns 32 lowercase hex characters
    pub fn sign(&self, body: &str, timestamp: &str, nonce: &str) -> String {
        sign_payload(body, timestamp, nonce, &self.secret)
    }

    /// Recompute the signature and compare it with the supplied one.
    ///
    /// Comparison is exact and case-sensitive.
    pub fn verify(&self, body: &str, timestamp: &str, nonce: &str, signature: &str) -> bool {
        let expected = self.sign(body, timestamp, nonce);
        constant_time_eq(expected.as_bytes(), signature.as_bytes())
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Compute `md5_hex(body + secret + nonce + timestamp)`
pub fn sign_payload(body: &str, timestamp: &str, nonce: &str, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(body.as_bytes());
    hasher.update(secret.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(timestamp.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

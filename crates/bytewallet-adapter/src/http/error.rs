/*
[INPUT]:  Error sources (serialization, transport, status, decoding, gateway codes)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error type for the outbound path
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for ByteWallet gateway calls
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Business body or envelope could not be JSON-encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Connection-level failure before a response arrived
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Gateway answered with something other than 200
    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response body could not be read to the end
    #[error("Failed to read response body: {0}")]
    ResponseBody(#[source] reqwest::Error),

    /// Response was not a JSON object
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Gateway reported a business error code (strict checking only)
    #[error("Gateway error (code {code}): {message}")]
    Gateway { code: i64, message: String },

    /// Gateway base URL could not be parsed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Check if the error is worth retrying.
    ///
    /// Nothing in this crate retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Network(_) | GatewayError::ResponseBody(_) => true,
            GatewayError::HttpStatus { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::HttpStatus { status, .. } => Some(*status),
            GatewayError::Network(err) | GatewayError::ResponseBody(err) => {
                err.status().map(|status| status.as_u16())
            }
            _ => None,
        }
    }

    /// Create a status error from a reqwest status code and response text
    pub fn http_status(status: StatusCode, body: impl Into<String>) -> Self {
        GatewayError::HttpStatus {
            status: status.as_u16(),
            body: body.into(),
        }
    }
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

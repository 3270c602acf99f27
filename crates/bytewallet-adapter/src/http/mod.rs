/*
[INPUT]:  Merchant credentials, business bodies and client configuration
[OUTPUT]: Signed gateway calls and decoded JSON responses
[POS]:    HTTP layer - outbound request path
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod envelope;
pub mod error;
pub mod merchant;
pub mod response;
pub mod transport;

pub use error::{GatewayError, Result};

pub use client::{ClientConfig, Credentials, GatewayClient};
pub use envelope::{EnvelopeBuilder, OutboundEnvelope, SignedRequest};
pub use response::ResponseDecoder;
pub use transport::{HttpTransport, Transport};

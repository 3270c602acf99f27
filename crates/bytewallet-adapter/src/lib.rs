/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public ByteWallet adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod callback;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    Clock,
    CounterNonce,
    FixedClock,
    NonceSource,
    RandomNonce,
    RequestSigner,
    SystemClock,
    sign_payload,
};

// Re-export commonly used types from callback
pub use callback::{
    CallbackEvent,
    CallbackHandler,
    CallbackOutcome,
    CallbackProcessor,
    CallbackRejection,
    CallbackVerifier,
    RecordingCallbackHandler,
    callback_router,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Credentials,
    EnvelopeBuilder,
    GatewayClient,
    GatewayError,
    HttpTransport,
    OutboundEnvelope,
    ResponseDecoder,
    Result,
    SignedRequest,
    Transport,
};

// Re-export all types
pub use types::*;

/*
[INPUT]:  Shared secret, injected clock and random sources
[OUTPUT]: Signatures, nonces and timestamps for the signing protocol
[POS]:    Auth layer - signing primitives used by both request and callback paths
[UPDATE]: When the signing string or nonce strategy changes
*/

pub mod clock;
pub mod nonce;
pub mod signer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use nonce::{CounterNonce, DEFAULT_NONCE_RANGE, NonceSource, RandomNonce};
pub use signer::{RequestSigner, sign_payload};

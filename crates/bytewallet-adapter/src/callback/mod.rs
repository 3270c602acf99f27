/*
[INPUT]:  Gateway callbacks (form fields body/nonce/timestamp/sign)
[OUTPUT]: Verified events dispatched to merchant hooks, HTTP acknowledgements
[POS]:    Callback layer - inbound notification path
[UPDATE]: When callback verification, dispatch or serving changes
*/

pub mod dispatch;
pub mod router;
pub mod verifier;

pub use dispatch::{
    CallbackEvent, CallbackHandler, CallbackOutcome, CallbackProcessor, RecordingCallbackHandler,
    dispatch,
};
pub use router::callback_router;
pub use verifier::{CallbackRejection, CallbackVerifier};

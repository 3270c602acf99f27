/*
[INPUT]:  Form-encoded callback POSTs from the gateway
[OUTPUT]: `success` for delivered callbacks, 400 with a diagnostic otherwise
[POS]:    Callback layer - axum HTTP surface for the callback URL
[UPDATE]: When the callback path or response contract changes
*/

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::routing::post;
use tracing::warn;

use crate::callback::dispatch::{CallbackOutcome, CallbackProcessor};
use crate::callback::verifier::CallbackRejection;
use crate::types::InboundCallback;

/// Router serving the callback endpoint at `path`
pub fn callback_router(processor: Arc<CallbackProcessor>, path: &str) -> Router {
    Router::new()
        .route(path, post(handle_callback))
        .with_state(processor)
}

/// POST {path}: verify, dispatch and acknowledge.
///
/// Bodies the form extractor cannot read (wrong content type, repeated
/// fields) carry no verifiable signature and get the same 400 as a forgery.
async fn handle_callback(
    State(processor): State<Arc<CallbackProcessor>>,
    form: std::result::Result<Form<InboundCallback>, FormRejection>,
) -> (StatusCode, &'static str) {
    let callback = match form {
        Ok(Form(callback)) => callback,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable callback form");
            return (
                StatusCode::BAD_REQUEST,
                CallbackRejection::SignatureMismatch.response_text(),
            );
        }
    };
    let outcome = processor.process(&callback).await;
    let status = match outcome {
        CallbackOutcome::Acknowledged(_) => StatusCode::OK,
        CallbackOutcome::Rejected(_) => StatusCode::BAD_REQUEST,
    };
    (status, outcome.response_text())
}

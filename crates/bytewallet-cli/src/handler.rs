/*
[INPUT]:  Verified callback bodies from the adapter's processor
[OUTPUT]: Structured log lines per deposit/withdrawal event
[POS]:    Callback hooks - default merchant-side handler for serve-callbacks
[UPDATE]: When wiring callbacks to real business actions
*/

use async_trait::async_trait;
use bytewallet_adapter::{CallbackBody, CallbackHandler};
use serde_json::Value;
use tracing::info;

/// Logs each hook; the daily log file doubles as the audit trail
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingCallbackHandler;

fn amount(body: &CallbackBody) -> String {
    match body.field("amount") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[async_trait]
impl CallbackHandler for LoggingCallbackHandler {
    async fn on_deposit_completed(&self, body: &CallbackBody) {
        info!(
            address = body.address().unwrap_or_default(),
            amount = %amount(body),
            "deposit completed"
        );
    }

    async fn on_withdrawal_pending_review(&self, body: &CallbackBody) {
        info!(business_id = body.business_id().unwrap_or_default(), "withdrawal pending review");
    }

    async fn on_withdrawal_review_approved(&self, body: &CallbackBody) {
        info!(business_id = body.business_id().unwrap_or_default(), "withdrawal review approved");
    }

    async fn on_withdrawal_review_rejected(&self, body: &CallbackBody) {
        info!(business_id = body.business_id().unwrap_or_default(), "withdrawal review rejected");
    }

    async fn on_withdrawal_completed(&self, body: &CallbackBody) {
        info!(
            business_id = body.business_id().unwrap_or_default(),
            amount = %amount(body),
            "withdrawal completed"
        );
    }

    async fn on_withdrawal_failed(&self, body: &CallbackBody) {
        info!(business_id = body.business_id().unwrap_or_default(), "withdrawal failed");
    }
}

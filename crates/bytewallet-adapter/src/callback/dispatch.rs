/*
[INPUT]:  Authenticated callback bodies and a merchant-supplied handler
[OUTPUT]: Hook invocations per (tradeType, status) and a delivery outcome
[POS]:    Callback layer - routing verified notifications to business logic
[UPDATE]: When the gateway adds callback states or hooks change
*/

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::callback::verifier::{CallbackRejection, CallbackVerifier};
use crate::types::{
    CallbackBody, DEPOSIT_COMPLETED_STATUS, InboundCallback, TradeType, WithdrawalStatus,
};

/// What a verified callback means for the merchant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackEvent {
    DepositCompleted,
    WithdrawalPendingReview,
    WithdrawalReviewApproved,
    WithdrawalReviewRejected,
    WithdrawalCompleted,
    WithdrawalFailed,
    /// Accepted but nothing to do (e.g. an in-flight deposit)
    Ignored { trade_type: i64, status: i64 },
}

impl CallbackEvent {
    pub fn classify(trade_type: i64, status: i64) -> Self {
        match TradeType::from_code(trade_type) {
            Some(TradeType::Deposit) if status == DEPOSIT_COMPLETED_STATUS => {
                CallbackEvent::DepositCompleted
            }
            Some(TradeType::Withdrawal) => match WithdrawalStatus::from_code(status) {
                Some(WithdrawalStatus::PendingReview) => CallbackEvent::WithdrawalPendingReview,
                Some(WithdrawalStatus::ReviewApproved) => CallbackEvent::WithdrawalReviewApproved,
                Some(WithdrawalStatus::ReviewRejected) => CallbackEvent::WithdrawalReviewRejected,
                Some(WithdrawalStatus::Completed) => CallbackEvent::WithdrawalCompleted,
                Some(WithdrawalStatus::Failed) => CallbackEvent::WithdrawalFailed,
                None => CallbackEvent::Ignored { trade_type, status },
            },
            _ => CallbackEvent::Ignored { trade_type, status },
        }
    }

    pub fn of(body: &CallbackBody) -> Self {
        Self::classify(body.trade_type, body.status)
    }
}

/// Business hooks for verified callbacks.
///
/// Every hook defaults to a no-op. The gateway delivers at least once, so
/// implementations should deduplicate on `businessId` themselves.
#[async_trait]
pub trait CallbackHandler: Send + Sync {
    async fn on_deposit_completed(&self, _body: &CallbackBody) {}

    async fn on_withdrawal_pending_review(&self, _body: &CallbackBody) {}

    async fn on_withdrawal_review_approved(&self, _body: &CallbackBody) {}

    async fn on_withdrawal_review_rejected(&self, _body: &CallbackBody) {}

    async fn on_withdrawal_completed(&self, _body: &CallbackBody) {}

    async fn on_withdrawal_failed(&self, _body: &CallbackBody) {}
}

/// Invoke the hook matching `event`, if any
pub async fn dispatch(handler: &dyn CallbackHandler, event: CallbackEvent, body: &CallbackBody) {
    match event {
        CallbackEvent::DepositCompleted => handler.on_deposit_completed(body).await,
        CallbackEvent::WithdrawalPendingReview => handler.on_withdrawal_pending_review(body).await,
        CallbackEvent::WithdrawalReviewApproved => {
            handler.on_withdrawal_review_approved(body).await
        }
        CallbackEvent::WithdrawalReviewRejected => {
            handler.on_withdrawal_review_rejected(body).await
        }
        CallbackEvent::WithdrawalCompleted => handler.on_withdrawal_completed(body).await,
        CallbackEvent::WithdrawalFailed => handler.on_withdrawal_failed(body).await,
        CallbackEvent::Ignored { .. } => {}
    }
}

/// Result of processing one inbound callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Delivered; the gateway must not resend
    Acknowledged(CallbackEvent),
    Rejected(CallbackRejection),
}

impl CallbackOutcome {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, CallbackOutcome::Acknowledged(_))
    }

    /// Body text sent back to the gateway
    pub fn response_text(&self) -> &'static str {
        match self {
            CallbackOutcome::Acknowledged(_) => "success",
            CallbackOutcome::Rejected(rejection) => rejection.response_text(),
        }
    }
}

/// Verifies and dispatches callbacks
#[derive(Clone)]
pub struct CallbackProcessor {
    verifier: CallbackVerifier,
    handler: Arc<dyn CallbackHandler>,
}

impl CallbackProcessor {
    pub fn new(verifier: CallbackVerifier, handler: Arc<dyn CallbackHandler>) -> Self {
        Self { verifier, handler }
    }

    pub fn verifier(&self) -> &CallbackVerifier {
        &self.verifier
    }

    pub async fn process(&self, callback: &InboundCallback) -> CallbackOutcome {
        let body = match self.verifier.authenticate(callback) {
            Ok(body) => body,
            Err(rejection) => {
                warn!(
                    nonce = %callback.nonce,
                    timestamp = %callback.timestamp,
                    reason = %rejection,
                    "callback rejected"
                );
                return CallbackOutcome::Rejected(rejection);
            }
        };

        let event = CallbackEvent::of(&body);
        info!(
            trade_type = body.trade_type,
            status = body.status,
            business_id = body.business_id().unwrap_or_default(),
            ?event,
            "callback accepted"
        );
        dispatch(self.handler.as_ref(), event, &body).await;
        CallbackOutcome::Acknowledged(event)
    }
}

impl std::fmt::Debug for CallbackProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackProcessor")
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

/// Handler that records every hook call, for tests and dry runs
#[derive(Debug, Default)]
pub struct RecordingCallbackHandler {
    calls: Mutex<Vec<(CallbackEvent, CallbackBody)>>,
}

impl RecordingCallbackHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CallbackEvent> {
        self.lock().iter().map(|(event, _)| *event).collect()
    }

    pub fn bodies(&self) -> Vec<CallbackBody> {
        self.lock().iter().map(|(_, body)| body.clone()).collect()
    }

    fn record(&self, event: CallbackEvent, body: &CallbackBody) {
        self.lock().push((event, body.clone()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(CallbackEvent, CallbackBody)>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CallbackHandler for RecordingCallbackHandler {
    async fn on_deposit_completed(&self, body: &CallbackBody) {
        self.record(CallbackEvent::DepositCompleted, body);
    }

    async fn on_withdrawal_pending_review(&self, body: &CallbackBody) {
        self.record(CallbackEvent::WithdrawalPendingReview, body);
    }

    async fn on_withdrawal_review_approved(&self, body: &CallbackBody) {
        self.record(CallbackEvent::WithdrawalReviewApproved, body);
    }

    async fn on_withdrawal_review_rejected(&self, body: &CallbackBody) {
        self.record(CallbackEvent::WithdrawalReviewRejected, body);
    }

    async fn on_withdrawal_completed(&self, body: &CallbackBody) {
        self.record(CallbackEvent::WithdrawalCompleted, body);
    }

    async fn on_withdrawal_failed(&self, body: &CallbackBody) {
        self.record(CallbackEvent::WithdrawalFailed, body);
    }
}

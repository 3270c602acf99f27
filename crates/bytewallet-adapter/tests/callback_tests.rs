/*
[INPUT]:  Signed and tampered callback payloads
[OUTPUT]: Test results for callback verification and dispatch
[POS]:    Integration tests - inbound callback path
[UPDATE]: When callback verification or dispatch changes
*/

mod common;

use std::sync::Arc;

use bytewallet_adapter::{
    CallbackEvent, CallbackOutcome, CallbackProcessor, CallbackRejection, CallbackVerifier,
    RecordingCallbackHandler, callback_router,
};
use common::{SECRET, signed_callback};
use rstest::rstest;

fn processor(handler: Arc<RecordingCallbackHandler>) -> CallbackProcessor {
    CallbackProcessor::new(CallbackVerifier::from_secret(SECRET), handler)
}

#[rstest]
#[case(r#"{"tradeType":2,"status":0}"#, Some(CallbackEvent::WithdrawalPendingReview))]
#[case(r#"{"tradeType":2,"status":1}"#, Some(CallbackEvent::WithdrawalReviewApproved))]
#[case(r#"{"tradeType":2,"status":2}"#, Some(CallbackEvent::WithdrawalReviewRejected))]
#[case(r#"{"tradeType":2,"status":3}"#, Some(CallbackEvent::WithdrawalCompleted))]
#[case(r#"{"tradeType":2,"status":4}"#, Some(CallbackEvent::WithdrawalFailed))]
#[case(r#"{"tradeType":1,"status":3}"#, Some(CallbackEvent::DepositCompleted))]
#[case(r#"{"tradeType":1,"status":1}"#, None)]
#[case(r#"{"tradeType":3,"status":3}"#, None)]
#[tokio::test]
async fn test_dispatch_table(#[case] body: &str, #[case] expected: Option<CallbackEvent>) {
    let handler = Arc::new(RecordingCallbackHandler::new());
    let outcome = processor(handler.clone()).process(&signed_callback(body)).await;

    assert!(outcome.is_acknowledged());
    assert_eq!(outcome.response_text(), "success");
    assert_eq!(handler.events(), expected.into_iter().collect::<Vec<_>>());
}

#[tokio::test]
async fn test_forged_callback_is_rejected_without_dispatch() {
    let handler = Arc::new(RecordingCallbackHandler::new());
    let mut callback = signed_callback(r#"{"tradeType":2,"status":3,"amount":"1000"}"#);
    callback.body = r#"{"tradeType":2,"status":3,"amount":"9000"}"#.to_string();

    let outcome = processor(handler.clone()).process(&callback).await;
    assert_eq!(
        outcome,
        CallbackOutcome::Rejected(CallbackRejection::SignatureMismatch)
    );
    assert!(handler.events().is_empty());
}

#[tokio::test]
async fn test_signed_garbage_is_malformed_body() {
    let handler = Arc::new(RecordingCallbackHandler::new());
    let outcome = processor(handler.clone())
        .process(&signed_callback("tradeType=2"))
        .await;

    assert!(matches!(
        outcome,
        CallbackOutcome::Rejected(CallbackRejection::MalformedBody(_))
    ));
    assert_eq!(outcome.response_text(), "Invalid body");
    assert!(handler.events().is_empty());
}

#[tokio::test]
async fn test_callback_server_end_to_end() {
    let handler = Arc::new(RecordingCallbackHandler::new());
    let app = callback_router(Arc::new(processor(handler.clone())), "/callUrl");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let callback = signed_callback(
        r#"{"tradeType":2,"status":3,"businessId":"sn00001","address":"TEpK1aWkeuskfo8reeeMqG7hdJ5tRytyAF"}"#,
    );
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/callUrl");

    let ok = client.post(&url).form(&callback).send().await.unwrap();
    assert_eq!(ok.status(), reqwest::StatusCode::OK);
    assert_eq!(ok.text().await.unwrap(), "success");

    let malformed = signed_callback("{");
    let bad = client.post(&url).form(&malformed).send().await.unwrap();
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(bad.text().await.unwrap(), "Invalid body");

    assert_eq!(handler.events(), vec![CallbackEvent::WithdrawalCompleted]);
    assert_eq!(handler.bodies()[0].business_id(), Some("sn00001"));
}

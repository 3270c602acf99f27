/*
[INPUT]:  Gateway callbacks posted to http://0.0.0.0:8080/callUrl
[OUTPUT]: Printed deposit/withdrawal events
[POS]:    Examples - serving the callback URL
[UPDATE]: When callback hooks change
*/

use std::sync::Arc;

use async_trait::async_trait;
use bytewallet_adapter::*;

/// Prints every hook invocation
struct PrintingHandler;

#[async_trait]
impl CallbackHandler for PrintingHandler {
    async fn on_deposit_completed(&self, body: &CallbackBody) {
        println!("✓ Deposit credited: {:?}", body.extra);
    }

    async fn on_withdrawal_completed(&self, body: &CallbackBody) {
        println!("✓ Withdrawal {:?} completed", body.business_id());
    }

    async fn on_withdrawal_failed(&self, body: &CallbackBody) {
        println!("✗ Withdrawal {:?} failed", body.business_id());
    }
}

#[tokio::main]
async fn main() {
    println!("=== ByteWallet Callback Server Example ===\n");

    let api_key = std::env::var("BYTEWALLET_API_KEY").unwrap_or_else(|_| "demo-secret".to_string());
    let processor = Arc::new(CallbackProcessor::new(
        CallbackVerifier::from_secret(api_key),
        Arc::new(PrintingHandler),
    ));
    let app = callback_router(processor, "/callUrl");

    let listener = match tokio::net::TcpListener::bind("0.0.0.0:8080").await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind: {}", e);
            return;
        }
    };
    println!("Listening for callbacks on http://0.0.0.0:8080/callUrl");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
    }
}

/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for bytewallet-adapter tests

use std::sync::Arc;

use bytewallet_adapter::{
    CounterNonce, Credentials, FixedClock, GatewayClient, InboundCallback, RequestSigner,
};
use wiremock::MockServer;

#[allow(dead_code)]
pub const MERCHANT_ID: &str = "80006";
pub const SECRET: &str = "071FE257d241C0b3f4faeEe13019871E1eb399f5";
pub const CALLBACK_URL: &str = "https://localhost/callUrl";
pub const TIMESTAMP: &str = "1700000000";
pub const NONCE: &str = "123456";

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

#[allow(dead_code)]
pub fn test_credentials(base_url: &str) -> Credentials {
    Credentials::new(MERCHANT_ID, SECRET, base_url, CALLBACK_URL)
}

/// Client pointed at `server` with a pinned clock and nonce
#[allow(dead_code)]
pub fn deterministic_client(server: &MockServer) -> GatewayClient {
    GatewayClient::new(test_credentials(&server.uri()))
        .expect("client should build")
        .with_clock(Arc::new(FixedClock(1_700_000_000)))
        .with_nonce_source(Arc::new(CounterNonce::new(123_456)))
}

/// Callback signed the way the gateway signs it
#[allow(dead_code)]
pub fn signed_callback(body: &str) -> InboundCallback {
    InboundCallback {
        body: body.to_string(),
        timestamp: TIMESTAMP.to_string(),
        nonce: NONCE.to_string(),
        sign: RequestSigner::new(SECRET).sign(body, TIMESTAMP, NONCE),
    }
}

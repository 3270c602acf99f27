/*
[INPUT]:  Signed requests and reqwest client configuration
[OUTPUT]: Raw response bytes or typed transport errors
[POS]:    HTTP layer - network I/O, kept behind a trait for mocking
[UPDATE]: When changing headers, status handling or client options
*/

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::http::envelope::SignedRequest;
use crate::http::{ClientConfig, GatewayError, Result};

/// Sends a signed request and returns the raw response body.
///
/// Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SignedRequest) -> Result<Vec<u8>>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http_client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &SignedRequest) -> Result<Vec<u8>> {
        let payload = request.payload()?;
        debug!(url = %request.url, body = %payload, "sending gateway request");

        let response = self
            .http_client
            .request(request.method.clone(), &request.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(GatewayError::Network)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            debug!(url = %request.url, status = status.as_u16(), "gateway returned non-OK status");
            return Err(GatewayError::http_status(status, body));
        }

        let bytes = response.bytes().await.map_err(GatewayError::ResponseBody)?;
        debug!(url = %request.url, len = bytes.len(), "gateway response received");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::envelope::OutboundEnvelope;
    use reqwest::Method;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn signed_request(url: String) -> SignedRequest {
        SignedRequest {
            method: Method::POST,
            url,
            envelope: OutboundEnvelope {
                timestamp: "1700000000".to_string(),
                nonce: "123456".to_string(),
                sign: "0123456789abcdef0123456789abcdef".to_string(),
                body: r#"[{"merchantId":"80006"}]"#.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_send_posts_envelope_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mch/withdraw"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "timestamp": "1700000000",
                "nonce": "123456",
                "sign": "0123456789abcdef0123456789abcdef",
                "body": "[{\"merchantId\":\"80006\"}]",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":200}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let bytes = transport
            .send(&signed_request(format!("{}/mch/withdraw", server.uri())))
            .await
            .unwrap();
        assert_eq!(bytes, br#"{"code":200}"#);
    }

    #[tokio::test]
    async fn test_non_ok_2xx_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let err = transport
            .send(&signed_request(format!("{}/mch/withdraw", server.uri())))
            .await
            .unwrap_err();
        match err {
            GatewayError::HttpStatus { status, body } => {
                assert_eq!(status, 201);
                assert_eq!(body, "created");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // grab a free port, then release it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let err = transport
            .send(&signed_request(format!("http://{addr}/mch/withdraw")))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)), "{err:?}");
        assert!(err.is_retryable());
    }

    /// Read one full HTTP request (headers plus Content-Length body)
    async fn read_request(socket: &mut tokio::net::TcpStream) -> Vec<u8> {
        use tokio::io::AsyncReadExt;

        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending a full request");
            buf.extend_from_slice(&chunk[..n]);

            let expected_len = {
                let text = String::from_utf8_lossy(&buf);
                text.find("\r\n\r\n").map(|header_end| {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            if !name.eq_ignore_ascii_case("content-length") {
                                return None;
                            }
                            value.trim().parse::<usize>().ok()
                        })
                        .unwrap_or(0);
                    header_end + 4 + content_length
                })
            };
            if expected_len.is_some_and(|len| buf.len() >= len) {
                return buf;
            }
        }
    }

    #[tokio::test]
    async fn test_truncated_body_is_response_body_error() {
        use tokio::io::AsyncWriteExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"code\":20")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let err = transport
            .send(&signed_request(format!("http://{addr}/mch/withdraw")))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ResponseBody(_)), "{err:?}");
        assert!(err.is_retryable());
    }
}

/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for trade-desk-adapter tests

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use trade_desk_adapter::{ClientConfig, TradeDeskClient};
use wiremock::{Match, MockServer, Request};

pub const KEY: &str = "my-key";
/// base64("my-secret")
pub const SECRET_B64: &str = "bXktc2VjcmV0";
pub const PASSPHRASE: &str = "my-passphrase";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, with a timeout that tolerates slow CI.
pub fn client_for(server: &MockServer) -> TradeDeskClient {
    let config = ClientConfig::new(server.uri(), KEY, SECRET_B64, PASSPHRASE)
        .with_timeout(Duration::from_secs(5));
    TradeDeskClient::new(config).expect("client init")
}

/// Recompute HMAC-SHA256("my-secret", timestamp + method + path + body).
pub fn expected_signature(timestamp: &str, method: &str, path: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(b"my-secret").expect("hmac key");
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(path.as_bytes());
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Matches only requests whose `ACCESS-SIGN` verifies against what the
/// server actually received.
pub struct ValidSignature;

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let (Some(timestamp), Some(signature)) =
            (header("ACCESS-TIMESTAMP"), header("ACCESS-SIGN"))
        else {
            return false;
        };

        let path = &request.url[url::Position::BeforePath..];
        signature
            == expected_signature(&timestamp, request.method.as_str(), path, &request.body)
    }
}

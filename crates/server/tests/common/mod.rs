//! Common test utilities for driving the router in-process.
//!
//! The fixture wires the real router to a mock commerce platform and an
//! instant sleeper, so webhook deliveries can be asserted end to end
//! without a store or real waits between lookups.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use activator_core::testing::{MockCommercePlatform, RecordingSleeper};
use activator_core::{ActivationConfig, ActivationProcessor, ServerConfig};
use activator_server::state::AppState;

/// Re-export fixtures for test convenience
pub use activator_core::testing::fixtures;

/// Webhook path used by every fixture.
pub const WEBHOOK_PATH: &str = "/order-create";

/// Upper bound when waiting on work done by detached tasks.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Test fixture for webhook testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_ack() {
///     let fixture = TestFixture::new();
///     let response = fixture.post(WEBHOOK_PATH, fixtures::order_json(1, None, &[])).await;
///     assert_eq!(response.text, "OK");
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock platform - script lookups and inspect calls
    pub platform: Arc<MockCommercePlatform>,
    /// Records the waits between lookups
    pub sleeper: Arc<RecordingSleeper>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON body, `Null` if the body was not JSON
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestFixture {
    /// Create a fixture targeting [`fixtures::TARGET_PRODUCT`].
    pub fn new() -> Self {
        Self::with_activation(fixtures::activation_config())
    }

    /// Create a fixture with a custom activation config.
    pub fn with_activation(activation: ActivationConfig) -> Self {
        let platform = Arc::new(MockCommercePlatform::new());
        let sleeper = Arc::new(RecordingSleeper::new());

        let processor = ActivationProcessor::new(activation, platform.clone())
            .with_sleeper(sleeper.clone());

        let server = ServerConfig {
            webhook_path: WEBHOOK_PATH.to_string(),
            ..Default::default()
        };
        let state = Arc::new(AppState::new(server, Arc::new(processor)));
        let router = activator_server::api::create_router(state);

        Self {
            router,
            platform,
            sleeper,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Request::builder().method("GET").uri(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.post_raw(path, &serde_json::to_string(&body).unwrap())
            .await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .header("X-Shopify-Topic", "orders/create")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }

    /// Wait until the platform saw `count` calls, failing the test otherwise.
    pub async fn wait_for_calls(&self, count: usize) {
        assert!(
            self.platform.wait_for_calls(count, SETTLE_TIMEOUT).await,
            "expected {} platform calls, saw {:?}",
            count,
            self.platform.recorded_calls().await
        );
    }

    /// Give detached tasks a chance to run, then return the call count.
    pub async fn settled_call_count(&self) -> usize {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.platform.call_count().await
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}

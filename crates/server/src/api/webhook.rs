//! Order webhook endpoint.
//!
//! Shopify retries a delivery that is not answered quickly, so the handler
//! acknowledges with 200 as soon as the body is decoded and leaves all
//! platform calls to a detached task. Bodies that cannot be read or decoded
//! are logged and acknowledged as well.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::{info, warn};

use activator_core::Order;

use crate::state::AppState;

/// Body of every acknowledgment.
pub const ACK: &str = "OK";

/// Header carrying Shopify's delivery id.
const HEADER_WEBHOOK_ID: &str = "x-shopify-webhook-id";
/// Header carrying the webhook topic (e.g. `orders/create`).
const HEADER_TOPIC: &str = "x-shopify-topic";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// POST handler: decode, dispatch, acknowledge.
pub async fn receive_order(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> &'static str {
    let webhook_id = header_str(&headers, HEADER_WEBHOOK_ID);
    let topic = header_str(&headers, HEADER_TOPIC);

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(
                webhook_id,
                topic,
                status = rejection.status().as_u16(),
                error = %rejection.body_text(),
                "Ignoring unreadable order webhook"
            );
            return ACK;
        }
    };

    match Order::from_slice(&body) {
        Ok(order) => {
            info!(order_id = %order.id, webhook_id, topic, "Order webhook accepted");
            // Handle dropped: the outcome only reaches the logs.
            drop(state.processor().dispatch(order));
        }
        Err(e) => {
            warn!(
                webhook_id,
                topic,
                bytes = body.len(),
                error = %e,
                "Ignoring undecodable order webhook"
            );
        }
    }

    ACK
}

/// GET handler on the webhook path, used as a health probe.
pub async fn probe() -> &'static str {
    ACK
}

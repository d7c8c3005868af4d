use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::{handlers, webhook};
use crate::state::AppState;

/// Largest webhook body that is buffered and decoded. Anything bigger is
/// still acknowledged, just not processed.
pub const MAX_WEBHOOK_BODY: usize = 16 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let webhook_path = state.webhook_path().to_string();

    Router::new()
        .route(
            &webhook_path,
            get(webhook::probe)
                .post(webhook::receive_order)
                .layer(DefaultBodyLimit::max(MAX_WEBHOOK_BODY)),
        )
        .route("/health", get(handlers::health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

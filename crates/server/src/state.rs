use std::sync::Arc;
use activator_core::{ActivationProcessor, ServerConfig};

/// Shared application state
pub struct AppState {
    server: ServerConfig,
    processor: Arc<ActivationProcessor>,
}

impl AppState {
    pub fn new(server: ServerConfig, processor: Arc<ActivationProcessor>) -> Self {
        Self { server, processor }
    }

    /// Path receiving order webhooks.
    pub fn webhook_path(&self) -> &str {
        &self.server.webhook_path
    }

    pub fn processor(&self) -> &Arc<ActivationProcessor> {
        &self.processor
    }
}

//! Instant sleeper for testing retry timing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::activation::Sleeper;

/// Sleeper that returns immediately and remembers what it was asked to wait.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<RwLock<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested waits, in call order.
    pub async fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.read().await.clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.write().await.push(duration);
    }
}

//! Delay port used by the task locator's compensating wait.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current operation for a fixed duration.
#[async_trait]
pub trait Delay: Send + Sync {
    /// Waits for `duration`.
    async fn wait(&self, duration: Duration);
}

/// [`Delay`] backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

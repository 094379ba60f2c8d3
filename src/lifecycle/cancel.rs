//! Caller-side cancellation.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Cancellation signal handed to a call by its caller.
///
/// Clones share the same signal. Unlike a broadcast channel, a task that
/// starts waiting after `cancel()` still observes it.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    /// Create a token that has not fired.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the token has fired.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns Ok.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Fire the signal after `delay` from a background task.
    pub fn cancel_after(&self, delay: Duration) -> tokio::task::JoinHandle<()> {
        let token = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            token.cancel();
        })
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

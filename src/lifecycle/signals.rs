//! OS signal handling.
//!
//! Translates SIGINT (Ctrl+C) into caller cancellation so an interactive
//! call stops retrying and returns promptly.

use crate::lifecycle::cancel::CancelToken;

/// Cancel `token` when Ctrl+C is received.
pub fn cancel_on_ctrl_c(token: CancelToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received, cancelling request");
                token.cancel();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
        }
    })
}

//! Graceful shutdown coordination
//!
//! Built on `tokio_util::sync::CancellationToken`; every clone of the
//! token observes the same cancellation.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Cancels its token when the process receives Ctrl+C.
///
/// # Example
///
/// ```ignore
/// let shutdown = ShutdownController::with_ctrl_c();
/// http_server.run(shutdown.token()).await?;
/// ```
#[derive(Clone)]
pub struct ShutdownController {
    token: CancellationToken,
}

impl ShutdownController {
    /// Create a controller that cancels when Ctrl+C is received
    pub fn with_ctrl_c() -> Self {
        let controller = Self {
            token: CancellationToken::new(),
        };
        let token = controller.token.clone();

        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown...");
                    token.cancel();
                }
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                }
            }
        });

        controller
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

//! Graceful shutdown
//!
//! One [`ShutdownSignal`] is shared by the HTTP server, the OS signal
//! listener and [`crate::server::ServerHandle`]. Triggering it is idempotent
//! and late waiters return immediately.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ShutdownSignal {
    state: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.state.borrow()
    }

    pub fn trigger(&self) {
        if !self.state.send_replace(true) {
            info!("Shutdown signal triggered");
        }
    }

    pub async fn wait(&self) {
        let mut rx = self.state.subscribe();
        // Only fails if every sender is gone, and `self` holds one.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve on SIGTERM or SIGINT (Ctrl+C elsewhere) and name the signal.
async fn os_shutdown_request() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => Ok("SIGTERM"),
            _ = sigint.recv() => Ok("SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok("Ctrl+C")
    }
}

/// Owns the shared signal and the grace period for in-flight requests.
pub struct ShutdownCoordinator {
    signal: ShutdownSignal,
    timeout_secs: u64,
}

impl ShutdownCoordinator {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            signal: ShutdownSignal::new(),
            timeout_secs,
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Trigger the signal when the process is asked to stop.
    pub fn start_signal_listener(&self) {
        let signal = self.signal.clone();
        tokio::spawn(async move {
            match os_shutdown_request().await {
                Ok(name) => {
                    info!(signal = name, "Stop requested by the OS");
                    signal.trigger();
                }
                Err(e) => warn!("Failed to install signal handlers: {}", e),
            }
        });
    }
}

//! Server runtime
//!
//! [`ServerHandle`] owns the full lifecycle: database connection, migrations,
//! outbound adapters (Kakao client, object store), the REST API and graceful
//! shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::SocialIdentityProvider;
use crate::config::{AppConfig, LoggingConfig};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{build_object_store, init_database, DatabaseConfig, KakaoIdentityProvider};
use crate::interfaces::http::{create_api_router, ApiContext};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Logging ────────────────────────────────────────────────────────

/// Install the global subscriber. `RUST_LOG` overrides `logging.level`.
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let installed = if logging.format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    if installed.is_err() {
        warn!("Tracing subscriber already installed");
    }
}

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running lodging service.
///
/// ```rust,no_run
/// use lodging::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, wire adapters and start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting lodging service v{}", env!("CARGO_PKG_VERSION"));

        // ── Database ───────────────────────────────────────────
        let db = init_database(&DatabaseConfig::from(&app_cfg.database)).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Outbound adapters ──────────────────────────────────
        let identity_provider: Arc<dyn SocialIdentityProvider> =
            Arc::new(KakaoIdentityProvider::new(&app_cfg.kakao)?);
        let store = build_object_store(&app_cfg.storage).await?;
        info!(backend = ?app_cfg.storage.backend, "Object storage ready");

        // ── REST API ───────────────────────────────────────────
        let ctx = ApiContext::new(db.clone(), identity_provider, store, &app_cfg);
        let router = create_api_router(ctx);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(app_cfg.listen_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until the API stops, then close the database.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds once shutdown
    /// has been triggered.
    pub async fn wait(self) {
        let signal = self.shutdown.signal();
        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        let mut api_task = self.api_task;

        let finished = tokio::select! {
            result = &mut api_task => Some(result),
            _ = signal.wait() => None,
        };

        match finished {
            Some(result) => log_api_exit(result),
            None => {
                info!("Waiting up to {}s for in-flight requests...", timeout.as_secs());
                match tokio::time::timeout(timeout, &mut api_task).await {
                    Ok(result) => log_api_exit(result),
                    Err(_) => {
                        warn!("Shutdown timeout elapsed, aborting REST API");
                        api_task.abort();
                    }
                }
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Lodging service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down lodging service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

fn log_api_exit(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 1;
        config.database.url = "sqlite::memory:".into();
        config.storage.local_dir = dir.path().join("media");

        let handle = ServerHandle::start(ServerOptions {
            config,
            auto_migrate: true,
        })
        .await
        .unwrap();

        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .expect("shutdown hung");
    }
}

//! Health check handler
//!
//! Reports the database and, for the local backend, whether the upload
//! directory can be written. Either failing marks the service degraded.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

const OK: &str = "ok";
const ERROR: &str = "error";

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
    /// Upload directory of the local backend; `None` for S3
    pub media_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
    pub storage: StorageHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StorageHealth {
    /// `local` or `s3`
    pub backend: String,
    /// `ok`, `error`, or `unchecked` for remote backends
    pub status: String,
}

async fn ping_database(db: &DatabaseConnection) -> ComponentHealth {
    let started = Instant::now();
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    match db.execute(ping).await {
        Ok(_) => ComponentHealth {
            status: OK.to_string(),
            latency_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(e) => {
            error!(error = %e, "Database ping failed");
            ComponentHealth {
                status: ERROR.to_string(),
                latency_ms: None,
            }
        }
    }
}

async fn check_storage(media_dir: Option<&PathBuf>) -> StorageHealth {
    let Some(dir) = media_dir else {
        return StorageHealth {
            backend: "s3".to_string(),
            status: "unchecked".to_string(),
        };
    };

    // Uploads create the directory lazily, so creating it here is harmless.
    let status = match tokio::fs::create_dir_all(dir).await {
        Ok(()) => OK,
        Err(e) => {
            error!(dir = %dir.display(), error = %e, "Upload directory is not usable");
            ERROR
        }
    };
    StorageHealth {
        backend: "local".to_string(),
        status: status.to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database or upload storage unavailable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = ping_database(&state.db).await;
    let storage = check_storage(state.media_dir.as_ref()).await;

    let healthy = database.status == OK && storage.status != ERROR;
    let (status, http_status) = if healthy {
        (OK, StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database,
            storage,
        }),
    )
}

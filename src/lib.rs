//! # Lodging marketplace service
//!
//! REST backend for a short-term lodging marketplace: listing search and
//! detail with review aggregates, listing creation with image upload,
//! reservations, and Kakao social sign-in with a signed session token.
//!
//! ## Architecture
//!
//! - **domain**: models, score aggregation and repository traits
//! - **application**: services (catalog, booking, identity, media) and
//!   outbound ports
//! - **infrastructure**: SeaORM persistence, JWT, Kakao client, object storage
//! - **interfaces**: HTTP handlers, DTOs and the router with Swagger UI
//! - **server**: process lifecycle and logging setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::{create_api_router, ApiContext};

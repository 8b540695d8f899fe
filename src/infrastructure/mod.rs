//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod oauth;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use oauth::KakaoIdentityProvider;
pub use storage::{build_object_store, LocalObjectStore};

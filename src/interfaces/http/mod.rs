//! HTTP REST API interfaces
//!
//! - `common`: `{message}` envelope, error codes and body extractors
//! - `middleware`: login guard (session token)
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiContext, ApiDoc};

//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Session issued after a successful social sign-in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignInResponse {
    pub message: String,
    /// Send back as the `Authorization` header on protected routes
    pub access_token: String,
}

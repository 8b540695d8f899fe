//! Login guard middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::application::IdentityService;
use crate::domain::User;
use crate::interfaces::http::common::ApiError;
use crate::interfaces::http::modules::request_id::record_user;

#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<IdentityService>,
}

/// The user a session token was issued to.
///
/// Extract in handlers: `Extension(user): Extension<AuthenticatedUser>`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub user: User,
}

/// Rejects the request unless `Authorization` carries a valid session token
/// of an existing user.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);

    match auth_state.identity.authenticate(auth_header.as_deref()).await {
        Ok(user) => {
            record_user(user.id);
            request.extensions_mut().insert(AuthenticatedUser { id: user.id, user });
            next.run(request).await
        }
        Err(e) => {
            warn!(uri = %request.uri(), error = %e, "Rejected unauthenticated request");
            ApiError::from(e).into_response()
        }
    }
}

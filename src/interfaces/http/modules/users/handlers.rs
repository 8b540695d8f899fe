//! Social sign-in handler

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};

use super::dto::SignInResponse;
use crate::application::IdentityService;
use crate::interfaces::http::common::{ApiError, MessageResponse, SUCCESS};

#[derive(Clone)]
pub struct UserState {
    pub identity: Arc<IdentityService>,
}

#[utoipa::path(
    post,
    path = "/user/kakao/signin",
    tag = "Users",
    params(
        ("Authorization" = String, Header, description = "Kakao access token, optionally prefixed with `Bearer `")
    ),
    responses(
        (status = 200, description = "Signed in; new users are registered on the fly", body = SignInResponse),
        (status = 400, description = "INVALID_SNS_TOKEN, KEY_ERROR or SOCIAL_PLATFORM_DOES_NOT_EXIST", body = MessageResponse)
    )
)]
pub async fn kakao_signin(
    State(state): State<UserState>,
    headers: HeaderMap,
) -> Result<Json<SignInResponse>, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let result = state.identity.sign_in(token).await?;

    Ok(Json(SignInResponse {
        message: SUCCESS.to_string(),
        access_token: result.access_token,
    }))
}

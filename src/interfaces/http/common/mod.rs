//! Response envelope and error mapping shared by every handler
//!
//! Every body the API returns carries a `message` string. Failures are
//! `{"message": "<CODE>"}` with the status fixed per code; handlers return
//! `Result<_, ApiError>` and let the `From` impls below pick the code.

pub mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::application::{AuthError, IdentityError, MediaError, SignInError};
use crate::domain::DomainError;

pub use validated_json::{JsonBody, JsonBodyRejection, ValidatedJson, ValidatedJsonRejection};

pub const SUCCESS: &str = "SUCCESS";
/// Reservation endpoints answer with this spelling; clients match on it.
pub const SUCESS: &str = "SUCESS";
pub const NO_RESERVATION: &str = "NO_RESERVATION";

/// `{"message": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn success() -> Json<Self> {
        Json(Self::new(SUCCESS))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    KeyError,
    InvalidValue,
    CategoryDoesNotExist,
    AccommodationDoesNotExist,
    SocialPlatformDoesNotExist,
    ImageDoesNotExist,
    InvalidSnsToken,
    PageNotFound,
    NeedLogin,
    InvalidToken,
    InvalidUser,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyError => "KEY_ERROR",
            Self::InvalidValue => "INVALID_VALUE",
            Self::CategoryDoesNotExist => "CATEGORY_DOES_NOT_EXIST",
            Self::AccommodationDoesNotExist => "ACCOMMODATION_DOES_NOT_EXIST",
            Self::SocialPlatformDoesNotExist => "SOCIAL_PLATFORM_DOES_NOT_EXIST",
            Self::ImageDoesNotExist => "IMAGE_DOES_NOT_EXIST",
            Self::InvalidSnsToken => "INVALID_SNS_TOKEN",
            Self::PageNotFound => "PAGE_NOT_FOUND",
            Self::NeedLogin => "NEED_LOGIN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidUser => "INVALID_USER",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::PageNotFound => StatusCode::NOT_FOUND,
            Self::NeedLogin | Self::InvalidToken | Self::InvalidUser => StatusCode::UNAUTHORIZED,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned from handlers
#[derive(Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    pub status: StatusCode,
    /// Logged, never sent to the client
    detail: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            status: code.status(),
            detail: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError).with_detail(detail)
    }
}

impl From<ErrorCode> for ApiError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                code = self.code.as_str(),
                detail = self.detail.as_deref().unwrap_or(""),
                "Request failed"
            );
        }
        (self.status, Json(MessageResponse::new(self.code.as_str()))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let code = match &e {
            DomainError::NotFound { entity, .. } => match *entity {
                "Category" => ErrorCode::CategoryDoesNotExist,
                "Accommodation" => ErrorCode::AccommodationDoesNotExist,
                "SocialPlatform" => ErrorCode::SocialPlatformDoesNotExist,
                _ => ErrorCode::PageNotFound,
            },
            DomainError::MissingKey(_) => ErrorCode::KeyError,
            DomainError::Validation(_) => ErrorCode::InvalidValue,
            DomainError::Integrity(_) | DomainError::Database(_) => ErrorCode::InternalServerError,
        };
        Self::new(code).with_detail(e.to_string())
    }
}

impl From<SignInError> for ApiError {
    fn from(e: SignInError) -> Self {
        match e {
            SignInError::MissingToken => Self::new(ErrorCode::InvalidSnsToken),
            SignInError::Provider(IdentityError::Transport(detail)) => Self::internal(detail),
            SignInError::Provider(other) => {
                Self::new(ErrorCode::InvalidSnsToken).with_detail(other.to_string())
            }
            SignInError::Domain(domain) => domain.into(),
            SignInError::Token(detail) => Self::internal(detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken => Self::new(ErrorCode::NeedLogin),
            AuthError::InvalidToken => Self::new(ErrorCode::InvalidToken),
            AuthError::UnknownUser(_) => Self::new(ErrorCode::InvalidUser),
            AuthError::Domain(domain) => domain.into(),
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::NoFiles => Self::new(ErrorCode::ImageDoesNotExist),
            MediaError::Storage(storage) => Self::internal(storage.to_string()),
        }
    }
}

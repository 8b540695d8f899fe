use thiserror::Error;

use crate::application::ports::IdentityError;
use crate::domain::DomainError;

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Missing social access token")]
    MissingToken,

    #[error(transparent)]
    Provider(#[from] IdentityError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to sign session token: {0}")]
    Token(String),
}

/// Why a request could not be tied to a logged-in user
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingToken,

    #[error("Invalid or expired session token")]
    InvalidToken,

    #[error("User {0} does not exist")]
    UnknownUser(i32),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

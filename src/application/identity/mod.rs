//! Identity module: social sign-in and session authentication

pub mod error;
pub mod service;

pub use error::{AuthError, SignInError};
pub use service::{strip_bearer, IdentityService, SignInResult};

//! User aggregate
//!
//! Contains the User entity, social platforms, and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewSocialUser, SocialPlatform, User};
pub use repository::UserRepository;

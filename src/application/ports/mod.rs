//! Application ports
//!
//! Outbound interfaces the services call into; concrete adapters live in
//! `infrastructure`.

pub mod outbound;

pub use outbound::{
    IdentityError, ObjectStore, SocialIdentityProvider, SocialProfile, StorageError,
};

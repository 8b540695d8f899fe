//! Application layer
//!
//! Services orchestrating repositories and outbound ports. HTTP handlers are
//! thin wrappers that delegate here.

pub mod booking;
pub mod catalog;
pub mod identity;
pub mod media;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use booking::{BookingService, PurchaseRequest};
pub use catalog::{CatalogService, ListingDraft, ListingQuery};
pub use identity::{AuthError, IdentityService, SignInError, SignInResult};
pub use media::{MediaError, MediaService, UploadFile};
pub use ports::{
    IdentityError, ObjectStore, SocialIdentityProvider, SocialProfile, StorageError,
};

//! Listing catalog: search, detail and host listing creation

pub mod service;

pub use service::{CatalogService, ListingDraft, ListingQuery};

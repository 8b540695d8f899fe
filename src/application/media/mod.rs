//! Listing image uploads

pub mod service;

pub use service::{MediaError, MediaService, UploadFile};

//! Accommodations module: catalog search, detail, listing creation and
//! image upload

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

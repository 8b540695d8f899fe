//! Reservations module: trip history and purchase

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

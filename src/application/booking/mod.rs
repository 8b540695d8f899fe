//! Reservation history and purchase

pub mod service;

pub use service::{BookingService, PurchaseRequest};

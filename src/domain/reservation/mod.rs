//! Reservation aggregate
//!
//! Contains the Reservation entity, history bucketing, and repository interface.

pub mod model;
pub mod repository;

pub use model::{
    NewReservation, Reservation, ReservationHistory, ReservationStatus, ReservationSummary,
};
pub use repository::ReservationRepository;

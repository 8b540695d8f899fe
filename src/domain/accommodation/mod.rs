//! Accommodation aggregate
//!
//! Listings, their categories, images and host-blocked date ranges.

pub mod model;
pub mod repository;

pub use model::{
    Accommodation, Category, DateRange, ListingDetailRecord, ListingFilter, ListingHost,
    ListingRecord, NewAccommodation, RoomType,
};
pub use repository::AccommodationRepository;

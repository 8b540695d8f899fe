//! Domain layer
//!
//! Plain models, business rules and repository interfaces for the four
//! resource groups: accommodations, reviews, reservations and users.

pub mod accommodation;
pub mod repositories;
pub mod reservation;
pub mod review;
pub mod user;

pub use accommodation::{
    Accommodation, AccommodationRepository, Category, DateRange, ListingDetailRecord,
    ListingFilter, ListingHost, ListingRecord, NewAccommodation, RoomType,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{
    NewReservation, Reservation, ReservationHistory, ReservationRepository, ReservationStatus,
    ReservationSummary,
};
pub use review::{
    fixed_scale, grade_value, listing_grade, AxisAverages, AxisGrade, RatingAxes, Review,
    ReviewAuthor,
};
pub use user::{NewSocialUser, SocialPlatform, User, UserRepository};

pub use crate::shared::errors::DomainError;

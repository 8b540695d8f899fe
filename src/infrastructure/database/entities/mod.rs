//! Database entities module

pub mod accommodation;
pub mod category;
pub mod image;
pub mod reservation;
pub mod reservation_status;
pub mod review;
pub mod social_platform;
pub mod unavailable_date;
pub mod user;

pub use accommodation::Entity as Accommodation;
pub use category::Entity as Category;
pub use image::Entity as Image;
pub use reservation::Entity as Reservation;
pub use reservation_status::Entity as ReservationStatus;
pub use review::Entity as Review;
pub use social_platform::Entity as SocialPlatform;
pub use unavailable_date::Entity as UnavailableDate;
pub use user::Entity as User;

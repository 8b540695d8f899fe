//! In-memory repository and port doubles for service tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::ports::{ObjectStore, SocialIdentityProvider, SocialProfile, IdentityError, StorageError};
use crate::domain::{
    Accommodation, AccommodationRepository, Category, DomainResult, ListingDetailRecord,
    ListingFilter, ListingRecord, NewAccommodation, NewReservation, NewSocialUser,
    RepositoryProvider, Reservation, ReservationRepository, ReservationStatus,
    ReservationSummary, SocialPlatform, User, UserRepository,
};
use crate::shared::PaginatedResult;

#[derive(Default)]
pub struct MemoryAccommodations {
    pub categories: Vec<Category>,
    pub details: Vec<ListingDetailRecord>,
    pub created: Mutex<Vec<NewAccommodation>>,
    pub last_filter: Mutex<Option<ListingFilter>>,
}

#[async_trait]
impl AccommodationRepository for MemoryAccommodations {
    async fn search(&self, filter: &ListingFilter) -> DomainResult<PaginatedResult<ListingRecord>> {
        *self.last_filter.lock().unwrap() = Some(filter.clone());
        let items: Vec<ListingRecord> = self
            .details
            .iter()
            .map(|d| ListingRecord {
                accommodation: d.accommodation.clone(),
                category: d.category.clone(),
                image_urls: d.image_urls.clone(),
                ratings: d.reviews.iter().map(|r| r.ratings).collect(),
            })
            .collect();
        let total = items.len() as u64;
        Ok(PaginatedResult::new(items, total, filter.window))
    }

    async fn find_detail(&self, id: i32) -> DomainResult<Option<ListingDetailRecord>> {
        Ok(self.details.iter().find(|d| d.accommodation.id == id).cloned())
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.details.iter().any(|d| d.accommodation.id == id))
    }

    async fn find_category_by_name(&self, name: &str) -> DomainResult<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn create(&self, listing: NewAccommodation) -> DomainResult<Accommodation> {
        let mut created = self.created.lock().unwrap();
        created.push(listing.clone());
        Ok(Accommodation {
            id: created.len() as i32,
            category_id: Some(listing.category_id),
            host_id: listing.host_id,
            title: listing.title,
            address: listing.address,
            latitude: listing.latitude,
            longitude: listing.longitude,
            description: listing.description,
            max_capacity: listing.max_capacity,
            price: listing.price,
            cleaning_fee: listing.cleaning_fee,
            beds: listing.beds,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
        })
    }
}

#[derive(Default)]
pub struct MemoryReservations {
    pub summaries: Vec<ReservationSummary>,
    pub created: Mutex<Vec<NewReservation>>,
}

#[async_trait]
impl ReservationRepository for MemoryReservations {
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation> {
        let mut created = self.created.lock().unwrap();
        created.push(reservation.clone());
        Ok(Reservation {
            id: created.len() as i32,
            accommodation_id: Some(reservation.accommodation_id),
            user_id: reservation.user_id,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            total_price: reservation.total_price,
            total_guest: reservation.total_guest,
            status: ReservationStatus::Booked,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn find_for_user_excluding(
        &self,
        user_id: i32,
        excluded: ReservationStatus,
    ) -> DomainResult<Vec<ReservationSummary>> {
        Ok(self
            .summaries
            .iter()
            .filter(|s| s.reservation.user_id == user_id && s.reservation.status != excluded)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    pub platforms: Vec<SocialPlatform>,
    pub users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_platform_by_name(&self, name: &str) -> DomainResult<Option<SocialPlatform>> {
        Ok(self.platforms.iter().find(|p| p.name == name).cloned())
    }

    async fn get_or_create_social(&self, new_user: NewSocialUser) -> DomainResult<(User, bool)> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter().find(|u| {
            u.email == new_user.email && u.social_platform_id == new_user.social_platform_id
        }) {
            return Ok((existing.clone(), false));
        }
        let user = User {
            id: users.len() as i32 + 1,
            email: new_user.email,
            name: new_user.name,
            phone_number: None,
            profile_image: new_user.profile_image,
            date_of_birth: None,
            social_platform_id: new_user.social_platform_id,
        };
        users.push(user.clone());
        Ok((user, true))
    }
}

#[derive(Default)]
pub struct MemoryRepositories {
    pub accommodations: MemoryAccommodations,
    pub reservations: MemoryReservations,
    pub users: MemoryUsers,
}

impl RepositoryProvider for MemoryRepositories {
    fn accommodations(&self) -> &dyn AccommodationRepository {
        &self.accommodations
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}

/// Identity provider returning a fixed answer
pub struct StubIdentityProvider {
    pub result: Mutex<Option<Result<SocialProfile, IdentityError>>>,
}

impl StubIdentityProvider {
    pub fn returning(result: Result<SocialProfile, IdentityError>) -> Self {
        Self {
            result: Mutex::new(Some(result)),
        }
    }
}

#[async_trait]
impl SocialIdentityProvider for StubIdentityProvider {
    fn platform(&self) -> &'static str {
        SocialPlatform::KAKAO
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<SocialProfile, IdentityError> {
        self.result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(IdentityError::Transport("exhausted".into())))
    }
}

/// Object store that records keys and returns `memory://<key>`
#[derive(Default)]
pub struct RecordingStore {
    pub keys: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put(
        &self,
        key: &str,
        _content_type: Option<&str>,
        _bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("memory://{}", key))
    }
}

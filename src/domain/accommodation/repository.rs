//! Accommodation repository interface

use async_trait::async_trait;

use super::model::{Accommodation, Category, ListingDetailRecord, ListingFilter, ListingRecord, NewAccommodation};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait AccommodationRepository: Send + Sync {
    /// Listings matching the filter, one page at a time, ordered by id
    async fn search(&self, filter: &ListingFilter) -> DomainResult<PaginatedResult<ListingRecord>>;

    /// Listing with host, category, images and reviews
    async fn find_detail(&self, id: i32) -> DomainResult<Option<ListingDetailRecord>>;

    async fn exists(&self, id: i32) -> DomainResult<bool>;

    /// Find a category by its display name (e.g. "집 전체")
    async fn find_category_by_name(&self, name: &str) -> DomainResult<Option<Category>>;

    /// Insert a listing together with its images and unavailable dates
    async fn create(&self, listing: NewAccommodation) -> DomainResult<Accommodation>;
}

//! Catalog service

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{
    Accommodation, DateRange, DomainError, DomainResult, ListingDetailRecord, ListingFilter,
    ListingRecord, NewAccommodation, RepositoryProvider, RoomType,
};
use crate::shared::{validate_pagination, PageWindow, PaginatedResult};

/// Raw search parameters as received from the client
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
    pub guests: Option<i32>,
    /// Room-type codes; unknown ones are ignored
    pub room_types: Vec<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// A listing submitted by a host
#[derive(Debug, Clone)]
pub struct ListingDraft {
    /// Category display name or room-type code
    pub room_type: String,
    pub title: String,
    pub address: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub description: String,
    pub max_capacity: i32,
    pub price: Decimal,
    pub cleaning_fee: Decimal,
    pub beds: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub image_urls: Vec<String>,
    pub unavailable_dates: Vec<(NaiveDate, NaiveDate)>,
}

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
    default_limit: u64,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, default_limit: u64) -> Self {
        Self {
            repos,
            default_limit,
        }
    }

    /// Search listings. Availability is only checked when both dates are given.
    pub async fn list(&self, query: ListingQuery) -> DomainResult<PaginatedResult<ListingRecord>> {
        let (offset, limit) = validate_pagination(query.offset, query.limit, self.default_limit);

        let room_types: Vec<RoomType> = query
            .room_types
            .iter()
            .filter_map(|code| RoomType::from_code(code))
            .collect();

        let mut filter = ListingFilter::new(PageWindow { offset, limit }).with_room_types(&room_types);
        filter.stay = match (query.checkin, query.checkout) {
            (Some(checkin), Some(checkout)) => Some(DateRange::new(checkin, checkout).ok_or_else(
                || DomainError::Validation(format!("checkout {} precedes checkin {}", checkout, checkin)),
            )?),
            _ => None,
        };
        filter.guests = query.guests;
        filter.min_price = query.min_price;
        filter.max_price = query.max_price;

        debug!(?filter, "Searching listings");
        self.repos.accommodations().search(&filter).await
    }

    /// Listing detail; `None` for an unknown id.
    ///
    /// A listing without images is stored data the detail page cannot render
    /// and surfaces as [`DomainError::Integrity`].
    pub async fn detail(&self, id: i32) -> DomainResult<Option<ListingDetailRecord>> {
        let Some(record) = self.repos.accommodations().find_detail(id).await? else {
            return Ok(None);
        };

        if record.image_urls.is_empty() {
            return Err(DomainError::Integrity(format!(
                "accommodation {} has no image",
                id
            )));
        }

        Ok(Some(record))
    }

    /// Create a listing owned by `host_id`
    pub async fn create(&self, host_id: i32, draft: ListingDraft) -> DomainResult<Accommodation> {
        let unavailable_dates = draft
            .unavailable_dates
            .iter()
            .map(|&(start, end)| {
                DateRange::new(start, end).ok_or_else(|| {
                    DomainError::Validation(format!("start_date {} is after end_date {}", start, end))
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let category_name = RoomType::from_code(&draft.room_type)
            .map(|t| t.display_name().to_string())
            .unwrap_or_else(|| draft.room_type.clone());

        let category = self
            .repos
            .accommodations()
            .find_category_by_name(&category_name)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", "name", &draft.room_type))?;

        let created = self
            .repos
            .accommodations()
            .create(NewAccommodation {
                host_id,
                category_id: category.id,
                title: draft.title,
                address: draft.address,
                latitude: draft.latitude,
                longitude: draft.longitude,
                description: draft.description,
                max_capacity: draft.max_capacity,
                price: draft.price,
                cleaning_fee: draft.cleaning_fee,
                beds: draft.beds,
                bedrooms: draft.bedrooms,
                bathrooms: draft.bathrooms,
                image_urls: draft.image_urls,
                unavailable_dates,
            })
            .await?;

        info!(
            accommodation_id = created.id,
            host_id,
            category = %category.name,
            "Listing created"
        );
        Ok(created)
    }
}

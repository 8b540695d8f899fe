//! Booking service
//!
//! Trip history of a guest and reservation purchase.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewReservation, RepositoryProvider, Reservation,
    ReservationHistory, ReservationStatus,
};

#[derive(Debug, Clone)]
pub struct PurchaseRequest {
    pub accommodation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub total_guest: i32,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Trip history of a user as of the server's local date
    pub async fn history(&self, user_id: i32) -> DomainResult<ReservationHistory> {
        self.history_as_of(user_id, Local::now().date_naive()).await
    }

    /// Pending reservations never show up in the history.
    pub async fn history_as_of(
        &self,
        user_id: i32,
        today: NaiveDate,
    ) -> DomainResult<ReservationHistory> {
        let summaries = self
            .repos
            .reservations()
            .find_for_user_excluding(user_id, ReservationStatus::Pending)
            .await?;
        Ok(ReservationHistory::classify(summaries, today))
    }

    /// Book a stay. Overlapping reservations are not checked.
    pub async fn purchase(&self, user_id: i32, request: PurchaseRequest) -> DomainResult<Reservation> {
        if !self
            .repos
            .accommodations()
            .exists(request.accommodation_id)
            .await?
        {
            return Err(DomainError::not_found(
                "Accommodation",
                "id",
                request.accommodation_id,
            ));
        }

        let reservation = self
            .repos
            .reservations()
            .create(NewReservation {
                user_id,
                accommodation_id: request.accommodation_id,
                start_date: request.start_date,
                end_date: request.end_date,
                total_price: request.total_price,
                total_guest: request.total_guest,
            })
            .await?;

        info!(
            reservation_id = reservation.id,
            user_id,
            accommodation_id = request.accommodation_id,
            "Reservation booked"
        );
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MemoryRepositories;
    use crate::domain::{
        Accommodation, ListingDetailRecord, ListingHost, ReservationSummary,
    };
    use chrono::Utc;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn summary(id: i32, user_id: i32, start: &str, status: ReservationStatus) -> ReservationSummary {
        ReservationSummary {
            reservation: Reservation {
                id,
                accommodation_id: Some(1),
                user_id,
                start_date: d(start),
                end_date: d(start) + chrono::Duration::days(2),
                total_price: Decimal::from(20000),
                total_guest: 2,
                status,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            accommodation_name: Some("test house".into()),
            accommodation_address: Some("서울".into()),
            thumbnail_image: Some("house.jpg".into()),
        }
    }

    fn listing(id: i32) -> ListingDetailRecord {
        ListingDetailRecord {
            accommodation: Accommodation {
                id,
                category_id: None,
                host_id: 1,
                title: "t".into(),
                address: "a".into(),
                latitude: Decimal::ZERO,
                longitude: Decimal::ZERO,
                description: String::new(),
                max_capacity: 2,
                price: Decimal::from(10000),
                cleaning_fee: Decimal::ZERO,
                beds: 1,
                bedrooms: 1,
                bathrooms: 1,
            },
            category: None,
            host: ListingHost {
                name: "h".into(),
                profile_image: "p".into(),
            },
            image_urls: vec!["i.jpg".into()],
            reviews: vec![],
        }
    }

    fn request(accommodation_id: i32) -> PurchaseRequest {
        PurchaseRequest {
            accommodation_id,
            start_date: d("2021-04-01"),
            end_date: d("2021-04-03"),
            total_price: Decimal::from(20000),
            total_guest: 2,
        }
    }

    #[tokio::test]
    async fn only_pending_reservations_yield_empty_history() {
        let mut repos = MemoryRepositories::default();
        repos.reservations.summaries = vec![summary(1, 5, "2021-04-01", ReservationStatus::Pending)];
        let service = BookingService::new(Arc::new(repos));

        let history = service.history_as_of(5, d("2021-03-01")).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn history_is_scoped_to_user() {
        let mut repos = MemoryRepositories::default();
        repos.reservations.summaries = vec![
            summary(1, 5, "2021-04-01", ReservationStatus::Booked),
            summary(2, 6, "2021-01-01", ReservationStatus::Booked),
            summary(3, 5, "2021-01-01", ReservationStatus::Canceled),
        ];
        let service = BookingService::new(Arc::new(repos));

        let history = service.history_as_of(5, d("2021-03-01")).await.unwrap();
        assert_eq!(history.upcoming.len(), 1);
        assert!(history.past.is_empty());
        assert_eq!(history.canceled.len(), 1);
    }

    #[tokio::test]
    async fn purchase_books_existing_listing() {
        let mut repos = MemoryRepositories::default();
        repos.accommodations.details = vec![listing(1)];
        let repos = Arc::new(repos);
        let service = BookingService::new(repos.clone());

        let reservation = service.purchase(5, request(1)).await.unwrap();
        assert_eq!(reservation.status, ReservationStatus::Booked);
        assert_eq!(reservation.user_id, 5);
        assert_eq!(repos.reservations.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn purchase_of_unknown_listing_fails() {
        let repos = Arc::new(MemoryRepositories::default());
        let service = BookingService::new(repos.clone());

        let err = service.purchase(5, request(99)).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "Accommodation",
                ..
            }
        ));
        assert!(repos.reservations.created.lock().unwrap().is_empty());
    }
}

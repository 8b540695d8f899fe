//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation, ReservationStatus, ReservationSummary};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Save a new reservation
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    /// A user's reservations, skipping one status, ordered by id, with the
    /// booked accommodation's name, address and primary image
    async fn find_for_user_excluding(
        &self,
        user_id: i32,
        excluded: ReservationStatus,
    ) -> DomainResult<Vec<ReservationSummary>>;
}

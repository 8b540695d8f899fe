//! SeaORM implementation of ReservationRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, NewReservation, Reservation, ReservationRepository,
    ReservationStatus, ReservationSummary,
};
use crate::infrastructure::database::entities::{accommodation, image, reservation};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// First-inserted image of each listing
    async fn thumbnails_for(&self, ids: Vec<i32>) -> DomainResult<HashMap<i32, String>> {
        let rows = image::Entity::find()
            .filter(image::Column::AccommodationId.is_in(ids))
            .order_by_asc(image::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut thumbnails = HashMap::new();
        for row in rows {
            thumbnails.entry(row.accommodation_id).or_insert(row.image_url);
        }
        Ok(thumbnails)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let status = ReservationStatus::from_code(m.status_id).ok_or_else(|| {
        DomainError::Integrity(format!(
            "reservation {} has unknown status {}",
            m.id, m.status_id
        ))
    })?;

    Ok(Reservation {
        id: m.id,
        accommodation_id: m.accommodation_id,
        user_id: m.user_id,
        start_date: m.start_date,
        end_date: m.end_date,
        total_price: m.total_price,
        total_guest: m.total_guest,
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, r: NewReservation) -> DomainResult<Reservation> {
        debug!(
            "Saving reservation: user {} accommodation {}",
            r.user_id, r.accommodation_id
        );

        let now = Utc::now();
        let model = reservation::ActiveModel {
            accommodation_id: Set(Some(r.accommodation_id)),
            user_id: Set(r.user_id),
            start_date: Set(r.start_date),
            end_date: Set(r.end_date),
            total_price: Set(r.total_price),
            total_guest: Set(r.total_guest),
            status_id: Set(ReservationStatus::Booked.code()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        model_to_domain(model)
    }

    async fn find_for_user_excluding(
        &self,
        user_id: i32,
        excluded: ReservationStatus,
    ) -> DomainResult<Vec<ReservationSummary>> {
        let rows = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .filter(reservation::Column::StatusId.ne(excluded.code()))
            .order_by_asc(reservation::Column::Id)
            .find_also_related(accommodation::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let listing_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, listing)| listing.as_ref().map(|l| l.id))
            .collect();
        let thumbnails = self.thumbnails_for(listing_ids).await?;

        rows.into_iter()
            .map(|(r, listing)| -> DomainResult<ReservationSummary> {
                let thumbnail_image = listing.as_ref().and_then(|l| thumbnails.get(&l.id).cloned());
                let (accommodation_name, accommodation_address) = match listing {
                    Some(l) => (Some(l.title), Some(l.address)),
                    None => (None, None),
                };
                Ok(ReservationSummary {
                    reservation: model_to_domain(r)?,
                    accommodation_name,
                    accommodation_address,
                    thumbnail_image,
                })
            })
            .collect()
    }
}

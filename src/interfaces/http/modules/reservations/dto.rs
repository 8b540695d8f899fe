//! Reservation DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::PurchaseRequest;
use crate::domain::{ReservationHistory, ReservationSummary};

/// One trip in the history tabs. Listing fields are `null` when the
/// accommodation was deleted or has no image.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationEntryDto {
    pub thumbnail_image: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub accommodation_name: Option<String>,
    pub accommodation_address: Option<String>,
}

impl From<ReservationSummary> for ReservationEntryDto {
    fn from(summary: ReservationSummary) -> Self {
        Self {
            thumbnail_image: summary.thumbnail_image,
            start_date: summary.reservation.start_date,
            end_date: summary.reservation.end_date,
            accommodation_name: summary.accommodation_name,
            accommodation_address: summary.accommodation_address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResults {
    pub upcoming_reservations: Vec<ReservationEntryDto>,
    pub past_reservations: Vec<ReservationEntryDto>,
    pub canceled_reservations: Vec<ReservationEntryDto>,
}

impl From<ReservationHistory> for ReservationResults {
    fn from(history: ReservationHistory) -> Self {
        let entries = |list: Vec<ReservationSummary>| {
            list.into_iter().map(ReservationEntryDto::from).collect()
        };
        Self {
            upcoming_reservations: entries(history.upcoming),
            past_reservations: entries(history.past),
            canceled_reservations: entries(history.canceled),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationHistoryResponse {
    pub message: String,
    pub results: ReservationResults,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseRequestDto {
    pub accommodation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[schema(value_type = f64)]
    pub total_price: Decimal,
    pub total_guest: i32,
}

impl From<PurchaseRequestDto> for PurchaseRequest {
    fn from(dto: PurchaseRequestDto) -> Self {
        Self {
            accommodation_id: dto.accommodation_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            total_price: dto.total_price,
            total_guest: dto.total_guest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::{Reservation, ReservationStatus};

    fn summary(id: i32, name: Option<&str>) -> ReservationSummary {
        let now = Utc::now();
        ReservationSummary {
            reservation: Reservation {
                id,
                accommodation_id: name.map(|_| 1),
                user_id: 1,
                start_date: NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2021, 4, 3).unwrap(),
                total_price: Decimal::from(30000),
                total_guest: 2,
                status: ReservationStatus::Booked,
                created_at: now,
                updated_at: now,
            },
            accommodation_name: name.map(String::from),
            accommodation_address: name.map(|_| "부산광역시 해운대구".to_string()),
            thumbnail_image: name.map(|_| "thumb.jpg".to_string()),
        }
    }

    #[test]
    fn entries_use_camel_case_and_iso_dates() {
        let json = serde_json::to_value(ReservationEntryDto::from(summary(1, Some("광안리 뷰")))).unwrap();
        assert_eq!(json["thumbnailImage"], "thumb.jpg");
        assert_eq!(json["startDate"], "2021-04-01");
        assert_eq!(json["endDate"], "2021-04-03");
        assert_eq!(json["accommodationName"], "광안리 뷰");
    }

    #[test]
    fn deleted_listing_serializes_nulls() {
        let json = serde_json::to_value(ReservationEntryDto::from(summary(2, None))).unwrap();
        assert!(json["thumbnailImage"].is_null());
        assert!(json["accommodationName"].is_null());
        assert!(json["accommodationAddress"].is_null());
    }

    #[test]
    fn results_keep_tab_names() {
        let history = ReservationHistory {
            upcoming: vec![summary(1, Some("a"))],
            past: vec![],
            canceled: vec![summary(2, Some("b"))],
        };
        let json = serde_json::to_value(ReservationResults::from(history)).unwrap();
        assert_eq!(json["upcomingReservations"].as_array().unwrap().len(), 1);
        assert_eq!(json["pastReservations"].as_array().unwrap().len(), 0);
        assert_eq!(json["canceledReservations"].as_array().unwrap().len(), 1);
    }
}

//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Reservation status, stored as the `reservation_status.code` lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Checkout not completed yet
    Pending,
    Booked,
    Canceled,
}

impl ReservationStatus {
    pub fn code(&self) -> i32 {
        match self {
            Self::Pending => 1,
            Self::Booked => 2,
            Self::Canceled => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Pending),
            2 => Some(Self::Booked),
            3 => Some(Self::Canceled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Booked => "booked",
            Self::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    /// `None` once the accommodation has been deleted
    pub accommodation_id: Option<i32>,
    pub user_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub total_guest: i32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A purchase request; always stored as [`ReservationStatus::Booked`].
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i32,
    pub accommodation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub total_guest: i32,
}

/// Reservation joined with what the trip history page shows of the listing
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationSummary {
    pub reservation: Reservation,
    pub accommodation_name: Option<String>,
    pub accommodation_address: Option<String>,
    pub thumbnail_image: Option<String>,
}

/// A user's trips split into the three history tabs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationHistory {
    pub upcoming: Vec<ReservationSummary>,
    pub past: Vec<ReservationSummary>,
    pub canceled: Vec<ReservationSummary>,
}

impl ReservationHistory {
    /// Canceled trips go to `canceled` regardless of date; everything else is
    /// `upcoming` when it starts after `today`, otherwise `past`.
    pub fn classify(summaries: Vec<ReservationSummary>, today: NaiveDate) -> Self {
        let mut history = Self::default();
        for summary in summaries {
            if summary.reservation.status == ReservationStatus::Canceled {
                history.canceled.push(summary);
            } else if summary.reservation.start_date > today {
                history.upcoming.push(summary);
            } else {
                history.past.push(summary);
            }
        }
        history
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty() && self.canceled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn summary(id: i32, start: &str, status: ReservationStatus) -> ReservationSummary {
        let start = d(start);
        ReservationSummary {
            reservation: Reservation {
                id,
                accommodation_id: Some(1),
                user_id: 2,
                start_date: start,
                end_date: start + chrono::Duration::days(1),
                total_price: Decimal::from(10000),
                total_guest: 1,
                status,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            accommodation_name: Some("test house".into()),
            accommodation_address: Some("서울특별시 강남구 테헤란로".into()),
            thumbnail_image: Some("house_image.jpg".into()),
        }
    }

    #[test]
    fn status_codes_roundtrip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Booked,
            ReservationStatus::Canceled,
        ] {
            assert_eq!(ReservationStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ReservationStatus::from_code(9), None);
    }

    #[test]
    fn classify_splits_by_status_then_start_date() {
        let today = d("2021-03-01");
        let history = ReservationHistory::classify(
            vec![
                summary(2, "2021-01-19", ReservationStatus::Booked),
                summary(3, "2021-04-19", ReservationStatus::Booked),
                summary(4, "2021-04-16", ReservationStatus::Canceled),
            ],
            today,
        );

        assert_eq!(history.past.len(), 1);
        assert_eq!(history.past[0].reservation.id, 2);
        assert_eq!(history.upcoming.len(), 1);
        assert_eq!(history.upcoming[0].reservation.id, 3);
        assert_eq!(history.canceled.len(), 1);
        assert_eq!(history.canceled[0].reservation.id, 4);
    }

    #[test]
    fn trip_starting_today_is_past() {
        let today = d("2021-03-01");
        let history =
            ReservationHistory::classify(vec![summary(1, "2021-03-01", ReservationStatus::Booked)], today);
        assert!(history.upcoming.is_empty());
        assert_eq!(history.past.len(), 1);
    }

    #[test]
    fn empty_input_is_empty_history() {
        assert!(ReservationHistory::classify(vec![], d("2021-03-01")).is_empty());
    }
}

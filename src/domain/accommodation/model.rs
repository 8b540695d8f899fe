//! Accommodation domain entities

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::review::{RatingAxes, Review};
use crate::shared::PageWindow;

/// Room-type taxonomy used by the search filter.
///
/// Clients filter with the short code; categories are stored under their
/// display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Entire,
    Private,
    Shared,
    Hotel,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [Self::Entire, Self::Private, Self::Shared, Self::Hotel];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Entire => "entire",
            Self::Private => "private",
            Self::Shared => "shared",
            Self::Hotel => "hotel",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Entire => "집 전체",
            Self::Private => "개인실",
            Self::Shared => "다인실",
            Self::Hotel => "호텔 객실",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Entire => "집 전체를 사용하게 됩니다.",
            Self::Private => "침실은 단독으로 쓰고, 이외의 공간은 호스트나 다른 게스트와 함께 이용할 수도 있습니다.",
            Self::Shared => "사적 공간 없이, 침실이나 욕실 등을 호스트나 다른 게스트와 함께 이용합니다.",
            Self::Hotel => "부티크 호텔, 호스텔 등의 개인실이나 다인실을 이용합니다.",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Inclusive calendar range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Whether a blocked range (`self`) collides with a requested stay.
    ///
    /// Touching ranges do not overlap: a block ending on the check-in day, or
    /// starting on the check-out day, leaves the stay available.
    pub fn overlaps(&self, stay: &DateRange) -> bool {
        !(self.end <= stay.start || self.start >= stay.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// A bookable listing
#[derive(Debug, Clone, PartialEq)]
pub struct Accommodation {
    pub id: i32,
    /// `None` once the category has been deleted
    pub category_id: Option<i32>,
    pub host_id: i32,
    pub title: String,
    pub address: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub description: String,
    pub max_capacity: i32,
    /// Nightly price
    pub price: Decimal,
    pub cleaning_fee: Decimal,
    pub beds: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
}

/// Everything needed to insert a listing in one go
#[derive(Debug, Clone)]
pub struct NewAccommodation {
    pub host_id: i32,
    pub category_id: i32,
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
    /// In display order; the first one becomes the primary image
    pub image_urls: Vec<String>,
    pub unavailable_dates: Vec<DateRange>,
}

/// Search criteria for the listing catalog
#[derive(Debug, Clone)]
pub struct ListingFilter {
    /// Requested `[checkin, checkout)` window
    pub stay: Option<DateRange>,
    pub guests: Option<i32>,
    /// Category display names; empty means any category
    pub category_names: Vec<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub window: PageWindow,
}

impl ListingFilter {
    pub fn new(window: PageWindow) -> Self {
        Self {
            stay: None,
            guests: None,
            category_names: Vec::new(),
            min_price: None,
            max_price: None,
            window,
        }
    }

    /// Restrict to the given room types. Unknown codes are dropped before
    /// reaching this point, so an empty slice leaves the filter open.
    pub fn with_room_types(mut self, room_types: &[RoomType]) -> Self {
        self.category_names = room_types
            .iter()
            .map(|t| t.display_name().to_string())
            .collect();
        self
    }
}

/// One listing as returned by catalog search
#[derive(Debug, Clone)]
pub struct ListingRecord {
    pub accommodation: Accommodation,
    pub category: Option<Category>,
    pub image_urls: Vec<String>,
    pub ratings: Vec<RatingAxes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingHost {
    pub name: String,
    pub profile_image: String,
}

/// One listing with everything the detail page shows
#[derive(Debug, Clone)]
pub struct ListingDetailRecord {
    pub accommodation: Accommodation,
    pub category: Option<Category>,
    pub host: ListingHost,
    /// Ordered by insertion
    pub image_urls: Vec<String>,
    /// Ordered by review id
    pub reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(a: &str, b: &str) -> DateRange {
        DateRange::new(d(a), d(b)).unwrap()
    }

    #[test]
    fn room_type_codes_map_to_display_names() {
        assert_eq!(RoomType::from_code("entire").unwrap().display_name(), "집 전체");
        assert_eq!(RoomType::from_code("hotel"), Some(RoomType::Hotel));
        assert_eq!(RoomType::from_code("castle"), None);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(DateRange::new(d("2021-03-10"), d("2021-03-09")).is_none());
        assert!(DateRange::new(d("2021-03-10"), d("2021-03-10")).is_some());
    }

    #[test]
    fn block_inside_stay_overlaps() {
        let stay = range("2021-03-10", "2021-03-15");
        assert!(range("2021-03-11", "2021-03-12").overlaps(&stay));
        assert!(range("2021-03-01", "2021-03-30").overlaps(&stay));
        assert!(range("2021-03-14", "2021-03-20").overlaps(&stay));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let stay = range("2021-03-10", "2021-03-15");
        assert!(!range("2021-03-01", "2021-03-10").overlaps(&stay));
        assert!(!range("2021-03-15", "2021-03-20").overlaps(&stay));
        assert!(!range("2021-04-01", "2021-04-02").overlaps(&stay));
    }

    #[test]
    fn room_type_filter_uses_display_names() {
        let filter = ListingFilter::new(PageWindow { offset: 0, limit: 10 })
            .with_room_types(&[RoomType::Entire, RoomType::Shared]);
        assert_eq!(filter.category_names, vec!["집 전체", "다인실"]);
    }
}

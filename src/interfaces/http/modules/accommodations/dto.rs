//! Accommodation DTOs

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::application::{ListingDraft, ListingQuery};
use crate::domain::{
    fixed_scale, listing_grade, AxisAverages, ListingDetailRecord, ListingRecord, Review,
};
use crate::interfaces::http::common::{ApiError, ErrorCode};

const COORDINATE_SCALE: u32 = 6;
const PRICE_SCALE: u32 = 2;

// ── Catalog search ─────────────────────────────────────────────

/// Query parameters of `GET /accommodation`.
///
/// Only documents the OpenAPI parameters. The handler reads the raw query
/// with [`parse_listing_query`] because `roomtype` may repeat.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// Check-in date, `YYYY-MM-DD`
    pub checkin: Option<NaiveDate>,
    /// Check-out date, `YYYY-MM-DD`
    pub checkout: Option<NaiveDate>,
    /// Minimum capacity
    pub guests: Option<i32>,
    /// Room type code (entire, private, shared, hotel); repeatable
    pub roomtype: Option<Vec<String>>,
    /// Minimum nightly price
    pub min: Option<String>,
    /// Maximum nightly price
    pub max: Option<String>,
    /// Page size (default 10, at most 100)
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Parse a raw query string. Empty values count as absent; anything that
/// fails to parse is a `KEY_ERROR`.
pub fn parse_listing_query(raw: Option<&str>) -> Result<ListingQuery, ApiError> {
    fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ApiError> {
        value.parse().map_err(|_| {
            ApiError::new(ErrorCode::KeyError).with_detail(format!("{}={}", key, value))
        })
    }

    fn parse_date(key: &str, value: &str) -> Result<NaiveDate, ApiError> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            ApiError::new(ErrorCode::KeyError).with_detail(format!("{}={}", key, value))
        })
    }

    let mut query = ListingQuery::default();
    let Some(raw) = raw else {
        return Ok(query);
    };

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "checkin" => query.checkin = Some(parse_date(&key, &value)?),
            "checkout" => query.checkout = Some(parse_date(&key, &value)?),
            "guests" => query.guests = Some(parse(&key, &value)?),
            "roomtype" => query.room_types.push(value.into_owned()),
            "min" => query.min_price = Some(parse::<Decimal>(&key, &value)?),
            "max" => query.max_price = Some(parse::<Decimal>(&key, &value)?),
            "limit" => query.limit = Some(parse(&key, &value)?),
            "offset" => query.offset = Some(parse(&key, &value)?),
            _ => {}
        }
    }

    Ok(query)
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummaryDto {
    pub id: i32,
    pub title: String,
    pub address: String,
    #[schema(value_type = String)]
    pub lat: Decimal,
    #[schema(value_type = String)]
    pub long: Decimal,
    /// Category name; `null` once the category is deleted
    pub room_type: Option<String>,
    pub max_people: i32,
    pub beds: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    #[schema(value_type = String)]
    pub oneday_price: Decimal,
    #[schema(value_type = String)]
    pub cleaning_fee: Decimal,
    pub img: Vec<String>,
    /// `"0"` without reviews, otherwise the mean score with two decimals
    pub grade: String,
    pub review_count: usize,
}

impl From<ListingRecord> for ListingSummaryDto {
    fn from(record: ListingRecord) -> Self {
        let a = record.accommodation;
        Self {
            id: a.id,
            title: a.title,
            address: a.address,
            lat: fixed_scale(a.latitude, COORDINATE_SCALE),
            long: fixed_scale(a.longitude, COORDINATE_SCALE),
            room_type: record.category.map(|c| c.name),
            max_people: a.max_capacity,
            beds: a.beds,
            bedrooms: a.bedrooms,
            bathrooms: a.bathrooms,
            oneday_price: fixed_scale(a.price, PRICE_SCALE),
            cleaning_fee: fixed_scale(a.cleaning_fee, PRICE_SCALE),
            img: record.image_urls,
            grade: listing_grade(&record.ratings),
            review_count: record.ratings.len(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListingListResponse {
    pub message: String,
    pub data: Vec<ListingSummaryDto>,
    /// Number of pages at the requested page size
    pub index: u64,
}

// ── Detail ─────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomTypeDto {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeDto {
    #[schema(value_type = String)]
    pub average: Decimal,
    pub grade_value: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub reviewid: i32,
    pub user_name: String,
    pub user_profile: String,
    pub content: String,
    /// `YYYYMM`
    pub created_at: String,
}

impl From<Review> for CommentDto {
    fn from(review: Review) -> Self {
        Self {
            reviewid: review.id,
            user_name: review.author.name,
            user_profile: review.author.profile_image,
            content: review.content,
            created_at: review.created_at.format("%Y%m").to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetailDto {
    pub id: i32,
    pub title: String,
    pub address: String,
    #[schema(value_type = String)]
    pub lat: Decimal,
    #[schema(value_type = String)]
    pub long: Decimal,
    pub first_img: String,
    /// Images after the first, in insertion order
    pub img: Vec<String>,
    pub description: String,
    #[schema(value_type = String)]
    pub oneday_price: Decimal,
    #[schema(value_type = String)]
    pub cleaning_fee: Decimal,
    pub host_name: String,
    pub host_profile: String,
    pub room_type: Option<RoomTypeDto>,
    pub max_people: i32,
    pub beds: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub total_count: usize,
    #[schema(value_type = String)]
    pub total_avg: Decimal,
    /// clean, accuracy, communication, location, checkin, value
    pub grade: Vec<GradeDto>,
    pub comment: Vec<CommentDto>,
}

impl ListingDetailDto {
    /// `None` when the record has no image to lead with.
    pub fn from_record(record: ListingDetailRecord) -> Option<Self> {
        let mut images = record.image_urls.into_iter();
        let first_img = images.next()?;

        let ratings: Vec<_> = record.reviews.iter().map(|r| r.ratings).collect();
        let averages = AxisAverages::from_ratings(&ratings);
        let a = record.accommodation;

        Some(Self {
            id: a.id,
            title: a.title,
            address: a.address,
            lat: fixed_scale(a.latitude, COORDINATE_SCALE),
            long: fixed_scale(a.longitude, COORDINATE_SCALE),
            first_img,
            img: images.collect(),
            description: a.description,
            oneday_price: fixed_scale(a.price, PRICE_SCALE),
            cleaning_fee: fixed_scale(a.cleaning_fee, PRICE_SCALE),
            host_name: record.host.name,
            host_profile: record.host.profile_image,
            room_type: record.category.map(|c| RoomTypeDto {
                name: c.name,
                description: c.description,
            }),
            max_people: a.max_capacity,
            beds: a.beds,
            bedrooms: a.bedrooms,
            bathrooms: a.bathrooms,
            total_count: record.reviews.len(),
            total_avg: fixed_scale(averages.overall(), 2),
            grade: averages
                .grades()
                .into_iter()
                .map(|g| GradeDto {
                    average: g.average,
                    grade_value: g.grade_value,
                })
                .collect(),
            comment: record.reviews.into_iter().map(CommentDto::from).collect(),
        })
    }
}

// ── Create ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct UnavailableDateDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    /// Category display name or room-type code
    #[validate(length(min = 1))]
    pub room_type: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(custom(function = "validate_latitude"))]
    #[schema(value_type = f64)]
    pub lat: Decimal,
    #[validate(custom(function = "validate_longitude"))]
    #[schema(value_type = f64)]
    pub long: Decimal,
    pub description: String,
    #[validate(range(min = 1))]
    pub max_people: i32,
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = f64)]
    pub oneday_price: Decimal,
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = f64)]
    pub cleaning_fee: Decimal,
    #[validate(range(min = 0))]
    pub beds: i32,
    #[validate(range(min = 0))]
    pub bedrooms: i32,
    #[validate(range(min = 0))]
    pub bathrooms: i32,
    /// At least one; the first becomes the primary image
    #[validate(length(min = 1))]
    pub img_urls: Vec<String>,
    pub unavailable_dates: Vec<UnavailableDateDto>,
}

fn validate_latitude(value: &Decimal) -> Result<(), ValidationError> {
    if value.abs() > Decimal::from(90) {
        return Err(ValidationError::new("latitude_out_of_range"));
    }
    Ok(())
}

fn validate_longitude(value: &Decimal) -> Result<(), ValidationError> {
    if value.abs() > Decimal::from(180) {
        return Err(ValidationError::new("longitude_out_of_range"));
    }
    Ok(())
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative"));
    }
    Ok(())
}

impl From<CreateListingRequest> for ListingDraft {
    fn from(req: CreateListingRequest) -> Self {
        Self {
            room_type: req.room_type,
            title: req.title,
            address: req.address,
            latitude: req.lat,
            longitude: req.long,
            description: req.description,
            max_capacity: req.max_people,
            price: req.oneday_price,
            cleaning_fee: req.cleaning_fee,
            beds: req.beds,
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            image_urls: req.img_urls,
            unavailable_dates: req
                .unavailable_dates
                .into_iter()
                .map(|r| (r.start_date, r.end_date))
                .collect(),
        }
    }
}

// ── Upload ─────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub file_urls: Vec<String>,
}

/// Multipart form of `POST /accommodation/file`. Only documents the OpenAPI
/// request body; the handler streams the fields itself.
#[derive(Deserialize, ToSchema)]
pub struct UploadForm {
    /// Repeatable file field
    #[serde(rename = "fileNames")]
    #[schema(value_type = Vec<String>, format = Binary)]
    pub file_names: Vec<Vec<u8>>,
}

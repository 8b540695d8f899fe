//! Row builders for repository tests

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::ReservationStatus;
use crate::infrastructure::database::entities::{
    accommodation, category, image, reservation, review, social_platform, unavailable_date, user,
};

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub async fn add_user(db: &DatabaseConnection, email: &str) -> i32 {
    let kakao = social_platform::Entity::find()
        .filter(social_platform::Column::Name.eq("kakao"))
        .one(db)
        .await
        .unwrap()
        .unwrap();
    user::ActiveModel {
        email: Set(email.into()),
        name: Set(format!("name of {}", email)),
        phone_number: Set(None),
        profile_image: Set(format!("{}.png", email)),
        date_of_birth: Set(None),
        social_platform_id: Set(kakao.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn category_id(db: &DatabaseConnection, name: &str) -> i32 {
    category::Entity::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .id
}

pub async fn add_listing(
    db: &DatabaseConnection,
    host_id: i32,
    category_name: &str,
    price: i64,
    max_capacity: i32,
) -> i32 {
    let category_id = category_id(db, category_name).await;
    accommodation::ActiveModel {
        category_id: Set(Some(category_id)),
        user_id: Set(host_id),
        title: Set(format!("{} listing", category_name)),
        address: Set("서울특별시 강남구 테헤란로 427".into()),
        latitude: Set(Decimal::new(37_506776, 6)),
        longitude: Set(Decimal::new(127_053474, 6)),
        description: Set("깨끗한 숙소".into()),
        max_capacity: Set(max_capacity),
        price: Set(Decimal::from(price)),
        cleaning_fee: Set(Decimal::from(5000)),
        number_of_bed: Set(2),
        number_of_bedroom: Set(1),
        number_of_bathroom: Set(1),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn add_image(db: &DatabaseConnection, accommodation_id: i32, url: &str) {
    image::ActiveModel {
        accommodation_id: Set(accommodation_id),
        image_url: Set(url.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn add_block(db: &DatabaseConnection, accommodation_id: i32, start: &str, end: &str) {
    unavailable_date::ActiveModel {
        accommodation_id: Set(accommodation_id),
        start_date: Set(d(start)),
        end_date: Set(d(end)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn add_review(db: &DatabaseConnection, accommodation_id: i32, user_id: i32, score: Decimal) {
    let now = Utc::now();
    review::ActiveModel {
        accommodation_id: Set(accommodation_id),
        user_id: Set(user_id),
        clean_rate: Set(score),
        communication_rate: Set(score),
        checkin_rate: Set(score),
        accuracy_rate: Set(score),
        location_rate: Set(score),
        value_rate: Set(score),
        content: Set("좋았어요".into()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn add_reservation(
    db: &DatabaseConnection,
    user_id: i32,
    accommodation_id: i32,
    start: &str,
    status: ReservationStatus,
) -> i32 {
    let now = Utc::now();
    let start = d(start);
    reservation::ActiveModel {
        accommodation_id: Set(Some(accommodation_id)),
        user_id: Set(user_id),
        start_date: Set(start),
        end_date: Set(start + chrono::Duration::days(2)),
        total_price: Set(Decimal::from(30000)),
        total_guest: Set(2),
        status_id: Set(status.code()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

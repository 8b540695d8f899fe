//! SeaORM implementation of AccommodationRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use super::db_err;
use crate::domain::{
    Accommodation, AccommodationRepository, Category, DomainError, DomainResult,
    ListingDetailRecord, ListingFilter, ListingHost, ListingRecord, NewAccommodation, RatingAxes,
    Review, ReviewAuthor,
};
use crate::infrastructure::database::entities::{
    accommodation, category, image, review, unavailable_date, user,
};
use crate::shared::PaginatedResult;

pub struct SeaOrmAccommodationRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccommodationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Image URLs per listing, each list in insertion order
    async fn images_for(&self, ids: &[i32]) -> DomainResult<HashMap<i32, Vec<String>>> {
        let rows = image::Entity::find()
            .filter(image::Column::AccommodationId.is_in(ids.to_vec()))
            .order_by_asc(image::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut by_listing: HashMap<i32, Vec<String>> = HashMap::new();
        for row in rows {
            by_listing
                .entry(row.accommodation_id)
                .or_default()
                .push(row.image_url);
        }
        Ok(by_listing)
    }

    async fn ratings_for(&self, ids: &[i32]) -> DomainResult<HashMap<i32, Vec<RatingAxes>>> {
        let rows = review::Entity::find()
            .filter(review::Column::AccommodationId.is_in(ids.to_vec()))
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut by_listing: HashMap<i32, Vec<RatingAxes>> = HashMap::new();
        for row in rows {
            by_listing
                .entry(row.accommodation_id)
                .or_default()
                .push(ratings_of(&row));
        }
        Ok(by_listing)
    }

    async fn categories_for(&self, ids: Vec<i32>) -> DomainResult<HashMap<i32, Category>> {
        let rows = category::Entity::find()
            .filter(category::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(|c| (c.id, category_to_domain(c))).collect())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: accommodation::Model) -> Accommodation {
    Accommodation {
        id: m.id,
        category_id: m.category_id,
        host_id: m.user_id,
        title: m.title,
        address: m.address,
        latitude: m.latitude,
        longitude: m.longitude,
        description: m.description,
        max_capacity: m.max_capacity,
        price: m.price,
        cleaning_fee: m.cleaning_fee,
        beds: m.number_of_bed,
        bedrooms: m.number_of_bedroom,
        bathrooms: m.number_of_bathroom,
    }
}

fn category_to_domain(m: category::Model) -> Category {
    Category {
        id: m.id,
        name: m.name,
        description: m.description,
    }
}

fn ratings_of(m: &review::Model) -> RatingAxes {
    RatingAxes {
        clean: m.clean_rate,
        communication: m.communication_rate,
        checkin: m.checkin_rate,
        accuracy: m.accuracy_rate,
        location: m.location_rate,
        value: m.value_rate,
    }
}

fn search_condition(filter: &ListingFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(stay) = filter.stay {
        // Blocked ranges with end > checkin AND start < checkout overlap the stay
        condition = condition.add(
            accommodation::Column::Id.not_in_subquery(
                Query::select()
                    .column(unavailable_date::Column::AccommodationId)
                    .from(unavailable_date::Entity)
                    .and_where(unavailable_date::Column::EndDate.gt(stay.start))
                    .and_where(unavailable_date::Column::StartDate.lt(stay.end))
                    .to_owned(),
            ),
        );
    }

    if let Some(guests) = filter.guests {
        condition = condition.add(accommodation::Column::MaxCapacity.gte(guests));
    }

    if !filter.category_names.is_empty() {
        condition = condition.add(
            accommodation::Column::CategoryId.in_subquery(
                Query::select()
                    .column(category::Column::Id)
                    .from(category::Entity)
                    .and_where(category::Column::Name.is_in(filter.category_names.clone()))
                    .to_owned(),
            ),
        );
    }

    if let Some(min) = filter.min_price {
        condition = condition.add(accommodation::Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        condition = condition.add(accommodation::Column::Price.lte(max));
    }

    condition
}

// ── AccommodationRepository impl ────────────────────────────────

#[async_trait]
impl AccommodationRepository for SeaOrmAccommodationRepository {
    async fn search(&self, filter: &ListingFilter) -> DomainResult<PaginatedResult<ListingRecord>> {
        let condition = search_condition(filter);

        let total = accommodation::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let models = accommodation::Entity::find()
            .filter(condition)
            .order_by_asc(accommodation::Column::Id)
            .offset(filter.window.offset)
            .limit(filter.window.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        debug!(total, page = models.len(), "Listing search");

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let category_ids: Vec<i32> = models.iter().filter_map(|m| m.category_id).collect();

        let mut images = self.images_for(&ids).await?;
        let mut ratings = self.ratings_for(&ids).await?;
        let categories = self.categories_for(category_ids).await?;

        let items = models
            .into_iter()
            .map(|m| ListingRecord {
                category: m.category_id.and_then(|id| categories.get(&id).cloned()),
                image_urls: images.remove(&m.id).unwrap_or_default(),
                ratings: ratings.remove(&m.id).unwrap_or_default(),
                accommodation: model_to_domain(m),
            })
            .collect();

        Ok(PaginatedResult::new(items, total, filter.window))
    }

    async fn find_detail(&self, id: i32) -> DomainResult<Option<ListingDetailRecord>> {
        let Some(model) = accommodation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let host = user::Entity::find_by_id(model.user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| {
                DomainError::Integrity(format!("accommodation {} has no host", model.id))
            })?;

        let category = match model.category_id {
            Some(category_id) => category::Entity::find_by_id(category_id)
                .one(&self.db)
                .await
                .map_err(db_err)?
                .map(category_to_domain),
            None => None,
        };

        let image_urls = self.images_for(&[model.id]).await?.remove(&model.id).unwrap_or_default();

        let reviews = review::Entity::find()
            .filter(review::Column::AccommodationId.eq(model.id))
            .order_by_asc(review::Column::Id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|(r, author)| -> DomainResult<Review> {
                let author = author.ok_or_else(|| {
                    DomainError::Integrity(format!("review {} has no author", r.id))
                })?;
                Ok(Review {
                    id: r.id,
                    author: ReviewAuthor {
                        name: author.name,
                        profile_image: author.profile_image,
                    },
                    ratings: ratings_of(&r),
                    content: r.content,
                    created_at: r.created_at,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Some(ListingDetailRecord {
            accommodation: model_to_domain(model),
            category,
            host: ListingHost {
                name: host.name,
                profile_image: host.profile_image,
            },
            image_urls,
            reviews,
        }))
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        let count = accommodation::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_category_by_name(&self, name: &str) -> DomainResult<Option<Category>> {
        let model = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(category_to_domain))
    }

    async fn create(&self, listing: NewAccommodation) -> DomainResult<Accommodation> {
        debug!("Saving listing: {}", listing.title);

        let txn = self.db.begin().await.map_err(db_err)?;

        let model = accommodation::ActiveModel {
            category_id: Set(Some(listing.category_id)),
            user_id: Set(listing.host_id),
            title: Set(listing.title),
            address: Set(listing.address),
            latitude: Set(listing.latitude),
            longitude: Set(listing.longitude),
            description: Set(listing.description),
            max_capacity: Set(listing.max_capacity),
            price: Set(listing.price),
            cleaning_fee: Set(listing.cleaning_fee),
            number_of_bed: Set(listing.beds),
            number_of_bedroom: Set(listing.bedrooms),
            number_of_bathroom: Set(listing.bathrooms),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for url in listing.image_urls {
            image::ActiveModel {
                accommodation_id: Set(model.id),
                image_url: Set(url),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        for range in listing.unavailable_dates {
            unavailable_date::ActiveModel {
                accommodation_id: Set(model.id),
                start_date: Set(range.start),
                end_date: Set(range.end),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{DateRange, RoomType};
    use crate::infrastructure::database::repositories::fixtures::*;
    use crate::infrastructure::database::test_database;
    use crate::shared::PageWindow;

    fn filter() -> ListingFilter {
        ListingFilter::new(PageWindow {
            offset: 0,
            limit: 10,
        })
    }

    fn ids(result: &PaginatedResult<ListingRecord>) -> Vec<i32> {
        result.items.iter().map(|r| r.accommodation.id).collect()
    }

    #[tokio::test]
    async fn availability_excludes_overlapping_blocks_only() {
        let db = test_database().await;
        let host = add_user(&db, "host@example.com").await;
        let blocked = add_listing(&db, host, "집 전체", 10000, 4).await;
        let touching = add_listing(&db, host, "집 전체", 10000, 4).await;
        let free = add_listing(&db, host, "집 전체", 10000, 4).await;
        add_block(&db, blocked, "2021-03-11", "2021-03-12").await;
        add_block(&db, touching, "2021-03-01", "2021-03-10").await;
        add_block(&db, touching, "2021-03-15", "2021-03-20").await;

        let repo = SeaOrmAccommodationRepository::new(db);
        let mut f = filter();
        f.stay = DateRange::new(d("2021-03-10"), d("2021-03-15"));
        let result = repo.search(&f).await.unwrap();

        assert_eq!(ids(&result), vec![touching, free]);
        assert_eq!(result.total, 2);
    }

    #[tokio::test]
    async fn filters_by_guests_room_type_and_price() {
        let db = test_database().await;
        let host = add_user(&db, "host@example.com").await;
        let small = add_listing(&db, host, "개인실", 30000, 1).await;
        let entire = add_listing(&db, host, "집 전체", 80000, 6).await;
        let hotel = add_listing(&db, host, "호텔 객실", 120000, 2).await;
        let repo = SeaOrmAccommodationRepository::new(db);

        let mut by_guests = filter();
        by_guests.guests = Some(2);
        assert_eq!(ids(&repo.search(&by_guests).await.unwrap()), vec![entire, hotel]);

        let by_type = filter().with_room_types(&[RoomType::Private, RoomType::Hotel]);
        assert_eq!(ids(&repo.search(&by_type).await.unwrap()), vec![small, hotel]);

        let mut by_price = filter();
        by_price.min_price = Some(Decimal::from(30000));
        by_price.max_price = Some(Decimal::from(80000));
        assert_eq!(ids(&repo.search(&by_price).await.unwrap()), vec![small, entire]);
    }

    #[tokio::test]
    async fn search_pages_and_loads_children() {
        let db = test_database().await;
        let host = add_user(&db, "host@example.com").await;
        let guest = add_user(&db, "guest@example.com").await;
        let mut listings = Vec::new();
        for _ in 0..3 {
            listings.push(add_listing(&db, host, "다인실", 20000, 2).await);
        }
        add_image(&db, listings[2], "first.jpg").await;
        add_image(&db, listings[2], "second.jpg").await;
        add_review(&db, listings[2], guest, Decimal::new(45, 1)).await;

        let repo = SeaOrmAccommodationRepository::new(db);
        let page = repo
            .search(&ListingFilter::new(PageWindow { offset: 2, limit: 2 }))
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(ids(&page), vec![listings[2]]);
        let record = &page.items[0];
        assert_eq!(record.image_urls, vec!["first.jpg", "second.jpg"]);
        assert_eq!(record.ratings.len(), 1);
        assert_eq!(record.category.as_ref().unwrap().name, "다인실");
    }

    #[tokio::test]
    async fn detail_loads_host_images_and_reviews() {
        let db = test_database().await;
        let host = add_user(&db, "host@example.com").await;
        let guest = add_user(&db, "guest@example.com").await;
        let id = add_listing(&db, host, "집 전체", 10000, 4).await;
        add_image(&db, id, "a.jpg").await;
        add_image(&db, id, "b.jpg").await;
        add_review(&db, id, guest, Decimal::new(50, 1)).await;
        add_review(&db, id, host, Decimal::new(40, 1)).await;

        let repo = SeaOrmAccommodationRepository::new(db);
        let detail = repo.find_detail(id).await.unwrap().unwrap();

        assert_eq!(detail.host.name, "name of host@example.com");
        assert_eq!(detail.image_urls, vec!["a.jpg", "b.jpg"]);
        assert_eq!(detail.reviews.len(), 2);
        assert_eq!(detail.reviews[0].author.name, "name of guest@example.com");
        assert_eq!(detail.category.unwrap().name, "집 전체");

        assert!(repo.find_detail(id + 1).await.unwrap().is_none());
        assert!(repo.exists(id).await.unwrap());
        assert!(!repo.exists(id + 1).await.unwrap());
    }

    #[tokio::test]
    async fn create_persists_images_and_blocks() {
        let db = test_database().await;
        let host = add_user(&db, "host@example.com").await;
        let category = category_id(&db, "개인실").await;
        let repo = SeaOrmAccommodationRepository::new(db.clone());

        let created = repo
            .create(NewAccommodation {
                host_id: host,
                category_id: category,
                title: "new".into(),
                address: "제주".into(),
                latitude: Decimal::new(33_499621, 6),
                longitude: Decimal::new(126_531188, 6),
                description: "귤밭 옆".into(),
                max_capacity: 2,
                price: Decimal::from(45000),
                cleaning_fee: Decimal::ZERO,
                beds: 1,
                bedrooms: 1,
                bathrooms: 1,
                image_urls: vec!["1.jpg".into(), "2.jpg".into(), "3.jpg".into()],
                unavailable_dates: vec![
                    DateRange::new(d("2021-05-01"), d("2021-05-03")).unwrap(),
                    DateRange::new(d("2021-06-01"), d("2021-06-02")).unwrap(),
                ],
            })
            .await
            .unwrap();

        let images = image::Entity::find()
            .filter(image::Column::AccommodationId.eq(created.id))
            .count(&db)
            .await
            .unwrap();
        let blocks = unavailable_date::Entity::find()
            .filter(unavailable_date::Column::AccommodationId.eq(created.id))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(images, 3);
        assert_eq!(blocks, 2);
        assert_eq!(created.host_id, host);

        let found = repo.find_category_by_name("개인실").await.unwrap().unwrap();
        assert_eq!(found.id, category);
        assert!(repo.find_category_by_name("castle").await.unwrap().is_none());
    }
}

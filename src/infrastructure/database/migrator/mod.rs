//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_accommodations;
mod m20240101_000003_create_reviews;
mod m20240101_000004_create_reservations;
mod m20240101_000005_seed_reference_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_accommodations::Migration),
            Box::new(m20240101_000003_create_reviews::Migration),
            Box::new(m20240101_000004_create_reservations::Migration),
            Box::new(m20240101_000005_seed_reference_data::Migration),
        ]
    }
}

//! Migrator registering table migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_user;
mod m20250601_000002_create_user_credentials;
mod m20250601_000003_create_service;
mod m20250601_000004_create_booking;
mod m20250601_000005_create_contact;
mod m20250601_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_user::Migration),
            Box::new(m20250601_000002_create_user_credentials::Migration),
            Box::new(m20250601_000003_create_service::Migration),
            Box::new(m20250601_000004_create_booking::Migration),
            Box::new(m20250601_000005_create_contact::Migration),
            // Indexes should always be applied last
            Box::new(m20250601_000006_add_indexes::Migration),
        ]
    }
}

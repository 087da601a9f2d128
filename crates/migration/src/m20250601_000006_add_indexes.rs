//! Secondary indexes for the hot lookup paths: role filtering, per-vendor
//! listings, and status scans.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role")
                    .table(User::Table)
                    .col(User::Role)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_vendor")
                    .table(Service::Table)
                    .col(Service::VendorId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_status")
                    .table(Service::Table)
                    .col(Service::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_vendor")
                    .table(Booking::Table)
                    .col(Booking::VendorId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_service_status")
                    .table(Booking::Table)
                    .col(Booking::ServiceId)
                    .col(Booking::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_created_at")
                    .table(Contact::Table)
                    .col(Contact::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_user_role",
            "idx_service_vendor",
            "idx_service_status",
            "idx_booking_vendor",
            "idx_booking_service_status",
            "idx_contact_created_at",
        ] {
            manager.drop_index(Index::drop().name(name).to_owned()).await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User { Table, Role }

#[derive(DeriveIden)]
enum Service { Table, VendorId, Status }

#[derive(DeriveIden)]
enum Booking { Table, ServiceId, VendorId, Status }

#[derive(DeriveIden)]
enum Contact { Table, CreatedAt }

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Bookings {
    Table,
    Rid,
    IsDeleted,
    StartDate,
    EndDate,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Serves the per-room overlap probe.
        manager
            .create_index(
                Index::create()
                    .name("idx-bookings-rid-is_deleted-start_date")
                    .table(Bookings::Table)
                    .col(Bookings::Rid)
                    .col(Bookings::IsDeleted)
                    .col(Bookings::StartDate)
                    .to_owned(),
            )
            .await?;

        // Serves the registry-wide availability scan.
        manager
            .create_index(
                Index::create()
                    .name("idx-bookings-is_deleted-end_date")
                    .table(Bookings::Table)
                    .col(Bookings::IsDeleted)
                    .col(Bookings::EndDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-bookings-is_deleted-end_date")
                    .table(Bookings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx-bookings-rid-is_deleted-start_date")
                    .table(Bookings::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

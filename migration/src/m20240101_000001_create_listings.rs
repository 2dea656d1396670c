use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create listings table
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Listings::Name).string().not_null())
                    .col(ColumnDef::new(Listings::City).string().not_null())
                    .col(ColumnDef::new(Listings::District).string().not_null())
                    .col(
                        ColumnDef::new(Listings::BusinessDistrict)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Listings::Category).string().not_null())
                    .col(ColumnDef::new(Listings::Phone).string().not_null())
                    .col(
                        ColumnDef::new(Listings::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Listings::MonthlySales)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Listings::Address).string().not_null())
                    .col(
                        ColumnDef::new(Listings::CrawlTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_listings_city")
                    .table(Listings::Table)
                    .col(Listings::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_rating")
                    .table(Listings::Table)
                    .col(Listings::Rating)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_crawl_time")
                    .table(Listings::Table)
                    .col(Listings::CrawlTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Listings {
    Table,
    Id,
    Name,
    City,
    District,
    BusinessDistrict,
    Category,
    Phone,
    Rating,
    MonthlySales,
    Address,
    CrawlTime,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // City: composite unique (country_id, name)
        manager
            .create_index(
                Index::create()
                    .name("uniq_city_country_name")
                    .table(City::Table)
                    .col(City::CountryId)
                    .col(City::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Customer: lookups by residency
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_country")
                    .table(Customer::Table)
                    .col(Customer::CountryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_city")
                    .table(Customer::Table)
                    .col(Customer::CityId)
                    .to_owned(),
            )
            .await?;

        // Promotion: index on both parents
        manager
            .create_index(
                Index::create()
                    .name("idx_promotion_section")
                    .table(Promotion::Table)
                    .col(Promotion::SectionId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_promotion_country")
                    .table(Promotion::Table)
                    .col(Promotion::CountryId)
                    .to_owned(),
            )
            .await?;

        // CustomerSection: reverse lookup by section
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_section_section")
                    .table(CustomerSection::Table)
                    .col(CustomerSection::SectionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_city_country_name").table(City::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customer_country").table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customer_city").table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_promotion_section").table(Promotion::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_promotion_country").table(Promotion::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_customer_section_section")
                    .table(CustomerSection::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum City { Table, CountryId, Name }

#[derive(DeriveIden)]
enum Customer { Table, CountryId, CityId }

#[derive(DeriveIden)]
enum Promotion { Table, SectionId, CountryId }

#[derive(DeriveIden)]
enum CustomerSection { Table, SectionId }

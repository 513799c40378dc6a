//! Create `customer_section` join table for the customer/section many-to-many.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerSection::Table)
                    .if_not_exists()
                    .col(integer(CustomerSection::CustomerId).not_null())
                    .col(integer(CustomerSection::SectionId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_customer_section")
                            .col(CustomerSection::CustomerId)
                            .col(CustomerSection::SectionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_section_customer")
                            .from(CustomerSection::Table, CustomerSection::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_section_section")
                            .from(CustomerSection::Table, CustomerSection::SectionId)
                            .to(Section::Table, Section::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CustomerSection::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CustomerSection { Table, CustomerId, SectionId }

#[derive(DeriveIden)]
enum Customer { Table, Id }

#[derive(DeriveIden)]
enum Section { Table, Id }

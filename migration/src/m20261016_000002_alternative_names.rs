//! Alternative names and the place join table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlternativeNames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AlternativeNames::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AlternativeNames::Name)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AlternativeNames::Language)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AlternativeNames::IsPreferred)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AlternativeNames::IsShort)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AlternativeNames::IsColloquial)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlaceAlternativeNames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlaceAlternativeNames::PlaceKind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlaceAlternativeNames::PlaceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlaceAlternativeNames::AlternativeNameId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PlaceAlternativeNames::PlaceKind)
                            .col(PlaceAlternativeNames::PlaceId)
                            .col(PlaceAlternativeNames::AlternativeNameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_place_alternative_names_name")
                            .from(
                                PlaceAlternativeNames::Table,
                                PlaceAlternativeNames::AlternativeNameId,
                            )
                            .to(AlternativeNames::Table, AlternativeNames::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_alternative_names_language")
                    .table(AlternativeNames::Table)
                    .col(AlternativeNames::Language)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_alternative_names_language")
                    .table(AlternativeNames::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PlaceAlternativeNames::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AlternativeNames::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AlternativeNames {
    Table,
    Id,
    Name,
    Language,
    IsPreferred,
    IsShort,
    IsColloquial,
}

#[derive(DeriveIden)]
enum PlaceAlternativeNames {
    Table,
    PlaceKind,
    PlaceId,
    AlternativeNameId,
}

//! Place hierarchy tables
//!
//! Creates countries, regions, subregions, cities, districts and postal
//! codes. Point locations are stored as latitude/longitude doubles with a
//! composite index used by bounding-box prefilters.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Countries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Countries::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Countries::Slug).string_len(200).not_null())
                    .col(ColumnDef::new(Countries::Code).string_len(2).not_null())
                    .col(ColumnDef::new(Countries::Code3).string_len(3).not_null())
                    .col(ColumnDef::new(Countries::Population).big_integer().not_null())
                    .col(ColumnDef::new(Countries::Area).big_integer().null())
                    .col(ColumnDef::new(Countries::Currency).string_len(3).null())
                    .col(ColumnDef::new(Countries::CurrencyName).string_len(50).null())
                    .col(ColumnDef::new(Countries::Languages).string_len(250).null())
                    .col(ColumnDef::new(Countries::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Countries::Continent).string_len(2).not_null())
                    .col(ColumnDef::new(Countries::Tld).string_len(5).not_null())
                    .col(ColumnDef::new(Countries::Capital).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Regions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Regions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Regions::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Regions::Slug).string_len(200).not_null())
                    .col(ColumnDef::new(Regions::NameStd).string_len(200).not_null())
                    .col(ColumnDef::new(Regions::Code).string_len(200).not_null())
                    .col(ColumnDef::new(Regions::CountryId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_regions_country")
                            .from(Regions::Table, Regions::CountryId)
                            .to(Countries::Table, Countries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subregions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subregions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subregions::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Subregions::Slug).string_len(200).not_null())
                    .col(ColumnDef::new(Subregions::NameStd).string_len(200).not_null())
                    .col(ColumnDef::new(Subregions::Code).string_len(200).not_null())
                    .col(ColumnDef::new(Subregions::RegionId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subregions_region")
                            .from(Subregions::Table, Subregions::RegionId)
                            .to(Regions::Table, Regions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cities::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Cities::Slug).string_len(200).not_null())
                    .col(ColumnDef::new(Cities::NameStd).string_len(200).not_null())
                    .col(ColumnDef::new(Cities::Latitude).double().not_null())
                    .col(ColumnDef::new(Cities::Longitude).double().not_null())
                    .col(ColumnDef::new(Cities::Population).big_integer().not_null())
                    .col(ColumnDef::new(Cities::RegionId).big_integer().null())
                    .col(ColumnDef::new(Cities::SubregionId).big_integer().null())
                    .col(ColumnDef::new(Cities::CountryId).big_integer().not_null())
                    .col(ColumnDef::new(Cities::Elevation).integer().null())
                    .col(ColumnDef::new(Cities::Kind).string_len(10).not_null())
                    .col(ColumnDef::new(Cities::Timezone).string_len(40).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cities_country")
                            .from(Cities::Table, Cities::CountryId)
                            .to(Countries::Table, Countries::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cities_region")
                            .from(Cities::Table, Cities::RegionId)
                            .to(Regions::Table, Regions::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cities_subregion")
                            .from(Cities::Table, Cities::SubregionId)
                            .to(Subregions::Table, Subregions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Districts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Districts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Districts::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Districts::Slug).string_len(200).not_null())
                    .col(ColumnDef::new(Districts::NameStd).string_len(200).not_null())
                    .col(ColumnDef::new(Districts::Latitude).double().not_null())
                    .col(ColumnDef::new(Districts::Longitude).double().not_null())
                    .col(ColumnDef::new(Districts::Population).big_integer().not_null())
                    .col(ColumnDef::new(Districts::CityId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_districts_city")
                            .from(Districts::Table, Districts::CityId)
                            .to(Cities::Table, Cities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostalCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostalCodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostalCodes::Name).string_len(200).not_null())
                    .col(ColumnDef::new(PostalCodes::Slug).string_len(200).not_null())
                    .col(ColumnDef::new(PostalCodes::Code).string_len(20).not_null())
                    .col(ColumnDef::new(PostalCodes::Latitude).double().not_null())
                    .col(ColumnDef::new(PostalCodes::Longitude).double().not_null())
                    .col(ColumnDef::new(PostalCodes::CountryId).big_integer().not_null())
                    .col(ColumnDef::new(PostalCodes::RegionName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(PostalCodes::SubregionName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PostalCodes::DistrictName)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_postal_codes_country")
                            .from(PostalCodes::Table, PostalCodes::CountryId)
                            .to(Countries::Table, Countries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CountryNeighbours::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CountryNeighbours::CountryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CountryNeighbours::NeighbourId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CountryNeighbours::CountryId)
                            .col(CountryNeighbours::NeighbourId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_country_neighbours_country")
                            .from(CountryNeighbours::Table, CountryNeighbours::CountryId)
                            .to(Countries::Table, Countries::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_country_neighbours_neighbour")
                            .from(CountryNeighbours::Table, CountryNeighbours::NeighbourId)
                            .to(Countries::Table, Countries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // name / code lookups
        let indexes = [
            ("idx_countries_name", Countries::Table, Countries::Name),
            ("idx_countries_code", Countries::Table, Countries::Code),
            ("idx_countries_code3", Countries::Table, Countries::Code3),
        ];
        for (name, table, col) in indexes {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        let indexes = [
            ("idx_regions_name", Regions::Table, Regions::Name),
            ("idx_regions_name_std", Regions::Table, Regions::NameStd),
            ("idx_regions_code", Regions::Table, Regions::Code),
        ];
        for (name, table, col) in indexes {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        let indexes = [
            ("idx_subregions_name", Subregions::Table, Subregions::Name),
            ("idx_subregions_name_std", Subregions::Table, Subregions::NameStd),
            ("idx_subregions_code", Subregions::Table, Subregions::Code),
        ];
        for (name, table, col) in indexes {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        let indexes = [
            ("idx_cities_name", Cities::Table, Cities::Name),
            ("idx_cities_name_std", Cities::Table, Cities::NameStd),
        ];
        for (name, table, col) in indexes {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        let indexes = [
            ("idx_districts_name", Districts::Table, Districts::Name),
            ("idx_districts_name_std", Districts::Table, Districts::NameStd),
        ];
        for (name, table, col) in indexes {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        let indexes = [
            ("idx_postal_codes_name", PostalCodes::Table, PostalCodes::Name),
            ("idx_postal_codes_code", PostalCodes::Table, PostalCodes::Code),
            (
                "idx_postal_codes_region_name",
                PostalCodes::Table,
                PostalCodes::RegionName,
            ),
            (
                "idx_postal_codes_subregion_name",
                PostalCodes::Table,
                PostalCodes::SubregionName,
            ),
            (
                "idx_postal_codes_district_name",
                PostalCodes::Table,
                PostalCodes::DistrictName,
            ),
        ];
        for (name, table, col) in indexes {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        // Bounding-box prefilter indexes
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cities_location")
                    .table(Cities::Table)
                    .col(Cities::Latitude)
                    .col(Cities::Longitude)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_districts_location")
                    .table(Districts::Table)
                    .col(Districts::Latitude)
                    .col(Districts::Longitude)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_postal_codes_location")
                    .table(PostalCodes::Table)
                    .col(PostalCodes::Latitude)
                    .col(PostalCodes::Longitude)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first so foreign keys never dangle
        manager
            .drop_table(Table::drop().table(CountryNeighbours::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostalCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Districts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subregions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Regions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Countries {
    Table,
    Id,
    Name,
    Slug,
    Code,
    Code3,
    Population,
    Area,
    Currency,
    CurrencyName,
    Languages,
    Phone,
    Continent,
    Tld,
    Capital,
}

#[derive(DeriveIden, Clone, Copy)]
enum Regions {
    Table,
    Id,
    Name,
    Slug,
    NameStd,
    Code,
    CountryId,
}

#[derive(DeriveIden, Clone, Copy)]
enum Subregions {
    Table,
    Id,
    Name,
    Slug,
    NameStd,
    Code,
    RegionId,
}

#[derive(DeriveIden, Clone, Copy)]
enum Cities {
    Table,
    Id,
    Name,
    Slug,
    NameStd,
    Latitude,
    Longitude,
    Population,
    RegionId,
    SubregionId,
    CountryId,
    Elevation,
    Kind,
    Timezone,
}

#[derive(DeriveIden, Clone, Copy)]
enum Districts {
    Table,
    Id,
    Name,
    Slug,
    NameStd,
    Latitude,
    Longitude,
    Population,
    CityId,
}

#[derive(DeriveIden, Clone, Copy)]
enum PostalCodes {
    Table,
    Id,
    Name,
    Slug,
    Code,
    Latitude,
    Longitude,
    CountryId,
    RegionName,
    SubregionName,
    DistrictName,
}

#[derive(DeriveIden, Clone, Copy)]
enum CountryNeighbours {
    Table,
    CountryId,
    NeighbourId,
}

//! City entity
//!
//! A city always belongs to a country. Region and subregion are optional
//! because the source data does not always carry a full admin chain.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub name_std: String,
    #[sea_orm(column_type = "Double")]
    pub latitude: f64,
    #[sea_orm(column_type = "Double")]
    pub longitude: f64,
    pub population: i64,
    pub region_id: Option<i64>,
    pub subregion_id: Option<i64>,
    pub country_id: i64,
    pub elevation: Option<i32>,
    /// GeoNames feature code (PPL, PPLA, PPLC, ...)
    pub kind: String,
    pub timezone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::RegionId",
        to = "super::region::Column::Id"
    )]
    Region,
    #[sea_orm(
        belongs_to = "super::subregion::Entity",
        from = "Column::SubregionId",
        to = "super::subregion::Column::Id"
    )]
    Subregion,
    #[sea_orm(has_many = "super::district::Entity")]
    District,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::subregion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subregion.def()
    }
}

impl Related<super::district::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::District.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

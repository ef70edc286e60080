//! Country entity, the root of the place hierarchy

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// ISO 3166-1 alpha-2
    pub code: String,
    /// ISO 3166-1 alpha-3
    pub code3: String,
    pub population: i64,
    pub area: Option<i64>,
    pub currency: Option<String>,
    pub currency_name: Option<String>,
    pub languages: Option<String>,
    pub phone: String,
    pub continent: String,
    pub tld: String,
    pub capital: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::region::Entity")]
    Region,
    #[sea_orm(has_many = "super::city::Entity")]
    City,
    #[sea_orm(has_many = "super::postal_code::Entity")]
    PostalCode,
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::postal_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostalCode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

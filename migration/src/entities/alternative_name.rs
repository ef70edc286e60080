//! Localized alternative names, shared by every place kind

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "alternative_names")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub language: String,
    pub is_preferred: bool,
    pub is_short: bool,
    pub is_colloquial: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::place_alternative_name::Entity")]
    PlaceAlternativeName,
}

impl Related<super::place_alternative_name::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlaceAlternativeName.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

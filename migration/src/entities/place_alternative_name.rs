//! Join table between any place and its alternative names
//!
//! `place_kind` discriminates which place table `place_id` points into.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "place_alternative_names")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub place_kind: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub place_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub alternative_name_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::alternative_name::Entity",
        from = "Column::AlternativeNameId",
        to = "super::alternative_name::Column::Id"
    )]
    AlternativeName,
}

impl Related<super::alternative_name::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AlternativeName.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Self-referential many-to-many between countries sharing a border

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "country_neighbours")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub country_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub neighbour_id: i64,
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
        belongs_to = "super::country::Entity",
        from = "Column::NeighbourId",
        to = "super::country::Column::Id"
    )]
    Neighbour,
}

impl ActiveModelBehavior for ActiveModel {}

pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261016_000001_places;
mod m20261016_000002_alternative_names;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_places::Migration),
            Box::new(m20261016_000002_alternative_names::Migration),
        ]
    }
}

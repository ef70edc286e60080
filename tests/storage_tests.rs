//! Storage backend tests
//!
//! Lookups, hierarchy, full-code indexes and relations against temporary
//! SQLite databases.

mod common;

use std::collections::BTreeSet;
use std::sync::atomic::Ordering;

use cities::places::{Place, PlaceKind, hierarchy};
use cities::storage::backend::{IN_CHUNK_SIZE, infer_backend_from_url, normalize_backend_name};
use cities::storage::{GeoStorage, region_full_index, subregion_full_index};
use common::*;
use migration::entities::{city, region, subregion};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

// =============================================================================
// URL inference
// =============================================================================

#[cfg(test)]
mod url_inference_tests {
    use super::*;

    #[test]
    fn test_infer_sqlite() {
        assert_eq!(infer_backend_from_url("sqlite://cities.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("sqlite::memory:").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("data/world.sqlite").unwrap(), "sqlite");
    }

    #[test]
    fn test_infer_server_backends() {
        assert_eq!(infer_backend_from_url("mysql://u@h/db").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("mariadb://u@h/db").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("postgres://u@h/db").unwrap(), "postgres");
        assert_eq!(infer_backend_from_url("postgresql://u@h/db").unwrap(), "postgres");
    }

    #[test]
    fn test_infer_unknown_fails() {
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }

    #[test]
    fn test_normalize_backend_name() {
        assert_eq!(normalize_backend_name("mariadb"), "mysql");
        assert_eq!(normalize_backend_name("sqlite"), "sqlite");
    }
}

// =============================================================================
// Lookups
// =============================================================================

#[tokio::test]
async fn test_empty_database_lookups_return_none() {
    let (storage, _dir) = create_temp_storage().await;

    assert!(storage.country(GERMANY).await.unwrap().is_none());
    assert!(storage.city(MUNICH).await.unwrap().is_none());
    assert!(storage.postal_code(1).await.unwrap().is_none());
    assert!(storage.region_full_index(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_country_by_code_accepts_both_iso_forms() {
    let (storage, _dir) = create_seeded_storage().await;

    let by_alpha2 = storage.country_by_code("de").await.unwrap().unwrap();
    let by_alpha3 = storage.country_by_code("DEU").await.unwrap().unwrap();
    assert_eq!(by_alpha2.id, GERMANY);
    assert_eq!(by_alpha2, by_alpha3);
    assert!(storage.country_by_code("XX").await.unwrap().is_none());
}

#[tokio::test]
async fn test_countries_are_ordered_by_name() {
    let (storage, _dir) = create_seeded_storage().await;

    let names: Vec<String> = storage
        .countries()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Austria", "Fiji", "France", "Germany", "Japan"]);
}

#[tokio::test]
async fn test_city_loads_every_ancestor() {
    let (storage, _dir) = create_seeded_storage().await;

    let munich = storage.city(MUNICH).await.unwrap().unwrap();
    assert_eq!(munich.country.code, "DE");
    assert_eq!(munich.region.as_ref().unwrap().id, BAVARIA);
    let upper_bavaria = munich.subregion.as_ref().unwrap();
    assert_eq!(upper_bavaria.id, UPPER_BAVARIA);
    assert_eq!(upper_bavaria.full_code(), "DE.02.091");
}

#[tokio::test]
async fn test_city_hierarchy_is_root_first() {
    let (storage, _dir) = create_seeded_storage().await;

    let munich = storage.city(MUNICH).await.unwrap().unwrap();
    let chain: Vec<(PlaceKind, &str)> = hierarchy(&munich)
        .into_iter()
        .map(|p| (p.kind(), p.name()))
        .collect();
    assert_eq!(
        chain,
        [
            (PlaceKind::Country, "Germany"),
            (PlaceKind::Region, "Bavaria"),
            (PlaceKind::City, "Munich"),
        ]
    );
    assert_eq!(munich.absolute_url(), "germany/bavaria/munich");
}

#[tokio::test]
async fn test_city_without_region_is_its_own_root() {
    let (storage, _dir) = create_seeded_storage().await;

    let vienna = storage.city(VIENNA).await.unwrap().unwrap();
    let chain = vienna.hierarchy();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].id(), VIENNA);
    assert_eq!(vienna.country.name, "Austria");
}

#[tokio::test]
async fn test_district_hierarchy_runs_through_city() {
    let (storage, _dir) = create_seeded_storage().await;

    let schwabing = storage.district(SCHWABING).await.unwrap().unwrap();
    let names: Vec<&str> = schwabing.hierarchy().into_iter().map(|p| p.name()).collect();
    assert_eq!(names, ["Germany", "Bavaria", "Munich", "Schwabing"]);
}

#[tokio::test]
async fn test_postal_code_names() {
    let (storage, _dir) = create_seeded_storage().await;

    let paris = storage.postal_code(PARIS_1ER_POSTAL).await.unwrap().unwrap();
    assert_eq!(paris.names(), ["France", "Ile-de-France", "Paris", "Paris 1er"]);
    assert_eq!(paris.name_full(), "Paris 1er, Paris, Ile-de-France, France");
    assert_eq!(paris.to_string(), "75001");
}

#[tokio::test]
async fn test_cities_batch_shares_country() {
    let (storage, _dir) = create_seeded_storage().await;

    let german = storage
        .cities(
            migration::entities::city::Entity::find()
                .filter(migration::entities::city::Column::CountryId.eq(GERMANY)),
        )
        .await
        .unwrap();
    assert_eq!(german.len(), 2);
    assert!(std::sync::Arc::ptr_eq(&german[0].country, &german[1].country));
}

// =============================================================================
// Full-code indexes
// =============================================================================

#[tokio::test]
async fn test_region_full_index_keys() {
    let (storage, _dir) = create_seeded_storage().await;

    let index = storage.region_full_index(None).await.unwrap();
    let total = region::Entity::find().all(storage.get_db()).await.unwrap().len();
    assert_eq!(index.len(), total);

    let keys: BTreeSet<&str> = index.keys().map(String::as_str).collect();
    assert_eq!(keys, BTreeSet::from(["DE.02", "DE.16", "FR.11", "JP.40"]));
    for (key, region) in &index {
        assert_eq!(key, &region.full_code());
    }
}

#[tokio::test]
async fn test_region_full_index_respects_base_query() {
    let (storage, _dir) = create_seeded_storage().await;

    let base = region::Entity::find().filter(region::Column::CountryId.eq(GERMANY));
    let index = storage.region_full_index(Some(base)).await.unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index["DE.02"].name, "Bavaria");
}

#[tokio::test]
async fn test_subregion_full_index_keys() {
    let (storage, _dir) = create_seeded_storage().await;

    let index = storage.subregion_full_index(None).await.unwrap();
    let total = subregion::Entity::find().all(storage.get_db()).await.unwrap().len();
    assert_eq!(index.len(), total);

    let keys: BTreeSet<&str> = index.keys().map(String::as_str).collect();
    assert_eq!(keys, BTreeSet::from(["DE.02.091", "FR.11.75"]));
    assert_eq!(index["FR.11.75"].region.country.name, "France");
}

/// Add `count` regions (each with one subregion) to Austria
async fn add_austrian_regions(db: &DatabaseConnection, first_id: i64, count: i64) {
    for id in first_id..first_id + count {
        insert(db, region_row(id, &format!("Region {}", id), &id.to_string(), AUSTRIA)).await;
        insert(
            db,
            subregion_row(id, &format!("Subregion {}", id), &id.to_string(), id),
        )
        .await;
    }
}

#[tokio::test]
async fn test_full_indexes_cost_one_statement_each() {
    let (storage, dir) = create_seeded_storage().await;
    let (db, statements) = counting_connection(&dir).await;

    for extra in [0, 25] {
        if extra > 0 {
            add_austrian_regions(storage.get_db(), 1000, extra).await;
        }

        statements.store(0, Ordering::SeqCst);
        let regions = region_full_index(&db, None).await.unwrap();
        assert_eq!(statements.load(Ordering::SeqCst), 1);
        assert_eq!(regions.len(), 4 + extra as usize);

        statements.store(0, Ordering::SeqCst);
        let subregions = subregion_full_index(&db, None).await.unwrap();
        assert_eq!(statements.load(Ordering::SeqCst), 1);
        assert_eq!(subregions.len(), 2 + extra as usize);
    }

    let index = subregion_full_index(&db, None).await.unwrap();
    assert_eq!(index["AT.1000.1000"].region.country.name, "Austria");
}

#[tokio::test]
async fn test_cities_hydrate_past_one_in_chunk() {
    let (storage, dir) = create_temp_storage().await;
    let seed = storage.get_db();
    insert(seed, country_row(AUSTRIA, "Austria", "AT", "AUT")).await;

    let count = (IN_CHUNK_SIZE + 50) as i64;
    let regions: Vec<region::ActiveModel> = (1..=count)
        .map(|id| region_row(id, &format!("Region {}", id), &id.to_string(), AUSTRIA))
        .collect();
    for batch in regions.chunks(200) {
        region::Entity::insert_many(batch.to_vec())
            .exec_without_returning(seed)
            .await
            .unwrap();
    }
    let cities: Vec<city::ActiveModel> = (1..=count)
        .map(|id| {
            city_row(id, &format!("Town {}", id), (47.0, 14.0), AUSTRIA, Some(id), None)
        })
        .collect();
    for batch in cities.chunks(200) {
        city::Entity::insert_many(batch.to_vec())
            .exec_without_returning(seed)
            .await
            .unwrap();
    }

    let (db, statements) = counting_connection(&dir).await;
    let counted = GeoStorage::from_connection(db, "sqlite");
    let towns = counted.cities(city::Entity::find()).await.unwrap();

    assert_eq!(towns.len(), count as usize);
    for town in &towns {
        assert_eq!(town.region.as_ref().unwrap().id, town.id);
    }
    // cities, countries, then regions in two chunks
    assert_eq!(statements.load(Ordering::SeqCst), 4);
}

// =============================================================================
// Relations
// =============================================================================

#[tokio::test]
async fn test_alternative_names_are_scoped_by_kind() {
    let (storage, _dir) = create_seeded_storage().await;

    let munich = storage.city(MUNICH).await.unwrap().unwrap();
    let names: Vec<String> = storage
        .alternative_names(&munich)
        .await
        .unwrap()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(names, ["München (de)", "Munich (en)"]);

    let bavaria = storage.region(BAVARIA).await.unwrap().unwrap();
    let names = storage.alternative_names(&bavaria).await.unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].name, "Bayern");
    assert!(names[0].is_preferred);
}

#[tokio::test]
async fn test_neighbours_are_symmetric() {
    let (storage, _dir) = create_seeded_storage().await;

    let germany = storage.country(GERMANY).await.unwrap().unwrap();
    let names: Vec<String> = storage
        .neighbours(&germany)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Austria", "France"]);

    let france = storage.country(FRANCE).await.unwrap().unwrap();
    let names: Vec<String> = storage
        .neighbours(&france)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Germany"]);

    let japan = storage.country(JAPAN).await.unwrap().unwrap();
    assert!(storage.neighbours(&japan).await.unwrap().is_empty());
}

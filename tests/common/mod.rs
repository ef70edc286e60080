//! Shared fixtures: a temporary SQLite database seeded with a small world

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use cities::config::init_config;
use cities::storage::GeoStorage;
use cities::storage::backend::connect_sqlite;
use migration::entities::{
    alternative_name, city, country, country_neighbour, district, place_alternative_name,
    postal_code, region, subregion,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// Empty, migrated storage in a temporary directory
pub async fn create_temp_storage() -> (GeoStorage, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = db_url(&temp_dir);

    let storage = GeoStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

pub fn db_url(dir: &TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display())
}

/// Second connection to the database in `dir` counting every statement it runs
pub async fn counting_connection(dir: &TempDir) -> (DatabaseConnection, Arc<AtomicUsize>) {
    let mut db = connect_sqlite(&db_url(dir))
        .await
        .expect("Failed to open counting connection");
    let statements = Arc::new(AtomicUsize::new(0));
    let counter = statements.clone();
    db.set_metric_callback(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (db, statements)
}

/// Migrated storage holding [`seed_world`]
pub async fn create_seeded_storage() -> (GeoStorage, TempDir) {
    let (storage, dir) = create_temp_storage().await;
    seed_world(storage.get_db()).await;
    (storage, dir)
}

pub async fn insert<A>(db: &DatabaseConnection, model: A)
where
    A: ActiveModelTrait + Send,
{
    <A::Entity as EntityTrait>::insert(model)
        .exec_without_returning(db)
        .await
        .expect("Failed to seed row");
}

pub const GERMANY: i64 = 1;
pub const FRANCE: i64 = 2;
pub const AUSTRIA: i64 = 3;
pub const JAPAN: i64 = 4;
pub const FIJI: i64 = 5;

pub const BAVARIA: i64 = 10;
pub const UPPER_BAVARIA: i64 = 20;

pub const MUNICH: i64 = 100;
pub const BERLIN: i64 = 101;
pub const PARIS: i64 = 102;
pub const VIENNA: i64 = 103;
pub const TOKYO: i64 = 104;
pub const SUVA: i64 = 105;

pub const SCHWABING: i64 = 200;
pub const MONTMARTRE: i64 = 201;

pub const MUNICH_ALTSTADT_POSTAL: i64 = 300;
pub const PARIS_1ER_POSTAL: i64 = 301;

pub fn country_row(id: i64, name: &str, code: &str, code3: &str) -> country::ActiveModel {
    country::Model {
        id,
        name: name.to_string(),
        slug: name.to_lowercase(),
        code: code.to_string(),
        code3: code3.to_string(),
        population: 1_000_000,
        area: None,
        currency: None,
        currency_name: None,
        languages: None,
        phone: String::new(),
        continent: String::new(),
        tld: format!(".{}", code.to_lowercase()),
        capital: String::new(),
    }
    .into()
}

pub fn region_row(id: i64, name: &str, code: &str, country_id: i64) -> region::ActiveModel {
    region::Model {
        id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        name_std: name.to_string(),
        code: code.to_string(),
        country_id,
    }
    .into()
}

pub fn subregion_row(id: i64, name: &str, code: &str, region_id: i64) -> subregion::ActiveModel {
    subregion::Model {
        id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        name_std: name.to_string(),
        code: code.to_string(),
        region_id,
    }
    .into()
}

pub fn city_row(
    id: i64,
    name: &str,
    (latitude, longitude): (f64, f64),
    country_id: i64,
    region_id: Option<i64>,
    subregion_id: Option<i64>,
) -> city::ActiveModel {
    city::Model {
        id,
        name: name.to_string(),
        slug: name.to_lowercase(),
        name_std: name.to_string(),
        latitude,
        longitude,
        population: 100_000,
        region_id,
        subregion_id,
        country_id,
        elevation: None,
        kind: "PPL".to_string(),
        timezone: "UTC".to_string(),
    }
    .into()
}

pub fn district_row(
    id: i64,
    name: &str,
    (latitude, longitude): (f64, f64),
    city_id: i64,
) -> district::ActiveModel {
    district::Model {
        id,
        name: name.to_string(),
        slug: name.to_lowercase(),
        name_std: name.to_string(),
        latitude,
        longitude,
        population: 10_000,
        city_id,
    }
    .into()
}

#[allow(clippy::too_many_arguments)]
pub fn postal_code_row(
    id: i64,
    code: &str,
    name: &str,
    (latitude, longitude): (f64, f64),
    country_id: i64,
    region_name: &str,
    subregion_name: &str,
    district_name: &str,
) -> postal_code::ActiveModel {
    postal_code::Model {
        id,
        name: name.to_string(),
        slug: code.to_string(),
        code: code.to_string(),
        latitude,
        longitude,
        country_id,
        region_name: region_name.to_string(),
        subregion_name: subregion_name.to_string(),
        district_name: district_name.to_string(),
    }
    .into()
}

/// Insert a handful of countries, regions, cities and postal codes
///
/// Coordinates are real so distance assertions can be reasoned about.
pub async fn seed_world(db: &DatabaseConnection) {
    for row in [
        country_row(GERMANY, "Germany", "DE", "DEU"),
        country_row(FRANCE, "France", "FR", "FRA"),
        country_row(AUSTRIA, "Austria", "AT", "AUT"),
        country_row(JAPAN, "Japan", "JP", "JPN"),
        country_row(FIJI, "Fiji", "FJ", "FJI"),
    ] {
        insert(db, row).await;
    }

    for row in [
        region_row(BAVARIA, "Bavaria", "02", GERMANY),
        region_row(11, "Berlin", "16", GERMANY),
        region_row(12, "Ile-de-France", "11", FRANCE),
        region_row(13, "Tokyo", "40", JAPAN),
    ] {
        insert(db, row).await;
    }

    for row in [
        subregion_row(UPPER_BAVARIA, "Upper Bavaria", "091", BAVARIA),
        subregion_row(21, "Paris", "75", 12),
    ] {
        insert(db, row).await;
    }

    for row in [
        city_row(MUNICH, "Munich", (48.1374, 11.5755), GERMANY, Some(BAVARIA), Some(UPPER_BAVARIA)),
        city_row(BERLIN, "Berlin", (52.5200, 13.4050), GERMANY, Some(11), None),
        city_row(PARIS, "Paris", (48.8566, 2.3522), FRANCE, Some(12), Some(21)),
        city_row(VIENNA, "Vienna", (48.2082, 16.3738), AUSTRIA, None, None),
        city_row(TOKYO, "Tokyo", (35.6762, 139.6503), JAPAN, Some(13), None),
        city_row(SUVA, "Suva", (-18.1416, 178.4419), FIJI, None, None),
    ] {
        insert(db, row).await;
    }

    for row in [
        district_row(SCHWABING, "Schwabing", (48.1642, 11.5860), MUNICH),
        district_row(MONTMARTRE, "Montmartre", (48.8867, 2.3431), PARIS),
    ] {
        insert(db, row).await;
    }

    insert(
        db,
        postal_code_row(
            MUNICH_ALTSTADT_POSTAL,
            "80331",
            "Munich",
            (48.1351, 11.5820),
            GERMANY,
            "Bavaria",
            "Upper Bavaria",
            "Altstadt",
        ),
    )
    .await;
    insert(
        db,
        postal_code_row(
            PARIS_1ER_POSTAL,
            "75001",
            "Paris 1er",
            (48.8625, 2.3364),
            FRANCE,
            "Ile-de-France",
            "Paris",
            "",
        ),
    )
    .await;

    for (id, name, language, is_preferred) in [
        (1, "München", "de", true),
        (2, "Munich", "en", false),
        (3, "Bayern", "de", true),
    ] {
        insert(
            db,
            alternative_name::ActiveModel::from(alternative_name::Model {
                id,
                name: name.to_string(),
                language: language.to_string(),
                is_preferred,
                is_short: false,
                is_colloquial: false,
            }),
        )
        .await;
    }

    for (place_kind, place_id, alternative_name_id) in [
        ("city", MUNICH, 1),
        ("city", MUNICH, 2),
        ("region", BAVARIA, 3),
        // Same id as Munich under another kind must not leak into the city
        ("region", MUNICH, 3),
    ] {
        insert(
            db,
            place_alternative_name::ActiveModel::from(place_alternative_name::Model {
                place_kind: place_kind.to_string(),
                place_id,
                alternative_name_id,
            }),
        )
        .await;
    }

    for (country_id, neighbour_id) in [(GERMANY, FRANCE), (AUSTRIA, GERMANY)] {
        insert(
            db,
            country_neighbour::ActiveModel::from(country_neighbour::Model {
                country_id,
                neighbour_id,
            }),
        )
        .await;
    }
}

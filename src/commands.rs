//! Execution of parsed CLI commands
//!
//! Lookups print JSON on stdout; progress goes through `tracing`.

use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::cli::{Commands, IndexLevel, NearestKind};
use crate::config::StaticConfig;
use crate::errors::{CitiesError, Result};
use crate::places::{Place, hierarchy};
use crate::spatial::Coordinates;
use crate::storage::{GeoStorage, StorageFactory};

pub async fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::ConfigGen { output_path, force } => config_generate(output_path, force),
        Commands::Migrate => {
            // Migrations run on connect
            let storage = StorageFactory::create().await?;
            info!("{} schema is up to date", storage.backend_name());
            Ok(())
        }
        Commands::Nearest {
            kind,
            lat,
            lon,
            miles,
        } => {
            let storage = StorageFactory::create().await?;
            nearest(&storage, kind, lat, lon, miles).await
        }
        Commands::Hierarchy { city } => {
            let storage = StorageFactory::create().await?;
            city_hierarchy(&storage, city).await
        }
        Commands::FullIndex { level } => {
            let storage = StorageFactory::create().await?;
            full_index(&storage, level).await
        }
        Commands::Country { code } => {
            let storage = StorageFactory::create().await?;
            country_with_neighbours(&storage, &code).await
        }
        Commands::AltNames { kind, id } => {
            let storage = StorageFactory::create().await?;
            print_json(&storage.alternative_names_for(kind, id).await?)
        }
    }
}

async fn nearest(
    storage: &GeoStorage,
    kind: NearestKind,
    lat: f64,
    lon: f64,
    miles: Option<f64>,
) -> Result<()> {
    let point = Coordinates::validated(lat, lon)?.point();
    match kind {
        NearestKind::City => print_json(&storage.nearest_city(point, miles).await?),
        NearestKind::District => print_json(&storage.nearest_district(point, miles).await?),
        NearestKind::PostalCode => print_json(&storage.nearest_postal_code(point, miles).await?),
        NearestKind::Country => print_json(&storage.nearest_country(point, miles).await?),
    }
}

async fn city_hierarchy(storage: &GeoStorage, city_id: i64) -> Result<()> {
    let city = storage
        .city(city_id)
        .await?
        .ok_or_else(|| CitiesError::not_found(format!("city {}", city_id)))?;
    let chain: Vec<_> = hierarchy(&city)
        .into_iter()
        .map(|place| {
            json!({
                "kind": place.kind(),
                "id": place.id(),
                "name": place.name(),
                "slug": place.slug(),
            })
        })
        .collect();
    print_json(&json!({
        "url": city.absolute_url(),
        "hierarchy": chain,
    }))
}

async fn full_index(storage: &GeoStorage, level: IndexLevel) -> Result<()> {
    match level {
        IndexLevel::Region => {
            let index: BTreeMap<_, _> = storage.region_full_index(None).await?.into_iter().collect();
            print_json(&index)
        }
        IndexLevel::Subregion => {
            let index: BTreeMap<_, _> =
                storage.subregion_full_index(None).await?.into_iter().collect();
            print_json(&index)
        }
    }
}

async fn country_with_neighbours(storage: &GeoStorage, code: &str) -> Result<()> {
    let country = storage
        .country_by_code(code)
        .await?
        .ok_or_else(|| CitiesError::not_found(format!("country with code {}", code)))?;
    let neighbours = storage.neighbours(&country).await?;
    print_json(&json!({
        "country": country,
        "neighbours": neighbours,
    }))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn config_generate(output_path: Option<String>, force: bool) -> Result<()> {
    let sample = StaticConfig::generate_sample_config();

    let Some(path) = output_path else {
        print!("{}", sample);
        return Ok(());
    };

    if !force && Path::new(&path).exists() {
        return Err(CitiesError::validation(format!(
            "{} already exists, pass --force to overwrite",
            path
        )));
    }

    std::fs::write(&path, sample)
        .map_err(|e| CitiesError::validation(format!("Failed to write {}: {}", path, e)))?;
    eprintln!(
        "{} {}",
        "Configuration file generated:".green(),
        path.blue()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_generate_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cities.toml");
        std::fs::write(&path, "keep me").unwrap();
        let path = path.to_string_lossy().to_string();

        let err = config_generate(Some(path.clone()), false).unwrap_err();
        assert!(matches!(err, CitiesError::Validation(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

        config_generate(Some(path.clone()), true).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[database]"));
    }

    #[tokio::test]
    async fn test_execute_config_gen_needs_no_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.toml");

        execute(Commands::ConfigGen {
            output_path: Some(path.to_string_lossy().to_string()),
            force: false,
        })
        .await
        .unwrap();

        let parsed: StaticConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.query.search_radius_growth, 4.0);
    }
}

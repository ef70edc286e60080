//! Batched ancestor loading
//!
//! Ancestors are fetched with `IN (...)` or joined in the same statement,
//! never one row at a time. Id lists are split into chunks of
//! [`IN_CHUNK_SIZE`] to stay below the bind-parameter limits of SQLite and
//! PostgreSQL.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Select};

use super::converters::{
    model_to_city, model_to_country, model_to_district, model_to_postal_code, model_to_region,
    model_to_subregion,
};
use crate::errors::{CitiesError, Result};
use crate::places::{City, Country, District, PostalCode, Region, Subregion};
use migration::entities::{city, country, district, postal_code, region, subregion};

/// Most ids bound in a single `IN (...)`
pub const IN_CHUNK_SIZE: usize = 1000;

/// Run `query(chunk)` for every chunk of the de-duplicated `ids`
async fn fetch_chunked<E, C, F>(db: &C, ids: BTreeSet<i64>, query: F) -> Result<Vec<E::Model>>
where
    E: EntityTrait,
    C: ConnectionTrait,
    F: Fn(Vec<i64>) -> Select<E>,
{
    let ids: Vec<i64> = ids.into_iter().collect();
    let mut models = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(IN_CHUNK_SIZE) {
        models.extend(query(chunk.to_vec()).all(db).await?);
    }
    Ok(models)
}

fn missing(what: &str, id: i64, referenced_by: &str, by_id: i64) -> CitiesError {
    CitiesError::not_found(format!(
        "{} {} referenced by {} {}",
        what, id, referenced_by, by_id
    ))
}

pub async fn load_countries<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, Arc<Country>>> {
    let ids: BTreeSet<i64> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let models = fetch_chunked(db, ids, |chunk| {
        country::Entity::find().filter(country::Column::Id.is_in(chunk))
    })
    .await?;

    Ok(models
        .into_iter()
        .map(|m| (m.id, Arc::new(model_to_country(m))))
        .collect())
}

/// Turn `(region, country)` join rows into regions sharing one `Arc` per country
pub fn regions_from_joined(
    rows: Vec<(region::Model, Option<country::Model>)>,
) -> Result<Vec<Region>> {
    let mut countries: HashMap<i64, Arc<Country>> = HashMap::new();
    let mut regions = Vec::with_capacity(rows.len());

    for (model, country) in rows {
        let country = country.ok_or_else(|| missing("country", model.country_id, "region", model.id))?;
        let country = countries
            .entry(country.id)
            .or_insert_with(|| Arc::new(model_to_country(country)))
            .clone();
        regions.push(model_to_region(model, country));
    }

    Ok(regions)
}

pub async fn load_regions<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, Arc<Region>>> {
    let ids: BTreeSet<i64> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ids: Vec<i64> = ids.into_iter().collect();
    let mut rows = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(IN_CHUNK_SIZE) {
        rows.extend(
            region::Entity::find()
                .filter(region::Column::Id.is_in(chunk.to_vec()))
                .find_also_related(country::Entity)
                .all(db)
                .await?,
        );
    }

    Ok(regions_from_joined(rows)?
        .into_iter()
        .map(|r| (r.id, Arc::new(r)))
        .collect())
}

/// Turn `(subregion, region, country)` join rows into subregions sharing
/// one `Arc` per region and per country
pub fn subregions_from_joined(
    rows: Vec<(subregion::Model, Option<region::Model>, Option<country::Model>)>,
) -> Result<Vec<Subregion>> {
    let mut countries: HashMap<i64, Arc<Country>> = HashMap::new();
    let mut regions: HashMap<i64, Arc<Region>> = HashMap::new();
    let mut subregions = Vec::with_capacity(rows.len());

    for (model, region, country) in rows {
        let region =
            region.ok_or_else(|| missing("region", model.region_id, "subregion", model.id))?;
        let region = match regions.get(&region.id) {
            Some(existing) => existing.clone(),
            None => {
                let country = country
                    .ok_or_else(|| missing("country", region.country_id, "region", region.id))?;
                let country = countries
                    .entry(country.id)
                    .or_insert_with(|| Arc::new(model_to_country(country)))
                    .clone();
                let region = Arc::new(model_to_region(region, country));
                regions.insert(region.id, region.clone());
                region
            }
        };
        subregions.push(model_to_subregion(model, region));
    }

    Ok(subregions)
}

pub async fn load_subregions<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, Arc<Subregion>>> {
    let ids: BTreeSet<i64> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ids: Vec<i64> = ids.into_iter().collect();
    let mut rows = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(IN_CHUNK_SIZE) {
        rows.extend(
            subregion::Entity::find()
                .filter(subregion::Column::Id.is_in(chunk.to_vec()))
                .find_also_related(region::Entity)
                .and_also_related(country::Entity)
                .all(db)
                .await?,
        );
    }

    Ok(subregions_from_joined(rows)?
        .into_iter()
        .map(|s| (s.id, Arc::new(s)))
        .collect())
}

pub async fn hydrate_cities<C: ConnectionTrait>(
    db: &C,
    models: Vec<city::Model>,
) -> Result<Vec<City>> {
    let countries = load_countries(db, models.iter().map(|m| m.country_id)).await?;
    let regions = load_regions(db, models.iter().filter_map(|m| m.region_id)).await?;
    let subregions = load_subregions(db, models.iter().filter_map(|m| m.subregion_id)).await?;

    models
        .into_iter()
        .map(|model| {
            let country = countries
                .get(&model.country_id)
                .cloned()
                .ok_or_else(|| missing("country", model.country_id, "city", model.id))?;
            let region = match model.region_id {
                Some(id) => Some(
                    regions
                        .get(&id)
                        .cloned()
                        .ok_or_else(|| missing("region", id, "city", model.id))?,
                ),
                None => None,
            };
            let subregion = match model.subregion_id {
                Some(id) => Some(
                    subregions
                        .get(&id)
                        .cloned()
                        .ok_or_else(|| missing("subregion", id, "city", model.id))?,
                ),
                None => None,
            };
            Ok(model_to_city(model, country, region, subregion))
        })
        .collect()
}

pub async fn hydrate_districts<C: ConnectionTrait>(
    db: &C,
    models: Vec<district::Model>,
) -> Result<Vec<District>> {
    let city_ids: BTreeSet<i64> = models.iter().map(|m| m.city_id).collect();
    let cities: HashMap<i64, Arc<City>> = if city_ids.is_empty() {
        HashMap::new()
    } else {
        let city_models = fetch_chunked(db, city_ids, |chunk| {
            city::Entity::find().filter(city::Column::Id.is_in(chunk))
        })
        .await?;
        hydrate_cities(db, city_models)
            .await?
            .into_iter()
            .map(|c| (c.id, Arc::new(c)))
            .collect()
    };

    models
        .into_iter()
        .map(|model| {
            let city = cities
                .get(&model.city_id)
                .cloned()
                .ok_or_else(|| missing("city", model.city_id, "district", model.id))?;
            Ok(model_to_district(model, city))
        })
        .collect()
}

pub async fn hydrate_postal_codes<C: ConnectionTrait>(
    db: &C,
    models: Vec<postal_code::Model>,
) -> Result<Vec<PostalCode>> {
    let countries = load_countries(db, models.iter().map(|m| m.country_id)).await?;

    models
        .into_iter()
        .map(|model| {
            let country = countries
                .get(&model.country_id)
                .cloned()
                .ok_or_else(|| missing("country", model.country_id, "postal code", model.id))?;
            Ok(model_to_postal_code(model, country))
        })
        .collect()
}

//! Full-code indexes
//!
//! `full_code()` of a region needs its country and that of a subregion
//! needs region and country. The ancestors are joined into the statement
//! that fetches the base rows, so each index costs exactly one query.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, EntityTrait, Select};
use tracing::debug;

use super::loaders::{regions_from_joined, subregions_from_joined};
use crate::errors::Result;
use crate::places::{Region, Subregion};
use migration::entities::{country, region, subregion};

/// Map every region's `full_code()` (e.g. `"US.CA"`) to the region
///
/// `base` narrows the rows indexed; `None` indexes the whole table.
pub async fn region_full_index<C: ConnectionTrait>(
    db: &C,
    base: Option<Select<region::Entity>>,
) -> Result<HashMap<String, Region>> {
    let rows = base
        .unwrap_or_else(region::Entity::find)
        .find_also_related(country::Entity)
        .all(db)
        .await?;

    let index: HashMap<String, Region> = regions_from_joined(rows)?
        .into_iter()
        .map(|r| (r.full_code(), r))
        .collect();

    debug!("Built region full-code index with {} entries", index.len());
    Ok(index)
}

/// Map every subregion's `full_code()` (e.g. `"US.CA.037"`) to the subregion
pub async fn subregion_full_index<C: ConnectionTrait>(
    db: &C,
    base: Option<Select<subregion::Entity>>,
) -> Result<HashMap<String, Subregion>> {
    let rows = base
        .unwrap_or_else(subregion::Entity::find)
        .find_also_related(region::Entity)
        .and_also_related(country::Entity)
        .all(db)
        .await?;

    let index: HashMap<String, Subregion> = subregions_from_joined(rows)?
        .into_iter()
        .map(|s| (s.full_code(), s))
        .collect();

    debug!("Built subregion full-code index with {} entries", index.len());
    Ok(index)
}

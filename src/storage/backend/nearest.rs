//! Nearest-place search
//!
//! A radius search prefilters rows with a bounding box and keeps the
//! candidates whose haversine distance is within the radius. An unbounded
//! search repeats that with growing radii and falls back to a full scan
//! once the radius covers the globe, so the global nearest is always found.

use geo::Point;
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter};
use tracing::debug;

use super::locatable::{Locatable, LocationColumns};
use crate::errors::{CitiesError, Result};
use crate::spatial::{BoundingBox, covers_globe, distance_miles, validate_radius};
use migration::entities::{city, country};

/// Radii tried by an unbounded nearest search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWindow {
    initial_miles: f64,
    growth: f64,
}

impl SearchWindow {
    pub fn new(initial_miles: f64, growth: f64) -> Result<Self> {
        if !initial_miles.is_finite() || initial_miles <= 0.0 {
            return Err(CitiesError::validation(format!(
                "initial search radius must be positive, got {}",
                initial_miles
            )));
        }
        if !growth.is_finite() || growth <= 1.0 {
            return Err(CitiesError::validation(format!(
                "search radius growth must be greater than 1, got {}",
                growth
            )));
        }
        Ok(Self {
            initial_miles,
            growth,
        })
    }

    pub fn initial_miles(&self) -> f64 {
        self.initial_miles
    }

    pub fn growth(&self) -> f64 {
        self.growth
    }

    /// Radii below the globe-covering distance, in increasing order
    fn radii(&self) -> impl Iterator<Item = f64> {
        let growth = self.growth;
        std::iter::successors(Some(self.initial_miles), move |r| Some(r * growth))
            .take_while(|r| !covers_globe(*r))
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            initial_miles: 25.0,
            growth: 4.0,
        }
    }
}

/// Find the row of `E` nearest to `point`
///
/// With `range_in_miles`, only rows within that distance qualify and `None`
/// means nothing is in range. Without it the closest row overall is
/// returned, or `None` when the table is empty.
///
/// # Errors
/// * `FieldError` - a range was given but `E` has no location field
/// * `TypeMismatch` - `E` cannot be ordered by distance at all
pub async fn nearest_to<E, C>(
    db: &C,
    point: Point<f64>,
    range_in_miles: Option<f64>,
) -> Result<Option<E::Model>>
where
    E: Locatable,
    C: ConnectionTrait,
{
    nearest_to_in_window::<E, C>(db, point, range_in_miles, SearchWindow::default()).await
}

pub async fn nearest_to_in_window<E, C>(
    db: &C,
    point: Point<f64>,
    range_in_miles: Option<f64>,
    window: SearchWindow,
) -> Result<Option<E::Model>>
where
    E: Locatable,
    C: ConnectionTrait,
{
    let table = E::default().table_name();

    if let Some(miles) = range_in_miles {
        validate_radius(miles)?;

        let Some(columns) = E::location_columns() else {
            let msg = format!(
                "Specifying a range_in_miles requires {} to have a location field to search by. \
                 Implement a meaningful nearest lookup for it if you need this feature.",
                table
            );
            debug!("{}", msg);
            return Err(CitiesError::field_error(msg));
        };

        let found = search_within::<E, C>(db, columns, point, miles).await?;
        if found.is_none() {
            debug!(
                "No {} candidates near to {:?}. Max mileage was {}.",
                table, point, miles
            );
        }
        return Ok(found);
    }

    let Some(columns) = E::location_columns() else {
        let msg = format!("{} doesn't appear to be compatible with a distance call", table);
        debug!("{}", msg);
        return Err(CitiesError::type_mismatch(msg));
    };

    for miles in window.radii() {
        if let Some(found) = search_within::<E, C>(db, columns, point, miles).await? {
            return Ok(Some(found));
        }
        debug!("No {} within {} miles of {:?}, widening", table, miles, point);
    }

    let candidates = E::find().all(db).await?;
    let found = closest::<E>(candidates, point, None);
    if found.is_none() {
        debug!(
            "No {} candidates near to {:?}. Max mileage was not considered.",
            table, point
        );
    }
    Ok(found)
}

/// Country has no location: resolve the nearest city and return its country
pub async fn nearest_country<C>(
    db: &C,
    point: Point<f64>,
    range_in_miles: Option<f64>,
    window: SearchWindow,
) -> Result<Option<country::Model>>
where
    C: ConnectionTrait,
{
    let Some(city) =
        nearest_to_in_window::<city::Entity, C>(db, point, range_in_miles, window).await?
    else {
        return Ok(None);
    };

    let country = country::Entity::find_by_id(city.country_id).one(db).await?;
    match country {
        Some(country) => Ok(Some(country)),
        None => Err(CitiesError::not_found(format!(
            "country {} referenced by city {}",
            city.country_id, city.id
        ))),
    }
}

async fn search_within<E, C>(
    db: &C,
    columns: LocationColumns<E::Column>,
    point: Point<f64>,
    miles: f64,
) -> Result<Option<E::Model>>
where
    E: Locatable,
    C: ConnectionTrait,
{
    let bbox = BoundingBox::around(point, miles);
    let candidates = E::find().filter(columns.within(&bbox)).all(db).await?;
    Ok(closest::<E>(candidates, point, Some(miles)))
}

/// Closest candidate to `point`, ties broken by lowest id
///
/// Only called for entities with location columns, so every candidate has
/// a location.
fn closest<E: Locatable>(
    candidates: Vec<E::Model>,
    point: Point<f64>,
    limit_miles: Option<f64>,
) -> Option<E::Model> {
    let mut best: Option<(f64, i64, E::Model)> = None;

    let located = candidates
        .into_iter()
        .filter_map(|model| E::location(&model).map(|location| (location, model)));

    for (location, model) in located {
        let distance = distance_miles(point, location);
        if limit_miles.is_some_and(|limit| distance > limit) {
            continue;
        }

        let id = E::row_id(&model);
        let is_better = match &best {
            None => true,
            Some((best_distance, best_id, _)) => {
                distance < *best_distance || (distance == *best_distance && id < *best_id)
            }
        };
        if is_better {
            best = Some((distance, id, model));
        }
    }

    best.map(|(_, _, model)| model)
}

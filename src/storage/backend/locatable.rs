//! Spatial capability of place entities
//!
//! Country, region and subregion rows carry no location of their own.

use geo::Point;
use sea_orm::{ColumnTrait, Condition, EntityTrait};

use crate::spatial::{BoundingBox, Coordinates, LongitudeSpan};
use migration::entities::{city, country, district, postal_code, region, subregion};

/// Latitude/longitude column pair of an entity
#[derive(Debug, Clone, Copy)]
pub struct LocationColumns<C> {
    pub latitude: C,
    pub longitude: C,
}

impl<C: ColumnTrait> LocationColumns<C> {
    /// SQL prefilter selecting rows inside `bbox`
    pub fn within(&self, bbox: &BoundingBox) -> Condition {
        let condition =
            Condition::all().add(self.latitude.between(bbox.min_lat, bbox.max_lat));

        match bbox.longitude {
            LongitudeSpan::All => condition,
            LongitudeSpan::Range { min, max } => condition.add(self.longitude.between(min, max)),
            LongitudeSpan::Split { west, east } => condition.add(
                Condition::any()
                    .add(self.longitude.between(west.0, west.1))
                    .add(self.longitude.between(east.0, east.1)),
            ),
        }
    }
}

pub trait Locatable: EntityTrait {
    /// `None` when the entity has no location field
    fn location_columns() -> Option<LocationColumns<Self::Column>>;

    fn location(model: &Self::Model) -> Option<Point<f64>>;

    /// Primary key, used to break distance ties
    fn row_id(model: &Self::Model) -> i64;
}

impl Locatable for city::Entity {
    fn location_columns() -> Option<LocationColumns<Self::Column>> {
        Some(LocationColumns {
            latitude: city::Column::Latitude,
            longitude: city::Column::Longitude,
        })
    }

    fn location(model: &city::Model) -> Option<Point<f64>> {
        Some(Coordinates::new(model.latitude, model.longitude).point())
    }

    fn row_id(model: &city::Model) -> i64 {
        model.id
    }
}

impl Locatable for district::Entity {
    fn location_columns() -> Option<LocationColumns<Self::Column>> {
        Some(LocationColumns {
            latitude: district::Column::Latitude,
            longitude: district::Column::Longitude,
        })
    }

    fn location(model: &district::Model) -> Option<Point<f64>> {
        Some(Coordinates::new(model.latitude, model.longitude).point())
    }

    fn row_id(model: &district::Model) -> i64 {
        model.id
    }
}

impl Locatable for postal_code::Entity {
    fn location_columns() -> Option<LocationColumns<Self::Column>> {
        Some(LocationColumns {
            latitude: postal_code::Column::Latitude,
            longitude: postal_code::Column::Longitude,
        })
    }

    fn location(model: &postal_code::Model) -> Option<Point<f64>> {
        Some(Coordinates::new(model.latitude, model.longitude).point())
    }

    fn row_id(model: &postal_code::Model) -> i64 {
        model.id
    }
}

impl Locatable for country::Entity {
    fn location_columns() -> Option<LocationColumns<Self::Column>> {
        None
    }

    fn location(_: &country::Model) -> Option<Point<f64>> {
        None
    }

    fn row_id(model: &country::Model) -> i64 {
        model.id
    }
}

impl Locatable for region::Entity {
    fn location_columns() -> Option<LocationColumns<Self::Column>> {
        None
    }

    fn location(_: &region::Model) -> Option<Point<f64>> {
        None
    }

    fn row_id(model: &region::Model) -> i64 {
        model.id
    }
}

impl Locatable for subregion::Entity {
    fn location_columns() -> Option<LocationColumns<Self::Column>> {
        None
    }

    fn location(_: &subregion::Model) -> Option<Point<f64>> {
        None
    }

    fn row_id(model: &subregion::Model) -> i64 {
        model.id
    }
}

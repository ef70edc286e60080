//! Read operations for GeoStorage
//!
//! Every lookup returns places with their ancestors already attached.

use std::collections::{BTreeSet, HashMap};

use geo::Point;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};
use tracing::debug;

use super::converters::{model_to_alternative_name, model_to_country};
use super::full_index;
use super::loaders::{
    hydrate_cities, hydrate_districts, hydrate_postal_codes, load_regions, load_subregions,
};
use super::nearest::{nearest_country, nearest_to_in_window};
use super::GeoStorage;
use crate::errors::Result;
use crate::places::{
    AlternativeName, City, Country, District, Place, PlaceKind, PostalCode, Region, Subregion,
};
use migration::entities::{
    alternative_name, city, country, country_neighbour, district, place_alternative_name,
    postal_code, region, subregion,
};

impl GeoStorage {
    pub async fn country(&self, id: i64) -> Result<Option<Country>> {
        let model = country::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_country))
    }

    /// Look up by ISO alpha-2 or alpha-3 code, case-insensitive
    pub async fn country_by_code(&self, code: &str) -> Result<Option<Country>> {
        let code = code.trim().to_uppercase();
        let column = if code.len() == 3 {
            country::Column::Code3
        } else {
            country::Column::Code
        };

        let model = country::Entity::find()
            .filter(column.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_country))
    }

    /// All countries ordered by name
    pub async fn countries(&self) -> Result<Vec<Country>> {
        let models = country::Entity::find()
            .order_by_asc(country::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_country).collect())
    }

    pub async fn region(&self, id: i64) -> Result<Option<Region>> {
        let mut regions = load_regions(&self.db, [id]).await?;
        Ok(regions.remove(&id).map(|r| (*r).clone()))
    }

    pub async fn subregion(&self, id: i64) -> Result<Option<Subregion>> {
        let mut subregions = load_subregions(&self.db, [id]).await?;
        Ok(subregions.remove(&id).map(|s| (*s).clone()))
    }

    pub async fn city(&self, id: i64) -> Result<Option<City>> {
        let Some(model) = city::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(hydrate_cities(&self.db, vec![model]).await?.pop())
    }

    pub async fn district(&self, id: i64) -> Result<Option<District>> {
        let Some(model) = district::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(hydrate_districts(&self.db, vec![model]).await?.pop())
    }

    pub async fn postal_code(&self, id: i64) -> Result<Option<PostalCode>> {
        let Some(model) = postal_code::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(hydrate_postal_codes(&self.db, vec![model]).await?.pop())
    }

    /// Cities matching `query`, ancestors loaded in a fixed number of queries
    pub async fn cities(&self, query: Select<city::Entity>) -> Result<Vec<City>> {
        let models = query.all(&self.db).await?;
        hydrate_cities(&self.db, models).await
    }

    pub async fn nearest_city(&self, point: Point<f64>, range_in_miles: Option<f64>) -> Result<Option<City>> {
        let model = nearest_to_in_window::<city::Entity, _>(
            &self.db,
            point,
            range_in_miles,
            self.search_window,
        )
        .await?;
        match model {
            Some(model) => Ok(hydrate_cities(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn nearest_district(
        &self,
        point: Point<f64>,
        range_in_miles: Option<f64>,
    ) -> Result<Option<District>> {
        let model = nearest_to_in_window::<district::Entity, _>(
            &self.db,
            point,
            range_in_miles,
            self.search_window,
        )
        .await?;
        match model {
            Some(model) => Ok(hydrate_districts(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn nearest_postal_code(
        &self,
        point: Point<f64>,
        range_in_miles: Option<f64>,
    ) -> Result<Option<PostalCode>> {
        let model = nearest_to_in_window::<postal_code::Entity, _>(
            &self.db,
            point,
            range_in_miles,
            self.search_window,
        )
        .await?;
        match model {
            Some(model) => Ok(hydrate_postal_codes(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Country of the nearest city
    pub async fn nearest_country(
        &self,
        point: Point<f64>,
        range_in_miles: Option<f64>,
    ) -> Result<Option<Country>> {
        let model = nearest_country(&self.db, point, range_in_miles, self.search_window).await?;
        Ok(model.map(model_to_country))
    }

    pub async fn region_full_index(
        &self,
        base: Option<Select<region::Entity>>,
    ) -> Result<HashMap<String, Region>> {
        full_index::region_full_index(&self.db, base).await
    }

    pub async fn subregion_full_index(
        &self,
        base: Option<Select<subregion::Entity>>,
    ) -> Result<HashMap<String, Subregion>> {
        full_index::subregion_full_index(&self.db, base).await
    }

    /// Alternative names attached to `place`
    pub async fn alternative_names(&self, place: &dyn Place) -> Result<Vec<AlternativeName>> {
        self.alternative_names_for(place.kind(), place.id()).await
    }

    pub async fn alternative_names_for(
        &self,
        kind: PlaceKind,
        place_id: i64,
    ) -> Result<Vec<AlternativeName>> {
        let models = alternative_name::Entity::find()
            .inner_join(place_alternative_name::Entity)
            .filter(place_alternative_name::Column::PlaceKind.eq(kind.as_ref()))
            .filter(place_alternative_name::Column::PlaceId.eq(place_id))
            .order_by_asc(alternative_name::Column::Id)
            .all(&self.db)
            .await?;

        debug!(
            "Loaded {} alternative names for {} {}",
            models.len(),
            kind,
            place_id
        );
        Ok(models.into_iter().map(model_to_alternative_name).collect())
    }

    /// Countries sharing a border with `country`, ordered by name
    ///
    /// The relation is symmetric: a row in either direction counts.
    pub async fn neighbours(&self, country: &Country) -> Result<Vec<Country>> {
        let pairs: Vec<(i64, i64)> = country_neighbour::Entity::find()
            .select_only()
            .column(country_neighbour::Column::CountryId)
            .column(country_neighbour::Column::NeighbourId)
            .filter(
                Condition::any()
                    .add(country_neighbour::Column::CountryId.eq(country.id))
                    .add(country_neighbour::Column::NeighbourId.eq(country.id)),
            )
            .into_tuple()
            .all(&self.db)
            .await?;

        let ids: BTreeSet<i64> = pairs
            .into_iter()
            .map(|(a, b)| if a == country.id { b } else { a })
            .filter(|id| *id != country.id)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = country::Entity::find()
            .filter(country::Column::Id.is_in(ids))
            .order_by_asc(country::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_country).collect())
    }
}

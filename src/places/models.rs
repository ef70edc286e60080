use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::{Place, PlaceKind};
use crate::spatial::Coordinates;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub code: String,
    pub code3: String,
    pub population: i64,
    pub area: Option<i64>,
    pub currency: Option<String>,
    pub currency_name: Option<String>,
    pub languages: Option<String>,
    pub phone: String,
    pub continent: String,
    pub tld: String,
    pub capital: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub name_std: String,
    pub code: String,
    pub country: Arc<Country>,
}

impl Region {
    /// `country.code + "." + region.code`
    pub fn full_code(&self) -> String {
        format!("{}.{}", self.country.code, self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subregion {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub name_std: String,
    pub code: String,
    pub region: Arc<Region>,
}

impl Subregion {
    /// `country.code + "." + region.code + "." + subregion.code`
    pub fn full_code(&self) -> String {
        format!("{}.{}", self.region.full_code(), self.code)
    }
}

/// A populated place
///
/// Its parent in the hierarchy is the region. `subregion` and `country` are
/// kept alongside because the region chain may be incomplete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub name_std: String,
    pub location: Coordinates,
    pub population: i64,
    pub elevation: Option<i32>,
    /// GeoNames feature code
    pub kind: String,
    pub timezone: String,
    pub country: Arc<Country>,
    pub region: Option<Arc<Region>>,
    pub subregion: Option<Arc<Subregion>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct District {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub name_std: String,
    pub location: Coordinates,
    pub population: i64,
    pub city: Arc<City>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostalCode {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub code: String,
    pub location: Coordinates,
    pub region_name: String,
    pub subregion_name: String,
    pub district_name: String,
    pub country: Arc<Country>,
}

impl PostalCode {
    /// Non-empty names, root first
    pub fn names(&self) -> Vec<String> {
        [
            self.country.to_string(),
            self.region_name.clone(),
            self.subregion_name.clone(),
            self.district_name.clone(),
            self.name.clone(),
        ]
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect()
    }

    /// Names most specific first, e.g. `"Mitte, Berlin, Germany"`
    pub fn name_full(&self) -> String {
        let mut names = self.names();
        names.reverse();
        names.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeName {
    pub id: i64,
    pub name: String,
    pub language: String,
    pub is_preferred: bool,
    pub is_short: bool,
    pub is_colloquial: bool,
}

impl fmt::Display for AlternativeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.language)
    }
}

macro_rules! display_name {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.name)
                }
            }
        )+
    };
}

display_name!(Country, Region, Subregion, City, District);

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl Place for Country {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> PlaceKind {
        PlaceKind::Country
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn parent(&self) -> Option<&dyn Place> {
        None
    }
}

impl Place for Region {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> PlaceKind {
        PlaceKind::Region
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn parent(&self) -> Option<&dyn Place> {
        Some(self.country.as_ref())
    }
}

impl Place for Subregion {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> PlaceKind {
        PlaceKind::Subregion
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn parent(&self) -> Option<&dyn Place> {
        Some(self.region.as_ref())
    }
}

impl Place for City {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> PlaceKind {
        PlaceKind::City
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn parent(&self) -> Option<&dyn Place> {
        self.region.as_deref().map(|r| r as &dyn Place)
    }
}

impl Place for District {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> PlaceKind {
        PlaceKind::District
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn parent(&self) -> Option<&dyn Place> {
        Some(self.city.as_ref())
    }
}

impl Place for PostalCode {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> PlaceKind {
        PlaceKind::PostalCode
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn parent(&self) -> Option<&dyn Place> {
        Some(self.country.as_ref())
    }
}

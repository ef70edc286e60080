//! Place hierarchy
//!
//! Every geographic entity (country down to district and postal code)
//! implements [`Place`]. Ancestors are held eagerly, so walking a
//! hierarchy never touches the database.

mod models;

pub use models::{AlternativeName, City, Country, District, PostalCode, Region, Subregion};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Discriminates place tables, e.g. in the alternative-names join table
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlaceKind {
    Country,
    Region,
    Subregion,
    City,
    District,
    PostalCode,
}

/// Shared capability of every place in the hierarchy
pub trait Place: std::fmt::Display {
    fn id(&self) -> i64;

    fn kind(&self) -> PlaceKind;

    /// ASCII name
    fn name(&self) -> &str;

    fn slug(&self) -> &str;

    /// `None` for the root of a chain
    fn parent(&self) -> Option<&dyn Place>;

    /// Ancestors root first, ending with `self`
    fn hierarchy(&self) -> Vec<&dyn Place>
    where
        Self: Sized,
    {
        hierarchy(self)
    }

    /// Slugs of [`Place::hierarchy`] joined with `/`
    fn absolute_url(&self) -> String
    where
        Self: Sized,
    {
        absolute_url(self)
    }
}

/// Root-first ancestor chain of `place`, `place` included
///
/// The schema is at most five levels deep, so the walk is bounded.
pub fn hierarchy(place: &dyn Place) -> Vec<&dyn Place> {
    let mut chain = vec![place];
    let mut current = place;
    while let Some(parent) = current.parent() {
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

pub fn absolute_url(place: &dyn Place) -> String {
    hierarchy(place)
        .iter()
        .map(|p| p.slug())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_place_kind_round_trips_through_str() {
        for kind in PlaceKind::iter() {
            assert_eq!(PlaceKind::from_str(kind.as_ref()).unwrap(), kind);
        }
        assert_eq!(PlaceKind::PostalCode.as_ref(), "postal_code");
    }
}

use std::sync::Arc;

use crate::places::{AlternativeName, City, Country, District, PostalCode, Region, Subregion};
use crate::spatial::Coordinates;
use migration::entities::{
    alternative_name, city, country, district, postal_code, region, subregion,
};

pub fn model_to_country(model: country::Model) -> Country {
    Country {
        id: model.id,
        name: model.name,
        slug: model.slug,
        code: model.code,
        code3: model.code3,
        population: model.population,
        area: model.area,
        currency: model.currency,
        currency_name: model.currency_name,
        languages: model.languages,
        phone: model.phone,
        continent: model.continent,
        tld: model.tld,
        capital: model.capital,
    }
}

pub fn model_to_region(model: region::Model, country: Arc<Country>) -> Region {
    Region {
        id: model.id,
        name: model.name,
        slug: model.slug,
        name_std: model.name_std,
        code: model.code,
        country,
    }
}

pub fn model_to_subregion(model: subregion::Model, region: Arc<Region>) -> Subregion {
    Subregion {
        id: model.id,
        name: model.name,
        slug: model.slug,
        name_std: model.name_std,
        code: model.code,
        region,
    }
}

pub fn model_to_city(
    model: city::Model,
    country: Arc<Country>,
    region: Option<Arc<Region>>,
    subregion: Option<Arc<Subregion>>,
) -> City {
    City {
        id: model.id,
        name: model.name,
        slug: model.slug,
        name_std: model.name_std,
        location: Coordinates::new(model.latitude, model.longitude),
        population: model.population,
        elevation: model.elevation,
        kind: model.kind,
        timezone: model.timezone,
        country,
        region,
        subregion,
    }
}

pub fn model_to_district(model: district::Model, city: Arc<City>) -> District {
    District {
        id: model.id,
        name: model.name,
        slug: model.slug,
        name_std: model.name_std,
        location: Coordinates::new(model.latitude, model.longitude),
        population: model.population,
        city,
    }
}

pub fn model_to_postal_code(model: postal_code::Model, country: Arc<Country>) -> PostalCode {
    PostalCode {
        id: model.id,
        name: model.name,
        slug: model.slug,
        code: model.code,
        location: Coordinates::new(model.latitude, model.longitude),
        region_name: model.region_name,
        subregion_name: model.subregion_name,
        district_name: model.district_name,
        country,
    }
}

pub fn model_to_alternative_name(model: alternative_name::Model) -> AlternativeName {
    AlternativeName {
        id: model.id,
        name: model.name,
        language: model.language,
        is_preferred: model.is_preferred,
        is_short: model.is_short,
        is_colloquial: model.is_colloquial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country_model() -> country::Model {
        country::Model {
            id: 3,
            name: "France".to_string(),
            slug: "france".to_string(),
            code: "FR".to_string(),
            code3: "FRA".to_string(),
            population: 67_000_000,
            area: None,
            currency: Some("EUR".to_string()),
            currency_name: None,
            languages: None,
            phone: "33".to_string(),
            continent: "EU".to_string(),
            tld: ".fr".to_string(),
            capital: "Paris".to_string(),
        }
    }

    #[test]
    fn test_model_to_country_keeps_optional_fields() {
        let country = model_to_country(country_model());
        assert_eq!(country.code, "FR");
        assert!(country.area.is_none());
        assert_eq!(country.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_model_to_postal_code_attaches_country() {
        let country = Arc::new(model_to_country(country_model()));
        let postal = model_to_postal_code(
            postal_code::Model {
                id: 1,
                name: "Paris 01".to_string(),
                slug: "75001".to_string(),
                code: "75001".to_string(),
                latitude: 48.86,
                longitude: 2.34,
                country_id: 3,
                region_name: "Île-de-France".to_string(),
                subregion_name: "Paris".to_string(),
                district_name: String::new(),
            },
            country.clone(),
        );
        assert_eq!(postal.location, Coordinates::new(48.86, 2.34));
        assert!(Arc::ptr_eq(&postal.country, &country));
    }
}

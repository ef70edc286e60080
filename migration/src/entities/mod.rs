pub mod alternative_name;
pub mod city;
pub mod country;
pub mod country_neighbour;
pub mod district;
pub mod place_alternative_name;
pub mod postal_code;
pub mod region;
pub mod subregion;

pub use alternative_name::Entity as AlternativeNameEntity;
pub use city::Entity as CityEntity;
pub use country::Entity as CountryEntity;
pub use country_neighbour::Entity as CountryNeighbourEntity;
pub use district::Entity as DistrictEntity;
pub use place_alternative_name::Entity as PlaceAlternativeNameEntity;
pub use postal_code::Entity as PostalCodeEntity;
pub use region::Entity as RegionEntity;
pub use subregion::Entity as SubregionEntity;

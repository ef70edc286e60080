use std::sync::Arc;

use crate::errors::Result;

pub mod backend;

pub use backend::{
    GeoStorage, Locatable, LocationColumns, SearchWindow, nearest_country, nearest_to,
    nearest_to_in_window, region_full_index, subregion_full_index,
};

pub struct StorageFactory;

impl StorageFactory {
    /// Connect using the global configuration and run migrations
    pub async fn create() -> Result<Arc<GeoStorage>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = GeoStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}

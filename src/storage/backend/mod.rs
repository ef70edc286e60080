//! SeaORM storage backend
//!
//! Read-side access to the place tables on SQLite, MySQL/MariaDB or
//! PostgreSQL: hydrated lookups, nearest-place search and full-code indexes.

mod connection;
mod converters;
mod full_index;
mod loaders;
mod locatable;
mod nearest;
mod query;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::errors::{CitiesError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use full_index::{region_full_index, subregion_full_index};
pub use loaders::IN_CHUNK_SIZE;
pub use locatable::{Locatable, LocationColumns};
pub use nearest::{SearchWindow, nearest_country, nearest_to, nearest_to_in_window};

/// Infer the database kind from its URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(CitiesError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        other => other.to_string(),
    }
}

/// SeaORM-based place storage
#[derive(Clone)]
pub struct GeoStorage {
    db: DatabaseConnection,
    backend_name: String,
    search_window: SearchWindow,
}

impl GeoStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(CitiesError::database_config("DATABASE_URL is not set"));
        }

        let backend_name = normalize_backend_name(backend_name);
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name).await?
        };

        run_migrations(&db).await?;

        let storage = Self::from_connection(db, &backend_name);
        info!("{} place storage initialized", backend_name.to_uppercase());
        Ok(storage)
    }

    /// Wrap an already migrated connection
    pub fn from_connection(db: DatabaseConnection, backend_name: &str) -> Self {
        let query = &crate::config::get_config().query;
        let search_window =
            SearchWindow::new(query.initial_search_radius_miles, query.search_radius_growth)
                .unwrap_or_else(|e| {
                    warn!("Invalid [query] search window, using defaults: {}", e);
                    SearchWindow::default()
                });

        Self {
            db,
            backend_name: backend_name.to_string(),
            search_window,
        }
    }

    pub fn with_search_window(mut self, search_window: SearchWindow) -> Self {
        self.search_window = search_window;
        self
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn search_window(&self) -> SearchWindow {
        self.search_window
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

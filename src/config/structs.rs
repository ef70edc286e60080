use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "cities.toml";

/// Static configuration loaded once at startup
///
/// - database: connection settings
/// - logging: tracing output
/// - query: nearest-place search tuning
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

impl StaticConfig {
    /// Load from a TOML file and environment variables
    ///
    /// Priority: ENV > TOML file > defaults.
    /// ENV prefix `CITIES`, separator `__`, e.g. `CITIES__DATABASE__DATABASE_URL=cities.db`
    pub fn load(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("CITIES")
                    .separator("__")
                    .try_parsing(true),
            );

        // Logging is not up yet, so report on stderr
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// Render the defaults as a sample TOML file
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// Connect/acquire timeout in seconds
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// Nearest-place search tuning
///
/// An unbounded nearest lookup starts with a bounding box of
/// `initial_search_radius_miles` and multiplies it by `search_radius_growth`
/// until a candidate is found or the whole globe is covered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_initial_search_radius_miles")]
    pub initial_search_radius_miles: f64,
    #[serde(default = "default_search_radius_growth")]
    pub search_radius_growth: f64,
}

fn default_database_url() -> String {
    "sqlite://cities.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_initial_search_radius_miles() -> f64 {
    25.0
}

fn default_search_radius_growth() -> f64 {
    4.0
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            initial_search_radius_miles: default_initial_search_radius_miles(),
            search_radius_growth: default_search_radius_growth(),
        }
    }
}

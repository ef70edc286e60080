//! Command-line interface definitions using clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::places::PlaceKind;

/// Geographic reference data lookups
#[derive(Parser)]
#[command(name = "cities")]
#[command(version)]
#[command(about = "Countries, regions, cities and postal codes with nearest-place lookups", long_about = None)]
pub struct Cli {
    /// Configuration file (default: cities.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or upgrade the database schema
    Migrate,

    /// Find the place closest to a coordinate
    Nearest {
        #[arg(long, value_enum, default_value = "city")]
        kind: NearestKind,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Only consider places within this many miles
        #[arg(long)]
        miles: Option<f64>,
    },

    /// Print a city's ancestor chain, root first
    Hierarchy {
        #[arg(long)]
        city: i64,
    },

    /// Build a full-code index
    FullIndex {
        #[arg(value_enum)]
        level: IndexLevel,
    },

    /// Look up a country by ISO code, with its neighbours
    Country {
        /// Two- or three-letter ISO code
        #[arg(long)]
        code: String,
    },

    /// List the alternative names of a place
    AltNames {
        /// Place kind (country, region, subregion, city, district, postal_code)
        #[arg(long)]
        kind: PlaceKind,

        #[arg(long)]
        id: i64,
    },

    /// Generate example configuration file
    ConfigGen {
        /// Output path (default: stdout)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NearestKind {
    City,
    District,
    PostalCode,
    Country,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IndexLevel {
    Region,
    Subregion,
}

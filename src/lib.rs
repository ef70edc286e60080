//! Cities - geographic reference data on SeaORM
//!
//! Countries, regions, subregions, cities, districts and postal codes with
//! their alternative names, plus the queries built on top of them.
//!
//! # Architecture
//! - `places`: Domain types and the `Place` hierarchy capability
//! - `spatial`: Haversine distances and bounding boxes
//! - `storage`: Database access, nearest-place search and full-code indexes
//! - `config`: Configuration management
//! - `system`: Logging setup
//! - `cli` / `commands`: The `cities` command-line tool

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod places;
pub mod spatial;
pub mod storage;
pub mod system;

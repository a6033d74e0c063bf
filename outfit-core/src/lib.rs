//! Core library for the `outfit` CLI.
//!
//! This crate defines:
//! - Weather classification from upstream forecast data
//! - Catalog normalization
//! - The recommendation engine (filtering + per-category sampling)
//! - User configuration
//!
//! It performs no I/O besides reading and writing its own config file; callers
//! hand in already-parsed forecast and catalog values.

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod recommend;
pub mod weather;

pub use catalog::{RawCatalog, RawOutfitItem, normalize, normalize_or_empty};
pub use config::Config;
pub use error::{CatalogError, RecommendError, WeatherError};
pub use model::{Category, ConditionSummary, ForecastCondition, OutfitItem, OutfitSelection, Tolerance};
pub use recommend::{GenreFilter, recommend};
pub use weather::{ForecastDocument, RawForecast, classify, classify_or_none};

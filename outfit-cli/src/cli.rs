use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use outfit_core::{
    ConditionSummary, Config, ForecastDocument, OutfitItem, RawCatalog, RawForecast,
    classify_or_none, normalize_or_empty, recommend,
};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::Value;
use tracing::{info, warn};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "outfit", version, about = "Weather-aware outfit recommendations")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default catalog file and preferred genres.
    Configure,

    /// Print the condition summary for a forecast file.
    Classify {
        /// Forecast period, forecast series or full forecast document (JSON).
        weather: PathBuf,

        /// Reference time (RFC 3339); if absent, means "now".
        #[arg(long)]
        time: Option<String>,
    },

    /// Recommend an outfit for a forecast file.
    Recommend {
        /// Forecast period, forecast series or full forecast document (JSON).
        weather: PathBuf,

        /// Outfit catalog (JSON); falls back to the configured catalog.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Preferred genre; repeat or comma-separate for several.
        #[arg(short, long = "genre", value_delimiter = ',')]
        genres: Vec<String>,

        /// Reference time (RFC 3339); if absent, means "now".
        #[arg(long)]
        time: Option<String>,

        /// Seed for reproducible picks.
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Classify { weather, time } => {
                let time = time.unwrap_or_else(now);
                let summary = condition_from_file(&weather, &time)?;
                print_json(&summary.map_or_else(|| Value::Object(Default::default()), to_value))
            }
            Command::Recommend { weather, catalog, genres, time, seed } => {
                let config = Config::load()?;
                let catalog = config.resolve_catalog_path(catalog)?;
                let genres = config.resolve_genres(&genres);
                let time = time.unwrap_or_else(now);

                let output = recommend_from_files(&weather, &catalog, &genres, &time, seed)?;
                print_json(&output)
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let current_catalog =
        config.catalog_path.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
    let catalog = inquire::Text::new("Catalog file:")
        .with_default(&current_catalog)
        .with_help_message("JSON file with an `outfits` list")
        .prompt()
        .context("Failed to read catalog path")?;

    let current_genres = config.default_genres.join(", ");
    let genres = inquire::Text::new("Preferred genres (comma-separated, blank for any):")
        .with_default(&current_genres)
        .prompt()
        .context("Failed to read genres")?;

    if !catalog.trim().is_empty() {
        config.set_catalog_path(catalog.trim());
    }
    config.set_default_genres(genres.split(','));
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Run the whole pipeline and render either the outfit or the sentinel object.
pub fn recommend_from_files(
    weather: &Path,
    catalog: &Path,
    genres: &[String],
    time: &str,
    seed: Option<u64>,
) -> Result<Value> {
    let condition = condition_from_file(weather, time)?;
    let items = catalog_from_file(catalog)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let genres = (!genres.is_empty()).then_some(genres);
    let output = match recommend(condition.as_ref(), &items, genres, &mut rng) {
        Ok(outfit) => {
            info!(items = outfit.len(), "recommended outfit");
            to_value(&outfit)
        }
        Err(err) => err.to_json(),
    };

    Ok(output)
}

/// Classify a forecast file. Unreadable files and invalid JSON are errors;
/// contents of the wrong shape or that cannot be classified are `None`.
pub fn condition_from_file(path: &Path, time: &str) -> Result<Option<ConditionSummary>> {
    let value = read_json(path)?;

    if value.get("properties").is_some() {
        let document = match serde_json::from_value::<ForecastDocument>(value) {
            Ok(document) => document,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "could not process forecast document");
                return Ok(None);
            }
        };
        return Ok(match document.current_period(time) {
            Ok(period) => classify_or_none(&RawForecast::Period(period.clone()), time),
            Err(err) => {
                warn!(error = %err, "could not pick a forecast period");
                None
            }
        });
    }

    match RawForecast::from_value(value) {
        Ok(forecast) => Ok(classify_or_none(&forecast, time)),
        Err(err) => {
            warn!(error = %err, path = %path.display(), "could not process weather data");
            Ok(None)
        }
    }
}

/// Load and normalize a catalog file. Contents that do not fit the catalog
/// shape give an empty catalog.
pub fn catalog_from_file(path: &Path) -> Result<Vec<OutfitItem>> {
    let value = read_json(path)?;

    match serde_json::from_value::<RawCatalog>(value) {
        Ok(raw) => Ok(normalize_or_empty(raw)),
        Err(err) => {
            warn!(error = %err, path = %path.display(), "could not process outfits data");
            Ok(Vec::new())
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

fn to_value<T: serde::Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
    println!("{text}");
    Ok(())
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

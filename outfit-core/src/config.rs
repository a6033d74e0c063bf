use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// User defaults stored on disk.
///
/// Example TOML:
/// catalog_path = "/home/me/outfits.json"
/// default_genres = ["casual", "streetwear"]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Catalog used when `recommend` is not given one.
    pub catalog_path: Option<PathBuf>,

    /// Genres used when none are given on the command line.
    #[serde(default)]
    pub default_genres: Vec<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "outfit-recommender", "outfit-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_catalog_path(&mut self, path: impl Into<PathBuf>) {
        self.catalog_path = Some(path.into());
    }

    /// Store genres trimmed, lower-cased and without blanks or repeats.
    pub fn set_default_genres<I, S>(&mut self, genres: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.default_genres.clear();
        for genre in genres {
            let genre = genre.as_ref().trim().to_lowercase();
            if !genre.is_empty() && !self.default_genres.contains(&genre) {
                self.default_genres.push(genre);
            }
        }
    }

    /// Genres from the command line win when any were given.
    pub fn resolve_genres(&self, cli: &[String]) -> Vec<String> {
        if cli.is_empty() { self.default_genres.clone() } else { cli.to_vec() }
    }

    pub fn resolve_catalog_path(&self, cli: Option<PathBuf>) -> Result<PathBuf> {
        cli.or_else(|| self.catalog_path.clone()).ok_or_else(|| {
            anyhow!(
                "No catalog file given and none configured.\n\
                 Hint: pass `--catalog <FILE>` or run `outfit configure` first."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_path_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.resolve_catalog_path(None).unwrap_err();

        assert!(err.to_string().contains("No catalog file given"));
        assert!(err.to_string().contains("outfit configure"));
    }

    #[test]
    fn cli_catalog_path_overrides_configured() {
        let mut cfg = Config::default();
        cfg.set_catalog_path("/srv/outfits.json");

        assert_eq!(cfg.resolve_catalog_path(None).unwrap(), PathBuf::from("/srv/outfits.json"));
        assert_eq!(
            cfg.resolve_catalog_path(Some(PathBuf::from("mine.json"))).unwrap(),
            PathBuf::from("mine.json")
        );
    }

    #[test]
    fn default_genres_are_cleaned() {
        let mut cfg = Config::default();
        cfg.set_default_genres([" Casual", "", "casual", "Formal "]);

        assert_eq!(cfg.default_genres, vec!["casual", "formal"]);
    }

    #[test]
    fn cli_genres_override_defaults() {
        let mut cfg = Config::default();
        cfg.set_default_genres(["casual"]);

        assert_eq!(cfg.resolve_genres(&[]), vec!["casual"]);
        assert_eq!(cfg.resolve_genres(&["Sporty".to_string()]), vec!["Sporty"]);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let cfg = Config::load_from(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_catalog_path("outfits.json");
        cfg.set_default_genres(["streetwear"]);

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}

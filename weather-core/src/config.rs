use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::VendorSnapshot;

/// Saved payloads for one tracked location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Display name used for the device.
    pub name: String,

    /// Current conditions JSON, optionally carrying a `forecast` array.
    pub current: PathBuf,

    /// Separate daily forecast JSON array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<PathBuf>,
}

impl LocationConfig {
    /// Read and parse the saved payloads into a snapshot.
    pub fn read_snapshot(&self) -> Result<VendorSnapshot> {
        let current = fs::read_to_string(&self.current).with_context(|| {
            format!("Failed to read current conditions: {}", self.current.display())
        })?;

        let forecast = self
            .forecast
            .as_ref()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read forecast: {}", path.display()))
            })
            .transpose()?;

        let snapshot = VendorSnapshot::from_parts(&current, forecast.as_deref())
            .with_context(|| format!("Failed to parse payloads for location '{}'", self.name))?;

        Ok(snapshot)
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Location key used when none is given on the command line.
    pub default_location: Option<String>,

    /// Example TOML:
    /// [locations.268068]
    /// name = "Home"
    /// current = "/var/lib/accuweather/268068-current.json"
    #[serde(default)]
    pub locations: BTreeMap<String, LocationConfig>,
}

impl Config {
    pub fn default_location_key(&self) -> Result<&str> {
        self.default_location.as_deref().ok_or_else(|| {
            anyhow!(
                "No default location configured.\n\
                 Hint: run `accuweather add <location-key> --current <file>` first."
            )
        })
    }

    pub fn location(&self, key: &str) -> Option<&LocationConfig> {
        self.locations.get(key)
    }

    /// Resolve an explicit key, or fall back to the default location.
    pub fn resolve<'a>(&'a self, key: Option<&'a str>) -> Result<(&'a str, &'a LocationConfig)> {
        let key = match key {
            Some(key) => key,
            None => self.default_location_key()?,
        };

        let location = self.location(key).ok_or_else(|| {
            anyhow!(
                "Unknown location '{key}'.\n\
                 Hint: run `accuweather add {key} --current <file>` to register it."
            )
        })?;

        Ok((key, location))
    }

    pub fn set_default_location(&mut self, key: &str) -> Result<()> {
        if !self.locations.contains_key(key) {
            return Err(anyhow!("Cannot make unknown location '{key}' the default"));
        }

        self.default_location = Some(key.to_string());
        Ok(())
    }

    /// Add or replace a location. The first location added becomes the default.
    pub fn upsert_location(&mut self, key: &str, location: LocationConfig) {
        self.locations.insert(key.to_string(), location);

        if self.default_location.is_none() {
            self.default_location = Some(key.to_string());
        }
    }

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
        let dirs = ProjectDirs::from("dev", "accuweather", "accuweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

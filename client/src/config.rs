//! Configuration management for the Bloom Climate client
//!
//! Loading order:
//! 1. Default values in code
//! 2. `config/client-{environment}.toml`, or the file given on the command line
//! 3. Environment variable overrides with BLOOM_CLIENT prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{DateRange, ValidationError};
use std::path::{Path, PathBuf};

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Current environment (development, production)
    pub environment: String,

    /// Base URL of the relay serving /fetch_climate and /fetch_ndvi
    pub relay_url: String,

    /// Geocoding service configuration
    pub geocoder: GeocoderConfig,

    /// Local persistence configuration
    pub storage: StorageConfig,

    /// Date window requested from the relay (YYYYMMDD)
    pub range: RangeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderConfig {
    /// Nominatim-compatible search service
    pub base_url: String,

    /// Sent with every request, required by the Nominatim usage policy
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RangeConfig {
    pub start: String,
    pub end: String,
}

impl ClientConfig {
    /// Load configuration, optionally from an explicit file
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let environment =
            std::env::var("BLOOM_CLIENT_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let defaults = ClientConfig::default();

        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(&format!("config/client-{}", environment)).required(false),
        };

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("relay_url", defaults.relay_url)?
            .set_default("geocoder.base_url", defaults.geocoder.base_url)?
            .set_default("geocoder.user_agent", defaults.geocoder.user_agent)?
            .set_default(
                "storage.data_dir",
                defaults.storage.data_dir.to_string_lossy().into_owned(),
            )?
            .set_default("range.start", defaults.range.start)?
            .set_default("range.end", defaults.range.end)?
            .add_source(file)
            // Override with environment variables (BLOOM_CLIENT__ prefix)
            .add_source(
                Environment::with_prefix("BLOOM_CLIENT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validated date range
    pub fn date_range(&self) -> Result<DateRange, ValidationError> {
        DateRange::from_wire(&self.range.start, &self.range.end)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            relay_url: "http://localhost:3000".to_string(),
            geocoder: GeocoderConfig::default(),
            storage: StorageConfig::default(),
            range: RangeConfig::default(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("bloom-climate/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".bloom"),
        }
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        let range = DateRange::default();
        Self {
            start: range.start_wire(),
            end: range.end_wire(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_is_valid() {
        let range = ClientConfig::default().date_range().unwrap();
        assert_eq!(range, DateRange::default());
    }

    #[test]
    fn test_reversed_range_rejected() {
        let mut config = ClientConfig::default();
        config.range.start = "20241004".to_string();
        config.range.end = "20240101".to_string();
        assert!(config.date_range().is_err());
    }
}

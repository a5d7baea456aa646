//! Analysis service configuration.
//!
//! The endpoint prefix, the statistics header name, and the client-side
//! limits are external contract details, so they are configuration rather
//! than constants. Configuration can come from environment variables or a
//! TOML file.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::import::ImportLimits;

/// Default header the service uses for the statistics side channel.
pub const DEFAULT_STATISTICS_HEADER: &str = "X-Statistics";

/// Configuration for the analysis service client.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Base URL of the analysis service, e.g. `https://api.example.org`.
    /// The tier paths are appended under `/api/biomass/`.
    pub base_url: String,
    /// Response header carrying the JSON-encoded statistics.
    #[serde(default = "default_statistics_header")]
    pub statistics_header: String,
    /// Client-side request timeout in seconds. Expiry is surfaced as a
    /// transport failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Caps applied to imported GeoJSON files.
    #[serde(default)]
    pub limits: ImportLimits,
}

fn default_statistics_header() -> String {
    DEFAULT_STATISTICS_HEADER.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl AnalysisConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `CARBONMAP_BASE_URL` (required): analysis service base URL
    /// - `CARBONMAP_STATISTICS_HEADER` (optional, default: `X-Statistics`)
    /// - `CARBONMAP_TIMEOUT_SECS` (optional, default: 120)
    /// - `CARBONMAP_IMPORT_MAX_BYTES` (optional, default: 10 MiB)
    /// - `CARBONMAP_IMPORT_MAX_FEATURES` (optional, default: 500)
    ///
    /// # Errors
    /// Returns an error if required variables are not set or numeric
    /// variables fail to parse.
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("CARBONMAP_BASE_URL")
            .map_err(|_| "CARBONMAP_BASE_URL environment variable not set".to_string())?;
        let statistics_header = env::var("CARBONMAP_STATISTICS_HEADER")
            .unwrap_or_else(|_| default_statistics_header());
        let timeout_secs = env::var("CARBONMAP_TIMEOUT_SECS")
            .unwrap_or_else(|_| default_timeout_secs().to_string())
            .parse()
            .map_err(|_| "CARBONMAP_TIMEOUT_SECS must be a number of seconds".to_string())?;

        let mut limits = ImportLimits::default();
        if let Ok(raw) = env::var("CARBONMAP_IMPORT_MAX_BYTES") {
            limits.max_bytes = raw
                .parse()
                .map_err(|_| "CARBONMAP_IMPORT_MAX_BYTES must be a byte count".to_string())?;
        }
        if let Ok(raw) = env::var("CARBONMAP_IMPORT_MAX_FEATURES") {
            limits.max_features = raw
                .parse()
                .map_err(|_| "CARBONMAP_IMPORT_MAX_FEATURES must be a count".to_string())?;
        }

        Ok(Self {
            base_url,
            statistics_header,
            timeout_secs,
            limits,
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }
}

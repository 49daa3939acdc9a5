//! Dashboard configuration file support.
//!
//! Settings come from `dashboard.toml` (or the file named by
//! `DASHBOARD_CONFIG`), then a handful of environment overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::models::TopN;

/// Longest accepted refresh period: one year.
pub const MAX_REFRESH_HOURS: f64 = 24.0 * 365.0;

const JHU_BASE: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub view: ViewSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where the CSVs come from and how often they are refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_refresh_hours")]
    pub refresh_hours: f64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_confirmed_url")]
    pub confirmed_url: String,
    #[serde(default = "default_recovered_url")]
    pub recovered_url: String,
    #[serde(default = "default_deaths_url")]
    pub deaths_url: String,
    #[serde(default = "default_iso_codes_url")]
    pub iso_codes_url: String,
    #[serde(default = "default_continents_url")]
    pub continents_url: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            refresh_hours: default_refresh_hours(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            confirmed_url: default_confirmed_url(),
            recovered_url: default_recovered_url(),
            deaths_url: default_deaths_url(),
            iso_codes_url: default_iso_codes_url(),
            continents_url: default_continents_url(),
        }
    }
}

impl SourceSettings {
    /// Falls back to [`MAX_REFRESH_HOURS`] for values `validate` rejects.
    pub fn refresh_period(&self) -> Duration {
        Duration::try_from_secs_f64(self.refresh_hours * 3600.0)
            .unwrap_or(Duration::from_secs(MAX_REFRESH_HOURS as u64 * 3600))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Initial control values offered by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default = "default_country")]
    pub default_country: String,
    #[serde(default = "default_top")]
    pub default_top: i64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_country: default_country(),
            default_top: default_top(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_refresh_hours() -> f64 {
    4.0
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_confirmed_url() -> String {
    format!("{}/time_series_covid19_confirmed_global.csv", JHU_BASE)
}

fn default_recovered_url() -> String {
    format!("{}/time_series_covid19_recovered_global.csv", JHU_BASE)
}

fn default_deaths_url() -> String {
    format!("{}/time_series_covid19_deaths_global.csv", JHU_BASE)
}

fn default_iso_codes_url() -> String {
    "https://gist.githubusercontent.com/tadast/8827699/raw/countries_codes_and_coordinates.csv"
        .to_string()
}

fn default_continents_url() -> String {
    "https://raw.githubusercontent.com/dbouquin/IS_608/master/NanosatDB_munging/Countries-Continents.csv"
        .to_string()
}

fn default_country() -> String {
    "India".to_string()
}

fn default_top() -> i64 {
    10
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let config: DashboardConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location, or defaults when no file
    /// exists.
    ///
    /// Searches for `dashboard.toml` in:
    /// 1. The path in `DASHBOARD_CONFIG`
    /// 2. Current directory
    /// 3. `backend/` directory
    /// 4. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("DASHBOARD_CONFIG") {
            return Self::from_file(path);
        }

        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Apply `HOST`, `PORT`, `DATA_DIR` and `REFRESH_HOURS` overrides.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, so tests need not touch the
    /// process environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", format!("'{}' is not a port", port)))?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.source.data_dir = PathBuf::from(dir);
        }
        if let Some(hours) = lookup("REFRESH_HOURS") {
            self.source.refresh_hours = hours.parse().map_err(|_| {
                ConfigError::invalid("REFRESH_HOURS", format!("'{}' is not a number", hours))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.source.refresh_hours.is_finite() && self.source.refresh_hours > 0.0) {
            return Err(ConfigError::invalid(
                "source.refresh_hours",
                "must be greater than zero",
            ));
        }
        if self.source.refresh_hours > MAX_REFRESH_HOURS {
            return Err(ConfigError::invalid(
                "source.refresh_hours",
                format!("must be at most {}", MAX_REFRESH_HOURS),
            ));
        }
        let top = self.view.default_top;
        if top < TopN::MIN as i64 || top > TopN::MAX as i64 {
            return Err(ConfigError::invalid(
                "view.default_top",
                format!("{} is outside {}..={}", top, TopN::MIN, TopN::MAX),
            ));
        }
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

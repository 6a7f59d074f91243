//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line overrides applied by the
//! binary.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, ENV_SOURCE_URL, ENV_TIMEOUT_SECS,
};
use crate::error::{MetarError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Report source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory URL serving `<ICAO>.TXT` files
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent header for fetch requests
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Top-level decoder configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetarConfig {
    pub source: SourceConfig,

    /// Fixed date supplying year and month to observation times.
    /// When unset the current UTC date is used.
    pub reference_date: Option<NaiveDate>,
}

impl MetarConfig {
    /// Platform config location, e.g. `~/.config/metar-decoder/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| MetarError::configuration("could not determine config directory"))?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| MetarError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Defaults, then `config_file` if given, then the process environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ENV_SOURCE_URL) {
            debug!("{} overrides source URL", ENV_SOURCE_URL);
            self.source.base_url = url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.source.timeout_secs = timeout.trim().parse().map_err(|_| {
                MetarError::configuration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, timeout
                ))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.base_url.trim().is_empty() {
            return Err(MetarError::configuration("source base_url must not be empty"));
        }
        if !self.source.base_url.starts_with("http://")
            && !self.source.base_url.starts_with("https://")
        {
            return Err(MetarError::configuration(format!(
                "source base_url must be an http(s) URL, got '{}'",
                self.source.base_url
            )));
        }
        if self.source.timeout_secs == 0 {
            return Err(MetarError::configuration("source timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Set the source base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.source.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.source.timeout_secs = timeout_secs;
        self
    }

    /// Pin the reference date used for observation times
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Reference date, falling back to today's UTC date
    pub fn effective_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = MetarConfig::default();
        assert_eq!(config.source.base_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.source.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.reference_date.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "reference_date = \"2024-02-29\"").unwrap();
        writeln!(temp_file, "[source]").unwrap();
        writeln!(temp_file, "timeout_secs = 3").unwrap();

        let config = MetarConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.timeout_secs, 3);
        assert_eq!(config.source.base_url, DEFAULT_SOURCE_URL);
        assert_eq!(
            config.reference_date,
            Some(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[source").unwrap();

        let err = MetarConfig::from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, MetarError::ConfigFile { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = MetarConfig::default();
        config
            .apply_env(|key| match key {
                ENV_SOURCE_URL => Some("http://localhost:8080/metar".to_string()),
                ENV_TIMEOUT_SECS => Some("25".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.source.base_url, "http://localhost:8080/metar");
        assert_eq!(config.source.timeout_secs, 25);
    }

    #[test]
    fn test_bad_env_timeout() {
        let mut config = MetarConfig::default();
        let result = config.apply_env(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()));
        assert!(matches!(result, Err(MetarError::Configuration { .. })));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(MetarConfig::default().with_timeout_secs(0).validate().is_err());
        assert!(MetarConfig::default().with_base_url("").validate().is_err());
        assert!(
            MetarConfig::default()
                .with_base_url("ftp://example.com")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_effective_reference_date() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let config = MetarConfig::default().with_reference_date(date);
        assert_eq!(config.effective_reference_date(), date);
    }
}

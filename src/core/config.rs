//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::catalog::{DEFAULT_AGE, DEFAULT_COUNTRY, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

/// Local config file, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "slopes.yaml";

/// Default export file name
pub const DEFAULT_OUTPUT: &str = "slopes.csv";

/// Runtime configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog lookup endpoint
    pub endpoint: Option<String>,

    /// Age sent in the region cookie
    pub age: Option<String>,

    /// Country code sent in the region cookie
    pub country: Option<String>,

    /// Lookup timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Directory overriding the embedded reference tables
    pub data_dir: Option<PathBuf>,

    /// Export file path
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&cwd)
    }

    /// Same as [`Config::load`] with an explicit working directory
    pub fn load_from(dir: &Path) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (applied by the accessors)

        // 2. Global user config (~/.config/slopes/config.yaml)
        if let Some(global) = Self::global_config_path().and_then(|p| Self::read_file(&p)) {
            config.merge(global);
        }

        // 3. Local config (./slopes.yaml)
        if let Some(local) = Self::read_file(&dir.join(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(endpoint) = std::env::var("SLOPES_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }
        if let Ok(data_dir) = std::env::var("SLOPES_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(data_dir));
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "slopes")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn read_file(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str::<Config>(&contents).ok()
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.endpoint.is_some() {
            self.endpoint = other.endpoint;
        }
        if other.age.is_some() {
            self.age = other.age;
        }
        if other.country.is_some() {
            self.country = other.country;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn age(&self) -> &str {
        self.age.as_deref().unwrap_or(DEFAULT_AGE)
    }

    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.age(), "25");
        assert_eq!(config.country(), "US");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.output(), PathBuf::from("slopes.csv"));
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            endpoint: Some("http://a".to_string()),
            country: Some("DK".to_string()),
            ..Config::default()
        };
        base.merge(Config {
            endpoint: Some("http://b".to_string()),
            ..Config::default()
        });

        assert_eq!(base.endpoint(), "http://b");
        assert_eq!(base.country(), "DK");
    }

    #[test]
    fn test_local_file_is_read() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            "country: DK\ntimeout_secs: 5\noutput: out.csv\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path());
        assert_eq!(config.country(), "DK");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.output(), PathBuf::from("out.csv"));
    }
}

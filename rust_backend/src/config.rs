//! Analytics configuration file support.
//!
//! Settings are read from a TOML file. Every section and field is optional;
//! anything omitted falls back to its default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::io::demo::{DemoConfig, MAX_DEMO_SIZE};
use crate::pipeline::{PipelineConfig, DEFAULT_TOP_N};
use crate::services::EXPORT_FILENAME;

/// Analytics configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub demo: DemoSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// Demo data generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSettings {
    #[serde(default = "default_demo_size")]
    pub size: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_demo_start")]
    pub start_date: NaiveDate,
    /// Largest `size` a demo request may ask for
    #[serde(default = "default_demo_max_size")]
    pub max_size: usize,
}

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_filename")]
    pub filename: String,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Datasets held in memory before the oldest is evicted
    #[serde(default = "default_max_datasets")]
    pub max_datasets: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_demo_size() -> usize {
    DemoConfig::default().size
}

fn default_demo_start() -> NaiveDate {
    DemoConfig::default().start
}

fn default_demo_max_size() -> usize {
    MAX_DEMO_SIZE
}

fn default_export_filename() -> String {
    EXPORT_FILENAME.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_datasets() -> usize {
    64
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            size: default_demo_size(),
            seed: 0,
            start_date: default_demo_start(),
            max_size: default_demo_max_size(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            filename: default_export_filename(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_datasets: default_max_datasets(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `analytics.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("analytics.toml"),
            PathBuf::from("rust_backend/analytics.toml"),
            PathBuf::from("../analytics.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Default-location config, or built-in defaults when no file exists.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::from_default_location() {
            Err(ConfigError::NotFound) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            top_n: self.analysis.top_n,
        }
    }

    pub fn demo_config(&self) -> DemoConfig {
        DemoConfig {
            size: self.demo.size,
            seed: self.demo.seed,
            start: self.demo.start_date,
        }
    }

    /// `host:port` for the server, with `HOST` and `PORT` env vars taking precedence.
    pub fn bind_address(&self) -> String {
        let host = std::env::var("HOST").unwrap_or_else(|_| self.server.host.clone());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(self.server.port);
        format!("{}:{}", host, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AnalyticsConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalyticsConfig::default());
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.demo.size, 200);
        assert_eq!(config.export.filename, "youtube_analysis.csv");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_datasets, 64);
        assert_eq!(config.demo.max_size, 100_000);
    }

    #[test]
    fn test_partial_sections() {
        let config = AnalyticsConfig::from_toml_str(
            r#"
            [analysis]
            top_n = 3

            [demo]
            seed = 42
            start_date = "2024-06-01"
            max_size = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.pipeline_config().top_n, 3);
        let demo = config.demo_config();
        assert_eq!(demo.seed, 42);
        assert_eq!(demo.size, 200);
        assert_eq!(demo.start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(config.demo.max_size, 500);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = AnalyticsConfig::from_toml_str("[analysis]\ntop_n = \"ten\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(file, "[server]\nhost = \"127.0.0.1\"\nport = 9000\n").unwrap();

        let config = AnalyticsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = AnalyticsConfig::from_file("/nonexistent/analytics.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

// File: formcheck-cli/src/config.rs
// Purpose: Configuration parsing from formcheck.toml

use anyhow::{Context, Result};
use formcheck::RuleOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "formcheck.toml";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub rules: RuleOptions,

    #[serde(default)]
    pub submit: SubmitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Behaviour of the simulated submit handler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Simulated API latency in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Make every submission fail
    #[serde(default)]
    pub fail: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            fail: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl SubmitConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rules.name_min_length, 2);
        assert_eq!(config.rules.name_max_length, None);
        assert_eq!(config.submit.delay(), Duration::from_secs(2));
        assert!(!config.submit.fail);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(Config::parse("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [rules]
            name_max_length = 40

            [submit]
            fail = true
        "#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.rules.name_min_length, 2);
        assert_eq!(config.rules.name_max_length, Some(40));
        assert!(config.submit.fail);
        assert_eq!(config.submit.delay_ms, 2000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(Config::parse("[submit]\ndelay_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("does/not/exist/formcheck.toml").unwrap();
        assert_eq!(config, Config::default());
    }
}

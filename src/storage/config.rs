//! Configuration handling for the address book
//!
//! Configuration is read from `config.toml` in the platform config directory
//! (e.g. `~/.config/address-book/config.toml`) or from an explicit path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use super::jsonl::DEFAULT_STORE_FILE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the contact store
    pub store: PathBuf,

    /// Default window for the `birthdays` command, in days
    pub birthday_window: u32,

    /// Prompt shown before each command
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: PathBuf::from(DEFAULT_STORE_FILE),
            birthday_window: 7,
            prompt: "Enter command: ".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))
    }

    /// Parses and validates configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Returns the default config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "address-book", "address-book")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.store, PathBuf::from("addressbook.jsonl"));
        assert_eq!(config.birthday_window, 7);
        assert_eq!(config.prompt, "Enter command: ");
    }

    #[test]
    fn parse_partial_config() {
        let config = Config::parse("birthday_window = 14\n").unwrap();

        assert_eq!(config.birthday_window, 14);
        assert_eq!(config.store, PathBuf::from("addressbook.jsonl"));
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
store = "/tmp/contacts.jsonl"
birthday_window = 30
prompt = "> "
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.store, PathBuf::from("/tmp/contacts.jsonl"));
        assert_eq!(config.birthday_window, 30);
        assert_eq!(config.prompt, "> ");
    }

    #[test]
    fn parse_rejects_bad_types() {
        assert!(Config::parse("birthday_window = \"soon\"").is_err());
    }

    #[test]
    fn parse_rejects_empty_store() {
        assert!(Config::parse("store = \"\"").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("missing.toml"))).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "birthday_window = 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.birthday_window, 3);
    }
}

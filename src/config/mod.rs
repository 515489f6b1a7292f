//
//  bitbucket-rest-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for the `bbrest` command-line tool, stored as TOML in a
//! platform-specific directory, plus the base URL normalisation shared with
//! the library.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bbrest/config.toml`
//! - **macOS**: `~/Library/Application Support/bbrest/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bbrest\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://bitbucket.example.com"
//! username = "jdoe"
//! default_project = "PRJ"
//! timeout_secs = 20
//! ```
//!
//! Secrets are never read from the file. Tokens and passwords come from the
//! `BBREST_TOKEN` and `BBREST_PASSWORD` environment variables or from
//! command-line flags, which also override the file's values.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`hosts`]: Base URL normalisation

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`].
pub const VALID_KEYS: &[&str] = &["base_url", "username", "default_project", "timeout_secs"];

/// Contents of the configuration file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Address of the Bitbucket Server instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Username for Basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Project key used when a command does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }

        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Path of the configuration file in the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Value of `key` as text, `None` when unset.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "base_url" => self.base_url.clone(),
            "username" => self.username.clone(),
            "default_project" => self.default_project.clone(),
            "timeout_secs" => self.timeout_secs.map(|t| t.to_string()),
            _ => bail!(unknown_key(key)),
        };
        Ok(value)
    }

    /// Sets `key`. Base URLs are stored normalised.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => self.base_url = Some(normalize_base_url(value)?),
            "username" => self.username = Some(value.to_string()),
            "default_project" => self.default_project = Some(value.to_string()),
            "timeout_secs" => {
                let secs = value
                    .parse::<u64>()
                    .with_context(|| format!("timeout_secs must be a number of seconds, got '{}'", value))?;
                self.timeout_secs = Some(secs);
            }
            _ => bail!(unknown_key(key)),
        }
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "base_url" => self.base_url = None,
            "username" => self.username = None,
            "default_project" => self.default_project = None,
            "timeout_secs" => self.timeout_secs = None,
            _ => bail!(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key '{}'. Valid keys: {}",
        key,
        VALID_KEYS.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            base_url: Some("https://bitbucket.example.com".to_string()),
            username: Some("jdoe".to_string()),
            default_project: Some("PRJ".to_string()),
            timeout_secs: Some(20),
        };

        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"bb.example.com\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("bb.example.com"));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_set_get_unset() {
        let mut config = Config::default();

        config.set("base_url", "bb.example.com/").unwrap();
        config.set("timeout_secs", "15").unwrap();
        assert_eq!(
            config.get("base_url").unwrap().as_deref(),
            Some("https://bb.example.com")
        );
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));

        config.unset("timeout_secs").unwrap();
        assert_eq!(config.get("timeout_secs").unwrap(), None);
    }

    #[test]
    fn test_invalid_keys_and_values() {
        let mut config = Config::default();

        assert!(config.set("editor", "vim").is_err());
        assert!(config.get("token").is_err());
        assert!(config.set("timeout_secs", "soon").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }
}

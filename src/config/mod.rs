//! Configuration management for the Backlog client.
//!
//! This module handles loading, saving, and managing profiles and
//! client-wide settings. The file lives at `<config_dir>/backlog/config.toml`
//! unless `BACKLOG_CONFIG_DIR` points elsewhere.

mod profile;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use profile::Profile;
pub use settings::{Settings, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "BACKLOG_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    ValidationError(String),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("backlog"),
        };
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Load the configuration, or the defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load and validate the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        info!(profiles = config.profiles.len(), "Loaded configuration");
        Ok(config)
    }

    /// Validate and save the configuration.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Validate and save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(ConfigError::WriteError)?;

        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Check every profile, name uniqueness and the default profile reference.
    pub fn validate(&self) -> Result<()> {
        for (i, profile) in self.profiles.iter().enumerate() {
            profile.validate()?;
            if self.profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        if let Some(name) = &self.settings.default_profile {
            if self.profile(name).is_err() {
                return Err(ConfigError::ValidationError(format!(
                    "default profile '{}' does not exist",
                    name
                )));
            }
        }

        if self.settings.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Find a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    /// The configured default profile, or the only profile if there is one.
    pub fn default_profile(&self) -> Option<&Profile> {
        match &self.settings.default_profile {
            Some(name) => self.profile(name).ok(),
            None if self.profiles.len() == 1 => self.profiles.first(),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn profile(name: &str) -> Profile {
        Profile::new(name.to_string(), format!("https://{}.backlog.com", name))
    }

    fn sample_config() -> Config {
        Config {
            settings: Settings {
                default_profile: Some("work".to_string()),
                timeout_secs: 10,
            },
            profiles: vec![profile("work"), profile("personal")],
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = sample_config();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "profiles = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_duplicate_profiles_rejected() {
        let config = Config {
            settings: Settings::default(),
            profiles: vec![profile("work"), profile("work")],
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate profile name"));
    }

    #[test]
    fn test_unknown_default_profile_rejected() {
        let mut config = sample_config();
        config.settings.default_profile = Some("missing".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = sample_config();
        config.settings.timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_profile_lookup() {
        let config = sample_config();

        assert_eq!(config.profile("personal").unwrap().name, "personal");
        assert!(matches!(
            config.profile("missing"),
            Err(ConfigError::ProfileNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_default_profile() {
        let config = sample_config();
        assert_eq!(config.default_profile().unwrap().name, "work");

        let single = Config {
            settings: Settings::default(),
            profiles: vec![profile("solo")],
        };
        assert_eq!(single.default_profile().unwrap().name, "solo");

        let none = Config {
            settings: Settings::default(),
            profiles: vec![profile("a"), profile("b")],
        };
        assert!(none.default_profile().is_none());
    }

    #[test]
    #[serial]
    fn test_config_path_honors_env_override() {
        let dir = tempdir().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, dir.path());

        let path = Config::config_path().unwrap();
        std::env::remove_var(CONFIG_DIR_ENV);

        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    #[serial]
    fn test_save_and_load_through_env_override() {
        let dir = tempdir().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, dir.path());

        let config = sample_config();
        config.save().unwrap();
        let loaded = Config::load().unwrap();
        std::env::remove_var(CONFIG_DIR_ENV);

        assert_eq!(loaded, config);
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }
}

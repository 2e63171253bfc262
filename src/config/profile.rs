//! Backlog space profile configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Connection details for one Backlog space.
///
/// API keys are stored separately in the OS keychain under the profile name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The space URL (e.g., "https://example.backlog.com").
    pub space_url: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: String, space_url: String) -> Self {
        Self { name, space_url }
    }

    /// Validate this profile.
    ///
    /// Checks that:
    /// - The name is non-empty and has no whitespace
    /// - The space URL is non-empty and starts with a scheme
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.space_url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': space URL cannot be empty",
                self.name
            )));
        }

        if !self.space_url.starts_with("https://") && !self.space_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': space URL must start with http:// or https://",
                self.name
            )));
        }

        Ok(())
    }
}

//! Crate-level error type.
//!
//! Service calls return [`ApiError`]. Operations that also touch the
//! configuration, such as building a client from a profile, return
//! [`Error`], which wraps both with user-friendly messages.

use crate::api::error::ApiError;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl Error {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            Error::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::ProfileNotFound(name) => format!("Profile '{}' not found.", name),
            },
            Error::Api(e) => match e {
                ApiError::Validation(v) => format!("Invalid request: {}", v),
                ApiError::Unauthorized => {
                    "Authentication failed. Please check your API key.".to_string()
                }
                ApiError::Forbidden(_) => {
                    "Access denied. You don't have permission to access this resource.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "Backlog server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::Decode(_) => {
                    "Unexpected response from Backlog. Please try again.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid Backlog space URL in configuration.".to_string(),
                ApiError::Keyring(_) => {
                    "Could not access secure storage. Please store your API key again.".to_string()
                }
                ApiError::Io(_) => "Could not read the file to upload.".to_string(),
            },
        }
    }

    /// Whether the error was raised by local argument validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Api(e) if e.is_validation())
    }

    /// Check if this error is critical, meaning retrying the same call cannot succeed
    /// until the configuration or credentials change.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::Api(ApiError::Unauthorized)
                | Error::Api(ApiError::Forbidden(_))
                | Error::Api(ApiError::InvalidUrl(_))
                | Error::Api(ApiError::Keyring(_))
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            Error::Config(ConfigError::NoConfigDir) | Error::Config(ConfigError::ReadError(_)) => {
                Some("Create a profile in config.toml or set BACKLOG_CONFIG_DIR.")
            }
            Error::Config(ConfigError::ProfileNotFound(_)) => {
                Some("Check the profile names in config.toml.")
            }
            Error::Api(ApiError::Unauthorized) => {
                Some("Issue a new API key from your Backlog personal settings page.")
            }
            Error::Api(ApiError::Keyring(_)) => {
                Some("Store the API key for this profile with store_api_key.")
            }
            Error::Api(ApiError::RateLimited) => Some("Wait a few seconds and try again."),
            Error::Api(ApiError::Network(_)) => {
                Some("Check your internet connection and space URL.")
            }
            _ => None,
        }
    }
}

/// Result type for crate-level operations.
pub type Result<T> = std::result::Result<T, Error>;

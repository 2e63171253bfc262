//! Authentication handling for the Backlog API.
//!
//! Backlog accepts either a personal API key, sent as the `apiKey` query
//! parameter, or an OAuth 2.0 access token sent as a bearer token. API keys
//! can be kept in the OS keyring under the profile name.

use std::fmt;

use super::error::{ApiError, Result};

/// The keyring service name for Backlog API keys.
const KEYRING_SERVICE: &str = "backlog-client";

/// Credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// A personal API key.
    ApiKey(String),
    /// An OAuth 2.0 access token obtained elsewhere.
    AccessToken(String),
}

impl Auth {
    /// Authenticate with a personal API key.
    pub fn api_key(key: impl Into<String>) -> Self {
        Auth::ApiKey(key.into())
    }

    /// Authenticate with an OAuth 2.0 access token.
    pub fn access_token(token: impl Into<String>) -> Self {
        Auth::AccessToken(token.into())
    }

    /// Load the API key stored in the OS keyring for a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be retrieved from the keyring.
    pub fn from_keyring(profile_name: &str) -> Result<Self> {
        get_api_key(profile_name).map(Auth::ApiKey)
    }

    /// The query parameter carrying the API key, if any.
    pub fn query_pair(&self) -> Option<(&'static str, &str)> {
        match self {
            Auth::ApiKey(key) => Some(("apiKey", key.as_str())),
            Auth::AccessToken(_) => None,
        }
    }

    /// The `Authorization` header value, if any.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Auth::ApiKey(_) => None,
            Auth::AccessToken(token) => Some(format!("Bearer {}", token)),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::ApiKey(_) => f.write_str("ApiKey(***)"),
            Auth::AccessToken(_) => f.write_str("AccessToken(***)"),
        }
    }
}

/// Store an API key in the OS keyring.
///
/// # Arguments
///
/// * `profile_name` - The profile name to use as the keyring username
/// * `api_key` - The API key to store
///
/// # Errors
///
/// Returns an error if the key cannot be stored in the keyring.
pub fn store_api_key(profile_name: &str, api_key: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(api_key)
        .map_err(|e| ApiError::Keyring(format!("failed to store API key: {}", e)))?;

    Ok(())
}

/// Retrieve an API key from the OS keyring.
///
/// # Errors
///
/// Returns an error if the key cannot be retrieved from the keyring.
pub fn get_api_key(profile_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve API key: {}", e)))
}

/// Delete an API key from the OS keyring.
///
/// # Errors
///
/// Returns an error if the key cannot be deleted from the keyring.
pub fn delete_api_key(profile_name: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete API key: {}", e)))?;

    Ok(())
}

/// Check if an API key exists in the OS keyring for a profile.
pub fn has_api_key(profile_name: &str) -> bool {
    get_api_key(profile_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_goes_in_query() {
        let auth = Auth::api_key("abc123");
        assert_eq!(auth.query_pair(), Some(("apiKey", "abc123")));
        assert_eq!(auth.header_value(), None);
    }

    #[test]
    fn test_access_token_goes_in_header() {
        let auth = Auth::access_token("token");
        assert_eq!(auth.query_pair(), None);
        assert_eq!(auth.header_value().as_deref(), Some("Bearer token"));
    }

    #[test]
    fn test_auth_does_not_expose_secret() {
        let debug_output = format!("{:?}", Auth::api_key("secret_key"));
        assert!(!debug_output.contains("secret_key"));

        let debug_output = format!("{:?}", Auth::access_token("secret_token"));
        assert!(!debug_output.contains("secret_token"));
    }
}

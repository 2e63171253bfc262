//! Backlog API client.
//!
//! The client owns a [`Transport`] and hands out resource services that
//! borrow it. Nothing here talks to the network directly, so tests can swap
//! in any transport.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::auth::Auth;
use super::error::Result;
use super::transport::{HttpTransport, Transport};
use crate::config::{Profile, Settings};
use crate::services::{
    ActivityService, IssueService, ProjectService, PullRequestService, SpaceService, UserService,
    WikiService,
};

/// Entry point to the Backlog API.
///
/// Cloning is cheap; clones share the same transport.
#[derive(Clone)]
pub struct BacklogClient {
    transport: Arc<dyn Transport>,
}

impl BacklogClient {
    /// Create a client over an existing transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client for a space URL authenticated with an API key.
    ///
    /// Does NOT contact the server.
    pub fn with_api_key(space_url: &str, api_key: &str) -> Result<Self> {
        let transport = HttpTransport::new(space_url, Auth::api_key(api_key))?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Create a client for a space URL authenticated with an OAuth access token.
    pub fn with_access_token(space_url: &str, token: &str) -> Result<Self> {
        let transport = HttpTransport::new(space_url, Auth::access_token(token))?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Create a client from a saved profile.
    ///
    /// The API key is read from the OS keyring and the timeout from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The profile is invalid
    /// - The API key cannot be retrieved from the keyring
    /// - The HTTP client cannot be built
    #[instrument(skip(profile, settings), fields(profile_name = %profile.name))]
    pub fn from_profile(profile: &Profile, settings: &Settings) -> crate::Result<Self> {
        profile.validate()?;

        let auth = Auth::from_keyring(&profile.name)?;
        let timeout = Duration::from_secs(settings.timeout_secs);
        let transport = HttpTransport::with_timeout(&profile.space_url, auth, timeout)?;

        info!(base_url = %transport.base_url(), "Created Backlog client");
        Ok(Self::new(Arc::new(transport)))
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self.transport())
    }

    pub fn projects(&self) -> ProjectService<'_> {
        ProjectService::new(self.transport())
    }

    pub fn wikis(&self) -> WikiService<'_> {
        WikiService::new(self.transport())
    }

    pub fn issues(&self) -> IssueService<'_> {
        IssueService::new(self.transport())
    }

    pub fn pull_requests(&self) -> PullRequestService<'_> {
        PullRequestService::new(self.transport())
    }

    pub fn space(&self) -> SpaceService<'_> {
        SpaceService::new(self.transport())
    }

    pub fn activities(&self) -> ActivityService<'_> {
        ActivityService::new(self.transport())
    }
}

impl std::fmt::Debug for BacklogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacklogClient").finish_non_exhaustive()
    }
}

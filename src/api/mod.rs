//! Backlog API client and types.
//!
//! This module provides the interface for communicating with the Backlog
//! REST API v2: credentials, the HTTP transport, request parameters and
//! their validating options, and the response types.

mod auth;
mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod options;
mod params;
mod transport;
mod types;

pub use auth::{delete_api_key, get_api_key, has_api_key, store_api_key, Auth};
pub use client::BacklogClient;
pub use error::{ApiError, Result, ValidationError};
pub use options::{ActivityOption, ProjectOption, RequestOption, UserOption, WikiOption};
pub use params::RequestParams;
pub use transport::{FileUpload, HttpTransport, Payload, Request, Transport};
pub(crate) use types::path_segment;
pub use types::{
    Activity, Attachment, Format, IdOrKey, Issue, Order, Project, PullRequest, Role, Space, Tag,
    User, Wiki, WikiCount,
};

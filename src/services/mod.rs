//! Resource services.
//!
//! Every service borrows the client's [`Transport`] and maps one family of
//! Backlog endpoints onto typed methods. Arguments are validated before
//! anything is sent; a call makes exactly one request.

mod activities;
mod attachments;
mod issues;
mod projects;
mod pull_requests;
mod space;
mod users;
mod wikis;

pub use activities::ActivityService;
pub use attachments::{
    IssueAttachmentService, PullRequestAttachmentService, SpaceAttachmentService,
    WikiAttachmentService,
};
pub use issues::IssueService;
pub use projects::ProjectService;
pub use pull_requests::PullRequestService;
pub use space::SpaceService;
pub use users::{ProjectUserService, UserService};
pub use wikis::WikiService;

use serde::de::DeserializeOwned;

use crate::api::{IdOrKey, Request, Result, Transport, ValidationError};

/// Send `request` and decode the JSON body.
async fn call<T: DeserializeOwned>(transport: &dyn Transport, request: Request) -> Result<T> {
    let body = transport.send(request).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Reject numeric IDs below 1.
fn ensure_id(field: &str, id: i64) -> std::result::Result<(), ValidationError> {
    if id < 1 {
        return Err(ValidationError::not_positive(field, id));
    }
    Ok(())
}

fn ensure_non_empty(field: &str, value: &str) -> std::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty(field));
    }
    Ok(())
}

/// Validate a project ID or key and render it as a path segment.
fn project_segment(project: impl Into<IdOrKey>) -> std::result::Result<String, ValidationError> {
    let project: IdOrKey = project.into();
    project.segment("projectIdOrKey")
}

/// Validate an issue ID or key and render it as a path segment.
fn issue_segment(issue: impl Into<IdOrKey>) -> std::result::Result<String, ValidationError> {
    let issue: IdOrKey = issue.into();
    issue.segment("issueIdOrKey")
}

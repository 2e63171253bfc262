use super::attachments::pull_request_path;
use super::{call, PullRequestAttachmentService};
use crate::api::{IdOrKey, PullRequest, Request, Result, Transport};

/// Pull requests of Git repositories hosted in Backlog.
pub struct PullRequestService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> PullRequestService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Get pull request `number` of `repository` in `project`.
    pub async fn one(
        &self,
        project: impl Into<IdOrKey>,
        repository: &str,
        number: i64,
    ) -> Result<PullRequest> {
        let path = pull_request_path(project, repository, number)?;
        call(self.transport, Request::get(path, None)).await
    }

    pub fn attachments(&self) -> PullRequestAttachmentService<'a> {
        PullRequestAttachmentService::new(self.transport)
    }
}

use super::{call, issue_segment, IssueAttachmentService};
use crate::api::{IdOrKey, Issue, Request, Result, Transport};

/// Issue lookup and deletion.
pub struct IssueService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> IssueService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Get an issue by ID or key (e.g. `"BLG-1"`).
    pub async fn one(&self, issue: impl Into<IdOrKey>) -> Result<Issue> {
        let path = format!("issues/{}", issue_segment(issue)?);
        call(self.transport, Request::get(path, None)).await
    }

    /// Delete an issue and return it as it was.
    pub async fn delete(&self, issue: impl Into<IdOrKey>) -> Result<Issue> {
        let path = format!("issues/{}", issue_segment(issue)?);
        call(self.transport, Request::delete(path, None)).await
    }

    pub fn attachments(&self) -> IssueAttachmentService<'a> {
        IssueAttachmentService::new(self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use reqwest::Method;

    #[tokio::test]
    async fn test_one() {
        let transport = MockTransport::fixture("issue.json");
        let issue = IssueService::new(&transport).one("BLG-1").await.unwrap();

        assert_eq!(issue.id, 1);
        assert_eq!(issue.issue_key, "BLG-1");
        assert_eq!(issue.to_string(), "BLG-1: first issue");

        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "issues/BLG-1");
    }

    #[tokio::test]
    async fn test_one_rejects_bad_id() {
        let transport = MockTransport::fixture("issue.json");
        let service = IssueService::new(&transport);

        assert!(service.one(0_i64).await.is_err());
        assert!(service.one("").await.is_err());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let transport = MockTransport::fixture("issue.json");
        IssueService::new(&transport).delete(1_i64).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "issues/1");
    }

    #[tokio::test]
    async fn test_attachments_share_transport() {
        let transport = MockTransport::fixture("attachment_list.json");
        let attachments = IssueService::new(&transport)
            .attachments()
            .list("BLG-1")
            .await
            .unwrap();

        assert_eq!(attachments[0].name, "A.png");
        assert_eq!(transport.last_request().path, "issues/BLG-1/attachments");
    }

    #[tokio::test]
    async fn test_one_client_error() {
        let transport = MockTransport::failing();
        assert!(IssueService::new(&transport).one("BLG-1").await.is_err());
    }
}

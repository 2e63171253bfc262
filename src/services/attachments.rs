//! Attachment operations for spaces, wikis, issues and pull requests.

use std::path::Path;

use tracing::debug;

use super::{call, ensure_id, ensure_non_empty, issue_segment, project_segment};
use crate::api::{
    path_segment, Attachment, FileUpload, IdOrKey, Request, RequestParams, Result, Transport,
    ValidationError,
};

async fn list_attachments(transport: &dyn Transport, path: String) -> Result<Vec<Attachment>> {
    let attachments: Vec<Attachment> = call(transport, Request::get(path, None)).await?;
    debug!("Fetched {} attachments", attachments.len());
    Ok(attachments)
}

async fn remove_attachment(transport: &dyn Transport, path: String) -> Result<Attachment> {
    call(transport, Request::delete(path, None)).await
}

/// Uploads files to the space so they can be attached elsewhere.
pub struct SpaceAttachmentService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> SpaceAttachmentService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Uploads the file at `file_path`, reported to Backlog as `file_name`.
    ///
    /// The returned attachment ID can be passed to
    /// [`WikiAttachmentService::attach`].
    pub async fn upload(&self, file_path: impl AsRef<Path>, file_name: &str) -> Result<Attachment> {
        let file_path = file_path.as_ref();
        ensure_non_empty("filePath", &file_path.to_string_lossy())?;
        ensure_non_empty("fileName", file_name)?;

        let upload = FileUpload {
            path: file_path.to_path_buf(),
            file_name: file_name.to_string(),
        };
        call(self.transport, Request::upload("space/attachment", upload)).await
    }
}

/// Files attached to wiki pages.
pub struct WikiAttachmentService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> WikiAttachmentService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Attaches files previously uploaded to the space.
    pub async fn attach(&self, wiki_id: i64, attachment_ids: &[i64]) -> Result<Vec<Attachment>> {
        ensure_id("wikiId", wiki_id)?;
        attachment_ids
            .iter()
            .try_for_each(|id| ensure_id("attachmentId[]", *id))?;

        let mut params = RequestParams::new();
        for id in attachment_ids {
            params.add("attachmentId[]", id.to_string());
        }

        call(
            self.transport,
            Request::post(format!("wikis/{}/attachments", wiki_id), params),
        )
        .await
    }

    /// Lists the files attached to a wiki page.
    pub async fn list(&self, wiki_id: i64) -> Result<Vec<Attachment>> {
        ensure_id("wikiId", wiki_id)?;
        list_attachments(self.transport, format!("wikis/{}/attachments", wiki_id)).await
    }

    /// Removes a file from a wiki page.
    pub async fn remove(&self, wiki_id: i64, attachment_id: i64) -> Result<Attachment> {
        ensure_id("wikiId", wiki_id)?;
        ensure_id("attachmentId", attachment_id)?;
        remove_attachment(
            self.transport,
            format!("wikis/{}/attachments/{}", wiki_id, attachment_id),
        )
        .await
    }
}

/// Files attached to issues.
pub struct IssueAttachmentService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> IssueAttachmentService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists the files attached to an issue.
    pub async fn list(&self, issue: impl Into<IdOrKey>) -> Result<Vec<Attachment>> {
        let path = format!("issues/{}/attachments", issue_segment(issue)?);
        list_attachments(self.transport, path).await
    }

    /// Removes a file from an issue.
    pub async fn remove(&self, issue: impl Into<IdOrKey>, attachment_id: i64) -> Result<Attachment> {
        let issue = issue_segment(issue)?;
        ensure_id("attachmentId", attachment_id)?;
        remove_attachment(
            self.transport,
            format!("issues/{}/attachments/{}", issue, attachment_id),
        )
        .await
    }
}

/// Files attached to pull requests.
pub struct PullRequestAttachmentService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> PullRequestAttachmentService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists the files attached to a pull request.
    pub async fn list(
        &self,
        project: impl Into<IdOrKey>,
        repository: &str,
        number: i64,
    ) -> Result<Vec<Attachment>> {
        let path = pull_request_path(project, repository, number)?;
        list_attachments(self.transport, format!("{}/attachments", path)).await
    }

    /// Removes a file from a pull request.
    pub async fn remove(
        &self,
        project: impl Into<IdOrKey>,
        repository: &str,
        number: i64,
        attachment_id: i64,
    ) -> Result<Attachment> {
        let path = pull_request_path(project, repository, number)?;
        ensure_id("attachmentId", attachment_id)?;
        remove_attachment(
            self.transport,
            format!("{}/attachments/{}", path, attachment_id),
        )
        .await
    }
}

/// `projects/{project}/git/repositories/{repository}/pullRequests/{number}`
pub(super) fn pull_request_path(
    project: impl Into<IdOrKey>,
    repository: &str,
    number: i64,
) -> std::result::Result<String, ValidationError> {
    let project = project_segment(project)?;
    let repository = path_segment("repoIdOrName", repository)?;
    ensure_id("number", number)?;
    Ok(format!(
        "projects/{}/git/repositories/{}/pullRequests/{}",
        project, repository, number
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{ApiError, Payload};
    use chrono::{TimeZone, Utc};
    use reqwest::Method;

    fn assert_first_fixture_attachment(attachments: &[Attachment]) {
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].id, 2);
        assert_eq!(attachments[0].name, "A.png");
        assert_eq!(attachments[0].size, 196186);
        assert_eq!(
            attachments[0].created,
            Some(Utc.with_ymd_and_hms(2014, 9, 11, 6, 26, 5).unwrap())
        );
    }

    #[tokio::test]
    async fn test_space_upload() {
        let transport = MockTransport::fixture("attachment_upload.json");
        let attachment = SpaceAttachmentService::new(&transport)
            .upload("fpath", "test.txt")
            .await
            .unwrap();

        assert_eq!(attachment.id, 1);
        assert_eq!(attachment.name, "test.txt");
        assert_eq!(attachment.size, 8857);

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "space/attachment");
        match request.payload {
            Payload::File(file) => {
                assert_eq!(file.path, Path::new("fpath"));
                assert_eq!(file.file_name, "test.txt");
            }
            other => panic!("Expected file payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_space_upload_client_error() {
        let transport = MockTransport::failing();
        let result = SpaceAttachmentService::new(&transport).upload("fpath", "fname").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_space_upload_invalid_json() {
        let transport = MockTransport::fixture("invalid.json");
        let result = SpaceAttachmentService::new(&transport).upload("fpath", "fname").await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_space_upload_requires_names() {
        let transport = MockTransport::fixture("attachment_upload.json");
        let service = SpaceAttachmentService::new(&transport);

        assert!(service.upload("", "test.txt").await.is_err());
        assert!(service.upload("fpath", "").await.is_err());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_wiki_attach() {
        let transport = MockTransport::fixture("attachment_list.json");
        let attachments = WikiAttachmentService::new(&transport)
            .attach(1234, &[2, 5])
            .await
            .unwrap();

        assert_first_fixture_attachment(&attachments);
        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "wikis/1234/attachments");
        assert_eq!(
            request.params().unwrap().get_all("attachmentId[]").unwrap(),
            &["2".to_string(), "5".to_string()]
        );
    }

    #[tokio::test]
    async fn test_wiki_attach_rejects_bad_ids() {
        let transport = MockTransport::fixture("attachment_list.json");
        let service = WikiAttachmentService::new(&transport);

        assert!(service.attach(0, &[2]).await.is_err());
        assert!(service.attach(1234, &[2, 0]).await.is_err());
        assert!(service.attach(1234, &[-3]).await.is_err());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_wiki_attach_empty_list_sends_no_ids() {
        let transport = MockTransport::json("[]");
        let attachments = WikiAttachmentService::new(&transport)
            .attach(1234, &[])
            .await
            .unwrap();

        assert!(attachments.is_empty());
        let request = transport.last_request();
        assert_eq!(request.path, "wikis/1234/attachments");
        assert!(!request.params().unwrap().contains("attachmentId[]"));
    }

    #[tokio::test]
    async fn test_wiki_attach_client_error() {
        let transport = MockTransport::failing();
        let result = WikiAttachmentService::new(&transport).attach(1234, &[2]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_wiki_list() {
        let transport = MockTransport::fixture("attachment_list.json");
        let attachments = WikiAttachmentService::new(&transport).list(1234).await.unwrap();

        assert_first_fixture_attachment(&attachments);
        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "wikis/1234/attachments");
    }

    #[tokio::test]
    async fn test_wiki_list_client_error() {
        let transport = MockTransport::failing();
        assert!(WikiAttachmentService::new(&transport).list(1234).await.is_err());
    }

    #[tokio::test]
    async fn test_wiki_list_invalid_json() {
        let transport = MockTransport::fixture("invalid.json");
        assert!(WikiAttachmentService::new(&transport).list(1234).await.is_err());
    }

    #[tokio::test]
    async fn test_wiki_remove() {
        let transport = MockTransport::fixture("attachment.json");
        let attachment = WikiAttachmentService::new(&transport)
            .remove(1234, 8)
            .await
            .unwrap();

        assert_eq!(attachment.id, 8);
        assert_eq!(attachment.name, "IMGP0088.JPG");
        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "wikis/1234/attachments/8");
    }

    #[tokio::test]
    async fn test_issue_list() {
        let transport = MockTransport::fixture("attachment_list.json");
        let attachments = IssueAttachmentService::new(&transport)
            .list("TEST-1")
            .await
            .unwrap();

        assert_first_fixture_attachment(&attachments);
        assert_eq!(transport.last_request().path, "issues/TEST-1/attachments");
    }

    #[tokio::test]
    async fn test_issue_list_by_id() {
        let transport = MockTransport::fixture("attachment_list.json");
        IssueAttachmentService::new(&transport).list(5678_i64).await.unwrap();
        assert_eq!(transport.last_request().path, "issues/5678/attachments");
    }

    #[tokio::test]
    async fn test_issue_list_client_error() {
        let transport = MockTransport::failing();
        assert!(IssueAttachmentService::new(&transport).list("TEST-1").await.is_err());
    }

    #[tokio::test]
    async fn test_issue_list_invalid_json() {
        let transport = MockTransport::fixture("invalid.json");
        let result = IssueAttachmentService::new(&transport).list("TEST-1").await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_issue_key_cannot_escape_its_segment() {
        let transport = MockTransport::fixture("attachment.json");
        let service = IssueAttachmentService::new(&transport);

        service.remove("../../users/5", 8).await.unwrap();
        assert_eq!(
            transport.last_request().path,
            "issues/..%2F..%2Fusers%2F5/attachments/8"
        );

        assert!(service.remove("..", 8).await.is_err());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_issue_remove() {
        let transport = MockTransport::fixture("attachment.json");
        let service = IssueAttachmentService::new(&transport);

        service.remove("TEST-1", 8).await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "issues/TEST-1/attachments/8");

        assert!(service.remove("", 8).await.is_err());
        assert!(service.remove("TEST-1", 0).await.is_err());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_issue_remove_invalid_json() {
        let transport = MockTransport::fixture("invalid.json");
        assert!(IssueAttachmentService::new(&transport).remove("TEST-1", 8).await.is_err());
    }

    #[tokio::test]
    async fn test_pull_request_list() {
        let transport = MockTransport::fixture("attachment_list.json");
        let attachments = PullRequestAttachmentService::new(&transport)
            .list("TEST", "test", 10)
            .await
            .unwrap();

        assert_first_fixture_attachment(&attachments);
        assert_eq!(
            transport.last_request().path,
            "projects/TEST/git/repositories/test/pullRequests/10/attachments"
        );
    }

    #[tokio::test]
    async fn test_pull_request_list_client_error() {
        let transport = MockTransport::failing();
        let result = PullRequestAttachmentService::new(&transport)
            .list("TEST", "test", 10)
            .await;
        assert!(matches!(result, Err(ApiError::ServerError(_))));
    }

    #[tokio::test]
    async fn test_pull_request_repository_is_encoded() {
        let transport = MockTransport::fixture("attachment_list.json");
        let service = PullRequestAttachmentService::new(&transport);

        service.list("TEST", "app/../../x?y", 10).await.unwrap();
        assert_eq!(
            transport.last_request().path,
            "projects/TEST/git/repositories/app%2F..%2F..%2Fx%3Fy/pullRequests/10/attachments"
        );

        assert!(service.list("TEST", "..", 10).await.is_err());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_pull_request_list_invalid_json() {
        let transport = MockTransport::fixture("invalid.json");
        let result = PullRequestAttachmentService::new(&transport)
            .list("TEST", "test", 10)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_pull_request_remove() {
        let transport = MockTransport::fixture("attachment.json");
        PullRequestAttachmentService::new(&transport)
            .remove("TEST", "test", 10, 8)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.path,
            "projects/TEST/git/repositories/test/pullRequests/10/attachments/8"
        );
    }

    #[tokio::test]
    async fn test_pull_request_rejects_bad_path_arguments() {
        let transport = MockTransport::fixture("attachment_list.json");
        let service = PullRequestAttachmentService::new(&transport);

        assert!(service.list("", "test", 10).await.is_err());
        assert!(service.list("TEST", "", 10).await.is_err());
        assert!(service.list("TEST", "test", 0).await.is_err());
        assert!(service.remove("TEST", "test", 10, 0).await.is_err());
        assert_eq!(transport.call_count(), 0);
    }
}

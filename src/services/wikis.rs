//! Wiki page operations.

use tracing::debug;

use super::{call, ensure_id, project_segment, WikiAttachmentService};
use crate::api::options::apply_all;
use crate::api::{
    IdOrKey, Request, RequestParams, Result, Transport, Wiki, WikiCount, WikiOption,
};

/// Service for wiki pages.
pub struct WikiService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> WikiService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists the wiki pages of a project, optionally filtered by `keyword`.
    ///
    /// Listed pages carry no `content`; fetch a page with [`Self::one`] for it.
    pub async fn all(&self, project: impl Into<IdOrKey>, keyword: Option<&str>) -> Result<Vec<Wiki>> {
        let mut params = RequestParams::new();
        params.set("projectIdOrKey", project_segment(project)?);
        if let Some(keyword) = keyword.filter(|k| !k.is_empty()) {
            params.set("keyword", keyword);
        }

        let wikis: Vec<Wiki> = call(self.transport, Request::get("wikis", Some(params))).await?;
        debug!("Fetched {} wiki pages", wikis.len());
        Ok(wikis)
    }

    /// Counts the wiki pages of a project.
    pub async fn count(&self, project: impl Into<IdOrKey>) -> Result<usize> {
        let mut params = RequestParams::new();
        params.set("projectIdOrKey", project_segment(project)?);

        let count: WikiCount = call(self.transport, Request::get("wikis/count", Some(params))).await?;
        Ok(count.count)
    }

    /// Gets a wiki page, including its content.
    pub async fn one(&self, id: i64) -> Result<Wiki> {
        ensure_id("wikiId", id)?;
        call(self.transport, Request::get(format!("wikis/{}", id), None)).await
    }

    /// Creates a wiki page in the project with ID `project_id`.
    pub async fn create(
        &self,
        project_id: i64,
        name: &str,
        content: &str,
        options: &[WikiOption],
    ) -> Result<Wiki> {
        ensure_id("projectId", project_id)?;

        let mut params = RequestParams::new();
        params.set("projectId", project_id.to_string());
        apply_all(
            &mut params,
            &[WikiOption::name(name), WikiOption::content(content)],
        )?;
        apply_all(&mut params, options)?;

        call(self.transport, Request::post("wikis", params)).await
    }

    /// Updates a wiki page.
    pub async fn update(&self, id: i64, options: &[WikiOption]) -> Result<Wiki> {
        ensure_id("wikiId", id)?;

        let mut params = RequestParams::new();
        apply_all(&mut params, options)?;

        call(self.transport, Request::patch(format!("wikis/{}", id), params)).await
    }

    /// Deletes a wiki page. Only [`WikiOption::mail_notify`] has an effect.
    pub async fn delete(&self, id: i64, options: &[WikiOption]) -> Result<Wiki> {
        ensure_id("wikiId", id)?;

        let mut params = RequestParams::new();
        apply_all(&mut params, options)?;

        call(
            self.transport,
            Request::delete(format!("wikis/{}", id), Some(params)),
        )
        .await
    }

    pub fn attachments(&self) -> WikiAttachmentService<'a> {
        WikiAttachmentService::new(self.transport)
    }
}

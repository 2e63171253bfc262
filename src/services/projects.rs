//! Project operations.

use tracing::debug;

use super::{call, project_segment, ProjectUserService};
use crate::api::options::apply_all;
use crate::api::{IdOrKey, Project, ProjectOption, Request, RequestParams, Result, Transport};

pub struct ProjectService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> ProjectService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists projects.
    ///
    /// Accepts [`ProjectOption::archived`] and [`ProjectOption::all`].
    pub async fn all(&self, options: &[ProjectOption]) -> Result<Vec<Project>> {
        let mut params = RequestParams::new();
        apply_all(&mut params, options)?;

        let projects: Vec<Project> =
            call(self.transport, Request::get("projects", Some(params))).await?;
        debug!("Fetched {} projects", projects.len());
        Ok(projects)
    }

    /// Gets a project by ID or key.
    pub async fn one(&self, project: impl Into<IdOrKey>) -> Result<Project> {
        let path = format!("projects/{}", project_segment(project)?);
        call(self.transport, Request::get(path, None)).await
    }

    /// Creates a project. Administrators only.
    ///
    /// `key` and `name` are required; `options` may set the chart, subtasking,
    /// leader and formatting flags.
    pub async fn create(&self, key: &str, name: &str, options: &[ProjectOption]) -> Result<Project> {
        let mut params = RequestParams::new();
        apply_all(
            &mut params,
            &[ProjectOption::key(key), ProjectOption::name(name)],
        )?;
        apply_all(&mut params, options)?;

        call(self.transport, Request::post("projects", params)).await
    }

    /// Updates a project.
    pub async fn update(
        &self,
        project: impl Into<IdOrKey>,
        options: &[ProjectOption],
    ) -> Result<Project> {
        let path = format!("projects/{}", project_segment(project)?);

        let mut params = RequestParams::new();
        apply_all(&mut params, options)?;

        call(self.transport, Request::patch(path, params)).await
    }

    /// Deletes a project and returns it as it was.
    pub async fn delete(&self, project: impl Into<IdOrKey>) -> Result<Project> {
        let path = format!("projects/{}", project_segment(project)?);
        call(self.transport, Request::delete(path, None)).await
    }

    /// Members and administrators of projects.
    pub fn users(&self) -> ProjectUserService<'a> {
        ProjectUserService::new(self.transport)
    }
}

//! Activity streams of the space, a project, or a user.

use tracing::debug;

use super::{call, ensure_id, project_segment};
use crate::api::options::apply_all;
use crate::api::{Activity, ActivityOption, IdOrKey, Request, RequestParams, Result, Transport};

pub struct ActivityService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> ActivityService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Recent updates across the whole space.
    pub async fn space(&self, options: &[ActivityOption]) -> Result<Vec<Activity>> {
        self.fetch("space/activities".to_string(), options).await
    }

    /// Recent updates in a project.
    pub async fn project(
        &self,
        project: impl Into<IdOrKey>,
        options: &[ActivityOption],
    ) -> Result<Vec<Activity>> {
        let path = format!("projects/{}/activities", project_segment(project)?);
        self.fetch(path, options).await
    }

    /// Recent updates made by a user.
    pub async fn user(&self, id: i64, options: &[ActivityOption]) -> Result<Vec<Activity>> {
        ensure_id("userId", id)?;
        self.fetch(format!("users/{}/activities", id), options).await
    }

    async fn fetch(&self, path: String, options: &[ActivityOption]) -> Result<Vec<Activity>> {
        let mut params = RequestParams::new();
        apply_all(&mut params, options)?;

        let activities: Vec<Activity> = call(self.transport, Request::get(path, Some(params))).await?;
        debug!("Fetched {} activities", activities.len());
        Ok(activities)
    }
}

//! User operations.

use tracing::debug;

use super::{call, ensure_id, ensure_non_empty, project_segment};
use crate::api::options::apply_all;
use crate::api::{IdOrKey, Request, RequestParams, Result, Transport, User, UserOption};

/// Service for space users.
pub struct UserService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> UserService<'a> {
    /// Creates a new users service.
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists every user in the space.
    pub async fn all(&self) -> Result<Vec<User>> {
        let users: Vec<User> = call(self.transport, Request::get("users", None)).await?;
        debug!("Fetched {} users", users.len());
        Ok(users)
    }

    /// Gets a user by numeric ID.
    pub async fn one(&self, id: i64) -> Result<User> {
        ensure_id("id", id)?;
        call(self.transport, Request::get(format!("users/{}", id), None)).await
    }

    /// Gets the user the credentials belong to.
    pub async fn own(&self) -> Result<User> {
        call(self.transport, Request::get("users/myself", None)).await
    }

    /// Adds a user to the space. Administrators only.
    ///
    /// Every argument is required; `role` accepts a [`Role`](crate::api::Role)
    /// or its integer value.
    pub async fn add(
        &self,
        user_id: &str,
        password: &str,
        name: &str,
        mail_address: &str,
        role: impl Into<i64>,
    ) -> Result<User> {
        ensure_non_empty("userId", user_id)?;

        let mut params = RequestParams::new();
        params.set("userId", user_id);
        apply_all(
            &mut params,
            &[
                UserOption::password(password),
                UserOption::name(name),
                UserOption::mail_address(mail_address),
                UserOption::role_type(role),
            ],
        )?;

        call(self.transport, Request::post("users", params)).await
    }

    /// Updates a user. Administrators only.
    pub async fn update(&self, id: i64, options: &[UserOption]) -> Result<User> {
        ensure_id("id", id)?;

        let mut params = RequestParams::new();
        apply_all(&mut params, options)?;

        call(self.transport, Request::patch(format!("users/{}", id), params)).await
    }

    /// Deletes a user from the space. Administrators only.
    pub async fn delete(&self, id: i64) -> Result<User> {
        ensure_id("id", id)?;
        call(self.transport, Request::delete(format!("users/{}", id), None)).await
    }
}

/// Service for the members and administrators of a project.
pub struct ProjectUserService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> ProjectUserService<'a> {
    /// Creates a new project users service.
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists the members of a project.
    pub async fn all(
        &self,
        project: impl Into<IdOrKey>,
        exclude_group_members: bool,
    ) -> Result<Vec<User>> {
        let project = project_segment(project)?;

        let mut params = RequestParams::new();
        params.set("excludeGroupMembers", exclude_group_members.to_string());

        call(
            self.transport,
            Request::get(format!("projects/{}/users", project), Some(params)),
        )
        .await
    }

    /// Adds a user to a project.
    pub async fn add(&self, project: impl Into<IdOrKey>, user_id: i64) -> Result<User> {
        let path = format!("projects/{}/users", project_segment(project)?);
        call(self.transport, Request::post(path, user_params(user_id)?)).await
    }

    /// Removes a user from a project.
    pub async fn delete(&self, project: impl Into<IdOrKey>, user_id: i64) -> Result<User> {
        let path = format!("projects/{}/users", project_segment(project)?);
        call(self.transport, Request::delete(path, Some(user_params(user_id)?))).await
    }

    /// Makes a project member a project administrator.
    pub async fn add_admin(&self, project: impl Into<IdOrKey>, user_id: i64) -> Result<User> {
        let path = format!("projects/{}/administrators", project_segment(project)?);
        call(self.transport, Request::post(path, user_params(user_id)?)).await
    }

    /// Lists the administrators of a project.
    pub async fn admin_all(&self, project: impl Into<IdOrKey>) -> Result<Vec<User>> {
        let path = format!("projects/{}/administrators", project_segment(project)?);
        call(self.transport, Request::get(path, None)).await
    }

    /// Revokes a user's project administrator role.
    pub async fn delete_admin(&self, project: impl Into<IdOrKey>, user_id: i64) -> Result<User> {
        let path = format!("projects/{}/administrators", project_segment(project)?);
        call(self.transport, Request::delete(path, Some(user_params(user_id)?))).await
    }
}

fn user_params(user_id: i64) -> std::result::Result<RequestParams, crate::api::ValidationError> {
    ensure_id("userId", user_id)?;
    let mut params = RequestParams::new();
    params.set("userId", user_id.to_string());
    Ok(params)
}

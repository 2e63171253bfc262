//! Functional options for request parameters.
//!
//! Each option validates one caller-supplied value and, on success, writes
//! exactly one key into a [`RequestParams`]. A rejected value leaves the
//! container untouched. Options are scoped to the resource family that
//! accepts them, so a wiki option cannot be passed to a user endpoint.
//!
//! ```
//! use backlog::api::{ActivityOption, Order, RequestParams};
//!
//! let mut params = RequestParams::new();
//! ActivityOption::min_id(5).apply(&mut params).unwrap();
//! ActivityOption::order(Order::Desc).apply(&mut params).unwrap();
//! assert_eq!(params.get("minId"), Some("5"));
//!
//! assert!(ActivityOption::count(101).apply(&mut params).is_err());
//! assert!(!params.contains("count"));
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::error::ValidationError;
use super::params::RequestParams;
use super::types::{Format, Order, Role};

/// Smallest activity type ID Backlog defines.
pub const MIN_ACTIVITY_TYPE_ID: i64 = 1;

/// Largest activity type ID Backlog defines.
pub const MAX_ACTIVITY_TYPE_ID: i64 = 26;

/// Largest page size accepted by list endpoints.
pub const MAX_COUNT: i64 = 100;

type Setter = dyn Fn(&mut RequestParams) -> Result<(), ValidationError> + Send + Sync;

/// A validating setter for one request parameter.
///
/// `S` is a marker naming the resource family the option belongs to.
pub struct RequestOption<S> {
    setter: Box<Setter>,
    _scope: PhantomData<fn() -> S>,
}

impl<S> RequestOption<S> {
    fn new<F>(setter: F) -> Self
    where
        F: Fn(&mut RequestParams) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self {
            setter: Box::new(setter),
            _scope: PhantomData,
        }
    }

    /// Validate the option's value and write it into `params`.
    pub fn apply(&self, params: &mut RequestParams) -> Result<(), ValidationError> {
        (self.setter)(params)
    }
}

impl<S> fmt::Debug for RequestOption<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOption")
            .field("scope", &std::any::type_name::<S>())
            .finish_non_exhaustive()
    }
}

/// Apply `options` in order, stopping at the first rejected one.
pub(crate) fn apply_all<S>(
    params: &mut RequestParams,
    options: &[RequestOption<S>],
) -> Result<(), ValidationError> {
    options.iter().try_for_each(|option| option.apply(params))
}

/// Marker for options accepted by activity endpoints.
#[derive(Debug)]
pub enum ActivityScope {}

/// Marker for options accepted by project endpoints.
#[derive(Debug)]
pub enum ProjectScope {}

/// Marker for options accepted by user endpoints.
#[derive(Debug)]
pub enum UserScope {}

/// Marker for options accepted by wiki endpoints.
#[derive(Debug)]
pub enum WikiScope {}

pub type ActivityOption = RequestOption<ActivityScope>;
pub type ProjectOption = RequestOption<ProjectScope>;
pub type UserOption = RequestOption<UserScope>;
pub type WikiOption = RequestOption<WikiScope>;

fn set_positive(params: &mut RequestParams, key: &str, value: i64) -> Result<(), ValidationError> {
    if value < 1 {
        return Err(ValidationError::not_positive(key, value));
    }
    params.set(key, value.to_string());
    Ok(())
}

fn set_non_empty(params: &mut RequestParams, key: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty(key));
    }
    params.set(key, value);
    Ok(())
}

fn set_bool(params: &mut RequestParams, key: &str, value: bool) -> Result<(), ValidationError> {
    params.set(key, value.to_string());
    Ok(())
}

impl RequestOption<ActivityScope> {
    /// Filter by activity types. Every ID must be between 1 and 26.
    ///
    /// An empty list writes nothing. One bad ID rejects the whole list.
    pub fn activity_type_ids(ids: &[i64]) -> Self {
        let ids = ids.to_vec();
        Self::new(move |params| {
            if let Some(bad) = ids
                .iter()
                .find(|id| !(MIN_ACTIVITY_TYPE_ID..=MAX_ACTIVITY_TYPE_ID).contains(*id))
            {
                return Err(ValidationError::new(
                    "activityTypeId[]",
                    format!(
                        "must be between {} and {}, got {}",
                        MIN_ACTIVITY_TYPE_ID, MAX_ACTIVITY_TYPE_ID, bad
                    ),
                ));
            }
            for id in &ids {
                params.add("activityTypeId[]", id.to_string());
            }
            Ok(())
        })
    }

    /// Only return activities with an ID of at least `id`.
    pub fn min_id(id: i64) -> Self {
        Self::new(move |params| set_positive(params, "minId", id))
    }

    /// Only return activities with an ID of at most `id`.
    pub fn max_id(id: i64) -> Self {
        Self::new(move |params| set_positive(params, "maxId", id))
    }

    /// Number of activities to return, 1 to 100.
    pub fn count(count: i64) -> Self {
        Self::new(move |params| {
            if !(1..=MAX_COUNT).contains(&count) {
                return Err(ValidationError::new(
                    "count",
                    format!("must be between 1 and {}, got {}", MAX_COUNT, count),
                ));
            }
            params.set("count", count.to_string());
            Ok(())
        })
    }

    /// Sort order, `asc` or `desc`.
    pub fn order(order: impl AsRef<str>) -> Self {
        let order = order.as_ref().to_string();
        Self::new(move |params| {
            let order: Order = order.parse()?;
            params.set("order", order.as_ref());
            Ok(())
        })
    }
}

impl RequestOption<ProjectScope> {
    /// The project key.
    pub fn key(key: &str) -> Self {
        let key = key.to_string();
        Self::new(move |params| set_non_empty(params, "key", &key))
    }

    /// The project name.
    pub fn name(name: &str) -> Self {
        let name = name.to_string();
        Self::new(move |params| set_non_empty(params, "name", &name))
    }

    pub fn chart_enabled(enabled: bool) -> Self {
        Self::new(move |params| set_bool(params, "chartEnabled", enabled))
    }

    pub fn subtasking_enabled(enabled: bool) -> Self {
        Self::new(move |params| set_bool(params, "subtaskingEnabled", enabled))
    }

    pub fn project_leader_can_edit_project_leader(enabled: bool) -> Self {
        Self::new(move |params| set_bool(params, "projectLeaderCanEditProjectLeader", enabled))
    }

    /// Text formatting rule, `backlog` or `markdown`.
    pub fn text_formatting_rule(format: impl AsRef<str>) -> Self {
        let format = format.as_ref().to_string();
        Self::new(move |params| {
            let format: Format = format.parse()?;
            params.set("textFormattingRule", format.as_ref());
            Ok(())
        })
    }

    pub fn archived(archived: bool) -> Self {
        Self::new(move |params| set_bool(params, "archived", archived))
    }

    /// List every project in the space instead of only the joined ones.
    /// Administrators only.
    pub fn all(all: bool) -> Self {
        Self::new(move |params| set_bool(params, "all", all))
    }
}

impl RequestOption<UserScope> {
    pub fn password(password: &str) -> Self {
        let password = password.to_string();
        Self::new(move |params| set_non_empty(params, "password", &password))
    }

    pub fn name(name: &str) -> Self {
        let name = name.to_string();
        Self::new(move |params| set_non_empty(params, "name", &name))
    }

    pub fn mail_address(mail_address: &str) -> Self {
        let mail_address = mail_address.to_string();
        Self::new(move |params| set_non_empty(params, "mailAddress", &mail_address))
    }

    /// The user's role. Accepts a [`Role`] or its raw integer value.
    pub fn role_type(role: impl Into<i64>) -> Self {
        let role = role.into();
        Self::new(move |params| {
            let role = Role::try_from(role)?;
            params.set("roleType", i64::from(role).to_string());
            Ok(())
        })
    }
}

impl RequestOption<WikiScope> {
    /// The page name.
    pub fn name(name: &str) -> Self {
        let name = name.to_string();
        Self::new(move |params| set_non_empty(params, "name", &name))
    }

    /// The page body.
    pub fn content(content: &str) -> Self {
        let content = content.to_string();
        Self::new(move |params| set_non_empty(params, "content", &content))
    }

    /// Whether to notify project members by mail.
    pub fn mail_notify(enabled: bool) -> Self {
        Self::new(move |params| set_bool(params, "mailNotify", enabled))
    }
}

//! Backlog API request and response types.
//!
//! These types model the Backlog REST API v2 responses. Field names follow
//! the API's camelCase on the wire; fields Backlog may omit are optional.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// A user's role within the space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    Administrator = 1,
    NormalUser = 2,
    Reporter = 3,
    Viewer = 4,
    GuestReporter = 5,
    GuestViewer = 6,
}

impl TryFrom<i64> for Role {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Administrator),
            2 => Ok(Role::NormalUser),
            3 => Ok(Role::Reporter),
            4 => Ok(Role::Viewer),
            5 => Ok(Role::GuestReporter),
            6 => Ok(Role::GuestViewer),
            _ => Err(ValidationError::new(
                "roleType",
                format!("must be between 1 and 6, got {}", value),
            )),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role as i64
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Administrator => "Administrator",
            Role::NormalUser => "Normal User",
            Role::Reporter => "Reporter",
            Role::Viewer => "Viewer",
            Role::GuestReporter => "Guest Reporter",
            Role::GuestViewer => "Guest Viewer",
        };
        f.write_str(name)
    }
}

/// Sort order for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl AsRef<str> for Order {
    fn as_ref(&self) -> &str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl FromStr for Order {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(ValidationError::new(
                "order",
                format!("must be 'asc' or 'desc', got '{}'", s),
            )),
        }
    }
}

/// Text formatting rule of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Backlog,
    Markdown,
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        match self {
            Format::Backlog => "backlog",
            Format::Markdown => "markdown",
        }
    }
}

impl FromStr for Format {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(Format::Backlog),
            "markdown" => Ok(Format::Markdown),
            _ => Err(ValidationError::new(
                "textFormattingRule",
                format!("must be 'backlog' or 'markdown', got '{}'", s),
            )),
        }
    }
}

/// A resource addressed either by its numeric ID or by its key.
///
/// Projects accept `"TEST"` or `1234`; issues accept `"TEST-1"` or `5678`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrKey {
    Id(i64),
    Key(String),
}

impl IdOrKey {
    /// Validate and render the value as a path segment.
    pub(crate) fn segment(&self, field: &str) -> Result<String, ValidationError> {
        match self {
            IdOrKey::Id(id) if *id < 1 => Err(ValidationError::not_positive(field, *id)),
            IdOrKey::Id(id) => Ok(id.to_string()),
            IdOrKey::Key(key) => path_segment(field, key),
        }
    }
}

/// Percent-encode a caller-supplied value for use as one path segment.
///
/// `/`, `?` and `#` are escaped so the value cannot leave its segment. `.`
/// and `..` are rejected outright since URL parsing resolves them even when
/// encoded.
pub(crate) fn path_segment(field: &str, value: &str) -> Result<String, ValidationError> {
    match value {
        "" => Err(ValidationError::empty(field)),
        "." | ".." => Err(ValidationError::new(
            field,
            format!("must not be a relative path segment, got '{}'", value),
        )),
        _ => Ok(urlencoding::encode(value).into_owned()),
    }
}

impl From<i64> for IdOrKey {
    fn from(id: i64) -> Self {
        IdOrKey::Id(id)
    }
}

impl From<&str> for IdOrKey {
    fn from(key: &str) -> Self {
        IdOrKey::Key(key.to_string())
    }
}

impl From<String> for IdOrKey {
    fn from(key: String) -> Self {
        IdOrKey::Key(key)
    }
}

impl fmt::Display for IdOrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdOrKey::Id(id) => write!(f, "{}", id),
            IdOrKey::Key(key) => f.write_str(key),
        }
    }
}

/// The space the API key belongs to.
///
/// Returned by `GET /api/v2/space`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    /// The space key (the subdomain).
    pub space_key: String,
    /// The space name.
    pub name: String,
    /// The user ID of the space owner.
    pub owner_id: i64,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    pub text_formatting_rule: Format,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

/// A Backlog user.
///
/// Returned by `GET /api/v2/users/{userId}` and embedded in most resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The numeric user ID.
    pub id: i64,
    /// The login account name. Absent for some bot users.
    #[serde(default)]
    pub user_id: Option<String>,
    /// The display name.
    pub name: String,
    /// The user's role in the space.
    pub role_type: Role,
    /// Preferred language, e.g. "ja" or "en".
    #[serde(default)]
    pub lang: Option<String>,
    /// The user's email address.
    #[serde(default)]
    pub mail_address: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A file attached to a space, wiki, issue or pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// The attachment ID.
    pub id: i64,
    /// The file name.
    pub name: String,
    /// The file size in bytes.
    pub size: u64,
    /// Who uploaded the file.
    #[serde(default)]
    pub created_user: Option<User>,
    /// When the file was uploaded.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// A Backlog project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The project ID.
    pub id: i64,
    /// The project key (e.g., "TEST").
    pub project_key: String,
    /// The project name.
    pub name: String,
    /// Whether the burndown chart is enabled.
    #[serde(default)]
    pub chart_enabled: bool,
    /// Whether subtasking is enabled.
    #[serde(default)]
    pub subtasking_enabled: bool,
    /// Whether project administrators can edit the project leader.
    #[serde(default)]
    pub project_leader_can_edit_project_leader: bool,
    /// The text formatting rule.
    pub text_formatting_rule: Format,
    /// Whether the project is archived.
    #[serde(default)]
    pub archived: bool,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.project_key, self.name)
    }
}

/// A wiki tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A wiki page.
///
/// `GET /api/v2/wikis` omits `content`; `GET /api/v2/wikis/{wikiId}` includes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wiki {
    /// The wiki page ID.
    pub id: i64,
    /// The ID of the owning project.
    pub project_id: i64,
    /// The page name.
    pub name: String,
    /// The page body.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub created_user: Option<User>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_user: Option<User>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

/// Response of `GET /api/v2/wikis/count`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WikiCount {
    pub count: usize,
}

/// A Backlog issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// The issue ID.
    pub id: i64,
    /// The ID of the owning project.
    pub project_id: i64,
    /// The issue key (e.g., "TEST-1").
    pub issue_key: String,
    /// The sequence number within the project.
    pub key_id: i64,
    /// The issue summary/title.
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub created_user: Option<User>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.issue_key, self.summary)
    }
}

/// A pull request of a Git repository hosted in Backlog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: i64,
    pub project_id: i64,
    pub repository_id: i64,
    /// The pull request number within the repository.
    pub number: i64,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The branch to merge into.
    pub base: String,
    /// The branch to merge from.
    pub branch: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub created_user: Option<User>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// An entry of an activity stream.
///
/// The shape of `content` depends on the activity type, so it is kept as
/// raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// The activity ID.
    pub id: i64,
    /// The project the activity happened in.
    #[serde(default)]
    pub project: Option<Project>,
    /// The activity type, 1 to 26.
    #[serde(rename = "type")]
    pub activity_type: i64,
    /// Type-specific payload.
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub created_user: Option<User>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

//! Async client for the Backlog project management REST API (v2).
//!
//! ```no_run
//! use backlog::api::{ActivityOption, Order};
//! use backlog::BacklogClient;
//!
//! # async fn run() -> Result<(), backlog::api::ApiError> {
//! let client = BacklogClient::with_api_key("https://example.backlog.com", "api-key")?;
//!
//! let me = client.users().own().await?;
//! let activities = client
//!     .activities()
//!     .user(me.id, &[ActivityOption::count(20), ActivityOption::order(Order::Desc)])
//!     .await?;
//! println!("{} recent activities", activities.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod services;

pub use api::BacklogClient;
pub use error::{Error, Result};

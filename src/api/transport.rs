//! HTTP transport for the Backlog client.
//!
//! Services never talk to `reqwest` directly. They describe a [`Request`] and
//! hand it to a [`Transport`], which performs the call and returns the raw
//! response body. [`HttpTransport`] is the production implementation.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, multipart, Client, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::params::RequestParams;
use crate::config::DEFAULT_TIMEOUT_SECS;

/// Path prefix of the v2 REST API.
const API_PREFIX: &str = "/api/v2";

/// Performs HTTP calls on behalf of the resource services.
///
/// Implementations must be safe to share between tasks; the client does not
/// serialize calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response body of a successful call.
    async fn send(&self, request: Request) -> Result<Bytes>;
}

/// A file to send as `multipart/form-data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Where to read the file from.
    pub path: PathBuf,
    /// The file name reported to Backlog.
    pub file_name: String,
}

/// What a request carries besides its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    /// Query string for `GET`, form body otherwise.
    Params(RequestParams),
    File(FileUpload),
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Path below `/api/v2/`, without a leading slash (e.g. `users/myself`).
    pub path: String,
    pub payload: Payload,
}

impl Request {
    fn new(method: Method, path: impl Into<String>, payload: Payload) -> Self {
        Self {
            method,
            path: path.into(),
            payload,
        }
    }

    /// A `GET` request, optionally with query parameters.
    pub fn get(path: impl Into<String>, params: Option<RequestParams>) -> Self {
        let payload = params.map_or(Payload::None, Payload::Params);
        Self::new(Method::GET, path, payload)
    }

    /// A `POST` request with a form body.
    pub fn post(path: impl Into<String>, params: RequestParams) -> Self {
        Self::new(Method::POST, path, Payload::Params(params))
    }

    /// A `PATCH` request with a form body.
    pub fn patch(path: impl Into<String>, params: RequestParams) -> Self {
        Self::new(Method::PATCH, path, Payload::Params(params))
    }

    /// A `DELETE` request, optionally with a form body.
    pub fn delete(path: impl Into<String>, params: Option<RequestParams>) -> Self {
        let payload = params.map_or(Payload::None, Payload::Params);
        Self::new(Method::DELETE, path, payload)
    }

    /// A multipart `POST` uploading one file.
    pub fn upload(path: impl Into<String>, file: FileUpload) -> Self {
        Self::new(Method::POST, path, Payload::File(file))
    }

    /// The request parameters, if the request carries any.
    pub fn params(&self) -> Option<&RequestParams> {
        match &self.payload {
            Payload::Params(params) => Some(params),
            _ => None,
        }
    }
}

/// Error body returned by Backlog for failed calls.
#[derive(Debug, serde::Deserialize)]
struct BacklogErrorResponse {
    #[serde(default)]
    errors: Vec<BacklogErrorDetail>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct BacklogErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    more_info: Option<String>,
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The HTTP client.
    client: Client,
    /// Base URL ending in `/api/v2`.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl HttpTransport {
    /// Create a transport for a space URL such as `https://example.backlog.com`.
    pub fn new(space_url: &str, auth: Auth) -> Result<Self> {
        Self::with_timeout(space_url, auth, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a transport with an explicit request timeout.
    pub fn with_timeout(space_url: &str, auth: Auth, timeout: Duration) -> Result<Self> {
        if !space_url.starts_with("https://") && !space_url.starts_with("http://") {
            return Err(ApiError::InvalidUrl(space_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(space_url),
            auth,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = match self.auth.query_pair() {
            Some(pair) => builder.query(&[pair]),
            None => builder,
        };
        match self.auth.header_value() {
            Some(value) => builder.header(header::AUTHORIZATION, value),
            None => builder,
        }
    }

    async fn build(&self, request: &Request) -> Result<RequestBuilder> {
        let builder = self
            .client
            .request(request.method.clone(), self.url(&request.path))
            .header(header::ACCEPT, "application/json");
        let builder = self.authorize(builder);

        let builder = match &request.payload {
            Payload::None => builder,
            Payload::Params(params) if request.method == Method::GET => {
                builder.query(&params.to_pairs())
            }
            Payload::Params(params) => builder.form(&params.to_pairs()),
            Payload::File(file) => {
                let data = tokio::fs::read(&file.path).await?;
                let part = multipart::Part::bytes(data).file_name(file.file_name.clone());
                builder.multipart(multipart::Form::new().part("file", part))
            }
        };

        Ok(builder)
    }

    /// Check the status and return the body of a successful response.
    async fn handle_response(response: Response, path: &str) -> Result<Bytes> {
        let status = response.status();

        if status.is_success() {
            Ok(response.bytes().await?)
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, path, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// The URL is left out of the context because it carries the API key.
    fn error_from_response(status: StatusCode, path: &str, body: &str) -> ApiError {
        if let Ok(parsed) = serde_json::from_str::<BacklogErrorResponse>(body) {
            if !parsed.errors.is_empty() {
                let messages: Vec<String> = parsed
                    .errors
                    .iter()
                    .map(|e| match (&e.code, e.more_info.as_deref()) {
                        (Some(code), Some(info)) if !info.is_empty() => {
                            format!("{} (code {}, {})", e.message, code, info)
                        }
                        (Some(code), _) => format!("{} (code {})", e.message, code),
                        (None, _) => e.message.clone(),
                    })
                    .collect();
                return ApiError::from_status(status, &messages.join(", "));
            }
        }

        ApiError::from_status(status, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: Request) -> Result<Bytes> {
        debug!("Sending request");

        let response = self.build(&request).await?.send().await?;
        let body = Self::handle_response(response, &request.path).await?;

        debug!(bytes = body.len(), "Received response");
        Ok(body)
    }
}

/// Normalize a space URL into the API base URL.
///
/// Trailing slashes are removed and `/api/v2` is appended unless present.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    if url.ends_with(API_PREFIX) {
        url.to_string()
    } else {
        format!("{}{}", url, API_PREFIX)
    }
}

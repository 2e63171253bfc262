//! Closure-backed transport for unit tests.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use super::error::{ApiError, Result};
use super::transport::{Request, Transport};

type Handler = dyn Fn(&Request) -> Result<Bytes> + Send + Sync;

/// Records every request and answers through a handler.
pub(crate) struct MockTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Request) -> Result<Bytes> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `body`.
    pub fn json(body: &str) -> Self {
        let body = Bytes::from(body.to_string());
        Self::new(move |_| Ok(body.clone()))
    }

    /// Answer every request with a file from `testdata/json`.
    pub fn fixture(name: &str) -> Self {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("testdata")
            .join("json")
            .join(name);
        let body = std::fs::read(&path)
            .unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e));
        let body = Bytes::from(body);
        Self::new(move |_| Ok(body.clone()))
    }

    /// Fail every request as a transport error would.
    pub fn failing() -> Self {
        Self::new(|_| Err(ApiError::ServerError("error".to_string())))
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Request {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("transport was never called")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Bytes> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

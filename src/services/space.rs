use super::{call, SpaceAttachmentService};
use crate::api::{Request, Result, Space, Transport};

/// The space itself.
pub struct SpaceService<'a> {
    transport: &'a dyn Transport,
}

impl<'a> SpaceService<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Get information about the space.
    pub async fn one(&self) -> Result<Space> {
        call(self.transport, Request::get("space", None)).await
    }

    pub fn attachments(&self) -> SpaceAttachmentService<'a> {
        SpaceAttachmentService::new(self.transport)
    }
}

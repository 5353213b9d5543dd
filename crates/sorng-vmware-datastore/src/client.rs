//! vim25 client handle: a transport plus the service content of its session.

use crate::error::{VmwareError, VmwareResult};
use crate::methods;
use crate::soap::RoundTripper;
use crate::types::{ManagedObjectReference, RetrieveServiceContent, ServiceContent};

use log::info;
use std::sync::Arc;

/// Shared client used by the object managers.
pub struct VimClient {
    transport: Arc<dyn RoundTripper>,
    service_content: ServiceContent,
}

impl VimClient {
    /// Wrap a transport whose service content is already known.
    pub fn new(transport: Arc<dyn RoundTripper>, service_content: ServiceContent) -> Self {
        Self { transport, service_content }
    }

    /// Fetch the service content over `transport` and build a client from it.
    pub async fn connect(transport: Arc<dyn RoundTripper>) -> VmwareResult<Self> {
        let request = RetrieveServiceContent {
            this: ManagedObjectReference::new("ServiceInstance", "ServiceInstance"),
        };
        let content = methods::retrieve_service_content(transport.as_ref(), &request).await?;
        info!(
            "Connected to {} (API {})",
            content.about.full_name, content.about.api_version
        );
        Ok(Self::new(transport, content))
    }

    pub fn transport(&self) -> &dyn RoundTripper {
        self.transport.as_ref()
    }

    pub fn service_content(&self) -> &ServiceContent {
        &self.service_content
    }

    /// The session's `FileManager` reference.
    pub fn file_manager_ref(&self) -> VmwareResult<ManagedObjectReference> {
        self.service_content
            .file_manager
            .clone()
            .ok_or_else(|| VmwareError::not_found("Endpoint does not expose a FileManager"))
    }
}

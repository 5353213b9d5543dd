//! Shared types for the vSphere datastore file manager.

use crate::error::{VmwareError, VmwareResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Connection / Config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Configuration for talking to the vim25 SDK endpoint of a vCenter / ESXi host.
///
/// The session itself is established elsewhere; this only carries the
/// cookie of an existing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VsphereConfig {
    /// vCenter or ESXi hostname / IP (e.g. "vcenter.lab.local")
    pub host: String,
    /// Port (default 443)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Skip TLS certificate verification (self-signed labs)
    #[serde(default)]
    pub insecure: bool,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// vim25 API version sent in the SOAPAction header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Value of an established `vmware_soap_session` cookie
    #[serde(default)]
    pub session_cookie: Option<String>,
}

fn default_port() -> u16 { 443 }
fn default_timeout() -> u64 { 30 }
fn default_api_version() -> String { "6.0".to_string() }

impl Default for VsphereConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 443,
            insecure: false,
            timeout_secs: 30,
            api_version: default_api_version(),
            session_cookie: None,
        }
    }
}

impl VsphereConfig {
    /// SDK endpoint URL (`https://{host}:{port}/sdk`).
    pub fn sdk_url(&self) -> VmwareResult<Url> {
        if self.host.is_empty() {
            return Err(VmwareError::connection("No vSphere host configured"));
        }
        // IPv6 literals need brackets in the authority
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let raw = format!("https://{}:{}/sdk", host, self.port);
        Url::parse(&raw).map_err(|e| VmwareError::connection(format!("Invalid SDK URL {raw}: {e}")))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Managed object references
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// vim25 managed object reference, e.g. `<_this type="FileManager">FileManager</_this>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ManagedObjectReference {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "$text")]
    pub value: String,
}

impl ManagedObjectReference {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self { kind: kind.into(), value: value.into() }
    }
}

impl fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Anything that resolves to a managed object reference.
pub trait Reference {
    fn reference(&self) -> ManagedObjectReference;
}

impl Reference for ManagedObjectReference {
    fn reference(&self) -> ManagedObjectReference {
        self.clone()
    }
}

/// Datacenter used to scope datastore paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datacenter {
    reference: ManagedObjectReference,
    inventory_path: Option<String>,
}

impl Datacenter {
    /// Datacenter with the given managed-object ID (e.g. "datacenter-2").
    pub fn new(id: impl Into<String>) -> Self {
        Self::from_reference(ManagedObjectReference::new("Datacenter", id))
    }

    pub fn from_reference(reference: ManagedObjectReference) -> Self {
        Self { reference, inventory_path: None }
    }

    pub fn with_inventory_path(mut self, path: impl Into<String>) -> Self {
        self.inventory_path = Some(path.into());
        self
    }

    /// Inventory path (e.g. "/DC1"), if known.
    pub fn inventory_path(&self) -> Option<&str> {
        self.inventory_path.as_deref()
    }
}

/// Inventory path when known, otherwise the managed-object reference.
impl fmt::Display for Datacenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inventory_path {
            Some(ref path) => f.write_str(path),
            None => fmt::Display::fmt(&self.reference, f),
        }
    }
}

impl Reference for Datacenter {
    fn reference(&self) -> ManagedObjectReference {
        self.reference.clone()
    }
}

/// Handle to an asynchronously executing remote operation.
///
/// Progress tracking belongs to the caller; the handle only names the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    reference: ManagedObjectReference,
}

impl Task {
    pub fn new(reference: ManagedObjectReference) -> Self {
        Self { reference }
    }

    /// Task managed-object ID (e.g. "task-1042").
    pub fn id(&self) -> &str {
        &self.reference.value
    }
}

impl Reference for Task {
    fn reference(&self) -> ManagedObjectReference {
        self.reference.clone()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reference, f)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Service content
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Subset of the vim25 `ServiceContent` used here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceContent {
    /// `fileManager` reference; absent on endpoints that do not expose one.
    pub file_manager: Option<ManagedObjectReference>,
    pub about: AboutInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutInfo {
    pub full_name: String,
    pub api_version: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Requests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A vim25 method request that can be placed in a SOAP body.
pub trait VimRequest: Serialize {
    /// Remote method name; also the root element of the body.
    const METHOD: &'static str;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "RetrieveServiceContent")]
pub struct RetrieveServiceContent {
    #[serde(rename = "_this")]
    pub this: ManagedObjectReference,
}

impl VimRequest for RetrieveServiceContent {
    const METHOD: &'static str = "RetrieveServiceContent";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "CopyDatastoreFile_Task", rename_all = "camelCase")]
pub struct CopyDatastoreFileTask {
    #[serde(rename = "_this")]
    pub this: ManagedObjectReference,
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_datacenter: Option<ManagedObjectReference>,
    pub destination_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_datacenter: Option<ManagedObjectReference>,
    pub force: bool,
}

impl VimRequest for CopyDatastoreFileTask {
    const METHOD: &'static str = "CopyDatastoreFile_Task";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "DeleteDatastoreFile_Task", rename_all = "camelCase")]
pub struct DeleteDatastoreFileTask {
    #[serde(rename = "_this")]
    pub this: ManagedObjectReference,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<ManagedObjectReference>,
}

impl VimRequest for DeleteDatastoreFileTask {
    const METHOD: &'static str = "DeleteDatastoreFile_Task";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "MakeDirectory", rename_all = "camelCase")]
pub struct MakeDirectory {
    #[serde(rename = "_this")]
    pub this: ManagedObjectReference,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<ManagedObjectReference>,
    pub create_parent_directories: bool,
}

impl VimRequest for MakeDirectory {
    const METHOD: &'static str = "MakeDirectory";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "MoveDatastoreFile_Task", rename_all = "camelCase")]
pub struct MoveDatastoreFileTask {
    #[serde(rename = "_this")]
    pub this: ManagedObjectReference,
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_datacenter: Option<ManagedObjectReference>,
    pub destination_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_datacenter: Option<ManagedObjectReference>,
    pub force: bool,
}

impl VimRequest for MoveDatastoreFileTask {
    const METHOD: &'static str = "MoveDatastoreFile_Task";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_json() {
        let config: VsphereConfig =
            serde_json::from_str(r#"{"host":"vcenter.lab.local"}"#).unwrap();
        assert_eq!(config.port, 443);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_version, "6.0");
        assert!(!config.insecure);
        assert!(config.session_cookie.is_none());
    }

    #[test]
    fn test_config_camel_case_fields() {
        let config: VsphereConfig = serde_json::from_str(
            r#"{"host":"esx01","port":8443,"timeoutSecs":5,"sessionCookie":"\"abc\""}"#,
        )
        .unwrap();
        assert_eq!(config.port, 8443);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.session_cookie.as_deref(), Some("\"abc\""));
    }

    #[test]
    fn test_sdk_url() {
        let config = VsphereConfig { host: "vcenter.lab.local".into(), ..Default::default() };
        assert_eq!(config.sdk_url().unwrap().as_str(), "https://vcenter.lab.local/sdk");

        let config = VsphereConfig { host: "10.0.0.5".into(), port: 8443, ..Default::default() };
        assert_eq!(config.sdk_url().unwrap().as_str(), "https://10.0.0.5:8443/sdk");
    }

    #[test]
    fn test_sdk_url_ipv6() {
        let config = VsphereConfig { host: "fd00::5".into(), ..Default::default() };
        assert_eq!(config.sdk_url().unwrap().as_str(), "https://[fd00::5]/sdk");

        let config = VsphereConfig { host: "[fd00::5]".into(), port: 8443, ..Default::default() };
        assert_eq!(config.sdk_url().unwrap().as_str(), "https://[fd00::5]:8443/sdk");
    }

    #[test]
    fn test_sdk_url_requires_host() {
        assert!(VsphereConfig::default().sdk_url().is_err());
    }

    #[test]
    fn test_datacenter_reference() {
        let dc = Datacenter::new("datacenter-2").with_inventory_path("/DC1");
        assert_eq!(dc.reference(), ManagedObjectReference::new("Datacenter", "datacenter-2"));
        assert_eq!(dc.inventory_path(), Some("/DC1"));
    }

    #[test]
    fn test_datacenter_display() {
        assert_eq!(Datacenter::new("datacenter-2").to_string(), "Datacenter:datacenter-2");
        let dc = Datacenter::new("datacenter-2").with_inventory_path("/Lab/DC1");
        assert_eq!(dc.to_string(), "/Lab/DC1");
    }

    #[test]
    fn test_task_display() {
        let task = Task::new(ManagedObjectReference::new("Task", "task-77"));
        assert_eq!(task.id(), "task-77");
        assert_eq!(task.to_string(), "Task:task-77");
    }
}

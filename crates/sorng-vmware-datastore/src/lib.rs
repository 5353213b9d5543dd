//! # SortOfRemote NG – VMware Datastore Files
//!
//! Datastore file management for vCenter / ESXi through the vim25 SOAP
//! `FileManager`: copy, move, delete and make-directory, each optionally
//! scoped to a datacenter.
//!
//! ## Modules
//!
//! - **types** — Config, managed object references, request structures
//! - **error** — Crate-specific error types
//! - **datastore_path** — `[datastore] path` names
//! - **soap** — Envelope codec, transport trait, reqwest transport
//! - **methods** — Typed vim25 method calls
//! - **client** — Transport + service content handle
//! - **file_manager** — Datastore file operations

pub mod types;
pub mod error;
pub mod datastore_path;
pub mod soap;
pub mod methods;
pub mod client;
pub mod file_manager;

pub use client::VimClient;
pub use datastore_path::DatastorePath;
pub use error::{VmwareError, VmwareErrorKind, VmwareResult};
pub use file_manager::FileManager;
pub use soap::{RoundTripper, SoapHttpTransport};
pub use types::{Datacenter, ManagedObjectReference, Reference, Task, VsphereConfig};

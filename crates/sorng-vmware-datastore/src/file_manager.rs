//! Datastore file operations via the vim25 `FileManager`.

use crate::client::VimClient;
use crate::error::VmwareResult;
use crate::methods;
use crate::types::*;

use log::debug;

/// Copy, move, delete and mkdir on datastore paths.
///
/// Each call builds one request against the session's `FileManager` and
/// returns whatever the client returns. Copy, move and delete start a
/// remote task; `make_directory` completes inline.
pub struct FileManager<'a> {
    client: &'a VimClient,
}

impl<'a> FileManager<'a> {
    pub fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// Copy a file or folder, optionally across datacenters.
    pub async fn copy_datastore_file(
        &self,
        source_name: &str,
        source_datacenter: Option<&Datacenter>,
        destination_name: &str,
        destination_datacenter: Option<&Datacenter>,
        force: bool,
    ) -> VmwareResult<Task> {
        let request = CopyDatastoreFileTask {
            this: self.client.file_manager_ref()?,
            source_name: source_name.to_string(),
            source_datacenter: source_datacenter.map(|dc| dc.reference()),
            destination_name: destination_name.to_string(),
            destination_datacenter: destination_datacenter.map(|dc| dc.reference()),
            force,
        };

        debug!(
            "Copy {} ({}) -> {} ({}) (force={})",
            source_name,
            scope(source_datacenter),
            destination_name,
            scope(destination_datacenter),
            force
        );
        let task = methods::copy_datastore_file_task(self.client.transport(), &request).await?;
        Ok(Task::new(task))
    }

    /// Remove a datastore file or folder (recursively for folders).
    pub async fn delete_datastore_file(
        &self,
        name: &str,
        datacenter: Option<&Datacenter>,
    ) -> VmwareResult<Task> {
        let request = DeleteDatastoreFileTask {
            this: self.client.file_manager_ref()?,
            name: name.to_string(),
            datacenter: datacenter.map(|dc| dc.reference()),
        };

        debug!("Delete {} ({})", name, scope(datacenter));
        let task = methods::delete_datastore_file_task(self.client.transport(), &request).await?;
        Ok(Task::new(task))
    }

    /// Create a datastore folder. Fails if it exists and parents are not requested.
    pub async fn make_directory(
        &self,
        name: &str,
        datacenter: Option<&Datacenter>,
        create_parent_directories: bool,
    ) -> VmwareResult<()> {
        let request = MakeDirectory {
            this: self.client.file_manager_ref()?,
            name: name.to_string(),
            datacenter: datacenter.map(|dc| dc.reference()),
            create_parent_directories,
        };

        debug!(
            "Mkdir {} ({}) (parents={})",
            name,
            scope(datacenter),
            create_parent_directories
        );
        methods::make_directory(self.client.transport(), &request).await
    }

    /// Move a file or folder, optionally across datacenters.
    pub async fn move_datastore_file(
        &self,
        source_name: &str,
        source_datacenter: Option<&Datacenter>,
        destination_name: &str,
        destination_datacenter: Option<&Datacenter>,
        force: bool,
    ) -> VmwareResult<Task> {
        let request = MoveDatastoreFileTask {
            this: self.client.file_manager_ref()?,
            source_name: source_name.to_string(),
            source_datacenter: source_datacenter.map(|dc| dc.reference()),
            destination_name: destination_name.to_string(),
            destination_datacenter: destination_datacenter.map(|dc| dc.reference()),
            force,
        };

        debug!(
            "Move {} ({}) -> {} ({}) (force={})",
            source_name,
            scope(source_datacenter),
            destination_name,
            scope(destination_datacenter),
            force
        );
        let task = methods::move_datastore_file_task(self.client.transport(), &request).await?;
        Ok(Task::new(task))
    }
}

/// Datacenter label for log lines.
fn scope(datacenter: Option<&Datacenter>) -> String {
    datacenter.map_or_else(|| "no datacenter".to_string(), ToString::to_string)
}

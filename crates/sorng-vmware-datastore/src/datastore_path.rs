//! `[datastore] path/to/file` names.

use crate::error::VmwareError;

use std::fmt;
use std::str::FromStr;

/// A datastore-qualified path such as `[datastore1] vm01/vm01.vmdk`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatastorePath {
    pub datastore: String,
    pub path: String,
}

impl DatastorePath {
    pub fn new(datastore: impl Into<String>, path: impl Into<String>) -> Self {
        Self { datastore: datastore.into(), path: path.into() }
    }

    /// Append a segment to the relative path.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.trim_start_matches('/');
        let path = if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", self.path.trim_end_matches('/'), segment)
        };
        Self::new(self.datastore.clone(), path)
    }
}

impl FromStr for DatastorePath {
    type Err = VmwareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .trim()
            .strip_prefix('[')
            .ok_or_else(|| VmwareError::parse(format!("Not a datastore path: {s}")))?;
        let (datastore, path) = rest
            .split_once(']')
            .ok_or_else(|| VmwareError::parse(format!("Unterminated datastore name: {s}")))?;
        Ok(Self::new(datastore, path.trim()))
    }
}

impl fmt::Display for DatastorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "[{}]", self.datastore)
        } else {
            write!(f, "[{}] {}", self.datastore, self.path)
        }
    }
}

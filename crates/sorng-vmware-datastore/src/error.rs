//! Error types for the datastore file manager crate.

use thiserror::Error;

/// Categorised error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmwareErrorKind {
    /// SDK endpoint unreachable
    ConnectionError,
    /// Request exceeded the configured timeout
    Timeout,
    /// Non-success HTTP status without a SOAP fault body
    ApiError(u16),
    /// The server answered with a SOAP fault
    SoapFault,
    /// Envelope could not be encoded or the response could not be read
    ParseError,
    /// A required managed object is not exposed by the endpoint
    NotFound,
    /// Generic
    Other,
}

/// Crate error type carrying a kind + human-readable message.
#[derive(Debug, Clone, Error)]
#[error("[{kind:?}] {message}")]
pub struct VmwareError {
    pub kind: VmwareErrorKind,
    pub message: String,
}

impl VmwareError {
    pub fn new(kind: VmwareErrorKind, msg: impl Into<String>) -> Self {
        Self { kind, message: msg.into() }
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::ConnectionError, msg)
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::Timeout, msg)
    }

    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::ApiError(status), msg)
    }

    pub fn fault(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::SoapFault, msg)
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::ParseError, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::NotFound, msg)
    }
}

impl From<VmwareError> for String {
    fn from(e: VmwareError) -> String {
        e.to_string()
    }
}

impl From<reqwest::Error> for VmwareError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::timeout(format!("HTTP timeout: {e}"))
        } else if e.is_connect() {
            Self::connection(format!("Connection failed: {e}"))
        } else {
            Self::new(VmwareErrorKind::Other, format!("HTTP error: {e}"))
        }
    }
}

impl From<quick_xml::Error> for VmwareError {
    fn from(e: quick_xml::Error) -> Self {
        Self::parse(format!("XML error: {e}"))
    }
}

/// Convenience alias.
pub type VmwareResult<T> = Result<T, VmwareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let e = VmwareError::fault("File [ds1] a.vmdk was not found");
        assert_eq!(e.to_string(), "[SoapFault] File [ds1] a.vmdk was not found");
    }

    #[test]
    fn test_api_kind_carries_status() {
        let e = VmwareError::api(503, "Service Unavailable");
        assert_eq!(e.kind, VmwareErrorKind::ApiError(503));
        let s: String = e.into();
        assert!(s.starts_with("[ApiError(503)]"));
    }
}

//! Error types
//!
//! Every failure in the finder is recoverable: callers degrade to an empty
//! collection, the fixture catalog or a notice. Only the plumbing variants
//! ([Error::Io], [Error::Yaml]) can reach the binary's `main`.

/*--- Use ----------------------------------------------------------------------------------------*/

use std::io;

use thiserror::Error;

/*--- Types --------------------------------------------------------------------------------------*/

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Lookup by recipe id missed
    #[error("recipe not found: {0}")]
    NotFound(String),

    /// Persisted value could not be parsed
    ///
    /// Never returned by the set store itself, which treats it as "no data".
    #[error("corrupt value under storage key {key}: {reason}")]
    StorageCorrupt { key: String, reason: String },

    /// Remote recipe source failed or returned nothing
    #[error("remote recipe source unavailable: {0}")]
    RemoteUnavailable(String),

    /// Capability (e.g. voice recognition) absent on this platform
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file or bundled catalog is not valid YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::RemoteUnavailable(e.to_string())
    }
}

/*--- Tests --------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let msg = Error::NotFound("r42".to_string()).to_string();
        assert!(msg.contains("r42"));
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "read only").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("read only"));
    }

    #[test]
    fn yaml_errors_convert() {
        let err: Error = serde_yaml::from_str::<Vec<String>>("- [unclosed").unwrap_err().into();
        assert!(matches!(err, Error::Yaml(_)));
        assert!(err.to_string().starts_with("YAML error"));
    }

    #[test]
    fn storage_corrupt_display() {
        let err = Error::StorageCorrupt {
            key: "aurora_list".to_string(),
            reason: "expected value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("aurora_list"));
        assert!(msg.contains("expected value"));
    }
}

/*--------------------------------------------- EOF ----------------------------------------------*/

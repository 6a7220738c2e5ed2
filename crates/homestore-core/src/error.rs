//! Error type for loading and persisting the global config.
//!
//! Malformed or missing config files are not errors: they load as an empty
//! record. Everything here is a condition the caller has to see.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by [`crate::ConfigStore`] and the path resolvers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No home or config directory could be determined for this user.
    #[error("could not resolve {what} directory for the current user")]
    HomeNotFound { what: &'static str },

    /// The file exists but could not be read (permissions, not a file, ...).
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating the directory or writing the config file failed.
    #[error("failed to persist config to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the in-memory record failed.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Empty key, or a key with an empty path segment.
    #[error("invalid config key: {0:?}")]
    InvalidKey(String),

    /// A nested `set` hit a value that is not an object.
    #[error("cannot set {key:?}: {parent:?} is not an object")]
    NotAnObject { key: String, parent: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_error_names_path() {
        let err = StoreError::Persist {
            path: PathBuf::from("/tmp/x/config.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x/config.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn persist_error_exposes_source() {
        use std::error::Error as _;
        let err = StoreError::Persist {
            path: PathBuf::from("config.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(err.source().is_some());
    }
}

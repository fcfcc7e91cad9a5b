//! Error type shared by every housekeeping operation.
//!
//! Expected conditions (a directory that is not there, a move that cannot land)
//! are ordinary variants so the dispatcher can report them and keep going.
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during housekeeping operations.
#[derive(Debug, Error)]
pub enum HousekeepError {
    /// A referenced directory or file does not exist at call time.
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    /// Directory creation failed for a reason other than pre-existence.
    #[error("Failed to create directory {}: {source}", .path.display())]
    Creation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A move failed after its source was confirmed to exist.
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    Relocation {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A search pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Any other I/O fault, with the path and what was being done to it.
    #[error("I/O error during {operation} on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be read or parsed.
    #[error("Invalid configuration {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl HousekeepError {
    /// Builds a `NotFound` for `path`.
    pub fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: path.to_path_buf(),
        }
    }

    /// Wraps an I/O error, turning `ErrorKind::NotFound` into `NotFound`.
    pub fn io(path: &Path, operation: &'static str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::Io {
                path: path.to_path_buf(),
                operation,
                source,
            }
        }
    }

    /// True for the expected "it isn't there" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for housekeeping operations.
pub type Result<T> = std::result::Result<T, HousekeepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_not_found_kind() {
        let err = HousekeepError::io(
            Path::new("/missing"),
            "read directory",
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "/missing not found");
    }

    #[test]
    fn test_io_keeps_other_kinds() {
        let err = HousekeepError::io(
            Path::new("/locked"),
            "read directory",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("I/O error during read directory on /locked"));
    }
}

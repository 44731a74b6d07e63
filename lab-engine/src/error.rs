//! Error types for the lab engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lab engine operations
#[derive(Debug, Error)]
pub enum LabError {
    #[error("Invalid target: {target:?} - {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("Invalid IP address: {target:?}")]
    InvalidIpAddress { target: String },

    #[error("Module not allowed: {id}")]
    ModuleNotAllowed { id: String },

    #[error("Path escapes content root: {}", path.display())]
    PathEscapesRoot { path: PathBuf },

    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Timeout occurred: {program} after {duration_ms}ms")]
    Timeout { program: String, duration_ms: u64 },

    #[error("Highlighting failed: {reason}")]
    Highlight { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for lab engine operations
pub type LabResult<T> = Result<T, LabError>;

/// Error categories, mirroring how a failure is surfaced to the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed target or disallowed identifier, shown as a message
    InvalidInput,
    /// The external process could not be run to completion
    Process,
    /// Path resolution failed, shown as a "not found" placeholder
    Resolution,
    /// Anything else
    Internal,
}

impl LabError {
    /// Create an invalid target error
    pub fn invalid_target(target: &str, reason: &str) -> Self {
        Self::InvalidTarget {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid IP address error
    pub fn invalid_ip(target: &str) -> Self {
        Self::InvalidIpAddress {
            target: target.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LabError::InvalidTarget { .. } => ErrorCategory::InvalidInput,
            LabError::InvalidIpAddress { .. } => ErrorCategory::InvalidInput,
            LabError::ModuleNotAllowed { .. } => ErrorCategory::InvalidInput,

            LabError::Spawn { .. } => ErrorCategory::Process,
            LabError::Timeout { .. } => ErrorCategory::Process,

            LabError::PathEscapesRoot { .. } => ErrorCategory::Resolution,
            LabError::NotFound { .. } => ErrorCategory::Resolution,

            LabError::Highlight { .. } => ErrorCategory::Internal,
            LabError::Io(_) => ErrorCategory::Internal,
        }
    }

    /// Text rendered into the page in place of a result.
    ///
    /// Paths and process details stay in the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            LabError::InvalidTarget { .. } => "Invalid target",
            LabError::InvalidIpAddress { .. } => "Error: Invalid IP address",
            LabError::Spawn { .. } | LabError::Timeout { .. } => "Ping command failed",
            LabError::ModuleNotAllowed { .. }
            | LabError::PathEscapesRoot { .. }
            | LabError::NotFound { .. } => "Not Found",
            LabError::Highlight { .. } | LabError::Io(_) => "Internal error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_follow_taxonomy() {
        assert_eq!(LabError::invalid_target("x", "bad").category(), ErrorCategory::InvalidInput);
        assert_eq!(LabError::invalid_ip("x").category(), ErrorCategory::InvalidInput);
        assert_eq!(
            LabError::Timeout { program: "ping".into(), duration_ms: 10 }.category(),
            ErrorCategory::Process
        );
        assert_eq!(
            LabError::PathEscapesRoot { path: PathBuf::from("/etc/passwd") }.category(),
            ErrorCategory::Resolution
        );
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = LabError::PathEscapesRoot { path: PathBuf::from("/etc/passwd") };
        assert_eq!(err.user_message(), "Not Found");
        assert!(err.to_string().contains("/etc/passwd"));

        let err = LabError::Spawn {
            program: "ping".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.user_message(), "Ping command failed");
    }
}

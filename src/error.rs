//! Error types for sigmap.
//!
//! All errors are represented by the `SigmapError` enum. Every error is
//! scoped to the view that triggered it; nothing here is fatal to the process.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all sigmap operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum SigmapError {
    /// Malformed server response. Blocks rendering of the view.
    #[error("schema violation at {field}: {message}")]
    SchemaViolation {
        field: String,
        message: String,
    },

    /// Client-side check failed before submission.
    #[error("{0}")]
    Validation(ValidationError),

    /// Non-2xx response or network failure.
    #[error("transport error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Configuration parsing or loading errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON encoding of outgoing payloads).
    #[error("{0}")]
    Convert(String),

    /// Draft addressed with an invalid position or combination.
    #[error("{0}")]
    Draft(String),
}

/// Pre-submission validation failures.
#[derive(Deserialize, Serialize, Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A signal name is empty or whitespace-only.
    #[error("signal name cannot be empty")]
    EmptySignalName,

    /// A row has an empty or whitespace-only name.
    #[error("action in row {row} has no name")]
    EmptyName {
        row: usize,
    },

    /// A non-null bit was already used by an earlier row.
    #[error("duplicate bit {bit} in row {row}")]
    DuplicateBit {
        bit: u32,
        row: usize,
    },
}

/// Where an error is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// Replaces the whole view with an error state.
    Page,
    /// Shown next to the offending input; the draft stays editable.
    Inline,
    /// Shown as a short-lived notification; the user may retry manually.
    Transient,
}

impl SigmapError {
    /// Returns how this error should be surfaced.
    pub fn scope(&self) -> ErrorScope {
        match self {
            SigmapError::SchemaViolation {
                ..
            } => ErrorScope::Page,
            SigmapError::Validation(_) | SigmapError::Draft(_) => ErrorScope::Inline,
            SigmapError::Transport {
                ..
            } => ErrorScope::Transient,
            SigmapError::Config(_) | SigmapError::Convert(_) => ErrorScope::Page,
        }
    }

    /// HTTP status of a transport error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SigmapError::Transport {
                status,
                ..
            } => *status,
            _ => None,
        }
    }

    pub(crate) fn transport(
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        SigmapError::Transport {
            status,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for SigmapError {
    fn from(error: ValidationError) -> Self {
        SigmapError::Validation(error)
    }
}

impl From<SigmapError> for String {
    fn from(val: SigmapError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for SigmapError {
    fn from(error: std::io::Error) -> Self {
        SigmapError::Config(error.to_string())
    }
}

impl From<SigmapError> for std::io::Error {
    fn from(val: SigmapError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for SigmapError {
    fn from(error: serde_json::Error) -> Self {
        SigmapError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for SigmapError {
    fn from(error: toml::de::Error) -> Self {
        SigmapError::Config(error.to_string())
    }
}

impl From<reqwest::Error> for SigmapError {
    fn from(error: reqwest::Error) -> Self {
        SigmapError::transport(error.status().map(|s| s.as_u16()), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_scopes() {
        let schema = SigmapError::SchemaViolation {
            field: "$/signals/0/name".to_string(),
            message: "expected string".to_string(),
        };
        assert_eq!(schema.scope(), ErrorScope::Page);

        let validation: SigmapError = ValidationError::DuplicateBit {
            bit: 1,
            row: 1,
        }
        .into();
        assert_eq!(validation.scope(), ErrorScope::Inline);

        let transport = SigmapError::transport(Some(409), "Signal already exists");
        assert_eq!(transport.scope(), ErrorScope::Transient);
        assert_eq!(transport.status(), Some(409));
    }

    #[test]
    fn test_error_display() {
        let transport = SigmapError::transport(Some(404), "Signal not found");
        assert_eq!(transport.to_string(), "transport error (404): Signal not found");

        let offline = SigmapError::transport(None, "connection refused");
        assert_eq!(offline.to_string(), "transport error: connection refused");

        let validation: SigmapError = ValidationError::EmptyName {
            row: 0,
        }
        .into();
        assert_eq!(validation.to_string(), "action in row 0 has no name");
    }
}

//! Error types for the Asesor client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Asesor client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AsesorError {
    /// The selected attachment could not be read into memory.
    ///
    /// Raised before any network call is made; the operation settles
    /// without touching the wire.
    #[error("Attachment read error: {message}")]
    AttachmentRead { message: String },

    /// Transport-level failure: connection/DNS errors, a non-2xx status,
    /// or a response body that is not valid JSON.
    #[error("Transport error: {message}")]
    Transport {
        status_code: Option<u16>,
        message: String,
    },

    /// Guard: a submission carried neither text nor an attachment.
    #[error("A query needs text or an attachment")]
    EmptyQuery,

    /// Guard: an operation was requested while another is in flight.
    #[error("A request is already in flight")]
    AlreadyPending,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AsesorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an AttachmentRead error
    pub fn attachment_read(message: impl Into<String>) -> Self {
        Self::AttachmentRead {
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an AttachmentRead error
    pub fn is_attachment_read(&self) -> bool {
        matches!(self, Self::AttachmentRead { .. })
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this error is a guard precondition (nothing was dispatched
    /// and no state was changed).
    pub fn is_guard(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::AlreadyPending)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AsesorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AsesorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AsesorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for AsesorError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, AsesorError>`.
pub type Result<T> = std::result::Result<T, AsesorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_predicate() {
        assert!(AsesorError::EmptyQuery.is_guard());
        assert!(AsesorError::AlreadyPending.is_guard());
        assert!(!AsesorError::transport(Some(500), "boom").is_guard());
    }

    #[test]
    fn test_from_io_error() {
        let err: AsesorError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AsesorError::Io { .. }));
    }

    #[test]
    fn test_transport_display_carries_message() {
        let err = AsesorError::transport(Some(502), "bad gateway");
        assert!(err.to_string().contains("bad gateway"));
    }
}

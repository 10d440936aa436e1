//! Session identity model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stable per-session identifier.
///
/// The identifier is a UUID v4, minted lazily on first use and never
/// mutated afterwards; every request sent during the session carries the
/// same value so the remote assistant can thread the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the identity was minted (ISO 8601 format)
    pub created_at: String,
}

impl SessionIdentity {
    /// Mints a fresh identity with a random UUID v4.
    pub fn new() -> Self {
        Self::from_id(Uuid::new_v4().to_string())
    }

    /// Wraps an identifier recovered from storage.
    ///
    /// `created_at` is stamped with the current time; the creation instant
    /// is process-local metadata and is not persisted with the token.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// A short stable prefix of the identifier, suitable for display.
    pub fn display_prefix(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mints_unique_ids() {
        let a = SessionIdentity::new();
        let b = SessionIdentity::new();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 36);
    }

    #[test]
    fn test_display_prefix() {
        let identity = SessionIdentity::from_id("0123456789abcdef");
        assert_eq!(identity.display_prefix(), "01234567");
    }

    #[test]
    fn test_display_prefix_of_short_id() {
        let identity = SessionIdentity::from_id("abc");
        assert_eq!(identity.display_prefix(), "abc");
    }
}

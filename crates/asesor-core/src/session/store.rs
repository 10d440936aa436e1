//! Session identifier storage.

use once_cell::sync::OnceCell;

use crate::error::Result;

/// Storage for the session identifier.
///
/// The store plays the role of a storage area scoped to one client
/// lifetime: whatever it returns is reused for every subsequent request.
/// Implementations must keep the first stored value; the identifier is
/// never rewritten once created.
pub trait SessionStore: Send + Sync {
    /// Returns the stored identifier, if any.
    fn load(&self) -> Result<Option<String>>;

    /// Stores the identifier. Later calls must not replace an existing value.
    fn save(&self, id: &str) -> Result<()>;
}

/// Default store holding the identifier in process memory.
///
/// The value lives exactly as long as the process, which matches the
/// intended lifetime of a session: a restart starts a new conversation.
#[derive(Debug, Default)]
pub struct ProcessSessionStore {
    cell: OnceCell<String>,
}

impl ProcessSessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for ProcessSessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.cell.get().cloned())
    }

    fn save(&self, id: &str) -> Result<()> {
        // First value wins; a second save is ignored rather than an error.
        let _ = self.cell.set(id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_none() {
        let store = ProcessSessionStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let store = ProcessSessionStore::new();
        store.save("id-1").unwrap();
        assert_eq!(store.load().unwrap(), Some("id-1".to_string()));
    }

    #[test]
    fn test_first_value_wins() {
        let store = ProcessSessionStore::new();
        store.save("id-1").unwrap();
        store.save("id-2").unwrap();
        assert_eq!(store.load().unwrap(), Some("id-1".to_string()));
    }
}

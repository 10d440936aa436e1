//! Lazy session identity access.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::model::SessionIdentity;
use super::store::{ProcessSessionStore, SessionStore};

/// Provides the session identity, creating it lazily on first use.
///
/// The provider caches the identity for its own lifetime, so every call to
/// [`get_or_create`](Self::get_or_create) returns the identical identifier.
/// If the backing store fails on load or save, the provider falls back to a
/// purely in-memory identifier with the same stability guarantee for the
/// rest of the process life.
pub struct SessionIdentityProvider {
    store: Arc<dyn SessionStore>,
    cached: OnceCell<SessionIdentity>,
}

impl SessionIdentityProvider {
    /// Creates a provider backed by the given store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            cached: OnceCell::new(),
        }
    }

    /// Creates a provider backed by the default process-scoped store.
    pub fn with_process_store() -> Self {
        Self::new(Arc::new(ProcessSessionStore::new()))
    }

    /// Returns the session identity, minting and persisting it on first use.
    pub fn get_or_create(&self) -> SessionIdentity {
        self.cached
            .get_or_init(|| match self.store.load() {
                Ok(Some(id)) => SessionIdentity::from_id(id),
                Ok(None) => {
                    let identity = SessionIdentity::new();
                    if let Err(err) = self.store.save(&identity.id) {
                        tracing::warn!(
                            "[Session] Failed to persist session id, continuing in memory: {}",
                            err
                        );
                    }
                    identity
                }
                Err(err) => {
                    tracing::warn!(
                        "[Session] Session store unavailable, using in-memory id: {}",
                        err
                    );
                    SessionIdentity::new()
                }
            })
            .clone()
    }

    /// Convenience accessor for the bare identifier string.
    pub fn session_id(&self) -> String {
        self.get_or_create().id
    }
}

impl Default for SessionIdentityProvider {
    fn default() -> Self {
        Self::with_process_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsesorError;

    struct FailingStore;

    impl SessionStore for FailingStore {
        fn load(&self) -> crate::error::Result<Option<String>> {
            Err(AsesorError::io("storage unavailable"))
        }

        fn save(&self, _id: &str) -> crate::error::Result<()> {
            Err(AsesorError::io("storage unavailable"))
        }
    }

    #[test]
    fn test_same_id_on_every_call() {
        let provider = SessionIdentityProvider::with_process_store();
        let first = provider.get_or_create();
        let second = provider.get_or_create();
        assert_eq!(first.id, second.id);
        assert_eq!(provider.session_id(), first.id);
    }

    #[test]
    fn test_reuses_id_already_in_store() {
        let store = Arc::new(ProcessSessionStore::new());
        store.save("existing-id").unwrap();
        let provider = SessionIdentityProvider::new(store);
        assert_eq!(provider.session_id(), "existing-id");
    }

    #[test]
    fn test_persists_minted_id_to_store() {
        let store = Arc::new(ProcessSessionStore::new());
        let provider = SessionIdentityProvider::new(store.clone());
        let id = provider.session_id();
        assert_eq!(store.load().unwrap(), Some(id));
    }

    #[test]
    fn test_store_failure_falls_back_to_stable_in_memory_id() {
        let provider = SessionIdentityProvider::new(Arc::new(FailingStore));
        let first = provider.session_id();
        let second = provider.session_id();
        assert_eq!(first, second);
    }
}

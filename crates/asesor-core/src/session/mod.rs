//! Session identity domain module.
//!
//! A session is a logical conversation thread identified by a stable token;
//! the remote assistant uses it to correlate a sequence of turns from one
//! client as a single conversation.
//!
//! # Module Structure
//!
//! - `model`: Session identity model (`SessionIdentity`)
//! - `store`: Storage trait and the process-scoped default (`SessionStore`,
//!   `ProcessSessionStore`)
//! - `provider`: Lazy get-or-create access (`SessionIdentityProvider`)

mod model;
mod provider;
mod store;

// Re-export public API
pub use model::SessionIdentity;
pub use provider::SessionIdentityProvider;
pub use store::{ProcessSessionStore, SessionStore};

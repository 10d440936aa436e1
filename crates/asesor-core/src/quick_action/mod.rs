//! Quick action domain models.
//!
//! Quick actions are predefined canned queries the presentation layer can
//! issue without free-text input.

mod model;

pub use model::QuickAction;

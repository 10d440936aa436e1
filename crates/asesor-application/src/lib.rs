//! Application layer for the Asesor client.
//!
//! Coordinates the domain and agent layers: the [`Orchestrator`] owns the
//! consultation state machine and is the only component that talks to the
//! remote assistant.

pub mod orchestrator;

pub use orchestrator::Orchestrator;

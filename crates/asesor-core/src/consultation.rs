//! Consultation state container.
//!
//! Holds everything the presentation layer observes: the pending flag, the
//! last (normalized) reply, the user's draft, and the turn log. The state
//! is owned by the orchestrator and mutated only when an operation is
//! dispatched or settles.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::AttachmentSource;

/// One settled exchange with the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The query text that was sent (free text or a canned quick action).
    pub query: String,
    /// The normalized reply.
    pub reply: Value,
    /// Timestamp when the turn settled (ISO 8601 format).
    pub timestamp: String,
}

/// UI-facing state of the consultation.
///
/// State machine: Idle → Pending → Idle-with-success | Idle-with-error.
/// `pending` is the only state in which new operations are refused; there
/// is no cancelled state and no cancellation primitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultationState {
    /// True from dispatch until settlement.
    pub pending: bool,
    /// The last normalized reply, replaced wholesale by each request.
    pub last_reply: Option<Value>,
    /// Draft query text; cleared only on successful submission.
    pub draft_text: String,
    /// Selected attachment; cleared only on successful submission.
    pub draft_attachment: Option<AttachmentSource>,
    /// Settled exchanges, oldest first.
    pub turns: Vec<ConversationTurn>,
}

impl ConsultationState {
    /// Creates an idle, empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters the pending state.
    pub fn begin(&mut self) {
        self.pending = true;
    }

    /// Settles the in-flight operation with a reply (success or the
    /// uniform error shape) and leaves the pending state.
    pub fn settle(&mut self, reply: Value) {
        self.last_reply = Some(reply);
        self.pending = false;
    }

    /// Clears the draft text and attachment.
    pub fn clear_draft(&mut self) {
        self.draft_text.clear();
        self.draft_attachment = None;
    }

    /// Appends a settled exchange to the turn log.
    pub fn record_turn(&mut self, query: impl Into<String>, reply: Value) {
        self.turns.push(ConversationTurn {
            query: query.into(),
            reply,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
    }
}

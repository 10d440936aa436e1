//! Request orchestration.
//!
//! The orchestrator owns the consultation state machine
//! (Idle → Pending → Idle-with-success | Idle-with-error) and exposes the
//! two operations the presentation layer can trigger: free-text submission
//! and quick actions. Operations are mutually exclusive: while one is
//! pending, starting another is refused as a guard precondition.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use asesor_core::consultation::{ConsultationState, ConversationTurn};
use asesor_core::error::{AsesorError, Result};
use asesor_core::quick_action::QuickAction;
use asesor_core::request::{AttachmentSource, OutboundRequest};
use asesor_core::response::{error_reply, normalize};
use asesor_core::session::{SessionIdentity, SessionIdentityProvider};
use asesor_interaction::attachment::load_payload;
use asesor_interaction::webhook_agent::ConsultationAgent;

/// Orchestrates requests against the remote assistant.
///
/// Owns the session identity, the consultation state, and the agent
/// handle. All observation and mutation of UI state goes through this
/// type; the presentation layer holds it by reference and never touches
/// the state directly.
pub struct Orchestrator {
    agent: Arc<dyn ConsultationAgent>,
    identity: SessionIdentityProvider,
    state: RwLock<ConsultationState>,
}

impl Orchestrator {
    /// Creates an orchestrator with a fresh process-scoped session.
    pub fn new(agent: Arc<dyn ConsultationAgent>) -> Self {
        Self::with_identity(agent, SessionIdentityProvider::with_process_store())
    }

    /// Creates an orchestrator with an explicit identity provider.
    pub fn with_identity(agent: Arc<dyn ConsultationAgent>, identity: SessionIdentityProvider) -> Self {
        Self {
            agent,
            identity,
            state: RwLock::new(ConsultationState::new()),
        }
    }

    // ============================================================================
    // Operations
    // ============================================================================

    /// Submits a free-text query, optionally with an attachment.
    ///
    /// When `attachment` is `None`, the currently selected draft attachment
    /// (if any) is sent. On success the draft text and attachment are
    /// cleared; on failure they are preserved so the user can resubmit
    /// without re-entering anything.
    ///
    /// Returns the normalized reply. Operational failures (attachment
    /// read, transport, non-JSON body) settle as the uniform
    /// `{ "error": string }` reply and still return `Ok`; only guard
    /// violations return `Err`.
    ///
    /// # Errors
    ///
    /// - [`AsesorError::AlreadyPending`] while another operation is in flight.
    /// - [`AsesorError::EmptyQuery`] when the text is blank and no
    ///   attachment is present. Neither guard sends anything or changes state.
    pub async fn submit_query(
        &self,
        text: impl Into<String>,
        attachment: Option<AttachmentSource>,
    ) -> Result<Value> {
        let text = text.into();

        // Guard checks and the transition to pending happen under one
        // write lock, so dispatch is atomic with the guard.
        let attachment = {
            let mut state = self.state.write().await;
            if state.pending {
                return Err(AsesorError::AlreadyPending);
            }
            let attachment = attachment.or_else(|| state.draft_attachment.clone());
            if text.trim().is_empty() && attachment.is_none() {
                return Err(AsesorError::EmptyQuery);
            }
            state.draft_text = text.clone();
            state.draft_attachment = attachment.clone();
            state.begin();
            attachment
        };

        // The attachment is read before any network call; a read failure
        // settles the operation on its own.
        let file = match &attachment {
            Some(source) => match load_payload(source).await {
                Ok(payload) => Some(payload),
                Err(err) => return Ok(self.settle_failure(err).await),
            },
            None => None,
        };

        let request = match OutboundRequest::new(text, self.session_id(), file) {
            Ok(request) => request,
            Err(err) => return Ok(self.settle_failure(err).await),
        };

        tracing::info!(
            "[Orchestrator] Submitting query ({} chars, attachment: {})",
            request.text.len(),
            request.file.is_some()
        );

        Ok(self.dispatch(request, true).await)
    }

    /// Runs a quick action identified by its kebab-case kind.
    ///
    /// Known kinds behave like [`submit_query`](Self::submit_query) with
    /// the canned text and no attachment, except that the user's draft is
    /// never touched. Unknown kinds are a no-op and return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AsesorError::AlreadyPending`] while another operation is
    /// in flight.
    pub async fn run_quick_action(&self, kind: &str) -> Result<Option<Value>> {
        let Some(action) = QuickAction::from_kind(kind) else {
            tracing::debug!("[Orchestrator] Ignoring unknown quick action kind: {kind}");
            return Ok(None);
        };

        {
            let mut state = self.state.write().await;
            if state.pending {
                return Err(AsesorError::AlreadyPending);
            }
            state.begin();
        }

        let request = match OutboundRequest::new(action.canned_query(), self.session_id(), None) {
            Ok(request) => request,
            Err(err) => return Ok(Some(self.settle_failure(err).await)),
        };

        tracing::info!("[Orchestrator] Running quick action: {}", action.kind());

        Ok(Some(self.dispatch(request, false).await))
    }

    // ============================================================================
    // Draft triggers (write-only surface for the presentation layer)
    // ============================================================================

    /// Replaces the draft query text.
    pub async fn set_draft_text(&self, text: impl Into<String>) {
        self.state.write().await.draft_text = text.into();
    }

    /// Selects an attachment for the next submission.
    pub async fn select_attachment(&self, source: AttachmentSource) {
        self.state.write().await.draft_attachment = Some(source);
    }

    /// Removes the selected attachment.
    pub async fn clear_attachment(&self) {
        self.state.write().await.draft_attachment = None;
    }

    // ============================================================================
    // Read-only observation
    // ============================================================================

    /// True while an operation is in flight.
    pub async fn pending(&self) -> bool {
        self.state.read().await.pending
    }

    /// The last normalized reply, if any.
    pub async fn last_reply(&self) -> Option<Value> {
        self.state.read().await.last_reply.clone()
    }

    /// The current draft text.
    pub async fn draft_text(&self) -> String {
        self.state.read().await.draft_text.clone()
    }

    /// The currently selected attachment, if any.
    pub async fn draft_attachment(&self) -> Option<AttachmentSource> {
        self.state.read().await.draft_attachment.clone()
    }

    /// Settled exchanges, oldest first.
    pub async fn turns(&self) -> Vec<ConversationTurn> {
        self.state.read().await.turns.clone()
    }

    /// The stable session identifier carried by every request.
    pub fn session_id(&self) -> String {
        self.identity.session_id()
    }

    /// The full session identity (id, creation time, display prefix).
    pub fn session_identity(&self) -> SessionIdentity {
        self.identity.get_or_create()
    }

    // ============================================================================
    // Settlement
    // ============================================================================

    /// Sends the request and settles the state with the outcome.
    async fn dispatch(&self, request: OutboundRequest, clear_draft: bool) -> Value {
        match self.agent.ask(&request).await {
            Ok(raw) => {
                let reply = normalize(raw);
                let mut state = self.state.write().await;
                state.record_turn(request.text, reply.clone());
                if clear_draft {
                    state.clear_draft();
                }
                state.settle(reply.clone());
                reply
            }
            Err(err) => self.settle_failure(err).await,
        }
    }

    /// Converts a failure into the uniform error reply and leaves the
    /// pending state. Drafts are intentionally untouched.
    async fn settle_failure(&self, err: AsesorError) -> Value {
        tracing::warn!("[Orchestrator] Operation failed: {}", err);
        let reply = error_reply(err.to_string());
        self.state.write().await.settle(reply.clone());
        reply
    }
}

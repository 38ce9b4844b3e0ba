//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::analysis::CoachingReport;
use crate::transcript::Turn;

/// Lifecycle state of a practice session.
///
/// `Created -> Active -> Ended`; `Ended` is terminal and accepts no
/// further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Agent bound, no message exchanged yet.
    Created,
    /// At least one message exchange has happened.
    Active,
    /// Analysis populated; no further exchanges accepted.
    Ended,
}

/// One practice session between a rep and a persona-bound agent.
///
/// `messages` is append-only for the session's lifetime and is never
/// rolled back, even when an exchange fails to obtain a reply. `analysis`
/// is populated exactly once, when the session ends. The agent binding is
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub agent_id: String,
    pub persona_key: String,
    pub state: SessionState,
    pub messages: Vec<Turn>,
    pub analysis: Option<CoachingReport>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        agent_id: impl Into<String>,
        persona_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            agent_id: agent_id.into(),
            persona_key: persona_key.into(),
            state: SessionState::Created,
            messages: Vec::new(),
            analysis: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Whether the session still accepts message exchanges.
    pub fn accepts_messages(&self) -> bool {
        matches!(self.state, SessionState::Created | SessionState::Active)
    }
}

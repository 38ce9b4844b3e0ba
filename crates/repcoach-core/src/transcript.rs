//! Conversation transcript model.
//!
//! A transcript is an ordered sequence of [`Turn`]s. Role tags are stored
//! verbatim; rep/customer classification happens against fixed synonym sets
//! so that unrecognized tags survive in the transcript while staying out of
//! role-specific aggregation.

use serde::{Deserialize, Serialize};

/// Role tags that classify a turn as spoken by the sales representative.
pub const REP_ROLES: &[&str] = &["rep", "sales", "agent_rep"];

/// Role tags that classify a turn as spoken by the customer side.
pub const CUSTOMER_ROLES: &[&str] = &["customer", "agent", "persona"];

/// A single labeled utterance in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Speaker tag, kept exactly as received.
    pub role: String,
    /// Utterance text.
    pub text: String,
}

impl Turn {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
        }
    }

    /// Creates a turn tagged with the canonical rep role.
    pub fn rep(text: impl Into<String>) -> Self {
        Self::new("rep", text)
    }

    /// Creates a turn tagged with the canonical customer role.
    pub fn customer(text: impl Into<String>) -> Self {
        Self::new("customer", text)
    }

    /// Whether this turn was spoken by the sales representative.
    pub fn is_rep(&self) -> bool {
        REP_ROLES.contains(&self.role.as_str())
    }

    /// Whether this turn was spoken by the customer side.
    pub fn is_customer(&self) -> bool {
        CUSTOMER_ROLES.contains(&self.role.as_str())
    }
}

/// Parses a raw line-oriented transcript into turns.
///
/// Each line is expected to be `"<role>: <text>"`. The line is split on the
/// first colon and both sides are trimmed; the role string is kept verbatim.
/// Parsing is total: lines without a colon contribute no turn and are
/// dropped silently. Callers relying on the report's reconstructed
/// transcript depend on this lossy behavior.
pub fn parse_transcript(raw: &str) -> Vec<Turn> {
    raw.lines()
        .filter_map(|line| {
            let (role, text) = line.split_once(':')?;
            Some(Turn::new(role.trim(), text.trim()))
        })
        .collect()
}

/// Reconstructs the canonical `"role: text"` transcript string, one turn
/// per line, in original order.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role, t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

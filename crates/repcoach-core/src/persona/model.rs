//! Persona domain model.
//!
//! A persona is a simulated customer archetype the rep practices against.
//! The prompt biases the external conversational agent toward that
//! archetype's behavior.

use serde::{Deserialize, Serialize};

/// A customer persona available for practice sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Stable lookup key (e.g. "silent_skeptic").
    pub key: String,
    /// Display name shown to the rep.
    pub name: String,
    /// Behavior prompt handed to the agent service at binding time.
    pub prompt: String,
}

impl Persona {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            prompt: prompt.into(),
        }
    }
}

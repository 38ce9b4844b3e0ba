//! Error types for the RepCoach application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire RepCoach application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. User-visible failures
/// surface only through these variants; heuristic analysis itself is total
/// and never produces an error.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CoachError {
    /// Persona key not present in the catalog. Rejected before any
    /// session state is created.
    #[error("Unknown persona: '{key}'")]
    UnknownPersona { key: String },

    /// Operation against a session that does not exist or has ended.
    #[error("Session not found: '{id}'")]
    SessionNotFound { id: String },

    /// Missing credential or configuration for a collaborator. Fatal to
    /// that collaborator's calls, not to the session.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The conversational agent service refused or failed a call.
    #[error("Agent unavailable: {0}")]
    AgentUnavailable(String),

    /// The text-to-speech service refused or failed a call.
    #[error("Synthesis unavailable: {0}")]
    SynthesisUnavailable(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoachError {
    /// Creates an UnknownPersona error
    pub fn unknown_persona(key: impl Into<String>) -> Self {
        Self::UnknownPersona { key: key.into() }
    }

    /// Creates a SessionNotFound error
    pub fn session_not_found(id: impl Into<String>) -> Self {
        Self::SessionNotFound { id: id.into() }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an AgentUnavailable error
    pub fn agent_unavailable(message: impl Into<String>) -> Self {
        Self::AgentUnavailable(message.into())
    }

    /// Creates a SynthesisUnavailable error
    pub fn synthesis_unavailable(message: impl Into<String>) -> Self {
        Self::SynthesisUnavailable(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a SessionNotFound error
    pub fn is_session_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound { .. })
    }

    /// Check if this is an UnknownPersona error
    pub fn is_unknown_persona(&self) -> bool {
        matches!(self, Self::UnknownPersona { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this error represents a recoverable collaborator failure.
    ///
    /// Returns true for `AgentUnavailable` and `SynthesisUnavailable`;
    /// the session use case degrades these to an empty reply/audio instead
    /// of propagating them out of a message exchange.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::AgentUnavailable(_) | Self::SynthesisUnavailable(_)
        )
    }
}

impl From<std::io::Error> for CoachError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CoachError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CoachError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CoachError>`.
pub type Result<T> = std::result::Result<T, CoachError>;

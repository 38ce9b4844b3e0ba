//! Collaborator service contracts.
//!
//! The core reaches every external system through these narrow traits.
//! Real HTTP clients and the mock stack live in repcoach-infrastructure
//! behind the same contracts, so the session use case never knows which
//! variant it is driving.

use async_trait::async_trait;

use crate::error::Result;

/// The conversational-agent backend that plays the customer persona.
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Creates (or binds) an agent for a persona and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::AgentUnavailable` on transport or logic
    /// failure, `CoachError::Config` when credentials are missing.
    async fn create_agent(&self, display_name: &str, persona_prompt: &str) -> Result<String>;

    /// Sends rep text to the agent and returns the customer reply.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::AgentUnavailable` on transport or logic
    /// failure.
    async fn converse_text(&self, agent_id: &str, user_text: &str) -> Result<String>;
}

/// Speech-to-text transcription.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribes audio to text. Never fails: configuration and
    /// transport problems come back as diagnostic strings, which callers
    /// must treat as valid transcript turns.
    async fn transcribe(&self, audio: &[u8], filename: &str) -> String;
}

/// Text-to-speech synthesis.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesizes text into base64-encoded audio.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::SynthesisUnavailable` on failure.
    async fn synthesize_base64(&self, text: &str) -> Result<String>;
}

//! WavesSynthesizer - REST text-to-speech.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use reqwest::Client;
use serde::Serialize;

use repcoach_core::error::{CoachError, Result};
use repcoach_core::services::TextToSpeech;

const SYNTHESIZE_URL: &str = "https://waves-api.smallest.ai/api/v1/lightning/get_speech";
const DEFAULT_VOICE: &str = "emily";

/// Text-to-speech implementation backed by the Smallest.ai Waves API.
/// Audio bytes are returned base64-encoded.
#[derive(Clone)]
pub struct WavesSynthesizer {
    client: Client,
    api_key: String,
    voice_id: String,
}

impl WavesSynthesizer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            voice_id: DEFAULT_VOICE.to_string(),
        }
    }

    /// Loads the API key from `SMALLEST_API_KEY` (shared with the agent
    /// service).
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Config` when the variable is unset.
    pub fn try_from_env() -> Result<Self> {
        let api_key = std::env::var("SMALLEST_API_KEY")
            .map_err(|_| CoachError::config("SMALLEST_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    /// Overrides the voice after construction.
    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }
}

#[async_trait]
impl TextToSpeech for WavesSynthesizer {
    async fn synthesize_base64(&self, text: &str) -> Result<String> {
        let request = SynthesizeRequest {
            text,
            voice_id: &self.voice_id,
        };

        let response = self
            .client
            .post(SYNTHESIZE_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| CoachError::synthesis_unavailable(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CoachError::synthesis_unavailable(format!("{status}: {body}")));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|err| CoachError::synthesis_unavailable(format!("body read failed: {err}")))?;

        tracing::debug!(target: "speech", chars = text.len(), bytes = audio.len(), "synthesis finished");
        Ok(BASE64_STANDARD.encode(&audio))
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
}

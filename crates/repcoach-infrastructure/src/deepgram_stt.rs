//! DeepgramTranscriber - REST speech-to-text.
//!
//! Transcription is total by contract: missing configuration and failed
//! calls come back as diagnostic strings rather than errors, and callers
//! commit those strings as transcript turns like any other text.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use repcoach_core::services::SpeechToText;

const LISTEN_URL: &str = "https://api.deepgram.com/v1/listen";
const DEFAULT_MODEL: &str = "nova-2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Speech-to-text implementation backed by the Deepgram REST API.
///
/// The API key comes from `DEEPGRAM_API_KEY`; `DEEPGRAM_MODEL` and
/// `DEEPGRAM_LANGUAGE` optionally override the model and language
/// (language detection is requested when no language is pinned).
#[derive(Clone)]
pub struct DeepgramTranscriber {
    client: Client,
    api_key: Option<String>,
    model: String,
    language: Option<String>,
}

impl DeepgramTranscriber {
    /// Builds the transcriber from the environment. Never fails: a
    /// missing key only means every transcription returns the
    /// configuration diagnostic.
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: std::env::var("DEEPGRAM_API_KEY").ok(),
            model: std::env::var("DEEPGRAM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            language: std::env::var("DEEPGRAM_LANGUAGE").ok(),
        }
    }

    async fn request(&self, api_key: &str, audio: &[u8], filename: &str) -> String {
        let mut params: Vec<(&str, String)> = vec![
            ("smart_format", "true".to_string()),
            ("model", self.model.clone()),
        ];
        match &self.language {
            Some(lang) => params.push(("language", lang.clone())),
            None => params.push(("detect_language", "true".to_string())),
        }

        let response = self
            .client
            .post(LISTEN_URL)
            .header("Authorization", format!("Token {api_key}"))
            .header("Content-Type", infer_content_type(filename))
            .query(&params)
            .body(audio.to_vec())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(err) => return format!("[transcription_error] {err}"),
        };

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return format!("[transcription_error] {status}: {detail}");
        }

        let data: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(err) => return format!("[transcription_error] {err}"),
        };

        // Navigate the Deepgram response; fall back to the raw payload
        // when the shape is unexpected.
        data["results"]["channels"][0]["alternatives"][0]["transcript"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| data.to_string())
    }
}

#[async_trait]
impl SpeechToText for DeepgramTranscriber {
    async fn transcribe(&self, audio: &[u8], filename: &str) -> String {
        let Some(api_key) = &self.api_key else {
            return "[configuration_error] Missing DEEPGRAM_API_KEY".to_string();
        };
        let transcript = self.request(api_key, audio, filename).await;
        tracing::debug!(
            target: "speech",
            filename,
            bytes = audio.len(),
            chars = transcript.len(),
            "transcription finished"
        );
        transcript
    }
}

/// Guesses the upload content type from the file extension.
fn infer_content_type(filename: &str) -> &'static str {
    let name = filename.to_lowercase();
    if name.ends_with(".wav") {
        "audio/wav"
    } else if name.ends_with(".webm") {
        "audio/webm"
    } else if name.ends_with(".mp3") {
        "audio/mpeg"
    } else if name.ends_with(".m4a") || name.ends_with(".mp4") {
        "audio/mp4"
    } else if name.ends_with(".ogg") || name.ends_with(".oga") {
        "audio/ogg"
    } else {
        "application/octet-stream"
    }
}

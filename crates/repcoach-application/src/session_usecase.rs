//! Session use case implementation.
//!
//! `SessionUseCase` is the session lifecycle state machine: it binds
//! personas to external agents, relays rep messages, and runs the
//! analysis engine exactly once when a session ends.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use repcoach_core::analysis::{CoachingReport, ConversationAnalyzer};
use repcoach_core::error::{CoachError, Result};
use repcoach_core::persona::PersonaCatalog;
use repcoach_core::services::{AgentService, SpeechToText, TextToSpeech};
use repcoach_core::session::{Session, SessionRegistry, SessionState};
use repcoach_core::transcript::Turn;

/// Outcome of one message exchange.
///
/// `reply` and `audio_base64` are empty when the collaborator call failed;
/// the rep turn is committed either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOutcome {
    pub reply: String,
    pub audio_base64: String,
}

/// Outcome of one audio exchange, carrying the transcription that was
/// committed as the rep turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioExchangeOutcome {
    pub transcript: String,
    pub reply: String,
    pub audio_base64: String,
}

/// Orchestrates sessions over the registry, the persona catalog, and the
/// collaborator services.
///
/// # Responsibilities
///
/// - Creating sessions with a persona-bound agent (one agent per persona,
///   reused across sessions)
/// - Relaying rep messages and appending replies, serialized per session
/// - Degrading collaborator failures to empty replies instead of failing
///   the session
/// - Producing the coaching report exactly once at session end
pub struct SessionUseCase {
    catalog: PersonaCatalog,
    registry: SessionRegistry,
    agent_service: Arc<dyn AgentService>,
    speech_to_text: Arc<dyn SpeechToText>,
    text_to_speech: Arc<dyn TextToSpeech>,
    /// One agent binding per persona for the process lifetime.
    persona_agents: RwLock<HashMap<String, String>>,
    analyzer: Mutex<ConversationAnalyzer>,
}

impl SessionUseCase {
    pub fn new(
        catalog: PersonaCatalog,
        agent_service: Arc<dyn AgentService>,
        speech_to_text: Arc<dyn SpeechToText>,
        text_to_speech: Arc<dyn TextToSpeech>,
    ) -> Self {
        Self {
            catalog,
            registry: SessionRegistry::new(),
            agent_service,
            speech_to_text,
            text_to_speech,
            persona_agents: RwLock::new(HashMap::new()),
            analyzer: Mutex::new(ConversationAnalyzer::new()),
        }
    }

    /// Replaces the analyzer with a seeded one, for reproducible rewrite
    /// phrasing in tests.
    pub fn with_seeded_analyzer(mut self, seed: u64) -> Self {
        self.analyzer = Mutex::new(ConversationAnalyzer::with_seed(seed));
        self
    }

    /// Lists (key, display name) pairs from the catalog, ordered by key.
    pub fn list_personas(&self) -> Vec<(String, String)> {
        self.catalog
            .all()
            .map(|p| (p.key.clone(), p.name.clone()))
            .collect()
    }

    /// Creates a session bound to the given persona.
    ///
    /// The persona key is validated before any state is touched. The
    /// external agent for a persona is created once and reused by later
    /// sessions against the same persona.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPersona` for keys missing from the catalog, and
    /// propagates `AgentUnavailable`/`Config` when the agent cannot be
    /// created.
    pub async fn create_session(&self, persona_key: &str) -> Result<(String, String)> {
        let persona = self
            .catalog
            .get(persona_key)
            .ok_or_else(|| CoachError::unknown_persona(persona_key))?;

        let agent_id = {
            let agents = self.persona_agents.read().await;
            agents.get(persona_key).cloned()
        };
        let agent_id = match agent_id {
            Some(id) => id,
            None => {
                let id = self
                    .agent_service
                    .create_agent(&persona.name, &persona.prompt)
                    .await?;
                // A concurrent creation may have won; keep whichever
                // binding landed first.
                let mut agents = self.persona_agents.write().await;
                agents
                    .entry(persona_key.to_string())
                    .or_insert(id)
                    .clone()
            }
        };

        let session_id = format!("sess_{}", &Uuid::new_v4().simple().to_string()[..8]);
        self.registry
            .insert(Session::new(&session_id, &agent_id, persona_key))
            .await;

        tracing::info!(
            target: "session",
            session_id = %session_id,
            persona = persona_key,
            agent_id = %agent_id,
            "session created"
        );

        Ok((session_id, agent_id))
    }

    /// Relays one rep message and returns the customer reply with its
    /// synthesized audio.
    ///
    /// The rep turn commits before the agent is asked and is never rolled
    /// back. A failed agent call yields an empty reply and audio; a failed
    /// synthesis yields the reply with empty audio. Both are per-call
    /// degradations, not session failures.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for unknown or ended sessions.
    pub async fn send_message(&self, session_id: &str, text: &str) -> Result<ExchangeOutcome> {
        let entry = self
            .registry
            .get(session_id)
            .await
            .ok_or_else(|| CoachError::session_not_found(session_id))?;

        // Hold the session lock across the whole exchange so appends from
        // concurrent calls against the same session cannot interleave.
        let mut session = entry.lock().await;
        if !session.accepts_messages() {
            return Err(CoachError::session_not_found(session_id));
        }

        session.messages.push(Turn::rep(text));
        session.state = SessionState::Active;
        let agent_id = session.agent_id.clone();

        let outcome = match self.agent_service.converse_text(&agent_id, text).await {
            Ok(reply) if !reply.is_empty() => {
                session.messages.push(Turn::customer(&reply));
                let audio = self.synthesize_or_empty(&reply).await;
                ExchangeOutcome {
                    reply,
                    audio_base64: audio,
                }
            }
            Ok(_) => ExchangeOutcome {
                reply: String::new(),
                audio_base64: String::new(),
            },
            Err(err) => {
                tracing::warn!(
                    target: "session",
                    session_id,
                    error = %err,
                    "agent call failed, committing rep turn without reply"
                );
                ExchangeOutcome {
                    reply: String::new(),
                    audio_base64: String::new(),
                }
            }
        };

        Ok(outcome)
    }

    /// Transcribes rep audio and relays the transcript as a rep message.
    ///
    /// Transcription is total: diagnostic strings from the speech service
    /// are committed as the rep turn like any other text.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for unknown or ended sessions.
    pub async fn send_audio_message(
        &self,
        session_id: &str,
        audio: &[u8],
        filename: &str,
    ) -> Result<AudioExchangeOutcome> {
        // Reject before transcribing; transcription is the expensive part.
        {
            let entry = self
                .registry
                .get(session_id)
                .await
                .ok_or_else(|| CoachError::session_not_found(session_id))?;
            if !entry.lock().await.accepts_messages() {
                return Err(CoachError::session_not_found(session_id));
            }
        }

        let transcript = self.speech_to_text.transcribe(audio, filename).await;
        let outcome = self.send_message(session_id, &transcript).await?;
        Ok(AudioExchangeOutcome {
            transcript,
            reply: outcome.reply,
            audio_base64: outcome.audio_base64,
        })
    }

    /// Ends the session and returns its coaching report.
    ///
    /// The first call runs the analyzer over the session history and moves
    /// the session to `Ended`. Further calls return the cached report
    /// without recomputing or touching the history.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for unknown sessions.
    pub async fn end_session(&self, session_id: &str) -> Result<CoachingReport> {
        let entry = self
            .registry
            .get(session_id)
            .await
            .ok_or_else(|| CoachError::session_not_found(session_id))?;

        let mut session = entry.lock().await;
        if let Some(report) = &session.analysis {
            return Ok(report.clone());
        }

        let report = {
            let mut analyzer = self.analyzer.lock().await;
            analyzer.analyze(&session.messages)
        };
        session.analysis = Some(report.clone());
        session.state = SessionState::Ended;

        tracing::info!(
            target: "session",
            session_id,
            turns = session.messages.len(),
            "session ended, coaching report assembled"
        );

        Ok(report)
    }

    async fn synthesize_or_empty(&self, text: &str) -> String {
        match self.text_to_speech.synthesize_base64(text).await {
            Ok(audio) => audio,
            Err(err) => {
                tracing::warn!(target: "session", error = %err, "synthesis failed, returning empty audio");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Agent double: echoes a fixed reply, counts created agents, and can
    /// be switched into failure mode.
    struct StubAgent {
        created: AtomicUsize,
        fail_converse: bool,
    }

    impl StubAgent {
        fn new() -> Self {
            Self {
                created: AtomicUsize::new(0),
                fail_converse: false,
            }
        }

        fn failing() -> Self {
            Self {
                created: AtomicUsize::new(0),
                fail_converse: true,
            }
        }
    }

    #[async_trait]
    impl AgentService for StubAgent {
        async fn create_agent(&self, _display_name: &str, _persona_prompt: &str) -> Result<String> {
            let n = self.created.fetch_add(1, Ordering::SeqCst);
            Ok(format!("agent_{n}"))
        }

        async fn converse_text(&self, _agent_id: &str, user_text: &str) -> Result<String> {
            if self.fail_converse {
                return Err(CoachError::agent_unavailable("stubbed outage"));
            }
            Ok(format!("What do you mean by '{user_text}'?"))
        }
    }

    struct StubSpeech;

    #[async_trait]
    impl SpeechToText for StubSpeech {
        async fn transcribe(&self, _audio: &[u8], _filename: &str) -> String {
            "What is the battery capacity?".to_string()
        }
    }

    #[async_trait]
    impl TextToSpeech for StubSpeech {
        async fn synthesize_base64(&self, _text: &str) -> Result<String> {
            Ok("QVVESU8=".to_string())
        }
    }

    fn usecase_with(agent: StubAgent) -> SessionUseCase {
        SessionUseCase::new(
            PersonaCatalog::from_presets(),
            Arc::new(agent),
            Arc::new(StubSpeech),
            Arc::new(StubSpeech),
        )
        .with_seeded_analyzer(11)
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let usecase = usecase_with(StubAgent::new());
        let (session_id, agent_id) = usecase.create_session("feature_engineer").await.unwrap();
        assert!(session_id.starts_with("sess_"));
        assert_eq!(agent_id, "agent_0");

        let outcome = usecase
            .send_message(&session_id, "Hello, can I tell you about range and battery?")
            .await
            .unwrap();
        assert!(outcome.reply.contains("What do you mean"));
        assert_eq!(outcome.audio_base64, "QVVESU8=");

        let report = usecase.end_session(&session_id).await.unwrap();
        assert!(report.transcript.starts_with("rep: Hello"));
        assert!((1..=10).contains(&report.scores.rapport));
    }

    #[tokio::test]
    async fn test_unknown_persona_rejected_before_any_state() {
        let usecase = usecase_with(StubAgent::new());
        let err = usecase.create_session("nonexistent_persona").await.unwrap_err();
        assert!(err.is_unknown_persona());
        // No agent was created and no session exists
        let err = usecase.send_message("sess_whatever", "hi").await.unwrap_err();
        assert!(err.is_session_not_found());
    }

    #[tokio::test]
    async fn test_agent_reused_per_persona() {
        let usecase = usecase_with(StubAgent::new());
        let (_, first) = usecase.create_session("budget_shopper").await.unwrap();
        let (_, second) = usecase.create_session("budget_shopper").await.unwrap();
        let (_, other) = usecase.create_session("silent_skeptic").await.unwrap();
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[tokio::test]
    async fn test_messaging_unknown_session_is_not_found() {
        let usecase = usecase_with(StubAgent::new());
        let err = usecase.send_message("sess_invalid", "hi").await.unwrap_err();
        assert!(err.is_session_not_found());
    }

    #[tokio::test]
    async fn test_agent_failure_commits_rep_turn_with_empty_reply() {
        let usecase = usecase_with(StubAgent::failing());
        let (session_id, _) = usecase.create_session("stall_stall").await.unwrap();

        let outcome = usecase.send_message(&session_id, "still there?").await.unwrap();
        assert_eq!(outcome.reply, "");
        assert_eq!(outcome.audio_base64, "");

        // The rep turn survived the failed exchange
        let report = usecase.end_session(&session_id).await.unwrap();
        assert_eq!(report.transcript, "rep: still there?");
    }

    #[tokio::test]
    async fn test_audio_message_commits_transcript_as_rep_turn() {
        let usecase = usecase_with(StubAgent::new());
        let (session_id, _) = usecase.create_session("feature_engineer").await.unwrap();

        let outcome = usecase
            .send_audio_message(&session_id, b"fake-bytes", "take.wav")
            .await
            .unwrap();
        assert_eq!(outcome.transcript, "What is the battery capacity?");
        assert!(!outcome.reply.is_empty());

        let report = usecase.end_session(&session_id).await.unwrap();
        assert!(report.transcript.starts_with("rep: What is the battery capacity?"));
    }

    #[tokio::test]
    async fn test_double_end_returns_cached_report_without_recompute() {
        let usecase = usecase_with(StubAgent::new());
        let (session_id, _) = usecase.create_session("emotional_buyer").await.unwrap();
        usecase.send_message(&session_id, "ok").await.unwrap();

        let first = usecase.end_session(&session_id).await.unwrap();
        let second = usecase.end_session(&session_id).await.unwrap();
        // Identical including rewrite phrasing: the second call must come
        // from the cache, not a re-run of the (randomized) suggester.
        assert_eq!(first, second);

        // And an ended session accepts no further messages
        let err = usecase.send_message(&session_id, "one more").await.unwrap_err();
        assert!(err.is_session_not_found());
    }

    #[tokio::test]
    async fn test_list_personas_matches_catalog() {
        let usecase = usecase_with(StubAgent::new());
        let personas = usecase.list_personas();
        assert_eq!(personas.len(), 5);
        assert!(personas.iter().any(|(k, _)| k == "silent_skeptic"));
    }
}

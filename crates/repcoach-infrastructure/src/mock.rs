//! Mock collaborator stack.
//!
//! Implements the same service contracts as the HTTP clients so the
//! session use case can run without credentials or network access, in
//! tests and in the CLI simulator. Reply selection is seedable.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use uuid::Uuid;

use repcoach_core::error::Result;
use repcoach_core::services::{AgentService, SpeechToText, TextToSpeech};

/// Canned replies keyed by a lowercase fragment of the persona prompt.
/// Checked in order; the first matching fragment wins.
const PROMPT_REPLIES: &[(&str, &[&str])] = &[
    (
        "skeptic",
        &[
            "Hmm... how do I know that's true?",
            "That's a big claim. Any proof?",
            "Short answer: not convinced.",
        ],
    ),
    (
        "price",
        &[
            "What's the final price?",
            "Are there discounts?",
            "I can buy a cheaper one elsewhere.",
        ],
    ),
    (
        "specification",
        &[
            "What's the exact battery capacity (mAh)?",
            "Can you give me the benchmark numbers?",
            "What's the range in km?",
        ],
    ),
    (
        "emotion",
        &[
            "Does anyone I know use this?",
            "I want to hear a story of someone who loved it.",
            "How will this make my life better?",
        ],
    ),
    (
        "delay",
        &[
            "I'll think about it and get back to you.",
            "Maybe next month.",
            "Not sure — call me later.",
        ],
    ),
];

const FALLBACK_REPLY: &str = "Okay. Tell me more.";

struct MockAgentState {
    rng: StdRng,
    /// agent id -> persona prompt
    agents: HashMap<String, String>,
}

/// In-process agent service with persona-keyed canned replies.
pub struct MockAgentClient {
    state: Mutex<MockAgentState>,
}

impl MockAgentClient {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Fixed-seed variant for reproducible reply sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: Mutex::new(MockAgentState {
                rng,
                agents: HashMap::new(),
            }),
        }
    }
}

impl Default for MockAgentClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentService for MockAgentClient {
    async fn create_agent(&self, _display_name: &str, persona_prompt: &str) -> Result<String> {
        let agent_id = format!("mock_agent_{}", &Uuid::new_v4().simple().to_string()[..8]);
        let mut state = self.state.lock().await;
        state.agents.insert(agent_id.clone(), persona_prompt.to_lowercase());
        Ok(agent_id)
    }

    async fn converse_text(&self, agent_id: &str, _user_text: &str) -> Result<String> {
        let mut state = self.state.lock().await;
        let prompt = state.agents.get(agent_id).cloned().unwrap_or_default();
        for (fragment, replies) in PROMPT_REPLIES {
            if prompt.contains(fragment) {
                let pick = state.rng.gen_range(0..replies.len());
                return Ok(replies[pick].to_string());
            }
        }
        Ok(FALLBACK_REPLY.to_string())
    }
}

/// Speech-to-text double: always the same technical question, so scripted
/// conversations exercise the missed-fact path.
pub struct MockTranscriber;

#[async_trait]
impl SpeechToText for MockTranscriber {
    async fn transcribe(&self, _audio: &[u8], _filename: &str) -> String {
        "What is the battery capacity?".to_string()
    }
}

/// Text-to-speech double emitting recognizable fake payloads.
pub struct MockSynthesizer;

#[async_trait]
impl TextToSpeech for MockSynthesizer {
    async fn synthesize_base64(&self, _text: &str) -> Result<String> {
        let fake = format!("BASE64_AUDIO_{}", Uuid::new_v4().simple());
        Ok(fake)
    }
}

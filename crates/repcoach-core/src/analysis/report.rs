//! Coaching report assembly.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::advisor::{Improvement, suggest_improvements};
use super::missed_facts::detect_missed_facts;
use super::rewrite::{RewriteSuggestion, suggest_rewrites};
use super::scorer::{ConversationSignals, ScoreSet};
use crate::transcript::{Turn, render_transcript};

/// The structured output of the analysis engine for one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingReport {
    pub scores: ScoreSet,
    pub improvements: Vec<Improvement>,
    pub missed_facts_examples: Vec<String>,
    pub rewrites: Vec<RewriteSuggestion>,
    /// The conversation reconstructed as `"role: text"` lines.
    pub transcript: String,
}

/// Assembles coaching reports from parsed transcripts.
///
/// Scoring, tips, and missed-fact detection are pure functions of the
/// transcript; only the rewrite phrasing draws on the owned RNG. Analysis
/// is total: any input, including an empty transcript, yields a
/// well-formed report.
pub struct ConversationAnalyzer {
    rng: StdRng,
}

impl ConversationAnalyzer {
    /// Creates an analyzer with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an analyzer with a fixed seed, for reproducible rewrites
    /// in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Runs the four heuristic components over the turns and merges their
    /// output into one report.
    pub fn analyze(&mut self, turns: &[Turn]) -> CoachingReport {
        let signals = ConversationSignals::gather(turns);
        let scores = ScoreSet::from_signals(&signals);

        CoachingReport {
            improvements: suggest_improvements(&signals, &scores),
            missed_facts_examples: detect_missed_facts(turns),
            rewrites: suggest_rewrites(turns, &mut self.rng),
            transcript: render_transcript(turns),
            scores,
        }
    }
}

impl Default for ConversationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

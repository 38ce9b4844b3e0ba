//! Heuristic conversation-analysis engine.
//!
//! A transparent, auditable rule engine: given the same transcript and the
//! same keyword tables it produces the same scores, tips, and missed facts.
//! Only the rewrite phrasing for very short utterances draws on a random
//! source, which is injectable and seedable.
//!
//! # Module Structure
//!
//! - `keywords`: the fixed keyword tables, one named constant per rule
//! - `scorer`: signal gathering and the four clamped 1-10 scores
//! - `advisor`: the prioritized improvement-tip list
//! - `missed_facts`: unanswered customer specification requests
//! - `rewrite`: improved phrasings for the weakest rep utterances
//! - `report`: the `CoachingReport` shape and the assembling analyzer

pub mod keywords;

mod advisor;
mod missed_facts;
mod report;
mod rewrite;
mod scorer;

pub use advisor::{Improvement, MAX_IMPROVEMENTS, suggest_improvements};
pub use missed_facts::{MAX_MISSED_FACTS, detect_missed_facts};
pub use report::{CoachingReport, ConversationAnalyzer};
pub use rewrite::{MAX_REWRITES, RewriteSuggestion, suggest_rewrites};
pub use scorer::{ConversationSignals, ScoreSet};

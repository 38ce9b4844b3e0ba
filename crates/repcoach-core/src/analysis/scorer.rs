//! Heuristic scoring of a parsed conversation.
//!
//! All four scores derive from [`ConversationSignals`], a single counting
//! pass over the rep and customer utterances. Scores are integers clamped
//! to `[1, 10]` and are pure functions of the transcript: re-running the
//! scorer on unchanged input yields identical results.

use serde::{Deserialize, Serialize};

use super::keywords::{
    CLOSING_PHRASES, EMPATHY_MARKERS, FEATURE_KEYWORDS, OBJECTION_SIGNALS, RESOLUTION_TERMS,
    contains_any, count_present,
};
use crate::transcript::Turn;

/// Counts extracted from one pass over the transcript.
///
/// Keyword counts accumulate per keyword per utterance: an utterance
/// containing two distinct feature keywords contributes two, the same
/// keyword repeated inside one utterance contributes one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSignals {
    /// Mean whitespace-token count of rep utterances (0.0 if none).
    pub avg_rep_tokens: f64,
    /// Mean whitespace-token count of customer utterances (0.0 if none).
    pub avg_customer_tokens: f64,
    /// Any rep utterance contains an empathy marker.
    pub rep_empathy: bool,
    /// Feature keyword mentions across rep utterances.
    pub feature_mentions: usize,
    /// Objection signals across customer utterances.
    pub objection_count: usize,
    /// Resolution terms across rep utterances.
    pub handling_count: usize,
    /// Closing-attempt phrases across rep utterances.
    pub closing_attempts: usize,
}

impl ConversationSignals {
    /// Gathers signals from the transcript, classifying turns by the fixed
    /// role synonym sets. Turns with unrecognized roles are ignored.
    pub fn gather(turns: &[Turn]) -> Self {
        let rep_texts = rep_texts(turns);
        let cust_texts = customer_texts(turns);

        Self {
            avg_rep_tokens: mean_token_count(&rep_texts),
            avg_customer_tokens: mean_token_count(&cust_texts),
            rep_empathy: rep_texts.iter().any(|t| contains_any(t, EMPATHY_MARKERS)),
            feature_mentions: rep_texts
                .iter()
                .map(|t| count_present(t, FEATURE_KEYWORDS))
                .sum(),
            objection_count: cust_texts
                .iter()
                .map(|t| count_present(t, OBJECTION_SIGNALS))
                .sum(),
            handling_count: rep_texts
                .iter()
                .map(|t| count_present(t, RESOLUTION_TERMS))
                .sum(),
            closing_attempts: rep_texts
                .iter()
                .map(|t| count_present(t, CLOSING_PHRASES))
                .sum(),
        }
    }
}

/// The four coaching scores, each in `[1, 10]` and always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub rapport: u8,
    pub product_knowledge: u8,
    pub objection_handling: u8,
    pub closing: u8,
}

impl ScoreSet {
    pub fn from_signals(signals: &ConversationSignals) -> Self {
        Self {
            rapport: score_rapport(signals),
            product_knowledge: score_product_knowledge(signals),
            objection_handling: score_objection_handling(signals),
            closing: score_closing(signals),
        }
    }
}

/// Rewards letting the customer speak more, with a one-point bonus for
/// explicit empathy language.
fn score_rapport(signals: &ConversationSignals) -> u8 {
    let ratio = signals.avg_rep_tokens / (signals.avg_customer_tokens + 1.0);
    let base = (10.0 * (0.5 + 0.5 * (1.0 - ratio))).round();
    let mut score = base.clamp(1.0, 10.0) as u8;
    if signals.rep_empathy {
        score = (score + 1).min(10);
    }
    score
}

fn score_product_knowledge(signals: &ConversationSignals) -> u8 {
    clamp_score(3 + 2 * signals.feature_mentions as i64)
}

/// With no objections raised, a high floor applies (the rep gets credit
/// for a frictionless conversation, capped). Otherwise the score is the
/// handled-to-raised ratio scaled onto the 1..=10 range.
fn score_objection_handling(signals: &ConversationSignals) -> u8 {
    if signals.objection_count == 0 {
        return clamp_score(8 + signals.handling_count.min(2) as i64);
    }
    let ratio = (signals.handling_count as f64 / (signals.objection_count as f64 + 0.001)).min(1.0);
    ((10.0 * ratio).floor() as u8).max(1)
}

fn score_closing(signals: &ConversationSignals) -> u8 {
    clamp_score(2 + 3 * signals.closing_attempts as i64)
}

fn clamp_score(value: i64) -> u8 {
    value.clamp(1, 10) as u8
}

/// Rep utterances in transcript order.
pub fn rep_texts(turns: &[Turn]) -> Vec<&str> {
    turns
        .iter()
        .filter(|t| t.is_rep())
        .map(|t| t.text.as_str())
        .collect()
}

/// Customer utterances in transcript order.
pub fn customer_texts(turns: &[Turn]) -> Vec<&str> {
    turns
        .iter()
        .filter(|t| t.is_customer())
        .map(|t| t.text.as_str())
        .collect()
}

fn mean_token_count(texts: &[&str]) -> f64 {
    if texts.is_empty() {
        return 0.0;
    }
    let total: usize = texts.iter().map(|t| t.split_whitespace().count()).sum();
    total as f64 / texts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::parse_transcript;

    fn score(raw: &str) -> ScoreSet {
        ScoreSet::from_signals(&ConversationSignals::gather(&parse_transcript(raw)))
    }

    #[test]
    fn test_empty_transcript_defaults() {
        let scores = score("");
        // avg_rep = avg_cust = 0 makes the rapport base 10 * 1.0
        assert_eq!(scores.rapport, 10);
        assert_eq!(scores.product_knowledge, 3);
        assert_eq!(scores.objection_handling, 8);
        assert_eq!(scores.closing, 2);
    }

    #[test]
    fn test_all_scores_within_bounds() {
        let transcripts = [
            "",
            "rep: ok",
            "customer: no thanks, too expensive, not sure, maybe, I'll think",
            "rep: battery range speed memory ram processor cpu benchmark watt\n\
             rep: would you like to sign up? shall we? can i order now?\n\
             customer: maybe",
            "narrator: unclassified role only",
        ];
        for raw in transcripts {
            let s = score(raw);
            for v in [s.rapport, s.product_knowledge, s.objection_handling, s.closing] {
                assert!((1..=10).contains(&v), "score {v} out of range for {raw:?}");
            }
        }
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let raw = "rep: I understand, the battery lasts all day\ncustomer: not sure";
        assert_eq!(score(raw), score(raw));
    }

    #[test]
    fn test_empathy_bonus_applies_once() {
        let balanced = "rep: one two three\ncustomer: one two three";
        let with_empathy = "rep: totally get it yes\ncustomer: one two three four";
        let s1 = score(balanced);
        let s2 = score(with_empathy);
        // Same token balance, empathy marker adds exactly one point
        assert_eq!(s1.rapport + 1, s2.rapport);
    }

    #[test]
    fn test_verbose_rep_drags_rapport_to_floor() {
        let raw = "rep: one two three four five six seven eight nine ten eleven twelve \
                   thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty\n\
                   customer: no";
        assert_eq!(score(raw).rapport, 1);
    }

    #[test]
    fn test_product_knowledge_counts_keywords_per_utterance() {
        // "battery" and "range" in one utterance, "battery" again in another
        let raw = "rep: battery and range are class leading\nrep: battery again";
        let signals = ConversationSignals::gather(&parse_transcript(raw));
        assert_eq!(signals.feature_mentions, 3);
        assert_eq!(ScoreSet::from_signals(&signals).product_knowledge, 9);
    }

    #[test]
    fn test_objection_handling_ratio() {
        let raw = "customer: not sure about this\n\
                   customer: seems too high\n\
                   rep: we have a warranty";
        let signals = ConversationSignals::gather(&parse_transcript(raw));
        assert_eq!(signals.objection_count, 2);
        assert_eq!(signals.handling_count, 1);
        // floor(10 * 1/2.001) = 4
        assert_eq!(ScoreSet::from_signals(&signals).objection_handling, 4);
    }

    #[test]
    fn test_unanswered_objections_floor_at_one() {
        let raw = "customer: not convinced\nrep: well";
        assert_eq!(score(raw).objection_handling, 1);
    }

    #[test]
    fn test_no_objections_rewards_handling_up_to_cap() {
        let raw = "customer: great\nrep: discount, warranty, trial all included";
        // 8 + min(2, 3) = 10
        assert_eq!(score(raw).objection_handling, 10);
    }

    #[test]
    fn test_closing_attempts_scale() {
        assert_eq!(score("rep: hello there friend").closing, 2);
        assert_eq!(score("rep: would you like to proceed?").closing, 5);
        let two = "rep: would you like a quote? shall we start?";
        assert_eq!(score(two).closing, 8);
    }

    #[test]
    fn test_warranty_and_demo_are_not_product_keywords() {
        // Resolution and closing vocabularies must not leak into
        // product knowledge.
        let raw = "rep: As I understand, this offers a 2-year warranty. Would you like a demo?";
        let signals = ConversationSignals::gather(&parse_transcript(raw));
        assert_eq!(signals.feature_mentions, 0);
        let s = ScoreSet::from_signals(&signals);
        assert_eq!(s.product_knowledge, 3);
        assert!(s.closing > 2);
    }

    #[test]
    fn test_unrecognized_roles_do_not_feed_aggregates() {
        let raw = "bystander: the battery is huge\ncustomer: hello there you";
        let signals = ConversationSignals::gather(&parse_transcript(raw));
        assert_eq!(signals.feature_mentions, 0);
        assert_eq!(signals.avg_rep_tokens, 0.0);
        assert_eq!(signals.avg_customer_tokens, 3.0);
    }
}

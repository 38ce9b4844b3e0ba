//! Detection of customer questions the rep never answered.

use std::collections::HashSet;

use super::keywords::{FEATURE_KEYWORDS, QUESTION_LEADINS, contains_any};
use crate::transcript::Turn;

/// Upper bound on the missed-facts list.
pub const MAX_MISSED_FACTS: usize = 10;

/// Scans customer utterances in transcript order for specification
/// requests that went unanswered.
///
/// A customer utterance is a candidate when it contains a question lead-in
/// ("what is the", "how many") or any feature keyword. A candidate is a
/// miss when no feature keyword appears anywhere in the rep's side of the
/// transcript. The answered check is deliberately transcript-wide rather
/// than per-question: a rep who ever mentions a feature keyword clears all
/// candidates, including ones raised after the mention. Output preserves
/// order, deduplicates on first occurrence, and is truncated to
/// [`MAX_MISSED_FACTS`].
pub fn detect_missed_facts(turns: &[Turn]) -> Vec<String> {
    let rep_side = turns
        .iter()
        .filter(|t| t.is_rep())
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let answered = contains_any(&rep_side, FEATURE_KEYWORDS);

    let mut seen = HashSet::new();
    let mut missed = Vec::new();
    for turn in turns.iter().filter(|t| t.is_customer()) {
        let is_candidate = contains_any(&turn.text, QUESTION_LEADINS)
            || contains_any(&turn.text, FEATURE_KEYWORDS);
        if is_candidate && !answered && seen.insert(turn.text.clone()) {
            missed.push(turn.text.clone());
            if missed.len() == MAX_MISSED_FACTS {
                break;
            }
        }
    }
    missed
}

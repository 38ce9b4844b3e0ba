//! Ranked improvement tips.
//!
//! Rules fire in a fixed priority order and each appends independently;
//! the final list is truncated to [`MAX_IMPROVEMENTS`]. The order is the
//! ranking contract and must not be permuted.

use serde::{Deserialize, Serialize};

use super::scorer::{ConversationSignals, ScoreSet};

/// Upper bound on the improvement list.
pub const MAX_IMPROVEMENTS: usize = 5;

/// One coaching tip with its fixed rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub tip: String,
    pub why: String,
}

impl Improvement {
    fn new(tip: &str, why: &str) -> Self {
        Self {
            tip: tip.to_string(),
            why: why.to_string(),
        }
    }
}

/// Derives the prioritized tip list from the gathered signals and scores.
pub fn suggest_improvements(signals: &ConversationSignals, scores: &ScoreSet) -> Vec<Improvement> {
    let mut improvements = Vec::new();

    if !signals.rep_empathy {
        improvements.push(Improvement::new(
            "Use brief empathy statements early",
            "Empathy builds trust and raises willingness to share info.",
        ));
    }
    if scores.product_knowledge < 6 {
        improvements.push(Improvement::new(
            "Share one clear product fact and one benefit per objection",
            "Customers need specific facts to evaluate high-value purchases.",
        ));
    }
    if signals.objection_count > 0 && signals.handling_count == 0 {
        improvements.push(Improvement::new(
            "Address objections with concrete offers (warranty/trial/discount)",
            "Concrete options reduce perceived risk.",
        ));
    }
    if signals.closing_attempts == 0 {
        improvements.push(Improvement::new(
            "Try a soft close within 2-3 exchanges",
            "Soft closes test buying signals without being pushy.",
        ));
    }
    improvements.push(Improvement::new(
        "Be concise and ask open questions",
        "Short, targeted questions guide customers to reveal buying intent.",
    ));

    improvements.truncate(MAX_IMPROVEMENTS);
    improvements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::parse_transcript;

    fn improvements_for(raw: &str) -> Vec<Improvement> {
        let signals = ConversationSignals::gather(&parse_transcript(raw));
        let scores = ScoreSet::from_signals(&signals);
        suggest_improvements(&signals, &scores)
    }

    #[test]
    fn test_empty_transcript_yields_four_tips() {
        // Empathy, product knowledge, and closing rules all fire; the
        // objection rule does not (no objections raised); plus the
        // unconditional tip.
        let tips = improvements_for("");
        assert_eq!(tips.len(), 4);
        assert!(tips[0].tip.contains("empathy"));
        assert_eq!(tips.last().unwrap().tip, "Be concise and ask open questions");
    }

    #[test]
    fn test_all_rules_firing_truncates_to_five() {
        // Objections raised, none handled, no empathy, no product facts,
        // no closing attempt: all five rules fire.
        let tips = improvements_for("rep: well\ncustomer: too expensive");
        assert_eq!(tips.len(), MAX_IMPROVEMENTS);
        assert!(tips[2].tip.contains("concrete offers"));
    }

    #[test]
    fn test_generic_tip_is_always_last() {
        let strong = "rep: I understand. The battery and range are class leading, \
                      with benchmark results to prove it. Would you like a trial?\n\
                      customer: sounds good";
        let tips = improvements_for(strong);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].tip, "Be concise and ask open questions");
    }

    #[test]
    fn test_order_is_stable() {
        let tips = improvements_for("rep: hm\ncustomer: not sure");
        let again = improvements_for("rep: hm\ncustomer: not sure");
        assert_eq!(tips, again);
        // Empathy tip outranks the objection tip
        let empathy_pos = tips.iter().position(|t| t.tip.contains("empathy")).unwrap();
        let objection_pos = tips
            .iter()
            .position(|t| t.tip.contains("concrete offers"))
            .unwrap();
        assert!(empathy_pos < objection_pos);
    }
}

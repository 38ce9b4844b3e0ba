//! Rewrite suggestions for weak rep utterances.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::keywords::BENEFIT_PHRASES;
use crate::transcript::Turn;

/// Upper bound on the rewrite list.
pub const MAX_REWRITES: usize = 3;

/// Utterances at or below this token count get the empathy-plus-benefit
/// treatment instead of a verbatim echo.
const SHORT_UTTERANCE_TOKENS: usize = 3;

/// One rewrite suggestion, keyed by the original utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteSuggestion {
    pub original: String,
    pub rewrite: String,
}

/// Selects the rep utterances with the fewest whitespace tokens (stable
/// sort, so ties keep transcript order) and proposes improved phrasings.
///
/// Short utterances get an empathy statement plus a canned value
/// proposition drawn from [`BENEFIT_PHRASES`] through the injected RNG;
/// the selection is non-deterministic by design. Longer utterances get an
/// acknowledgment that echoes the trimmed original verbatim.
pub fn suggest_rewrites<R: Rng>(turns: &[Turn], rng: &mut R) -> Vec<RewriteSuggestion> {
    let mut candidates: Vec<&str> = turns
        .iter()
        .filter(|t| t.is_rep())
        .map(|t| t.text.as_str())
        .collect();
    candidates.sort_by_key(|t| t.split_whitespace().count());
    candidates.truncate(MAX_REWRITES);

    candidates
        .into_iter()
        .map(|original| RewriteSuggestion {
            original: original.to_string(),
            rewrite: rewrite_utterance(original, rng),
        })
        .collect()
}

fn rewrite_utterance<R: Rng>(original: &str, rng: &mut R) -> String {
    let trimmed = original.trim();
    if trimmed.split_whitespace().count() <= SHORT_UTTERANCE_TOKENS {
        let benefit = BENEFIT_PHRASES[rng.gen_range(0..BENEFIT_PHRASES.len())];
        format!(
            "I understand — that's a valid concern. One thing that helps is that this product \
             {benefit}. Would that address your concern?"
        )
    } else {
        format!("I hear you. To be clear: {trimmed}. Would you like me to arrange a demo or send a comparison?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::parse_transcript;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rewrites(raw: &str) -> Vec<RewriteSuggestion> {
        suggest_rewrites(&parse_transcript(raw), &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_no_rep_turns_yields_no_rewrites() {
        assert!(rewrites("customer: anything in stock?").is_empty());
    }

    #[test]
    fn test_selects_fewest_token_utterances() {
        let raw = "rep: This model ships with everything you asked about earlier\n\
                   rep: ok\n\
                   rep: sure thing\n\
                   rep: let me check on that\n\
                   rep: yes";
        let picked: Vec<String> = rewrites(raw).into_iter().map(|r| r.original).collect();
        assert_eq!(picked, vec!["ok", "yes", "sure thing"]);
    }

    #[test]
    fn test_ties_keep_transcript_order() {
        let raw = "rep: fine\nrep: good\nrep: deal";
        let picked: Vec<String> = rewrites(raw).into_iter().map(|r| r.original).collect();
        assert_eq!(picked, vec!["fine", "good", "deal"]);
    }

    #[test]
    fn test_short_utterance_gets_benefit_phrase_from_fixed_set() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = suggest_rewrites(&[Turn::rep("ok")], &mut rng);
            assert_eq!(out.len(), 1);
            assert!(out[0].rewrite.starts_with("I understand"));
            assert!(
                BENEFIT_PHRASES.iter().any(|b| out[0].rewrite.contains(b)),
                "rewrite must embed a canned benefit phrase: {}",
                out[0].rewrite
            );
        }
    }

    #[test]
    fn test_long_utterance_echoes_original() {
        let original = "we might be able to look into that for you";
        let out = rewrites(&format!("rep: {original}"));
        assert_eq!(out.len(), 1);
        assert!(out[0].rewrite.contains(original));
        assert!(out[0].rewrite.starts_with("I hear you."));
    }

    #[test]
    fn test_never_more_than_three() {
        let raw = (0..6).map(|i| format!("rep: line {i}")).collect::<Vec<_>>().join("\n");
        assert_eq!(rewrites(&raw).len(), MAX_REWRITES);
    }
}

//! Default persona presets.
//!
//! Provides the built-in customer archetypes available when no catalog
//! file is configured.

use super::model::Persona;

/// Returns the built-in persona set.
pub fn get_default_presets() -> Vec<Persona> {
    vec![
        Persona::new(
            "silent_skeptic",
            "Silent Skeptic",
            "You are a cautious customer. Give short replies. Ask for proof and evidence. \
             Be skeptical about claims.",
        ),
        Persona::new(
            "budget_shopper",
            "Budget Shopper",
            "You are focused on price and deals. Ask about discounts, cheaper alternatives, \
             and total cost of ownership.",
        ),
        Persona::new(
            "feature_engineer",
            "Feature-Focused Engineer",
            "You are technically oriented. Ask for specific product specifications, numbers, \
             benchmarks and validations.",
        ),
        Persona::new(
            "emotional_buyer",
            "Emotional Buyer",
            "You buy with emotion. Ask about stories, testimonials, and reassurance. Look for \
             social proof and trust signals.",
        ),
        Persona::new(
            "stall_stall",
            "Stall & Stall",
            "You frequently delay decisions, say 'I'll think about it' and use evasive \
             language. Do not commit quickly.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_keys_are_unique() {
        let presets = get_default_presets();
        let mut keys: Vec<&str> = presets.iter().map(|p| p.key.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), presets.len());
    }
}

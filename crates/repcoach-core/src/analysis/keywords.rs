//! Fixed keyword tables driving the heuristic rules.
//!
//! Every table is a named constant so each rule can be audited and tested
//! in isolation. Matching is case-insensitive substring containment, never
//! word-boundary tokenization: a keyword occurring inside a longer word
//! still counts. All entries are stored lowercase; match against the
//! lowercased utterance.

/// Technical feature terms a knowledgeable rep is expected to mention.
pub const FEATURE_KEYWORDS: &[&str] = &[
    "battery",
    "range",
    "mah",
    "watt",
    "hp",
    "cc",
    "km",
    "mph",
    "speed",
    "memory",
    "ram",
    "gb",
    "processor",
    "cpu",
    "benchmark",
];

/// Empathy markers in rep speech.
pub const EMPATHY_MARKERS: &[&str] = &[
    "understand",
    "totally",
    "i get",
    "i see",
    "sounds like",
    "sorry to hear",
];

/// Objection signals in customer speech.
pub const OBJECTION_SIGNALS: &[&str] = &[
    "not sure",
    "i'll think",
    "maybe",
    "too expensive",
    "expensive",
    "too high",
    "no thanks",
    "not convinced",
    "don't know",
];

/// Concrete-offer terms that count as objection handling.
pub const RESOLUTION_TERMS: &[&str] = &[
    "discount",
    "warranty",
    "guarantee",
    "trial",
    "return",
    "demo",
    "save",
    "promo",
    "price match",
];

/// Phrases that count as a closing attempt.
pub const CLOSING_PHRASES: &[&str] = &[
    "would you like",
    "shall we",
    "can i",
    "ready to",
    "how about we",
    "book a test",
    "sign up",
    "purchase now",
    "order now",
];

/// Question lead-ins that mark a customer utterance as a spec request.
pub const QUESTION_LEADINS: &[&str] = &["what is the", "how many"];

/// Canned value propositions used by short-utterance rewrites.
pub const BENEFIT_PHRASES: &[&str] = &[
    "offers a 2-year warranty and a free trial",
    "delivers 20% better battery life than our competitor",
    "comes with complimentary on-site setup and training",
    "has a 30-day money-back guarantee",
];

/// Whether the lowercased form of `text` contains any keyword from `table`.
pub fn contains_any(text: &str, table: &[&str]) -> bool {
    let lower = text.to_lowercase();
    table.iter().any(|kw| lower.contains(kw))
}

/// Number of keywords from `table` present in `text` (each keyword counted
/// at most once per call, regardless of repeats inside the text).
pub fn count_present(text: &str, table: &[&str]) -> usize {
    let lower = text.to_lowercase();
    table.iter().filter(|kw| lower.contains(*kw)).count()
}

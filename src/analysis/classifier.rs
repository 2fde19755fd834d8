use crate::models::PainCategory;

/// Rules evaluated in order; the first rule with a matching keyword wins.
const RULES: &[(PainCategory, &[&str])] = &[
    (PainCategory::Pricing, &["cost", "price"]),
    (PainCategory::Reliability, &["fail", "error", "exception"]),
    (PainCategory::Performance, &["slow", "timeout"]),
];

/// Maps free text to exactly one pain category. Total and case-insensitive;
/// text matching no rule falls back to `Implementation`.
pub fn classify(text: &str) -> PainCategory {
    let text = text.to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(PainCategory::Implementation)
}

/// True when the title contains any of the pain keywords, ignoring case.
pub fn matches_pain_keyword(title: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| title.contains(&k.to_lowercase()))
}

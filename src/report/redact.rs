use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Replaces known brand names with a neutral placeholder, ignoring case.
#[derive(Debug, Clone)]
pub struct Redactor {
    pattern: Option<Regex>,
    placeholder: String,
}

impl Redactor {
    pub fn new(brands: &[String], placeholder: &str) -> Result<Self> {
        let mut names: Vec<&str> = brands
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect();
        // Longest first; alternation takes the leftmost listed match.
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup();

        let pattern = if names.is_empty() {
            None
        } else {
            let alternation = names
                .iter()
                .map(|n| regex::escape(n))
                .collect::<Vec<_>>()
                .join("|");
            Some(RegexBuilder::new(&alternation).case_insensitive(true).build()?)
        };

        Ok(Self {
            pattern,
            placeholder: placeholder.to_string(),
        })
    }

    pub fn redact(&self, text: &str) -> String {
        match self.pattern {
            Some(ref pattern) => pattern
                .replace_all(text, regex::NoExpand(&self.placeholder))
                .into_owned(),
            None => text.to_string(),
        }
    }
}

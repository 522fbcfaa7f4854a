// netlytics-core/src/domain/governance/keywords.rs

use crate::domain::error::DomainError;
use regex::{Regex, RegexBuilder};

/// A named list of phrases. A text matches when it contains any phrase
/// anywhere, case-insensitively (`phonecall` counts as `call`).
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
}

pub const REFERRAL: KeywordSet = KeywordSet {
    name: "referral",
    phrases: &["referral", "refer you", "introduction", "connect you"],
};

pub const INTERVIEW: KeywordSet = KeywordSet {
    name: "interview",
    phrases: &["interview", "call", "meeting", "chat", "zoom", "coffee"],
};

pub const POSITIVE: KeywordSet = KeywordSet {
    name: "positive",
    phrases: &["thank", "appreciate", "helpful", "great", "perfect", "awesome"],
};

pub const NEGATIVE: KeywordSet = KeywordSet {
    name: "negative",
    phrases: &["not interested", "no thanks", "busy", "not at this time"],
};

/// Outcome signals derived from message content, in output column order.
pub const OUTCOME_SIGNALS: [KeywordSet; 4] = [REFERRAL, INTERVIEW, POSITIVE, NEGATIVE];

struct CompiledSet {
    name: &'static str,
    regex: Regex,
}

/// Keyword sets compiled once, applied row by row.
pub struct KeywordScanner {
    sets: Vec<CompiledSet>,
}

impl KeywordScanner {
    pub fn new(sets: &[KeywordSet]) -> Result<Self, DomainError> {
        let mut compiled = Vec::with_capacity(sets.len());
        for set in sets {
            compiled.push(CompiledSet {
                name: set.name,
                regex: compile(set)?,
            });
        }
        Ok(Self { sets: compiled })
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sets.iter().map(|s| s.name)
    }

    /// One flag per set, in construction order.
    pub fn classify_all(&self, text: &str) -> Vec<bool> {
        self.sets.iter().map(|s| s.regex.is_match(text)).collect()
    }
}

/// Row-wise check of a single set.
pub fn classify(text: &str, set: &KeywordSet) -> Result<bool, DomainError> {
    Ok(compile(set)?.is_match(text))
}

fn compile(set: &KeywordSet) -> Result<Regex, DomainError> {
    let alternatives: Vec<String> = set.phrases.iter().map(|p| regex::escape(p)).collect();
    let pattern = alternatives.join("|");
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| DomainError::InvalidPattern {
            name: set.name.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_outcome_signals() -> Result<()> {
        let scanner = KeywordScanner::new(&OUTCOME_SIGNALS)?;

        let flags = scanner.classify_all("Thanks! Happy to REFER YOU, let's set up a Zoom call.");
        assert_eq!(flags, vec![true, true, true, false]);

        let flags = scanner.classify_all("Sorry, not interested right now.");
        assert_eq!(flags, vec![false, false, false, true]);

        assert_eq!(scanner.classify_all(""), vec![false; 4]);
        Ok(())
    }

    #[test]
    fn test_phrases_match_inside_words() -> Result<()> {
        assert!(classify("Free for a phonecall tomorrow?", &INTERVIEW)?);
        assert!(classify("callback tomorrow?", &INTERVIEW)?);
        assert!(!classify("See you at the conference", &REFERRAL)?);
        assert!(classify("THANK you", &POSITIVE)?);
        Ok(())
    }

    #[test]
    fn test_names_in_order() -> Result<()> {
        let scanner = KeywordScanner::new(&OUTCOME_SIGNALS)?;
        let names: Vec<_> = scanner.names().collect();
        assert_eq!(names, vec!["referral", "interview", "positive", "negative"]);
        Ok(())
    }
}

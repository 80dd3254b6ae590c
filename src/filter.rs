//! Removal of banned words from detected fields.
//!
//! All words are compiled once into a single alternation of escaped
//! literals. Matching is leftmost-first: at each position the first listed
//! word that matches wins, not the longest one.

use regex::{Regex, RegexBuilder};

use crate::error::FilterError;

/// Immutable set of literal substrings to strip from artist/title.
///
/// An empty set is the identity: [`FilterSet::apply`] returns its input
/// untouched, without trimming.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    words: Vec<String>,
    pattern: Option<Regex>,
}

impl FilterSet {
    /// Case-sensitive filter.
    pub fn new<I, S>(words: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(words, false)
    }

    pub fn with_ignore_case<I, S>(words: I, ignore_case: bool) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(words, ignore_case)
    }

    fn build<I, S>(words: I, ignore_case: bool) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.iter().any(|w| w.trim().is_empty()) {
            return Err(FilterError::BlankWord);
        }
        if words.is_empty() {
            return Ok(Self::default());
        }

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(ignore_case)
            .build()?;

        Ok(Self {
            words,
            pattern: Some(pattern),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Remove every non-overlapping occurrence of any word, then trim.
    pub fn apply(&self, text: &str) -> String {
        match &self.pattern {
            None => text.to_string(),
            Some(pattern) => pattern.replace_all(text, "").trim().to_string(),
        }
    }
}

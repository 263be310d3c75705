//! Tolerant free-text product search.

use crate::catalog::Product;

/// Words shorter than this, in UTF-16 code units, are ignored by the
/// word-level fallback.
pub const MIN_WORD_LEN: usize = 2;

/// A normalized search query.
///
/// Matching runs in two tiers: the whole query as a phrase first, then any
/// single word of at least [`MIN_WORD_LEN`] UTF-16 code units. Search only narrows;
/// a blank query, or one made entirely of short words, matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    phrase: String,
    words: Vec<String>,
}

impl SearchQuery {
    /// Normalize raw input: trim, lowercase, and split into usable words.
    pub fn new(raw: &str) -> Self {
        let phrase = raw.trim().to_lowercase();
        let words = phrase
            .split_whitespace()
            .filter(|w| w.encode_utf16().count() >= MIN_WORD_LEN)
            .map(str::to_string)
            .collect();
        Self { phrase, words }
    }

    /// The normalized phrase.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Words usable for the fallback match.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Check if the query places no restriction on results.
    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty()
    }

    /// Check whether a product matches this query.
    pub fn matches(&self, product: &Product) -> bool {
        if self.is_empty() {
            return true;
        }
        self.matches_text(&product.search_text())
    }

    /// Match against an already-lowercased haystack.
    pub fn matches_text(&self, haystack: &str) -> bool {
        if self.is_empty() || haystack.contains(&self.phrase) {
            return true;
        }
        if self.words.is_empty() {
            return true;
        }
        self.words.iter().any(|w| haystack.contains(w.as_str()))
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        SearchQuery::new(raw)
    }
}

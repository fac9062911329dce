//! Term vectors: bag-of-words representation of documents and queries
//!
//! A `TermVector` is built once from a piece of text and never changes. It
//! keeps raw per-term counts over normalized terms plus the two statistics
//! the scorers need (`max_freq`, `total_word_count`).

use crate::tokenizer::{TextInput, Tokenizer};
use nearby_core::Key;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Normalized term -> raw count for one document or query
#[derive(Debug, Clone)]
pub struct TermVector {
    key: Key,
    /// Ordered so scoring sums terms in a fixed order
    frequencies: BTreeMap<String, u32>,
    /// Tokens kept after stopword removal (not the raw word count)
    total_word_count: usize,
    max_freq: u32,
    tokenizer: Arc<Tokenizer>,
}

impl TermVector {
    /// Build a term vector for an indexed document
    pub fn build<'a>(
        key: impl Into<Key>,
        input: impl Into<TextInput<'a>>,
        tokenizer: &Arc<Tokenizer>,
    ) -> Self {
        let tokens = tokenizer.tokenize(input);
        let total_word_count = tokens.len();

        let mut frequencies: BTreeMap<String, u32> = BTreeMap::new();
        for token in tokens {
            *frequencies.entry(token).or_insert(0) += 1;
        }
        let max_freq = frequencies.values().copied().max().unwrap_or(0);

        TermVector {
            key: key.into(),
            frequencies,
            total_word_count,
            max_freq,
            tokenizer: Arc::clone(tokenizer),
        }
    }

    /// Build a transient query vector; the raw text doubles as its key
    pub fn query(text: &str, tokenizer: &Arc<Tokenizer>) -> Self {
        Self::build(text, text, tokenizer)
    }

    /// External key (the raw text for queries)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Count of `term`, normalized the same way as at construction
    ///
    /// Returns 0 for absent terms and for stopwords.
    pub fn freq(&self, term: &str) -> u32 {
        self.count(&self.tokenizer.normalize(term))
    }

    /// Count of an already-normalized term
    pub fn count(&self, normalized: &str) -> u32 {
        self.frequencies.get(normalized).copied().unwrap_or(0)
    }

    /// Whether an already-normalized term is present
    pub fn contains(&self, normalized: &str) -> bool {
        self.frequencies.contains_key(normalized)
    }

    /// Largest count of any term, 0 when empty
    pub fn max_freq(&self) -> u32 {
        self.max_freq
    }

    /// Number of tokens after stopword removal
    pub fn total_word_count(&self) -> usize {
        self.total_word_count
    }

    /// Iterate over `(normalized term, count)` pairs in term order
    pub fn terms(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.frequencies.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether no term survived tokenization
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Tokenizer used to build this vector
    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        &self.tokenizer
    }
}

//! Inverted text index over a fixed corpus
//!
//! This module provides:
//! - TextIndex: term -> documents postings plus document frequencies
//! - Candidate lookup through the postings, optionally restricted to a key set
//! - Ranked query with bounded best-k selection
//!
//! The index is built once from the full corpus and is read-only afterwards,
//! so it can be shared across threads without locking.

use crate::document::TermVector;
use crate::scorer::{Scorer, ScorerContext};
use crate::tokenizer::Tokenizer;
use nearby_core::{Hit, Key, TopK};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// Result limit used when the caller has no better bound
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Immutable inverted index with TF-IDF statistics
#[derive(Debug)]
pub struct TextIndex {
    tokenizer: Arc<Tokenizer>,

    /// Corpus, in insertion order
    documents: Vec<TermVector>,

    /// Term -> positions in `documents`, ascending, one entry per document
    postings: HashMap<String, Vec<usize>>,

    /// Term -> number of documents containing it
    doc_freqs: HashMap<String, usize>,

    /// Key -> position in `documents`
    by_key: HashMap<Key, usize>,
}

impl TextIndex {
    /// Build the index from the whole corpus
    ///
    /// `tokenizer` must be the one the documents were built with; it is used
    /// to normalize lookup terms.
    pub fn build(tokenizer: Arc<Tokenizer>, documents: Vec<TermVector>) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();
        let mut by_key = HashMap::with_capacity(documents.len());

        for (pos, doc) in documents.iter().enumerate() {
            for (term, _) in doc.terms() {
                postings.entry(term.to_string()).or_default().push(pos);
                *doc_freqs.entry(term.to_string()).or_insert(0) += 1;
            }
            by_key.insert(doc.key().to_string(), pos);
        }

        info!(
            documents = documents.len(),
            terms = postings.len(),
            stemming = tokenizer.stems(),
            "text index built"
        );

        TextIndex {
            tokenizer,
            documents,
            postings,
            doc_freqs,
            by_key,
        }
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of documents containing `term` (normalized like stored terms),
    /// or `default` when no document does
    pub fn doc_freq(&self, term: &str, default: usize) -> usize {
        self.doc_freqs
            .get(&self.tokenizer.normalize(term))
            .copied()
            .unwrap_or(default)
    }

    /// Corpus statistics for scorers
    pub fn scorer_context(&self) -> ScorerContext<'_> {
        ScorerContext::new(self.documents.len(), &self.doc_freqs)
    }

    /// Tokenizer shared by the corpus
    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        &self.tokenizer
    }

    /// Look up an indexed document by key
    pub fn get(&self, key: &str) -> Option<&TermVector> {
        self.by_key.get(key).map(|&pos| &self.documents[pos])
    }

    /// Build a query vector with this index's tokenizer
    pub fn parse_query(&self, text: &str) -> TermVector {
        TermVector::query(text, &self.tokenizer)
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Positions of documents sharing at least one term with `query`,
    /// restricted to `keys` when given. Ascending, deduplicated.
    fn candidates(&self, query: &TermVector, keys: Option<&HashSet<Key>>) -> BTreeSet<usize> {
        query
            .terms()
            .filter_map(|(term, _)| self.postings.get(term))
            .flatten()
            .copied()
            .filter(|&pos| keys.map_or(true, |k| k.contains(self.documents[pos].key())))
            .collect()
    }

    /// Rank documents against `query`, best first, at most `max_results`.
    ///
    /// Each hit's distance is the inverted score (`1 / score`, or infinity
    /// for a zero score). A query without terms has nothing to rank against
    /// and yields no results. `candidate_keys = Some(set)` limits the search
    /// to documents whose key is in the set.
    pub fn query(
        &self,
        query: &TermVector,
        max_results: usize,
        scorer: &dyn Scorer,
        candidate_keys: Option<&HashSet<Key>>,
    ) -> Vec<Hit> {
        if query.is_empty() {
            return vec![];
        }

        let ctx = self.scorer_context();
        let mut top = TopK::bounded(max_results);
        for pos in self.candidates(query, candidate_keys) {
            let doc = &self.documents[pos];
            let score = scorer.score(query, doc, &ctx);
            let distance = if score == 0.0 {
                f64::INFINITY
            } else {
                1.0 / score
            };
            top.push(distance, pos);
        }

        top.into_sorted_vec()
            .into_iter()
            .map(|(distance, pos)| Hit::new(distance, self.documents[pos].key()))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

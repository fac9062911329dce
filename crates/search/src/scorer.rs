//! Scoring infrastructure for text search
//!
//! This module provides:
//! - Scorer trait for pluggable similarity functions
//! - ScorerContext for corpus-level statistics
//! - DotProductScorer: raw term-count dot product
//! - TfIdfScorer: TF-IDF weighted dot product (default)
//!
//! Scorers return a similarity where higher = more relevant; the index
//! inverts it into a ranking distance.

use crate::document::TermVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// ScorerContext
// ============================================================================

/// Corpus statistics available to scorers
///
/// Borrowed from the index for the duration of one query.
#[derive(Debug, Clone, Copy)]
pub struct ScorerContext<'a> {
    total_docs: usize,
    doc_freqs: &'a HashMap<String, usize>,
}

impl<'a> ScorerContext<'a> {
    /// Create a context over a document-frequency table
    pub fn new(total_docs: usize, doc_freqs: &'a HashMap<String, usize>) -> Self {
        ScorerContext {
            total_docs,
            doc_freqs,
        }
    }

    /// Total documents in the corpus
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    /// Documents containing an already-normalized term, or `default` if unseen
    pub fn doc_freq(&self, normalized: &str, default: usize) -> usize {
        self.doc_freqs.get(normalized).copied().unwrap_or(default)
    }

    /// Inverse document frequency: `ln(N / df)`, with unseen terms counted as
    /// appearing once so the logarithm stays finite
    pub fn idf(&self, normalized: &str) -> f64 {
        if self.total_docs == 0 {
            return 0.0;
        }
        let df = self.doc_freq(normalized, 1).max(1) as f64;
        (self.total_docs as f64 / df).ln()
    }
}

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable similarity between a query and a candidate document
///
/// # Thread Safety
///
/// Scorers must be Send + Sync: one instance serves concurrent queries.
pub trait Scorer: Send + Sync {
    /// Similarity of `doc` to `query`; higher = more relevant, 0 = unrelated
    fn score(&self, query: &TermVector, doc: &TermVector, ctx: &ScorerContext<'_>) -> f64;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// DotProductScorer
// ============================================================================

/// Sum over query terms of `count(query) * count(doc)`
#[derive(Debug, Clone, Copy, Default)]
pub struct DotProductScorer;

impl Scorer for DotProductScorer {
    fn score(&self, query: &TermVector, doc: &TermVector, _ctx: &ScorerContext<'_>) -> f64 {
        query
            .terms()
            .map(|(term, q_count)| q_count as f64 * doc.count(term) as f64)
            .sum()
    }

    fn name(&self) -> &str {
        "dot-product"
    }
}

// ============================================================================
// TfIdfScorer
// ============================================================================

/// TF-IDF weighted dot product
///
/// For each term shared by query and document:
///
/// weight = tf(t, doc) * tf(t, query) * idf(t)
///
/// Where:
/// - tf(t, d) = 0.5 + 0.5 * count(t, d) / max_freq(d)   (max_freq of 0 read as 1)
/// - idf(t) = ln(N / df(t))
///
/// A term present in every document has idf 0 and contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    /// Augmented term frequency of an already-normalized term
    pub fn tf(term: &str, doc: &TermVector) -> f64 {
        let max_freq = doc.max_freq().max(1) as f64;
        0.5 + 0.5 * doc.count(term) as f64 / max_freq
    }
}

impl Scorer for TfIdfScorer {
    fn score(&self, query: &TermVector, doc: &TermVector, ctx: &ScorerContext<'_>) -> f64 {
        query
            .terms()
            .filter(|(term, _)| doc.contains(term))
            .map(|(term, _)| Self::tf(term, doc) * Self::tf(term, query) * ctx.idf(term))
            .sum()
    }

    fn name(&self) -> &str {
        "tf-idf"
    }
}

// ============================================================================
// ScoringKind
// ============================================================================

/// Configurable choice of built-in scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringKind {
    /// TF-IDF weighted dot product
    #[default]
    Tfidf,
    /// Raw term-count dot product
    Dot,
}

impl ScoringKind {
    /// Instantiate the scorer
    pub fn scorer(self) -> Arc<dyn Scorer> {
        match self {
            ScoringKind::Tfidf => Arc::new(TfIdfScorer),
            ScoringKind::Dot => Arc::new(DotProductScorer),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

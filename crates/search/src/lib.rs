//! Text retrieval for nearby
//!
//! This crate provides:
//! - Tokenizer with stopword removal and optional stemming
//! - TermVector bag-of-words documents and queries
//! - Scorer trait with dot-product and TF-IDF implementations
//! - TextIndex inverted index with ranked, key-restricted queries
//!
//! # Usage
//!
//! ```
//! use nearby_search::{TermVector, TextIndex, TfIdfScorer, Tokenizer};
//! use std::sync::Arc;
//!
//! let tokenizer = Arc::new(Tokenizer::new(true));
//! let docs = vec![
//!     TermVector::build("1", "Chocolate cupcakes", &tokenizer),
//!     TermVector::build("2", "Carne asada tacos", &tokenizer),
//! ];
//! let index = TextIndex::build(tokenizer, docs);
//!
//! let hits = index.query(&index.parse_query("cupcake"), 10, &TfIdfScorer, None);
//! assert_eq!(hits[0].key, "1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod index;
pub mod scorer;
pub mod tokenizer;

pub use document::TermVector;
pub use index::{TextIndex, DEFAULT_MAX_RESULTS};
pub use scorer::{DotProductScorer, Scorer, ScorerContext, ScoringKind, TfIdfScorer};
pub use tokenizer::{is_stop_word, split_words, TextInput, Tokenizer, STOP_WORDS};

//! Retrieval engine for nearby
//!
//! This crate ties the lower layers together:
//! - Configuration: `nearby.toml`
//! - Loader: JSON-lines corpus -> ingest records
//! - Ingestion: records -> spatial index, text index, object store
//! - SearchContext: validated query pipeline over the built indexes
//!
//! Everything is built once at startup; afterwards the context is
//! read-only and shared freely between threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod ingest;
pub mod loader;
pub mod search;
pub mod store;

pub use config::{FieldMap, NearbyConfig, CONFIG_FILE_NAME};
pub use ingest::{ingest, IngestRecord, IngestReport, Ingested};
pub use loader::{load_corpus, parse_json_lines, read_json_lines, CorpusLines};
pub use search::{IndexStats, SearchContext, SearchPage, SearchResult, SearchStats};
pub use store::{MemoryStore, ObjectStore};

pub use nearby_core::{Error, ErrorBody, QueryLimits, Result, SearchParams, ValidationError};

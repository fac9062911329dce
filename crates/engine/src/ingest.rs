//! Ingestion: corpus records -> spatial index, text index and object store
//!
//! Records are indexed in input order. A record without usable coordinates
//! (missing or non-finite) or with a key already seen is skipped and
//! reported; ingestion as a whole still succeeds.

use crate::config::NearbyConfig;
use crate::search::SearchContext;
use crate::store::MemoryStore;
use nearby_core::{Key, Result};
use nearby_search::{TermVector, TextIndex, Tokenizer};
use nearby_spatial::SpatialIndex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// One corpus record as handed over by a loader
#[derive(Debug, Clone, PartialEq)]
pub struct IngestRecord {
    /// Unique record key
    pub key: Key,
    /// Text to index
    pub text: String,
    /// `(latitude, longitude)` in degrees, if known
    pub coordinates: Option<(f64, f64)>,
    /// Full record returned with search results
    pub payload: Value,
}

impl IngestRecord {
    /// Create a record
    pub fn new(
        key: impl Into<Key>,
        text: impl Into<String>,
        coordinates: Option<(f64, f64)>,
        payload: Value,
    ) -> Self {
        IngestRecord {
            key: key.into(),
            text: text.into(),
            coordinates,
            payload,
        }
    }
}

/// Outcome counters of one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Records indexed
    pub indexed: usize,
    /// Records skipped, including corpus lines the loader rejected
    pub skipped: usize,
    /// Keys of skipped records, in input order
    pub skipped_keys: Vec<Key>,
    /// 1-based corpus lines that were not a usable record
    pub rejected_lines: Vec<usize>,
}

/// Built query handle plus the ingestion report
#[derive(Debug, Clone)]
pub struct Ingested {
    /// Ready-to-query context
    pub context: SearchContext,
    /// What was indexed and what was skipped
    pub report: IngestReport,
}

/// Build both indexes and the object store from `records`.
///
/// # Errors
///
/// Only configuration problems fail ingestion; bad records are skipped.
pub fn ingest(
    records: impl IntoIterator<Item = IngestRecord>,
    config: &NearbyConfig,
) -> Result<Ingested> {
    config.validate()?;
    let scoring = config.scoring_kind()?;

    let tokenizer = Arc::new(Tokenizer::new(config.stemming));
    let mut points = Vec::new();
    let mut documents = Vec::new();
    let mut store = MemoryStore::new();
    let mut seen: HashSet<Key> = HashSet::new();
    let mut report = IngestReport::default();

    for record in records {
        let coordinates = record
            .coordinates
            .filter(|(lat, lon)| lat.is_finite() && lon.is_finite());
        let Some((lat, lon)) = coordinates else {
            warn!(key = %record.key, "skipping record without coordinates");
            report.skipped += 1;
            report.skipped_keys.push(record.key);
            continue;
        };
        if !seen.insert(record.key.clone()) {
            warn!(key = %record.key, "skipping record with duplicate key");
            report.skipped += 1;
            report.skipped_keys.push(record.key);
            continue;
        }

        documents.push(TermVector::build(
            record.key.as_str(),
            record.text.as_str(),
            &tokenizer,
        ));
        points.push((record.key.clone(), [lat, lon]));
        store.insert(record.key, record.payload);
        report.indexed += 1;
    }

    info!(
        indexed = report.indexed,
        skipped = report.skipped,
        "corpus ingested"
    );

    let spatial = SpatialIndex::build_with_magnitude(points, config.magnitude);
    let text = TextIndex::build(tokenizer, documents);

    let context = SearchContext::new(Arc::new(spatial), Arc::new(text), Arc::new(store))
        .with_scorer(scoring.scorer())
        .with_spatial_max_results(config.spatial_max_results)
        .with_text_max_results(config.text_max_results);

    Ok(Ingested { context, report })
}

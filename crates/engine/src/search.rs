//! Query orchestration: spatial filter, text restriction, hydration, paging
//!
//! `SearchContext` is the handle the API layer holds. It owns shared
//! references to both indexes, the object store and the text scorer, and is
//! cheap to clone and safe to use from many threads at once: nothing in it
//! is mutated after construction.
//!
//! # Pipeline
//!
//! 1. Validate parameters; invalid input never reaches an index.
//! 2. Spatial search within the radius (ascending distance).
//! 3. With a non-empty text query, rank the spatial survivors with the
//!    text index and keep those that match. A query made only of stop words
//!    or whitespace matches nothing.
//! 4. Hydrate each survivor from the object store, dropping missing keys.
//! 5. Order by spatial distance and cut the requested page.

use crate::store::ObjectStore;
use nearby_core::{Hit, Key, QueryLimits, Result, SearchParams};
use nearby_search::{Scorer, TextIndex, TfIdfScorer};
use nearby_spatial::SpatialIndex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

// ============================================================================
// Response types
// ============================================================================

/// One hydrated result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Record key
    pub key: Key,
    /// Distance from the search center, in miles
    pub distance: f64,
    /// Distance formatted for display, e.g. `"0.42mi"`
    pub distance_desc: String,
    /// Record from the object store
    pub record: Value,
}

impl SearchResult {
    fn new(hit: Hit, record: Value) -> Self {
        SearchResult {
            distance_desc: format!("{:.2}mi", hit.distance),
            key: hit.key,
            distance: hit.distance,
            record,
        }
    }
}

/// Pipeline counters for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Points within the radius
    pub spatial_candidates: usize,
    /// Spatial candidates matching the text query (`None` without text ranking)
    pub text_matches: Option<usize>,
    /// Wall time of the whole pipeline
    pub elapsed_micros: u64,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    /// Results on this page, nearest first
    pub results: Vec<SearchResult>,
    /// Results across all pages
    pub total: usize,
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub per_page: usize,
    /// Pipeline counters
    pub stats: SearchStats,
}

/// Sizes of the loaded indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Points in the spatial index
    pub points: usize,
    /// Documents in the text index
    pub documents: usize,
    /// Distinct terms in the text index
    pub terms: usize,
    /// Records in the object store
    pub records: usize,
}

// ============================================================================
// SearchContext
// ============================================================================

/// Shared, read-only query handle
#[derive(Clone)]
pub struct SearchContext {
    spatial: Arc<SpatialIndex>,
    text: Arc<TextIndex>,
    store: Arc<dyn ObjectStore>,
    scorer: Arc<dyn Scorer>,
    limits: QueryLimits,
    spatial_max_results: Option<usize>,
    text_max_results: Option<usize>,
}

impl fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext")
            .field("spatial", &self.spatial)
            .field("documents", &self.text.len())
            .field("records", &self.store.len())
            .field("scorer", &self.scorer.name())
            .field("limits", &self.limits)
            .field("spatial_max_results", &self.spatial_max_results)
            .field("text_max_results", &self.text_max_results)
            .finish()
    }
}

impl SearchContext {
    /// Assemble a context from built parts, scoring with TF-IDF
    pub fn new(
        spatial: Arc<SpatialIndex>,
        text: Arc<TextIndex>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        SearchContext {
            spatial,
            text,
            store,
            scorer: Arc::new(TfIdfScorer),
            limits: QueryLimits::default(),
            spatial_max_results: None,
            text_max_results: None,
        }
    }

    /// Builder: set the text scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Builder: set parameter limits
    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Builder: bound the spatial step (`None` = unbounded)
    pub fn with_spatial_max_results(mut self, max: Option<usize>) -> Self {
        self.spatial_max_results = max;
        self
    }

    /// Builder: bound the text step (`None` = number of spatial survivors)
    pub fn with_text_max_results(mut self, max: Option<usize>) -> Self {
        self.text_max_results = max;
        self
    }

    /// Spatial index
    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    /// Text index
    pub fn text(&self) -> &TextIndex {
        &self.text
    }

    /// Object store
    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Parameter limits applied by `search`
    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    /// Sizes of the loaded indexes
    pub fn index_stats(&self) -> IndexStats {
        IndexStats {
            points: self.spatial.len(),
            documents: self.text.len(),
            terms: self.text.term_count(),
            records: self.store.len(),
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` when a parameter is out of range; no index
    /// is consulted in that case. Empty outcomes are `Ok` with no results.
    pub fn search(&self, params: &SearchParams) -> Result<SearchPage> {
        self.limits.validate(params)?;
        let started = Instant::now();

        let hits = self.spatial.search(
            &[params.lat, params.lon],
            params.radius,
            self.spatial_max_results,
        );
        let spatial_candidates = hits.len();

        let (hits, text_matches) = match params.text_query() {
            Some(text) if !hits.is_empty() => self.restrict_to_text(hits, text),
            _ => (hits, None),
        };

        let mut results: Vec<SearchResult> = hits
            .into_iter()
            .filter_map(|hit| {
                let record = self.store.get(&hit.key)?;
                Some(SearchResult::new(hit, record))
            })
            .collect();
        // Stable: equal distances keep spatial order
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let total = results.len();
        let per_page = params.per_page as usize;
        let page_results: Vec<SearchResult> = results
            .into_iter()
            .skip(params.offset())
            .take(per_page)
            .collect();

        let stats = SearchStats {
            spatial_candidates,
            text_matches,
            elapsed_micros: started.elapsed().as_micros() as u64,
        };
        debug!(
            lat = params.lat,
            lon = params.lon,
            radius = params.radius,
            query = params.text_query().unwrap_or(""),
            spatial_candidates,
            text_matches = ?text_matches,
            total,
            returned = page_results.len(),
            elapsed_micros = stats.elapsed_micros,
            "search"
        );

        Ok(SearchPage {
            results: page_results,
            total,
            page: params.page as usize,
            per_page,
            stats,
        })
    }

    /// Keep the spatial hits the text index matches for `text`.
    ///
    /// A query that normalizes to no terms (only stop words or punctuation)
    /// matches nothing.
    fn restrict_to_text(&self, hits: Vec<Hit>, text: &str) -> (Vec<Hit>, Option<usize>) {
        let query = self.text.parse_query(text);

        let candidates: HashSet<Key> = hits.iter().map(|h| h.key.clone()).collect();
        let limit = self.text_max_results.unwrap_or(candidates.len());
        let matched: HashSet<Key> = self
            .text
            .query(&query, limit, self.scorer.as_ref(), Some(&candidates))
            .into_iter()
            .map(|h| h.key)
            .collect();

        let count = matched.len();
        let kept = hits
            .into_iter()
            .filter(|h| matched.contains(&h.key))
            .collect();
        (kept, Some(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use nearby_core::{Error, ValidationError};
    use nearby_search::{TermVector, Tokenizer};
    use serde_json::json;

    /// Trucks on a line east of the origin, one mile apart (magnitude 1)
    fn context(store_all: bool) -> SearchContext {
        let trucks = [
            ("1", 1.0, "Tacos El Rey: tacos burritos"),
            ("2", 2.0, "Sweet Cake: cupcakes cookies"),
            ("3", 3.0, "Taqueria Sol: tacos tortas"),
            ("4", 4.0, "Coffee Cart: coffee tea pastries"),
            ("5", 20.0, "Far Tacos: tacos"),
        ];
        let tokenizer = Arc::new(Tokenizer::new(true));
        let spatial = SpatialIndex::build_with_magnitude(
            trucks.iter().map(|(k, x, _)| (k.to_string(), [0.0, *x])),
            1.0,
        );
        let docs = trucks
            .iter()
            .map(|(k, _, t)| TermVector::build(*k, *t, &tokenizer))
            .collect();
        let text = TextIndex::build(tokenizer, docs);
        let store: MemoryStore = trucks
            .iter()
            .filter(|(k, _, _)| store_all || *k != "3")
            .map(|(k, _, t)| (k.to_string(), json!({ "name": t })))
            .collect();
        SearchContext::new(Arc::new(spatial), Arc::new(text), Arc::new(store))
    }

    fn keys(page: &SearchPage) -> Vec<&str> {
        page.results.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_spatial_only() {
        let page = context(true)
            .search(&SearchParams::new(0.0, 0.0).with_radius(3.0))
            .unwrap();
        assert_eq!(keys(&page), vec!["1", "2", "3"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.stats.spatial_candidates, 3);
        assert_eq!(page.stats.text_matches, None);
    }

    #[test]
    fn test_text_restricts_spatial_survivors() {
        let params = SearchParams::new(0.0, 0.0).with_radius(10.0).with_query("tacos");
        let page = context(true).search(&params).unwrap();
        // "5" matches the text but is outside the radius
        assert_eq!(keys(&page), vec!["1", "3"]);
        assert_eq!(page.stats.spatial_candidates, 4);
        assert_eq!(page.stats.text_matches, Some(2));
    }

    #[test]
    fn test_results_ordered_by_distance_not_relevance() {
        // Both terms are equally rare; order comes from distance alone
        let params = SearchParams::new(0.0, 0.0).with_query("coffee cookies");
        let page = context(true).search(&params).unwrap();
        assert_eq!(keys(&page), vec!["2", "4"]);
        assert!(page.results[0].distance < page.results[1].distance);
    }

    #[test]
    fn test_absent_or_empty_query_keeps_all() {
        let ctx = context(true);
        let params = SearchParams::new(0.0, 0.0).with_radius(3.0);
        assert_eq!(ctx.search(&params).unwrap().total, 3);

        let page = ctx.search(&params.with_query("")).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.stats.text_matches, None);
    }

    #[test]
    fn test_query_without_terms_matches_nothing() {
        let ctx = context(true);
        for q in ["the", "of and", "   "] {
            let params = SearchParams::new(0.0, 0.0).with_radius(3.0).with_query(q);
            let page = ctx.search(&params).unwrap();
            assert!(page.results.is_empty(), "query {:?}", q);
            assert_eq!(page.total, 0, "query {:?}", q);
            assert_eq!(page.stats.text_matches, Some(0), "query {:?}", q);
        }
    }

    #[test]
    fn test_unknown_term_yields_nothing() {
        let params = SearchParams::new(0.0, 0.0).with_query("pho");
        let page = context(true).search(&params).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.stats.text_matches, Some(0));
    }

    #[test]
    fn test_missing_record_dropped() {
        let page = context(false)
            .search(&SearchParams::new(0.0, 0.0).with_radius(3.0))
            .unwrap();
        assert_eq!(keys(&page), vec!["1", "2"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_distance_desc() {
        let page = context(true)
            .search(&SearchParams::new(0.0, 0.0).with_radius(1.0))
            .unwrap();
        assert_eq!(page.results[0].distance_desc, "1.00mi");
        assert_eq!(page.results[0].record["name"], "Tacos El Rey: tacos burritos");
    }

    #[test]
    fn test_paging() {
        let ctx = context(true);
        let params = SearchParams::new(0.0, 0.0).with_page(2, 3);
        let page = ctx.search(&params).unwrap();
        assert_eq!(keys(&page), vec!["4"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 3);

        let beyond = ctx.search(&params.clone().with_page(9, 3)).unwrap();
        assert!(beyond.results.is_empty());
        assert_eq!(beyond.total, 4);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let ctx = context(true);
        let err = ctx
            .search(&SearchParams::new(0.0, 0.0).with_radius(16.0))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::RadiusOutOfRange { .. })
        ));

        let err = ctx
            .search(&SearchParams::new(0.0, 0.0).with_page(1, 51))
            .unwrap_err();
        assert_eq!(err.as_validation().unwrap().field(), "per_page");
    }

    #[test]
    fn test_spatial_bound() {
        let ctx = context(true).with_spatial_max_results(Some(2));
        let page = ctx.search(&SearchParams::new(0.0, 0.0)).unwrap();
        assert_eq!(keys(&page), vec!["1", "2"]);
    }

    #[test]
    fn test_text_bound_keeps_best_matches() {
        // Both "1" and "3" match "tacos"; with a bound of 1 only the better
        // text match survives
        let ctx = context(true).with_text_max_results(Some(1));
        let page = ctx
            .search(&SearchParams::new(0.0, 0.0).with_query("tacos burritos"))
            .unwrap();
        assert_eq!(keys(&page), vec!["1"]);
    }

    #[test]
    fn test_index_stats() {
        let stats = context(false).index_stats();
        assert_eq!(stats.points, 5);
        assert_eq!(stats.documents, 5);
        assert_eq!(stats.records, 4);
        assert!(stats.terms > 0);
    }

    #[test]
    fn test_context_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchContext>();
    }
}

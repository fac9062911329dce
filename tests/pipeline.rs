//! Cross-crate behavior through the `nearby` facade

use nearby::spatial::SpatialIndex;
use nearby::text::{DotProductScorer, TermVector, TextIndex, TfIdfScorer, Tokenizer};
use nearby::{ingest, IngestRecord, NearbyConfig, SearchParams};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// Text components
// ============================================================================

#[test]
fn test_buffalo_sentence() {
    let tok = Arc::new(Tokenizer::new(true));
    let doc = TermVector::build(
        "buffalo",
        "Buffalo buffalo Buffalo buffalo buffalo buffalo Buffalo buffalo.",
        &tok,
    );
    assert_eq!(doc.freq("buffalo"), 8);

    let six = TermVector::build("six", "Buffalo BUFFALO buffalo the buffalo of Buffalo buffalo", &tok);
    assert_eq!(six.freq("buffalo"), 6);
    assert_eq!(six.max_freq(), 6);
    assert_eq!(six.freq("the"), 0);
}

#[test]
fn test_text_index_restricted_to_candidates() {
    let tok = Arc::new(Tokenizer::new(true));
    let docs = vec![
        TermVector::build("a", "tacos burritos", &tok),
        TermVector::build("b", "tacos", &tok),
        TermVector::build("c", "coffee", &tok),
    ];
    let index = TextIndex::build(tok, docs);
    let q = index.parse_query("tacos");

    let all = index.query(&q, 10, &DotProductScorer, None);
    assert_eq!(all.len(), 2);

    let only_b: HashSet<String> = ["b".to_string()].into_iter().collect();
    let hits = index.query(&q, 10, &TfIdfScorer, Some(&only_b));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key, "b");
}

// ============================================================================
// Spatial component
// ============================================================================

#[test]
fn test_compass_points() {
    let tree = SpatialIndex::build_with_magnitude(
        vec![
            ("n".to_string(), [0.0, 10.0]),
            ("s".to_string(), [0.0, -10.0]),
            ("e".to_string(), [10.0, 0.0]),
            ("w".to_string(), [-10.0, 0.0]),
        ],
        1.0,
    );
    assert_eq!(tree.search(&[0.0, 0.0], 100_000.0, None).len(), 4);
    assert!(tree.search(&[0.0, 0.0], 1.0, None).is_empty());
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_san_francisco_trucks() {
    let rows = [
        ("101", "Tacos El Rey", "Tacos: Burritos: Horchata", Some((37.7793, -122.4193))),
        ("102", "Sweet Cake", "Cupcakes: Cookies: Coffee", Some((37.7810, -122.4110))),
        ("103", "Brew Cart", "Coffee: Teas: Pastries", Some((37.7955, -122.3937))),
        ("104", "Ghost Tacos", "Tacos", None),
        ("105", "Oakland Tacos", "Tacos: Tortas", Some((37.8044, -122.2712))),
    ];
    let records = rows.iter().map(|(key, name, items, coords)| {
        IngestRecord::new(
            *key,
            format!("{} {}", name, items),
            *coords,
            json!({ "Applicant": name, "FoodItems": items }),
        )
    });
    let loaded = ingest(records, &NearbyConfig::default()).unwrap();
    assert_eq!(loaded.report.skipped_keys, vec!["104"]);

    let ctx = loaded.context;
    let civic_center = SearchParams::new(37.7793, -122.4193).with_radius(3.0);

    let all = ctx.search(&civic_center).unwrap();
    let keys: Vec<&str> = all.results.iter().map(|r| r.key.as_str()).collect();
    // Oakland is across the bay, well past 3 miles
    assert_eq!(keys, vec!["101", "102", "103"]);

    let coffee = ctx.search(&civic_center.clone().with_query("coffee")).unwrap();
    let keys: Vec<&str> = coffee.results.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["102", "103"]);
    assert!(coffee.results.windows(2).all(|w| w[0].distance <= w[1].distance));

    let tacos = ctx
        .search(&SearchParams::new(37.7793, -122.4193).with_radius(15.0).with_query("taco"))
        .unwrap();
    let keys: Vec<&str> = tacos.results.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["101", "105"]);
}

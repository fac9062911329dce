//! Loading a corpus and config from disk

use nearby_engine::{load_corpus, NearbyConfig, SearchParams, CONFIG_FILE_NAME};
use std::io::Write;
use tempfile::TempDir;

const CORPUS: &str = r#"{"ObjectID": "1", "Applicant": "Tacos El Rey", "FoodItems": "Tacos: Burritos", "Latitude": "37.7800", "Longitude": "-122.4100"}
{"ObjectID": "2", "Applicant": "Sweet Cake", "FoodItems": "Cupcakes: Cookies", "Latitude": 37.7810, "Longitude": -122.4110}
{"ObjectID": "3", "Applicant": "Ghost Kitchen", "FoodItems": "Tacos", "Latitude": "", "Longitude": ""}

{"ObjectID": 4, "Applicant": "Brew Cart", "FoodItems": "Coffee: Teas", "Latitude": 37.9, "Longitude": -122.41}
"#;

fn write_corpus(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("trucks.jsonl");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(CORPUS.as_bytes()).unwrap();
    path
}

#[test]
fn test_load_and_search() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    NearbyConfig::write_default_if_missing(&config_path).unwrap();
    let config = NearbyConfig::from_file(&config_path).unwrap();

    let loaded = load_corpus(&corpus, &config).unwrap();
    assert_eq!(loaded.report.indexed, 3);
    assert_eq!(loaded.report.skipped_keys, vec!["3"]);

    let ctx = loaded.context;
    let page = ctx
        .search(&SearchParams::new(37.78, -122.41).with_radius(1.0).with_query("tacos"))
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.results[0].key, "1");
    assert_eq!(page.results[0].record["Applicant"], "Tacos El Rey");
    assert_eq!(page.results[0].distance_desc, "0.00mi");

    // Brew Cart is about 7.3 miles north
    let page = ctx
        .search(&SearchParams::new(37.78, -122.41).with_query("tea"))
        .unwrap();
    assert_eq!(page.results[0].key, "4");
    assert!((page.results[0].distance - 0.12 * 61.0).abs() < 1e-9);
}

#[test]
fn test_load_bad_line_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.jsonl");
    let corpus = "{\"ObjectID\": \"1\", \"Latitude\": 0, \"Longitude\": 0}\n{\"ObjectID\": \n";
    std::fs::write(&path, corpus).unwrap();

    let loaded = load_corpus(&path, &NearbyConfig::default()).unwrap();
    assert_eq!(loaded.report.indexed, 1);
    assert_eq!(loaded.report.skipped, 1);
    assert!(loaded.report.skipped_keys.is_empty());
    assert_eq!(loaded.report.rejected_lines, vec![2]);
    assert_eq!(loaded.context.index_stats().records, 1);
}

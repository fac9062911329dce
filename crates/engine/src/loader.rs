//! JSON-lines corpus loader
//!
//! Each non-blank line is one JSON object. Fields are mapped through
//! `FieldMap`:
//! - key: string or number, required
//! - text fields: joined with a single space; missing or null fields count
//!   as empty
//! - latitude/longitude: numbers or numeric strings; a missing, null, blank
//!   or unparseable value leaves the record without coordinates, which
//!   ingestion then skips
//!
//! The whole object becomes the record payload. A line that is not valid
//! JSON, not an object, or has no usable key is logged and rejected; the
//! rest of the corpus still loads.

use crate::config::{FieldMap, NearbyConfig};
use crate::ingest::{ingest, IngestRecord, Ingested};
use nearby_core::Result;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Records parsed from a corpus, plus the lines that were rejected
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusLines {
    /// Parsed records, in file order
    pub records: Vec<IngestRecord>,
    /// 1-based numbers of rejected lines
    pub rejected: Vec<usize>,
}

/// Read a JSON-lines corpus file.
///
/// # Errors
///
/// `Error::Io` if the file cannot be read. Malformed lines are not errors;
/// they are listed in `CorpusLines::rejected`.
pub fn read_json_lines(path: &Path, fields: &FieldMap) -> Result<CorpusLines> {
    let file = File::open(path)?;
    let lines = parse_json_lines(BufReader::new(file), fields)?;
    info!(
        path = %path.display(),
        records = lines.records.len(),
        rejected = lines.rejected.len(),
        "corpus read"
    );
    Ok(lines)
}

/// Parse JSON-lines from any buffered reader
pub fn parse_json_lines(reader: impl BufRead, fields: &FieldMap) -> Result<CorpusLines> {
    let mut lines = CorpusLines::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let lineno = index + 1;
        match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(object)) => match to_record(object, fields) {
                Some(record) => lines.records.push(record),
                None => {
                    warn!(line = lineno, field = %fields.key, "skipping line without key");
                    lines.rejected.push(lineno);
                }
            },
            Ok(_) => {
                warn!(line = lineno, "skipping line that is not a JSON object");
                lines.rejected.push(lineno);
            }
            Err(e) => {
                warn!(line = lineno, error = %e, "skipping invalid JSON line");
                lines.rejected.push(lineno);
            }
        }
    }
    Ok(lines)
}

/// Read the corpus at `path` and ingest it with `config`.
///
/// Rejected lines are counted in the report's `skipped` and listed in
/// `rejected_lines`.
pub fn load_corpus(path: &Path, config: &NearbyConfig) -> Result<Ingested> {
    let CorpusLines { records, rejected } = read_json_lines(path, &config.fields)?;
    let mut ingested = ingest(records, config)?;
    ingested.report.skipped += rejected.len();
    ingested.report.rejected_lines = rejected;
    Ok(ingested)
}

fn to_record(object: Map<String, Value>, fields: &FieldMap) -> Option<IngestRecord> {
    let key = match object.get(&fields.key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return None,
    };

    let text = fields
        .text
        .iter()
        .map(|name| text_of(object.get(name)))
        .collect::<Vec<_>>()
        .join(" ");

    let coordinates = match (
        coordinate(object.get(&fields.latitude)),
        coordinate(object.get(&fields.longitude)),
    ) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ => None,
    };

    Some(IngestRecord {
        key,
        text,
        coordinates,
        payload: Value::Object(object),
    })
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn coordinate(value: Option<&Value>) -> Option<f64> {
    let parsed: Option<f64> = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(input: &str) -> Vec<IngestRecord> {
        parse_all(input).records
    }

    fn parse_all(input: &str) -> CorpusLines {
        parse_json_lines(Cursor::new(input), &FieldMap::default()).unwrap()
    }

    #[test]
    fn test_parse_record() {
        let records = parse(
            r#"{"ObjectID": "101", "Applicant": "Tacos El Rey", "FoodItems": "Tacos: Burritos", "Latitude": 37.78, "Longitude": -122.41}"#,
        );
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.key, "101");
        assert_eq!(r.text, "Tacos El Rey Tacos: Burritos");
        assert_eq!(r.coordinates, Some((37.78, -122.41)));
        assert_eq!(r.payload["Applicant"], "Tacos El Rey");
    }

    #[test]
    fn test_numeric_key_and_string_coordinates() {
        let records =
            parse(r#"{"ObjectID": 7, "Applicant": "Cart", "Latitude": "37.5", "Longitude": " -122.25 "}"#);
        assert_eq!(records[0].key, "7");
        assert_eq!(records[0].coordinates, Some((37.5, -122.25)));
        // FoodItems missing
        assert_eq!(records[0].text, "Cart ");
    }

    #[test]
    fn test_blank_coordinates_mean_none() {
        let input = concat!(
            r#"{"ObjectID": "1", "Latitude": "", "Longitude": "-122.4"}"#,
            "\n",
            r#"{"ObjectID": "2", "Latitude": null, "Longitude": -122.4}"#,
            "\n",
            r#"{"ObjectID": "3", "Longitude": -122.4}"#,
            "\n",
            r#"{"ObjectID": "4", "Latitude": "north", "Longitude": -122.4}"#,
        );
        let records = parse(input);
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.coordinates.is_none()));
    }

    #[test]
    fn test_blank_lines_ignored() {
        let input = "\n{\"ObjectID\": \"1\"}\n   \n{\"ObjectID\": \"2\"}\n";
        assert_eq!(parse(input).len(), 2);
    }

    #[test]
    fn test_invalid_json_line_skipped() {
        let input = "{\"ObjectID\": \"1\"}\n{not json}\n{\"ObjectID\": \"3\"}\n";
        let lines = parse_all(input);
        let keys: Vec<&str> = lines.records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "3"]);
        assert_eq!(lines.rejected, vec![2]);
    }

    #[test]
    fn test_non_object_skipped() {
        let lines = parse_all("[1, 2]\n\"text\"\n{\"ObjectID\": \"1\"}");
        assert_eq!(lines.records.len(), 1);
        assert_eq!(lines.rejected, vec![1, 2]);
    }

    #[test]
    fn test_missing_key_skipped() {
        let input = concat!(
            r#"{"Applicant": "Nameless"}"#,
            "\n",
            r#"{"ObjectID": "", "Applicant": "Blank"}"#,
            "\n",
            r#"{"ObjectID": "9", "Applicant": "Named"}"#,
        );
        let lines = parse_all(input);
        assert_eq!(lines.records.len(), 1);
        assert_eq!(lines.records[0].key, "9");
        assert_eq!(lines.rejected, vec![1, 2]);
    }

    #[test]
    fn test_rejected_lines_counted_at_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mixed.jsonl");
        let corpus = concat!(
            r#"{"ObjectID": "1", "Latitude": 0, "Longitude": 0}"#,
            "\n",
            "{broken\n",
            r#"{"ObjectID": "2"}"#,
            "\n",
        );
        std::fs::write(&path, corpus).unwrap();

        let report = load_corpus(&path, &NearbyConfig::default()).unwrap().report;
        assert_eq!(report.indexed, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.skipped_keys, vec!["2"]);
        assert_eq!(report.rejected_lines, vec![2]);
    }

    #[test]
    fn test_custom_field_map() {
        let fields = FieldMap {
            key: "id".to_string(),
            text: vec!["name".to_string(), "menu".to_string(), "tags".to_string()],
            latitude: "lat".to_string(),
            longitude: "lng".to_string(),
        };
        let input = r#"{"id": "a", "name": "Pho Cart", "menu": "pho", "tags": 5, "lat": 1, "lng": 2}"#;
        let records = parse_json_lines(Cursor::new(input), &fields).unwrap().records;
        assert_eq!(records[0].text, "Pho Cart pho 5");
        assert_eq!(records[0].coordinates, Some((1.0, 2.0)));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_json_lines(&dir.path().join("absent.jsonl"), &FieldMap::default())
            .unwrap_err();
        assert!(matches!(err, nearby_core::Error::Io(_)));
    }
}

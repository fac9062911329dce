//! Engine configuration via `nearby.toml`
//!
//! A single file next to the corpus controls how the indexes are built and
//! queried. `write_default_if_missing` drops a commented default on first
//! run; edit it and restart to change behavior.

use nearby_core::{Error, Result};
use nearby_search::ScoringKind;
use nearby_spatial::MILES_PER_DEGREE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up next to the corpus
pub const CONFIG_FILE_NAME: &str = "nearby.toml";

/// Mapping from corpus record fields to indexed attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldMap {
    /// Field holding the record key
    #[serde(default = "default_key_field")]
    pub key: String,
    /// Fields concatenated (space separated) into the indexed text
    #[serde(default = "default_text_fields")]
    pub text: Vec<String>,
    /// Field holding latitude in degrees
    #[serde(default = "default_latitude_field")]
    pub latitude: String,
    /// Field holding longitude in degrees
    #[serde(default = "default_longitude_field")]
    pub longitude: String,
}

fn default_key_field() -> String {
    "ObjectID".to_string()
}

fn default_text_fields() -> Vec<String> {
    vec!["Applicant".to_string(), "FoodItems".to_string()]
}

fn default_latitude_field() -> String {
    "Latitude".to_string()
}

fn default_longitude_field() -> String {
    "Longitude".to_string()
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            key: default_key_field(),
            text: default_text_fields(),
            latitude: default_latitude_field(),
            longitude: default_longitude_field(),
        }
    }
}

/// Engine configuration loaded from `nearby.toml`.
///
/// # Example
///
/// ```toml
/// stemming = true
/// scoring = "tfidf"
/// magnitude = 61.0
///
/// [fields]
/// key = "ObjectID"
/// text = ["Applicant", "FoodItems"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyConfig {
    /// Stem terms at index and query time
    #[serde(default = "default_stemming")]
    pub stemming: bool,
    /// Text scorer: `"tfidf"` or `"dot"`
    #[serde(default = "default_scoring_str")]
    pub scoring: String,
    /// Scale from coordinate units to miles
    #[serde(default = "default_magnitude")]
    pub magnitude: f64,
    /// Bound on spatial results per query (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_max_results: Option<usize>,
    /// Bound on text results per query (all spatial survivors when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_max_results: Option<usize>,
    /// Corpus field mapping
    #[serde(default)]
    pub fields: FieldMap,
}

fn default_stemming() -> bool {
    true
}

fn default_scoring_str() -> String {
    "tfidf".to_string()
}

fn default_magnitude() -> f64 {
    MILES_PER_DEGREE
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            stemming: default_stemming(),
            scoring: default_scoring_str(),
            magnitude: default_magnitude(),
            spatial_max_results: None,
            text_max_results: None,
            fields: FieldMap::default(),
        }
    }
}

impl NearbyConfig {
    /// Parse the scoring string into a `ScoringKind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"tfidf"` or `"dot"`.
    pub fn scoring_kind(&self) -> Result<ScoringKind> {
        match self.scoring.as_str() {
            "tfidf" => Ok(ScoringKind::Tfidf),
            "dot" => Ok(ScoringKind::Dot),
            other => Err(Error::config(format!(
                "Invalid scoring '{}' in nearby.toml. Expected \"tfidf\" or \"dot\".",
                other
            ))),
        }
    }

    /// Check every value that parsing alone cannot rule out.
    pub fn validate(&self) -> Result<()> {
        self.scoring_kind()?;
        if !(self.magnitude.is_finite() && self.magnitude > 0.0) {
            return Err(Error::config(format!(
                "magnitude must be a positive number, got {}",
                self.magnitude
            )));
        }
        if self.fields.text.is_empty() {
            return Err(Error::config("fields.text must name at least one field"));
        }
        if self.spatial_max_results == Some(0) {
            return Err(Error::config("spatial_max_results must be at least 1"));
        }
        if self.text_max_results == Some(0) {
            return Err(Error::config("text_max_results must be at least 1"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# nearby configuration
#
# Stem terms so inflected forms match ("tea" finds "teas") (default: true)
stemming = true

# Text relevance: "tfidf" (default) or "dot" (raw term-count dot product)
scoring = "tfidf"

# Miles per coordinate degree used for distances (default: 61.0)
magnitude = 61.0

# Optional per-query bounds. Absent = every match is considered.
# spatial_max_results = 500
# text_max_results = 100

# Corpus field mapping for JSON-lines input
[fields]
key = "ObjectID"
text = ["Applicant", "FoodItems"]
latitude = "Latitude"
longitude = "Longitude"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: NearbyConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `true` if the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| {
            Error::config(format!(
                "Failed to write default config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(true)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

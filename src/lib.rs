//! nearby: find geotagged items near a location that match a text query
//!
//! The corpus is loaded once into an immutable spatial index (k-d tree) and
//! a TF-IDF text index. A [`SearchContext`] then answers queries: spatial
//! filter first, text restriction of the survivors second, ordered by
//! distance and paged.
//!
//! # Quick Start
//!
//! ```
//! use nearby::{ingest, IngestRecord, NearbyConfig, SearchParams};
//! use serde_json::json;
//!
//! let records = vec![
//!     IngestRecord::new("1", "Tacos El Rey: tacos", Some((37.780, -122.410)), json!({})),
//!     IngestRecord::new("2", "Sweet Cake: cupcakes", Some((37.781, -122.411)), json!({})),
//! ];
//! let loaded = ingest(records, &NearbyConfig::default())?;
//!
//! let page = loaded
//!     .context
//!     .search(&SearchParams::new(37.78, -122.41).with_query("cupcake"))?;
//! assert_eq!(page.results[0].key, "2");
//! # Ok::<(), nearby::Error>(())
//! ```
//!
//! Lower layers are available as modules for callers that build indexes
//! directly.

pub use nearby_engine::*;

/// Text tokenization, term vectors and the inverted index
pub use nearby_search as text;

/// k-d tree and distance strategies
pub use nearby_spatial as spatial;

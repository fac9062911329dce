//! Identifier and result types shared by both indexes

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Opaque external identifier of an indexed item.
///
/// The indexes never interpret keys; they only hand them back so the
/// caller can hydrate the full record from an object store.
pub type Key = String;

/// A ranked index result.
///
/// `distance` is always "smaller is better": the spatial index stores the
/// scaled geometric distance, the text index stores the inverted relevance
/// score (`1 / score`, or `f64::INFINITY` for a zero score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Ranking distance
    pub distance: f64,
    /// Key of the matched item
    pub key: Key,
}

impl Hit {
    /// Create a new hit
    pub fn new(distance: f64, key: impl Into<Key>) -> Self {
        Hit {
            distance,
            key: key.into(),
        }
    }

    /// Total order on the ranking distance.
    ///
    /// NaN sorts after every number, so a malformed score can never
    /// displace a real match.
    pub fn cmp_distance(&self, other: &Hit) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

//! Spatial retrieval for nearby
//!
//! This crate provides:
//! - KdTree: immutable k-d tree with radius-bounded, best-k search
//! - Distance trait with a Euclidean implementation
//! - MILES_PER_DEGREE: flat-plane scale from degrees to miles
//!
//! # Usage
//!
//! ```
//! use nearby_spatial::SpatialIndex;
//!
//! let tree = SpatialIndex::build_with_magnitude(
//!     vec![("a".to_string(), [2.0, 3.0]), ("b".to_string(), [9.0, 6.0])],
//!     1.0,
//! );
//! let hits = tree.search(&[0.0, 0.0], 7.0, None);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].key, "a");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod kdtree;

pub use distance::{Distance, Euclidean, MILES_PER_DEGREE};
pub use kdtree::{KdTree, SpatialIndex};

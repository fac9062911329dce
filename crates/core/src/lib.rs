//! Core types shared by the nearby retrieval crates
//!
//! This crate defines the foundational types used throughout the system:
//! - Key: opaque identifier linking index entries to stored records
//! - Hit: `(distance, key)` pair produced by every index, smaller is better
//! - TopK: bounded best-k selector shared by the text and spatial indexes
//! - SearchParams: validated query parameters for the lookup service
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod params;
pub mod topk;
pub mod types;

pub use error::{Error, ErrorBody, Result, ValidationError};
pub use params::{QueryLimits, SearchParams};
pub use topk::TopK;
pub use types::{Hit, Key};

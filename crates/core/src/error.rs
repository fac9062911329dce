//! Error types for the nearby retrieval crates
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Empty results (no spatial matches, empty text query, no candidates) are
//! never errors; they are valid empty sequences.

use serde::Serialize;
use std::io;
use thiserror::Error;

/// Result type alias for nearby operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the nearby retrieval system
#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied invalid query parameters
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error (corpus or config file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed or holds an invalid value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// The validation failure, if this error is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(v) => Some(v),
            _ => None,
        }
    }
}

/// Query parameter validation errors
///
/// These are reported back to the caller as a structured value; a search is
/// never executed with parameters that fail validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Latitude is not a finite number
    #[error("Invalid Latitude")]
    InvalidLatitude {
        /// Supplied value
        value: f64,
    },

    /// Longitude is not a finite number
    #[error("Invalid Longitude")]
    InvalidLongitude {
        /// Supplied value
        value: f64,
    },

    /// Radius outside `(0, max]`
    #[error("radius must be > 0 and <= {max}, got {value}")]
    RadiusOutOfRange {
        /// Supplied value
        value: f64,
        /// Largest accepted radius
        max: f64,
    },

    /// Page below 1
    #[error("page must be > 0, got {value}")]
    PageOutOfRange {
        /// Supplied value
        value: i64,
    },

    /// Page size outside `[1, max]`
    #[error("per_page must be between 1 and {max}, got {value}")]
    PerPageOutOfRange {
        /// Supplied value
        value: i64,
        /// Largest accepted page size
        max: usize,
    },
}

impl ValidationError {
    /// Name of the offending request parameter
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidLatitude { .. } => "lat",
            ValidationError::InvalidLongitude { .. } => "lon",
            ValidationError::RadiusOutOfRange { .. } => "radius",
            ValidationError::PageOutOfRange { .. } => "page",
            ValidationError::PerPageOutOfRange { .. } => "per_page",
        }
    }

    /// Stable machine-readable reason code
    pub fn reason_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidLatitude { .. } | ValidationError::InvalidLongitude { .. } => {
                "invalid_coordinate"
            }
            ValidationError::RadiusOutOfRange { .. }
            | ValidationError::PageOutOfRange { .. }
            | ValidationError::PerPageOutOfRange { .. } => "out_of_range",
        }
    }

    /// Serializable body handed to the API layer
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            field: self.field(),
            reason: self.reason_code(),
        }
    }
}

/// Wire form of a validation failure: `{"error": ..., "field": ..., "reason": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Offending parameter
    pub field: &'static str,
    /// Reason code
    pub reason: &'static str,
}

//! Query parameters and their limits
//!
//! The lookup service accepts a location, a radius, an optional free-text
//! query and paging controls. Every request is validated against
//! `QueryLimits` before any index is consulted.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Bounds enforced on incoming search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct QueryLimits {
    /// Largest accepted radius, in miles (default: 15)
    pub max_radius: f64,

    /// Largest accepted page size (default: 50)
    pub max_per_page: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        QueryLimits {
            max_radius: 15.0,
            max_per_page: 50,
        }
    }
}

impl QueryLimits {
    /// Validate a full parameter set, reporting the first violation
    ///
    /// Checks run in request order: lat, lon, radius, page, per_page.
    pub fn validate(&self, params: &SearchParams) -> Result<(), ValidationError> {
        if !params.lat.is_finite() {
            return Err(ValidationError::InvalidLatitude { value: params.lat });
        }
        if !params.lon.is_finite() {
            return Err(ValidationError::InvalidLongitude { value: params.lon });
        }
        // NaN fails both comparisons, so test the accepted range positively
        if !(params.radius > 0.0 && params.radius <= self.max_radius) {
            return Err(ValidationError::RadiusOutOfRange {
                value: params.radius,
                max: self.max_radius,
            });
        }
        if params.page < 1 {
            return Err(ValidationError::PageOutOfRange { value: params.page });
        }
        if params.per_page < 1 || params.per_page > self.max_per_page as i64 {
            return Err(ValidationError::PerPageOutOfRange {
                value: params.per_page,
                max: self.max_per_page,
            });
        }
        Ok(())
    }
}

/// Parameters of a single search request
///
/// `page` and `per_page` are signed so that out-of-range input coming from
/// the API layer can be represented and rejected, not silently wrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Center latitude in degrees
    pub lat: f64,
    /// Center longitude in degrees
    pub lon: f64,
    /// Search radius in miles
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Optional free-text query
    #[serde(default)]
    pub query: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,
    /// Results per page
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_radius() -> f64 {
    10.0
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}

impl SearchParams {
    /// Create parameters for a location with default radius and paging
    pub fn new(lat: f64, lon: f64) -> Self {
        SearchParams {
            lat,
            lon,
            radius: default_radius(),
            query: None,
            page: default_page(),
            per_page: default_per_page(),
        }
    }

    /// Builder: set radius
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Builder: set text query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Builder: set page and page size
    pub fn with_page(mut self, page: i64, per_page: i64) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    /// The text query, if present and non-empty
    ///
    /// Whitespace is kept: a query of only spaces is still a query, and it
    /// matches nothing once tokenized.
    pub fn text_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    /// Validate against the default limits
    pub fn validate(&self) -> Result<(), ValidationError> {
        QueryLimits::default().validate(self)
    }

    /// Offset of the first result on the requested page
    ///
    /// Only meaningful after validation.
    pub fn offset(&self) -> usize {
        ((self.page.max(1) - 1) as usize).saturating_mul(self.per_page.max(0) as usize)
    }
}

//! Distance strategies for the spatial index

/// Mean miles per degree around 40° latitude: a degree of latitude spans
/// about 69 miles, a degree of longitude about 53.
///
/// This is a flat-plane approximation meant for city-scale searches, not a
/// geodesic distance.
pub const MILES_PER_DEGREE: f64 = (69.0 + 53.0) / 2.0;

/// Metric over k-dimensional points
///
/// `axis_distance` must be a lower bound of `distance` for any two points
/// whose coordinates differ by `a - b` on one axis; the tree relies on it to
/// skip subtrees.
pub trait Distance: Send + Sync {
    /// Distance between two points of equal dimension
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Distance contributed by a single axis
    fn axis_distance(&self, a: f64, b: f64) -> f64 {
        (a - b).abs()
    }
}

/// Straight-line distance on raw coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }
}

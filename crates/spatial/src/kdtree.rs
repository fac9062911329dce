//! Immutable k-d tree for radius-bounded nearest search
//!
//! # Construction
//!
//! Recursive median split: at depth `d` the points are stably sorted on
//! axis `d mod K`, the median becomes the node, the lower half builds the
//! left subtree and the upper half the right subtree. Left-subtree points
//! have axis coordinate <= the node's, right-subtree points >=.
//!
//! # Search
//!
//! Every visited node within the radius is offered to a `TopK` selector.
//! The child on the query's side of the splitting plane is always visited;
//! the other child only when the plane itself lies within the radius.
//! Distances are scaled by `magnitude` before any comparison.

use crate::distance::{Distance, Euclidean, MILES_PER_DEGREE};
use nearby_core::{Hit, Key, TopK};
use std::fmt;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
struct KdNode<const K: usize> {
    key: Key,
    point: [f64; K],
    left: Option<Box<KdNode<K>>>,
    right: Option<Box<KdNode<K>>>,
}

/// Balanced k-d tree over keyed `K`-dimensional points
pub struct KdTree<const K: usize> {
    root: Option<Box<KdNode<K>>>,
    len: usize,
    magnitude: f64,
    metric: Arc<dyn Distance>,
}

/// Two-dimensional tree over `[lat, lon]` in degrees, distances in miles
pub type SpatialIndex = KdTree<2>;

impl<const K: usize> fmt::Debug for KdTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("dimensions", &K)
            .field("len", &self.len)
            .field("magnitude", &self.magnitude)
            .finish()
    }
}

impl<const K: usize> KdTree<K> {
    /// Build with the default miles-per-degree scale
    pub fn build(points: impl IntoIterator<Item = (Key, [f64; K])>) -> Self {
        Self::build_with_magnitude(points, MILES_PER_DEGREE)
    }

    /// Build with an explicit distance scale factor
    ///
    /// Input order only matters for ties: equal coordinates keep their
    /// relative order, so the same input always yields the same tree.
    pub fn build_with_magnitude(
        points: impl IntoIterator<Item = (Key, [f64; K])>,
        magnitude: f64,
    ) -> Self {
        assert!(K > 0, "k-d tree needs at least one dimension");

        let points: Vec<(Key, [f64; K])> = points.into_iter().collect();
        let len = points.len();
        let root = build_node(points, 0);

        info!(points = len, dimensions = K, magnitude, "spatial index built");

        KdTree {
            root,
            len,
            magnitude,
            metric: Arc::new(Euclidean),
        }
    }

    /// Builder: replace the distance metric (Euclidean by default)
    pub fn with_metric(mut self, metric: Arc<dyn Distance>) -> Self {
        self.metric = metric;
        self
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance scale factor
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Number of levels, 0 for an empty tree
    pub fn height(&self) -> usize {
        fn height<const K: usize>(node: &Option<Box<KdNode<K>>>) -> usize {
            match node {
                None => 0,
                Some(n) => 1 + height(&n.left).max(height(&n.right)),
            }
        }
        height(&self.root)
    }

    /// All points within `within` (scaled distance) of `center`, nearest
    /// first, ties in visit order.
    ///
    /// With `max_results` only the nearest `max_results` are kept; the
    /// traversal itself is not cut short.
    pub fn search(&self, center: &[f64; K], within: f64, max_results: Option<usize>) -> Vec<Hit> {
        let mut top = TopK::with_limit(max_results);
        if let Some(root) = &self.root {
            self.visit(root, center, within, 0, &mut top);
        }
        top.into_sorted_vec()
            .into_iter()
            .map(|(distance, key)| Hit::new(distance, key))
            .collect()
    }

    fn visit<'a>(
        &self,
        node: &'a KdNode<K>,
        center: &[f64; K],
        within: f64,
        depth: usize,
        top: &mut TopK<&'a str>,
    ) {
        let d = self.metric.distance(center, &node.point) * self.magnitude;
        if d <= within {
            top.push(d, &node.key);
        }

        let axis = depth % K;
        let (near, far) = if center[axis] <= node.point[axis] {
            (&node.left, &node.right)
        } else {
            (&node.right, &node.left)
        };

        if let Some(child) = near {
            self.visit(child, center, within, depth + 1, top);
        }
        let plane = self.metric.axis_distance(center[axis], node.point[axis]) * self.magnitude;
        if plane <= within {
            if let Some(child) = far {
                self.visit(child, center, within, depth + 1, top);
            }
        }
    }
}

fn build_node<const K: usize>(
    mut points: Vec<(Key, [f64; K])>,
    depth: usize,
) -> Option<Box<KdNode<K>>> {
    if points.is_empty() {
        return None;
    }

    let axis = depth % K;
    // sort_by is stable
    points.sort_by(|a, b| a.1[axis].total_cmp(&b.1[axis]));

    let median = points.len() / 2;
    let upper = points.split_off(median + 1);
    let (key, point) = points.pop()?;

    Some(Box::new(KdNode {
        key,
        point,
        left: build_node(points, depth + 1),
        right: build_node(upper, depth + 1),
    }))
}

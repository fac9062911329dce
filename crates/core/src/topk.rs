//! Bounded best-k selection
//!
//! Both indexes rank by a distance where smaller is better and usually only
//! want the first `k` entries. `TopK` keeps a max-heap of at most `k`
//! entries so the worst retained entry is always at the top and can be
//! evicted in `O(log k)` when a better one arrives.
//!
//! Ties are broken by insertion order: among equal distances the entry
//! pushed first wins, and `into_sorted_vec` preserves that order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry: max-heap by distance, then by insertion sequence
#[derive(Debug)]
struct Entry<T> {
    distance: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Greater = worse: larger distance, or same distance pushed later
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Bounded selector of the `k` smallest-distance items
#[derive(Debug)]
pub struct TopK<T> {
    limit: Option<usize>,
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> TopK<T> {
    /// Keep at most `limit` items
    pub fn bounded(limit: usize) -> Self {
        TopK {
            limit: Some(limit),
            heap: BinaryHeap::with_capacity(limit.min(1024)),
            next_seq: 0,
        }
    }

    /// Keep every item
    pub fn unbounded() -> Self {
        TopK {
            limit: None,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Bounded when `limit` is `Some`, unbounded otherwise
    pub fn with_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(k) => Self::bounded(k),
            None => Self::unbounded(),
        }
    }

    /// Offer an item; returns whether it was retained
    pub fn push(&mut self, distance: f64, item: T) -> bool {
        let entry = Entry {
            distance,
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;

        match self.limit {
            None => {
                self.heap.push(entry);
                true
            }
            Some(0) => false,
            Some(k) if self.heap.len() < k => {
                self.heap.push(entry);
                true
            }
            Some(_) => {
                let improves = self
                    .heap
                    .peek()
                    .map(|worst| entry < *worst)
                    .unwrap_or(false);
                if improves {
                    self.heap.pop();
                    self.heap.push(entry);
                }
                improves
            }
        }
    }

    /// Distance of the worst retained item, if any
    pub fn worst_distance(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.distance)
    }

    /// Number of retained items
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing has been retained
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain into `(distance, item)` pairs, best first
    pub fn into_sorted_vec(self) -> Vec<(f64, T)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| (e.distance, e.item))
            .collect()
    }
}

//! Nearest-neighbour correspondences between two point sets.
//!
//! Every fixed point is paired with its closest moving point. Pairing is
//! not one-to-one: several fixed points may share a moving partner, and some
//! moving points may go unused.

use crate::core::Point2D;

/// Paired points for one ICP iteration.
///
/// `fixed[i]` and `moving[i]` form pair `i`. Both vectors always have the
/// same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorrespondenceSet {
    /// Points from the fixed (reference) set.
    pub fixed: Vec<Point2D>,
    /// Nearest moving point for each fixed point.
    pub moving: Vec<Point2D>,
}

impl CorrespondenceSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fixed: Vec::with_capacity(capacity),
            moving: Vec::with_capacity(capacity),
        }
    }

    /// Add a pair.
    #[inline]
    pub fn push(&mut self, fixed: Point2D, moving: Point2D) {
        self.fixed.push(fixed);
        self.moving.push(moving);
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.fixed.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty()
    }

    /// Iterate over `(fixed, moving)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.fixed.iter().copied().zip(self.moving.iter().copied())
    }

    /// Mean squared distance over all pairs, or `None` when empty.
    pub fn mean_squared_error(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = self.pairs().map(|(a, b)| a.distance_squared(&b)).sum();
        Some(sum / self.len() as f64)
    }
}

/// Index of the point in `candidates` closest to `query`.
///
/// Brute force with a strict comparison: on equal distances the earliest
/// index wins. `None` when `candidates` is empty.
#[inline]
pub fn nearest_index(query: Point2D, candidates: &[Point2D]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let d = query.distance_squared(c);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Pair every fixed point with its nearest moving point.
///
/// Produces `fixed.len()` pairs, or an empty set when `moving` is empty.
pub fn find_correspondences(fixed: &[Point2D], moving: &[Point2D]) -> CorrespondenceSet {
    let mut set = CorrespondenceSet::with_capacity(fixed.len());
    if moving.is_empty() {
        return set;
    }
    for &a in fixed {
        if let Some(j) = nearest_index(a, moving) {
            set.push(a, moving[j]);
        }
    }
    set
}

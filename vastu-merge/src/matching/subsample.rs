//! Random thinning of point sets.
//!
//! Each registration epoch draws a fresh random subset of both maps so that
//! spurious cells (sensor noise, furniture seen by only one agent) drop out
//! of some epochs entirely.

use rand::Rng;

use crate::core::Point2D;

/// Number of points to remove when keeping `fraction` of `len` points.
///
/// `round(len * (1 - fraction))`, rounding half away from zero. May equal
/// `len`; [`subsample`] clamps it so one point survives.
#[inline]
pub fn requested_discard(len: usize, fraction: f64) -> usize {
    (len as f64 * (1.0 - fraction)).round().max(0.0) as usize
}

/// Keep roughly `fraction` of `points`, removing the rest uniformly at random.
///
/// Removal draws one index per discarded point, so survivors keep their
/// relative order. The input slice is never modified.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use vastu_merge::core::Point2D;
/// use vastu_merge::matching::subsample;
///
/// let points: Vec<Point2D> = (0..10).map(|i| Point2D::new(i as f64, 0.0)).collect();
/// let mut rng = StdRng::seed_from_u64(7);
/// let kept = subsample(&points, 0.8, &mut rng);
/// assert_eq!(kept.len(), 8);
/// ```
pub fn subsample<R: Rng + ?Sized>(points: &[Point2D], fraction: f64, rng: &mut R) -> Vec<Point2D> {
    let mut kept = points.to_vec();
    if kept.is_empty() {
        return kept;
    }

    let requested = requested_discard(kept.len(), fraction);
    let discard = requested.min(kept.len() - 1);
    if discard < requested {
        log::warn!(
            "Subsampling {} points at fraction {} would discard all; keeping one",
            kept.len(),
            fraction
        );
    }

    for _ in 0..discard {
        let index = rng.random_range(0..kept.len());
        kept.remove(index);
    }
    kept
}

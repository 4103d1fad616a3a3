//! Traits for point-set registration algorithms.

use rand::RngCore;

use crate::core::Point2D;
use crate::error::Result;

use super::RegistrationResult;

/// Trait for algorithms that align two point sets.
///
/// Randomness is injected so callers control seeding. The method takes a
/// trait object so implementations stay usable behind `dyn`.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use vastu_merge::core::Point2D;
/// use vastu_merge::matching::{MultiStartIcp, PointSetRegistration, RegistrationConfig};
///
/// fn align(
///     method: &dyn PointSetRegistration,
///     fixed: &[Point2D],
///     moving: &[Point2D],
/// ) -> Option<f64> {
///     let mut rng = StdRng::seed_from_u64(11);
///     method.register(fixed, moving, &mut rng).ok()?.evaluation()
/// }
///
/// let points = vec![Point2D::new(0.0, 0.0), Point2D::new(2.0, 0.0), Point2D::new(0.0, 1.0)];
/// let engine = MultiStartIcp::new(RegistrationConfig::exhaustive(4));
/// assert!(align(&engine, &points, &points).unwrap() < 1e-9);
/// ```
pub trait PointSetRegistration: Send + Sync {
    /// Find the transform mapping `moving` into the frame of `fixed`.
    fn register(
        &self,
        fixed: &[Point2D],
        moving: &[Point2D],
        rng: &mut dyn RngCore,
    ) -> Result<RegistrationResult>;

    /// Get the name of this method for logging/debugging
    fn name(&self) -> &str;
}

//! Point-to-point ICP refinement from a single start pose.
//!
//! The refiner never composes transforms explicitly. Instead it carries two
//! reference points, the images of (0,0) and (1,0), through every motion it
//! applies to the moving set. Whatever rigid motion the moving set has
//! accumulated can be read back from those two points at any time.

use crate::core::{Point2D, RigidTransform};
use crate::error::{MergeError, Result};

use super::config::RegistrationConfig;
use super::correspondence::find_correspondences;
use super::solver::{RigidMotion, solve_rigid_motion};

/// Images of (0,0) and (1,0) under the motion applied so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferencePair {
    /// Image of the origin.
    pub origin: Point2D,
    /// Image of the unit x vector.
    pub unit_x: Point2D,
}

impl ReferencePair {
    /// Reference pair of the identity motion.
    pub const IDENTITY: ReferencePair = ReferencePair {
        origin: Point2D::ZERO,
        unit_x: Point2D::new(1.0, 0.0),
    };

    /// Reference pair after applying `transform` to the identity.
    pub fn from_transform(transform: &RigidTransform) -> Self {
        Self {
            origin: transform.apply(Self::IDENTITY.origin),
            unit_x: transform.apply(Self::IDENTITY.unit_x),
        }
    }

    /// Both points moved by `motion`.
    #[inline]
    pub fn moved(&self, motion: &RigidMotion) -> Self {
        Self {
            origin: motion.apply(self.origin),
            unit_x: motion.apply(self.unit_x),
        }
    }

    /// Accumulated motion as a rotation angle and translation.
    #[inline]
    pub fn to_transform(&self) -> RigidTransform {
        RigidTransform::from_reference_points(self.origin, self.unit_x)
    }
}

/// Result of one refinement run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefinementOutcome {
    /// Lowest mean squared error seen during the run.
    pub error: f64,
    /// Reference pair of the state that produced `error`.
    pub reference: ReferencePair,
    /// Correspondence steps performed.
    pub iterations: usize,
    /// True if the error change fell below the threshold before the cap.
    pub converged: bool,
}

/// Iterative closest point against a fixed point set.
#[derive(Clone, Debug)]
pub struct IcpRefiner<'a> {
    fixed: &'a [Point2D],
    max_iterations: usize,
    convergence_threshold: f64,
}

impl<'a> IcpRefiner<'a> {
    /// Create a refiner against `fixed`.
    pub fn new(fixed: &'a [Point2D], max_iterations: usize, convergence_threshold: f64) -> Self {
        Self {
            fixed,
            max_iterations,
            convergence_threshold,
        }
    }

    /// Create a refiner using the ICP limits of `config`.
    pub fn from_config(fixed: &'a [Point2D], config: &RegistrationConfig) -> Self {
        Self::new(fixed, config.max_iterations, config.convergence_threshold)
    }

    /// Refine `moving` (already placed at its start pose) toward the fixed set.
    ///
    /// Each iteration pairs points, scores the current state, then applies the
    /// solved motion. The best state is captured before its motion is applied,
    /// so the returned reference pair is the one that scored `error`.
    ///
    /// Fails with [`MergeError::NumericalDegeneracy`] if a correspondence
    /// step yields no pairs (either set empty) or a non-finite error, which
    /// happens once coordinates overflow.
    pub fn refine(
        &self,
        mut moving: Vec<Point2D>,
        mut reference: ReferencePair,
    ) -> Result<RefinementOutcome> {
        let mut previous: Option<f64> = None;
        let mut best: Option<(f64, ReferencePair)> = None;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            let pairs = find_correspondences(self.fixed, &moving);
            let error = pairs.mean_squared_error().ok_or_else(|| {
                MergeError::NumericalDegeneracy(format!(
                    "no correspondences between {} fixed and {} moving points",
                    self.fixed.len(),
                    moving.len()
                ))
            })?;
            if !error.is_finite() {
                return Err(MergeError::NumericalDegeneracy(format!(
                    "non-finite mean squared error {} at iteration {}",
                    error, iterations
                )));
            }
            log::trace!("ICP iteration {}: mse={:.6}", iterations, error);

            if best.is_none_or(|(best_error, _)| error < best_error) {
                best = Some((error, reference));
            }

            if let Some(prev) = previous
                && (prev - error).abs() < self.convergence_threshold
            {
                converged = true;
                break;
            }
            previous = Some(error);

            let motion = solve_rigid_motion(&pairs)?;
            motion.apply_in_place(&mut moving);
            reference = reference.moved(&motion);
        }

        let Some((error, reference)) = best else {
            return Err(MergeError::InvalidConfiguration(
                "max_iterations must be at least 1".to_string(),
            ));
        };

        Ok(RefinementOutcome {
            error,
            reference,
            iterations,
            converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn l_shape() -> Vec<Point2D> {
        let mut points: Vec<Point2D> = (0..8).map(|x| Point2D::new(x as f64, 0.0)).collect();
        points.extend((1..5).map(|y| Point2D::new(0.0, y as f64)));
        points
    }

    #[test]
    fn test_already_aligned_converges_immediately() {
        let fixed = l_shape();
        let refiner = IcpRefiner::new(&fixed, 500, 1e-4);
        let outcome = refiner.refine(fixed.clone(), ReferencePair::IDENTITY).unwrap();

        assert_relative_eq!(outcome.error, 0.0, epsilon = 1e-12);
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 2);
        assert!(
            outcome
                .reference
                .to_transform()
                .approx_eq(&RigidTransform::identity(), 1e-9, 1e-9)
        );
    }

    #[test]
    fn test_recovers_translation() {
        let fixed = l_shape();
        let offset = Point2D::new(0.4, -0.3);
        let moving: Vec<_> = fixed.iter().map(|p| *p + offset).collect();

        let refiner = IcpRefiner::new(&fixed, 500, 1e-4);
        let outcome = refiner.refine(moving, ReferencePair::IDENTITY).unwrap();
        let transform = outcome.reference.to_transform();

        assert!(outcome.error < 1e-6);
        assert_relative_eq!(transform.translation.x, -offset.x, epsilon = 1e-6);
        assert_relative_eq!(transform.translation.y, -offset.y, epsilon = 1e-6);
        assert_relative_eq!(transform.rotation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_cap() {
        let fixed = l_shape();
        let moving: Vec<_> = fixed.iter().map(|p| *p + Point2D::new(0.4, 0.0)).collect();

        let refiner = IcpRefiner::new(&fixed, 1, 1e-4);
        let outcome = refiner.refine(moving, ReferencePair::IDENTITY).unwrap();
        assert_eq!(outcome.iterations, 1);
        assert!(!outcome.converged);
        // Only the starting state was ever scored
        assert_eq!(outcome.reference, ReferencePair::IDENTITY);
    }

    #[test]
    fn test_empty_moving_is_degenerate() {
        let fixed = l_shape();
        let refiner = IcpRefiner::new(&fixed, 500, 1e-4);
        let result = refiner.refine(Vec::new(), ReferencePair::IDENTITY);
        assert!(matches!(result, Err(MergeError::NumericalDegeneracy(_))));
    }

    #[test]
    fn test_non_finite_error_is_degenerate() {
        let fixed = l_shape();
        let refiner = IcpRefiner::new(&fixed, 500, 1e-4);

        let mut moving = l_shape();
        moving.push(Point2D::new(f64::NAN, 1.0));
        let result = refiner.refine(moving, ReferencePair::IDENTITY);
        assert!(matches!(result, Err(MergeError::NumericalDegeneracy(_))));

        // Squared distance overflows to infinity
        let result = refiner.refine(vec![Point2D::new(1e200, 0.0)], ReferencePair::IDENTITY);
        assert!(matches!(result, Err(MergeError::NumericalDegeneracy(_))));
    }

    #[test]
    fn test_reference_pair_roundtrip() {
        let transform = RigidTransform::new(1.2, Point2D::new(-4.0, 9.5));
        let pair = ReferencePair::from_transform(&transform);
        assert!(pair.to_transform().approx_eq(&transform, 1e-12, 1e-12));
    }
}

//! Multi-start ICP registration engine.
//!
//! ICP only finds the local minimum nearest its start. The engine runs it
//! from `starting_positions_amnt` evenly spaced rotations about the fixed
//! set's centroid, repeats that for `repetitions` freshly subsampled epochs
//! and keeps the lowest-error run overall.

use rand::{Rng, RngCore};

use crate::core::math::compute_centroid;
use crate::core::{Point2D, RigidTransform};
use crate::error::{MergeError, Result};

use super::config::RegistrationConfig;
use super::icp::{IcpRefiner, ReferencePair};
use super::subsample::subsample;
use super::traits::PointSetRegistration;
use super::types::{Alignment, AttemptRecord, RegistrationResult, RegistrationStats};

/// Multi-start, multi-epoch ICP registration.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use vastu_merge::core::{Point2D, RigidTransform};
/// use vastu_merge::matching::{MultiStartIcp, RegistrationConfig};
///
/// let moving: Vec<Point2D> = (0..8)
///     .map(|x| Point2D::new(x as f64, 0.0))
///     .chain((1..5).map(|y| Point2D::new(0.0, y as f64)))
///     .collect();
/// let truth = RigidTransform::new(std::f64::consts::FRAC_PI_2, Point2D::new(12.0, -7.5));
/// let fixed = truth.apply_all(&moving);
///
/// let engine = MultiStartIcp::new(RegistrationConfig::exhaustive(8));
/// let result = engine.register(&fixed, &moving, &mut StdRng::seed_from_u64(0)).unwrap();
/// let transform = result.transform().unwrap();
/// assert!(transform.approx_eq(&truth, 1e-6, 1e-6));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MultiStartIcp {
    config: RegistrationConfig,
}

impl MultiStartIcp {
    /// Create an engine. The configuration is validated on each call.
    pub fn new(config: RegistrationConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegistrationConfig {
        &self.config
    }

    /// Find the transform that maps `moving` onto `fixed`.
    ///
    /// Returns a result without an alignment when either set is empty or no
    /// run produced a correspondence. Fails on an invalid configuration or a
    /// point with a NaN or infinite coordinate.
    pub fn register<R: Rng + ?Sized>(
        &self,
        fixed: &[Point2D],
        moving: &[Point2D],
        rng: &mut R,
    ) -> Result<RegistrationResult> {
        self.search(fixed, moving, rng, None)
    }

    /// Like [`register`](Self::register), also returning one record per ICP
    /// run in execution order.
    pub fn register_with_trace<R: Rng + ?Sized>(
        &self,
        fixed: &[Point2D],
        moving: &[Point2D],
        rng: &mut R,
    ) -> Result<(RegistrationResult, Vec<AttemptRecord>)> {
        let mut trace = Vec::with_capacity(self.config.total_attempts());
        let result = self.search(fixed, moving, rng, Some(&mut trace))?;
        Ok((result, trace))
    }

    fn search<R: Rng + ?Sized>(
        &self,
        fixed: &[Point2D],
        moving: &[Point2D],
        rng: &mut R,
        mut trace: Option<&mut Vec<AttemptRecord>>,
    ) -> Result<RegistrationResult> {
        let config = &self.config;
        config.validate()?;
        if let Some(p) = fixed.iter().chain(moving).find(|p| !p.is_finite()) {
            return Err(MergeError::InvalidInput(format!(
                "point ({}, {}) is not finite",
                p.x, p.y
            )));
        }

        let mut stats = RegistrationStats::default();
        if fixed.is_empty() || moving.is_empty() {
            log::info!(
                "Registration skipped: {} fixed and {} moving points",
                fixed.len(),
                moving.len()
            );
            return Ok(RegistrationResult::none(stats));
        }

        let mut best: Option<(f64, ReferencePair)> = None;

        for epoch in 0..config.repetitions {
            let fixed_sample = subsample(fixed, config.ransac_fraction, rng);
            let moving_sample = subsample(moving, config.ransac_fraction, rng);

            let (Some(fixed_center), Some(moving_center)) = (
                compute_centroid(&fixed_sample),
                compute_centroid(&moving_sample),
            ) else {
                continue;
            };

            let refiner = IcpRefiner::from_config(&fixed_sample, config);

            for k in 0..config.starting_positions_amnt {
                let start_angle = config.start_angle(k);
                stats.attempts += 1;

                // Spin the moving sample about its centroid, then drop that
                // centroid onto the fixed one.
                let start = RigidTransform::new(
                    start_angle,
                    fixed_center - moving_center.rotate(start_angle),
                );

                let mut record = AttemptRecord {
                    epoch,
                    start_angle,
                    evaluation: None,
                    iterations: 0,
                    converged: false,
                };

                match refiner.refine(
                    start.apply_all(&moving_sample),
                    ReferencePair::from_transform(&start),
                ) {
                    Ok(outcome) => {
                        log::debug!(
                            "Epoch {} start {:.1}°: mse={:.6} after {} iterations (converged={})",
                            epoch,
                            start_angle.to_degrees(),
                            outcome.error,
                            outcome.iterations,
                            outcome.converged
                        );
                        stats.total_iterations += outcome.iterations;
                        record.evaluation = Some(outcome.error);
                        record.iterations = outcome.iterations;
                        record.converged = outcome.converged;

                        if best.is_none_or(|(best_error, _)| outcome.error < best_error) {
                            best = Some((outcome.error, outcome.reference));
                        }
                    }
                    Err(MergeError::NumericalDegeneracy(reason)) => {
                        log::warn!(
                            "Epoch {} start {:.1}° skipped: {}",
                            epoch,
                            start_angle.to_degrees(),
                            reason
                        );
                        stats.degenerate_attempts += 1;
                    }
                    Err(e) => return Err(e),
                }

                if let Some(trace) = trace.as_mut() {
                    trace.push(record);
                }
            }
        }

        let alignment = best.map(|(evaluation, reference)| Alignment {
            transform: reference.to_transform(),
            evaluation,
        });

        match &alignment {
            Some(a) => log::info!(
                "Registration: {} attempts, best mse={:.6}, rotation={:.2}°, translation=({:.3}, {:.3})",
                stats.attempts,
                a.evaluation,
                a.transform.rotation_degrees(),
                a.transform.translation.x,
                a.transform.translation.y
            ),
            None => log::info!(
                "Registration: no alignment after {} attempts",
                stats.attempts
            ),
        }

        Ok(RegistrationResult { alignment, stats })
    }
}

impl PointSetRegistration for MultiStartIcp {
    fn register(
        &self,
        fixed: &[Point2D],
        moving: &[Point2D],
        mut rng: &mut dyn RngCore,
    ) -> Result<RegistrationResult> {
        MultiStartIcp::register(self, fixed, moving, &mut rng)
    }

    fn name(&self) -> &str {
        "multi_start_icp"
    }
}

//! Registration configuration.

use serde::{Deserialize, Serialize};

use crate::error::{MergeError, Result};

/// Configuration for multi-start ICP registration.
///
/// The search runs `repetitions` epochs. Each epoch thins both point sets to
/// `ransac_fraction` of their size and launches `starting_positions_amnt` ICP
/// runs from evenly spaced initial rotations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Fraction of points kept per epoch, in (0, 1].
    /// 1.0 disables subsampling.
    #[serde(default = "default_ransac_fraction")]
    pub ransac_fraction: f64,

    /// Number of resampling epochs (>= 1).
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,

    /// Number of evenly spaced start rotations per epoch (>= 1).
    /// Start angle k is `k * 360 / starting_positions_amnt` degrees.
    #[serde(default = "default_starting_positions")]
    pub starting_positions_amnt: usize,

    /// Hard cap on ICP iterations per run.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// ICP stops once the mean squared error changes by less than this.
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
}

fn default_ransac_fraction() -> f64 {
    0.9
}

fn default_repetitions() -> usize {
    5
}

fn default_starting_positions() -> usize {
    8 // every 45 degrees
}

fn default_max_iterations() -> usize {
    500
}

fn default_convergence_threshold() -> f64 {
    1e-4
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            ransac_fraction: default_ransac_fraction(),
            repetitions: default_repetitions(),
            starting_positions_amnt: default_starting_positions(),
            max_iterations: default_max_iterations(),
            convergence_threshold: default_convergence_threshold(),
        }
    }
}

impl RegistrationConfig {
    /// Single epoch on the full point sets. Deterministic regardless of RNG.
    pub fn exhaustive(starting_positions_amnt: usize) -> Self {
        Self {
            ransac_fraction: 1.0,
            repetitions: 1,
            starting_positions_amnt,
            ..Default::default()
        }
    }

    /// Set the subsampling fraction.
    pub fn with_ransac_fraction(mut self, fraction: f64) -> Self {
        self.ransac_fraction = fraction;
        self
    }

    /// Set the number of epochs.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the number of start rotations.
    pub fn with_starting_positions(mut self, amount: usize) -> Self {
        self.starting_positions_amnt = amount;
        self
    }

    /// Set the ICP iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the ICP convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Start rotation for index `k`, in radians.
    #[inline]
    pub fn start_angle(&self, k: usize) -> f64 {
        (k as f64 * 360.0 / self.starting_positions_amnt as f64).to_radians()
    }

    /// Total number of ICP runs a registration performs.
    pub fn total_attempts(&self) -> usize {
        self.repetitions * self.starting_positions_amnt
    }

    /// Check every parameter against its valid range.
    pub fn validate(&self) -> Result<()> {
        if !self.ransac_fraction.is_finite()
            || self.ransac_fraction <= 0.0
            || self.ransac_fraction > 1.0
        {
            return Err(MergeError::InvalidConfiguration(format!(
                "ransac_fraction must be in (0, 1], got {}",
                self.ransac_fraction
            )));
        }
        if self.repetitions < 1 {
            return Err(MergeError::InvalidConfiguration(
                "repetitions must be at least 1".to_string(),
            ));
        }
        if self.starting_positions_amnt < 1 {
            return Err(MergeError::InvalidConfiguration(
                "starting_positions_amnt must be at least 1".to_string(),
            ));
        }
        if self.max_iterations < 1 {
            return Err(MergeError::InvalidConfiguration(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(MergeError::InvalidConfiguration(format!(
                "convergence_threshold must be finite and non-negative, got {}",
                self.convergence_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = RegistrationConfig::default();
        assert_relative_eq!(config.ransac_fraction, 0.9);
        assert_eq!(config.repetitions, 5);
        assert_eq!(config.starting_positions_amnt, 8);
        assert_eq!(config.max_iterations, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_start_angles_evenly_spaced() {
        let config = RegistrationConfig::default().with_starting_positions(8);
        assert_relative_eq!(config.start_angle(0), 0.0);
        assert_relative_eq!(config.start_angle(2), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(config.start_angle(7), 315f64.to_radians());

        // Non-divisor counts still give exactly S starts below a full turn
        let config = RegistrationConfig::default().with_starting_positions(7);
        assert!(config.start_angle(6) < std::f64::consts::TAU);
    }

    #[test]
    fn test_validate_rejects_bad_fraction() {
        for fraction in [0.0, -0.5, 1.01, f64::NAN, f64::INFINITY] {
            let config = RegistrationConfig::default().with_ransac_fraction(fraction);
            assert!(matches!(
                config.validate(),
                Err(MergeError::InvalidConfiguration(_))
            ));
        }
        assert!(
            RegistrationConfig::default()
                .with_ransac_fraction(1.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        assert!(RegistrationConfig::default().with_repetitions(0).validate().is_err());
        assert!(
            RegistrationConfig::default()
                .with_starting_positions(0)
                .validate()
                .is_err()
        );
        assert!(RegistrationConfig::default().with_max_iterations(0).validate().is_err());
        assert!(
            RegistrationConfig::default()
                .with_convergence_threshold(-1.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: RegistrationConfig = serde_yaml::from_str("repetitions: 2").unwrap();
        assert_eq!(config.repetitions, 2);
        assert_eq!(config.starting_positions_amnt, 8);
        assert_relative_eq!(config.convergence_threshold, 1e-4);
    }

    #[test]
    fn test_exhaustive() {
        let config = RegistrationConfig::exhaustive(4);
        assert_relative_eq!(config.ransac_fraction, 1.0);
        assert_eq!(config.total_attempts(), 4);
    }
}

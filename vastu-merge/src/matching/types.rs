//! Registration result types.

use serde::{Deserialize, Serialize};

use crate::core::RigidTransform;

/// Evaluation reported on the wire when registration found nothing.
pub const NO_RESULT_EVALUATION: f64 = -1.0;

/// Best alignment found by a registration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Maps the moving map's frame into the fixed map's frame.
    pub transform: RigidTransform,
    /// Mean squared nearest-neighbour distance at the optimum. Lower is better.
    pub evaluation: f64,
}

/// Counters collected over a registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStats {
    /// ICP runs started (epochs × start rotations).
    pub attempts: usize,
    /// Runs abandoned because a correspondence step produced no pairs.
    pub degenerate_attempts: usize,
    /// Correspondence steps summed over all runs.
    pub total_iterations: usize,
}

/// Outcome of a registration call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationResult {
    /// Best alignment, or `None` when no run produced a correspondence.
    pub alignment: Option<Alignment>,
    /// Search counters.
    pub stats: RegistrationStats,
}

impl RegistrationResult {
    /// Result with no alignment.
    pub fn none(stats: RegistrationStats) -> Self {
        Self {
            alignment: None,
            stats,
        }
    }

    /// True if an alignment was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.alignment.is_some()
    }

    /// Best transform, if any.
    #[inline]
    pub fn transform(&self) -> Option<RigidTransform> {
        self.alignment.map(|a| a.transform)
    }

    /// Best evaluation, if any.
    #[inline]
    pub fn evaluation(&self) -> Option<f64> {
        self.alignment.map(|a| a.evaluation)
    }

    /// Evaluation with the wire convention: `-1` when nothing was found.
    #[inline]
    pub fn sentinel_evaluation(&self) -> f64 {
        self.evaluation().unwrap_or(NO_RESULT_EVALUATION)
    }
}

/// One ICP run as recorded by a traced registration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Epoch index.
    pub epoch: usize,
    /// Start rotation in radians.
    pub start_angle: f64,
    /// Best error of the run, `None` if it was degenerate.
    pub evaluation: Option<f64>,
    /// Correspondence steps performed.
    pub iterations: usize,
    /// True if the run stopped on the convergence threshold.
    pub converged: bool,
}

/// Flat transformation reply handed back to the requesting agent.
///
/// Carries the identity transform and an evaluation of `-1` when
/// registration found nothing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformationMessage {
    /// Rotation in radians.
    pub rotation: f64,
    /// Translation along x, in cells.
    pub translation_x: f64,
    /// Translation along y, in cells.
    pub translation_y: f64,
    /// Mean squared error, or `-1` for no result.
    pub evaluation: f64,
}

impl TransformationMessage {
    /// True if this message carries an actual alignment.
    pub fn is_valid(&self) -> bool {
        self.evaluation >= 0.0
    }

    /// Transform carried by this message.
    pub fn transform(&self) -> RigidTransform {
        RigidTransform::new(
            self.rotation,
            crate::core::Point2D::new(self.translation_x, self.translation_y),
        )
    }
}

impl From<&RegistrationResult> for TransformationMessage {
    fn from(result: &RegistrationResult) -> Self {
        let transform = result.transform().unwrap_or_default();
        Self {
            rotation: transform.rotation,
            translation_x: transform.translation.x,
            translation_y: transform.translation.y,
            evaluation: result.sentinel_evaluation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point2D;

    #[test]
    fn test_sentinel_on_no_result() {
        let result = RegistrationResult::none(RegistrationStats::default());
        assert!(!result.is_found());
        assert_eq!(result.sentinel_evaluation(), NO_RESULT_EVALUATION);

        let message = TransformationMessage::from(&result);
        assert!(!message.is_valid());
        assert_eq!(message.rotation, 0.0);
        assert_eq!(message.translation_x, 0.0);
        assert_eq!(message.evaluation, -1.0);
    }

    #[test]
    fn test_message_from_alignment() {
        let result = RegistrationResult {
            alignment: Some(Alignment {
                transform: RigidTransform::new(0.5, Point2D::new(3.0, -1.0)),
                evaluation: 0.25,
            }),
            stats: RegistrationStats::default(),
        };
        let message = TransformationMessage::from(&result);
        assert!(message.is_valid());
        assert_eq!(message.translation_y, -1.0);
        assert_eq!(message.transform(), result.transform().unwrap());
    }

    #[test]
    fn test_message_yaml_keys() {
        let message = TransformationMessage {
            rotation: 1.0,
            translation_x: 2.0,
            translation_y: 3.0,
            evaluation: 0.0,
        };
        let yaml = serde_yaml::to_string(&message).unwrap();
        assert!(yaml.contains("translation_x: 2.0"));
        let parsed: TransformationMessage = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, message);
    }
}

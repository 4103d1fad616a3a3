//! Closed-form rigid motion from paired points.
//!
//! The rotation is read off a 2x2 SVD of the cross-covariance of the
//! centered pairs, written out analytically so no linear-algebra crate is
//! needed. Translation then aligns the rotated moving centroid with the
//! fixed centroid.
//!
//! ```text
//!   q1 = (M00 + M11) / 2     a1 = atan2(q3, q2)
//!   q2 = (M00 - M11) / 2     a2 = atan2(q4, q1)
//!   q3 = M01                 U  = Rot((a2 + a1) / 2)
//!   q4 = 0                   Vᵗ = Rot((a2 - a1) / 2)
//!
//!   R = V · Uᵗ               t = c_fixed - R · c_moving
//! ```
//!
//! Only three accumulators of the cross-covariance are kept (`M10` is never
//! formed and `q4` is pinned to zero). With that reduction `R` collapses to
//! `Rot(-a2)`: identity when `M00 + M11 > 0`, a half turn otherwise. Fine
//! rotation therefore comes from the multi-start search, and each ICP step
//! settles translation and orientation flips.

use crate::core::math::compute_centroid;
use crate::core::{Matrix2, Point2D};
use crate::error::{MergeError, Result};

use super::CorrespondenceSet;

/// Accumulated products of centered pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrossCovariance {
    /// Σ a.x · b.x
    pub m00: f64,
    /// Σ a.x · b.y
    pub m01: f64,
    /// Σ a.y · b.y
    pub m11: f64,
}

impl CrossCovariance {
    /// Accumulate over pairs already centered on their centroids.
    pub fn accumulate(centered: impl IntoIterator<Item = (Point2D, Point2D)>) -> Self {
        let mut h = Self::default();
        for (a, b) in centered {
            h.m00 += a.x * b.x;
            h.m01 += a.x * b.y;
            h.m11 += a.y * b.y;
        }
        h
    }
}

/// Rotation matrix from the analytic 2x2 SVD of `h`.
pub fn closed_form_rotation(h: &CrossCovariance) -> Matrix2 {
    let q1 = (h.m00 + h.m11) / 2.0;
    let q2 = (h.m00 - h.m11) / 2.0;
    let q3 = h.m01;
    let q4 = 0.0_f64;

    let a1 = q3.atan2(q2);
    let a2 = q4.atan2(q1);

    let angle1 = (a2 - a1) / 2.0;
    let angle2 = (a2 + a1) / 2.0;

    let u = Matrix2::rotation(angle2);
    let v_t = Matrix2::rotation(angle1);

    v_t.transpose().mul_mat(&u.transpose())
}

/// Rigid motion produced by one solver step, in matrix form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidMotion {
    /// Rotation matrix.
    pub rotation: Matrix2,
    /// Translation applied after rotation.
    pub translation: Point2D,
}

impl RigidMotion {
    /// Motion that leaves every point in place.
    pub const IDENTITY: RigidMotion = RigidMotion {
        rotation: Matrix2::IDENTITY,
        translation: Point2D::ZERO,
    };

    /// Apply to a point: `R·p + t`.
    #[inline]
    pub fn apply(&self, p: Point2D) -> Point2D {
        self.rotation.mul_point(p) + self.translation
    }

    /// Apply in place to every point of a buffer.
    pub fn apply_in_place(&self, points: &mut [Point2D]) {
        for p in points.iter_mut() {
            *p = self.apply(*p);
        }
    }
}

/// Solve for the motion that moves the moving side of `pairs` onto the fixed
/// side.
///
/// Fails with [`MergeError::NumericalDegeneracy`] when `pairs` is empty.
pub fn solve_rigid_motion(pairs: &CorrespondenceSet) -> Result<RigidMotion> {
    let (Some(center_fixed), Some(center_moving)) = (
        compute_centroid(&pairs.fixed),
        compute_centroid(&pairs.moving),
    ) else {
        return Err(MergeError::NumericalDegeneracy(
            "cannot solve rigid motion from zero correspondences".to_string(),
        ));
    };

    let h = CrossCovariance::accumulate(
        pairs
            .pairs()
            .map(|(a, b)| (a - center_fixed, b - center_moving)),
    );
    let rotation = closed_form_rotation(&h);
    let translation = center_fixed - rotation.mul_point(center_moving);

    Ok(RigidMotion {
        rotation,
        translation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn pairs_from(fixed: &[Point2D], moving: &[Point2D]) -> CorrespondenceSet {
        let mut set = CorrespondenceSet::new();
        for (a, b) in fixed.iter().zip(moving) {
            set.push(*a, *b);
        }
        set
    }

    #[test]
    fn test_pure_translation() {
        let fixed = [
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(0.0, 2.0),
        ];
        let offset = Point2D::new(-2.5, 7.0);
        let moving: Vec<_> = fixed.iter().map(|p| *p - offset).collect();

        let motion = solve_rigid_motion(&pairs_from(&fixed, &moving)).unwrap();
        assert_relative_eq!(motion.rotation.angle(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(motion.translation.x, offset.x, epsilon = 1e-12);
        assert_relative_eq!(motion.translation.y, offset.y, epsilon = 1e-12);

        for (a, b) in fixed.iter().zip(&moving) {
            let moved = motion.apply(*b);
            assert_relative_eq!(moved.x, a.x, epsilon = 1e-12);
            assert_relative_eq!(moved.y, a.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_point_reflection_gives_half_turn() {
        let fixed = [Point2D::new(1.0, 0.0), Point2D::new(-1.0, 0.0)];
        let moving = [Point2D::new(-1.0, 0.0), Point2D::new(1.0, 0.0)];

        let motion = solve_rigid_motion(&pairs_from(&fixed, &moving)).unwrap();
        assert_relative_eq!(motion.rotation.angle().abs(), PI, epsilon = 1e-12);

        let moved = motion.apply(moving[0]);
        assert_relative_eq!(moved.x, fixed[0].x, epsilon = 1e-12);
        assert_relative_eq!(moved.y, fixed[0].y, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_depends_on_trace_sign() {
        let h = CrossCovariance {
            m00: 3.0,
            m01: 2.0,
            m11: 1.0,
        };
        assert_relative_eq!(closed_form_rotation(&h).angle(), 0.0, epsilon = 1e-12);

        let h = CrossCovariance {
            m00: -3.0,
            m01: 2.0,
            m11: 1.0,
        };
        assert_relative_eq!(closed_form_rotation(&h).angle().abs(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let h = CrossCovariance {
            m00: 0.7,
            m01: -4.2,
            m11: 1.9,
        };
        let r = closed_form_rotation(&h);
        let rrt = r.mul_mat(&r.transpose());
        assert_relative_eq!(rrt.m[0][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(rrt.m[0][1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(rrt.m[1][1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_accumulate_ignores_m10() {
        let h = CrossCovariance::accumulate([(Point2D::new(0.0, 2.0), Point2D::new(3.0, 0.0))]);
        assert_eq!(h, CrossCovariance::default());
    }

    #[test]
    fn test_empty_pairs_is_degenerate() {
        let result = solve_rigid_motion(&CorrespondenceSet::new());
        assert!(matches!(result, Err(MergeError::NumericalDegeneracy(_))));
    }

    #[test]
    fn test_apply_in_place() {
        let motion = RigidMotion {
            rotation: Matrix2::rotation(PI / 2.0),
            translation: Point2D::new(1.0, 0.0),
        };
        let mut points = [Point2D::new(1.0, 0.0)];
        motion.apply_in_place(&mut points);
        assert_relative_eq!(points[0].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(points[0].y, 1.0, epsilon = 1e-12);

        RigidMotion::IDENTITY.apply_in_place(&mut points);
        assert_relative_eq!(points[0].y, 1.0, epsilon = 1e-12);
    }
}

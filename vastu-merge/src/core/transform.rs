//! Rigid 2D transforms.
//!
//! A [`RigidTransform`] is an isometry `p' = R(θ)·p + t`. [`Matrix2`] is the
//! explicit 2x2 form used by the closed-form rotation solver, where the
//! rotation comes out of a product of factor matrices rather than as an angle.

use serde::{Deserialize, Serialize};

use super::Point2D;
use super::math::angles_approx_equal;

/// Row-major 2x2 matrix.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Matrix2 {
    /// Entries `m[row][col]`
    pub m: [[f64; 2]; 2],
}

impl Matrix2 {
    /// Identity matrix.
    pub const IDENTITY: Matrix2 = Matrix2 {
        m: [[1.0, 0.0], [0.0, 1.0]],
    };

    /// Create from rows.
    #[inline]
    pub const fn new(m: [[f64; 2]; 2]) -> Self {
        Self { m }
    }

    /// Counter-clockwise rotation matrix `[[cos, -sin], [sin, cos]]`.
    #[inline]
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new([[cos, -sin], [sin, cos]])
    }

    /// Transposed matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new([[self.m[0][0], self.m[1][0]], [self.m[0][1], self.m[1][1]]])
    }

    /// Matrix product `self · rhs`.
    #[inline]
    pub fn mul_mat(&self, rhs: &Matrix2) -> Self {
        let a = &self.m;
        let b = &rhs.m;
        Self::new([
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
            ],
        ])
    }

    /// Matrix-vector product `self · p`.
    #[inline]
    pub fn mul_point(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y,
            self.m[1][0] * p.x + self.m[1][1] * p.y,
        )
    }

    /// Rotation angle of a proper rotation matrix, in (-π, π].
    #[inline]
    pub fn angle(&self) -> f64 {
        self.m[1][0].atan2(self.m[0][0])
    }
}

/// A 2D rigid-body transform: rotation about the origin followed by
/// translation.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Rotation angle in radians, CCW positive.
    ///
    /// Transforms reconstructed by registration keep atan2's native range
    /// (-π, π]; nothing here renormalizes.
    pub rotation: f64,
    /// Translation applied after rotation.
    pub translation: Point2D,
}

impl RigidTransform {
    /// Create a new transform.
    #[inline]
    pub const fn new(rotation: f64, translation: Point2D) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Identity transform.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, Point2D::ZERO)
    }

    /// Recover a transform from the images of (0,0) and (1,0).
    ///
    /// An isometry is fully determined by where it sends two distinct points:
    /// the image of the origin is the translation and the direction from it to
    /// the image of the unit x vector is the rotation.
    ///
    /// # Example
    /// ```
    /// use vastu_merge::core::{Point2D, RigidTransform};
    ///
    /// let t = RigidTransform::new(0.7, Point2D::new(3.0, -2.0));
    /// let o = t.apply(Point2D::new(0.0, 0.0));
    /// let x = t.apply(Point2D::new(1.0, 0.0));
    /// let back = RigidTransform::from_reference_points(o, x);
    /// assert!((back.rotation - 0.7).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn from_reference_points(origin_image: Point2D, unit_x_image: Point2D) -> Self {
        let direction = unit_x_image - origin_image;
        Self::new(direction.angle(), origin_image)
    }

    /// Rotation part as a matrix.
    #[inline]
    pub fn rotation_matrix(&self) -> Matrix2 {
        Matrix2::rotation(self.rotation)
    }

    /// Apply to a point: `R·p + t`.
    #[inline]
    pub fn apply(&self, point: Point2D) -> Point2D {
        point.rotate(self.rotation) + self.translation
    }

    /// Apply to every point of a set.
    pub fn apply_all(&self, points: &[Point2D]) -> Vec<Point2D> {
        let r = self.rotation_matrix();
        points
            .iter()
            .map(|p| r.mul_point(*p) + self.translation)
            .collect()
    }

    /// Scale the translation, e.g. cells to meters with the grid resolution.
    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.rotation, self.translation * factor)
    }

    /// Rotation in degrees.
    #[inline]
    pub fn rotation_degrees(&self) -> f64 {
        super::math::rad_to_deg(self.rotation)
    }

    /// Check approximate equality; rotation is compared modulo 2π.
    pub fn approx_eq(&self, other: &RigidTransform, pos_epsilon: f64, angle_epsilon: f64) -> bool {
        (self.translation.x - other.translation.x).abs() <= pos_epsilon
            && (self.translation.y - other.translation.y).abs() <= pos_epsilon
            && angles_approx_equal(self.rotation, other.rotation, angle_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_matrix_rotation_product() {
        let a = Matrix2::rotation(0.3);
        let b = Matrix2::rotation(0.5);
        let ab = a.mul_mat(&b);
        assert_relative_eq!(ab.angle(), 0.8, epsilon = 1e-12);

        let id = a.mul_mat(&a.transpose());
        for r in 0..2 {
            for c in 0..2 {
                assert_relative_eq!(id.m[r][c], Matrix2::IDENTITY.m[r][c], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_matrix_angle_at_pi() {
        let flip = Matrix2::new([[-1.0, 0.0], [0.0, -1.0]]);
        assert_relative_eq!(flip.angle(), PI);
    }

    #[test]
    fn test_apply() {
        let t = RigidTransform::new(FRAC_PI_2, Point2D::new(1.0, 0.0));
        let p = t.apply(Point2D::new(1.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);

        let all = t.apply_all(&[Point2D::new(1.0, 0.0), Point2D::new(0.0, 1.0)]);
        assert_relative_eq!(all[1].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(all[1].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_reference_points_roundtrip() {
        let t = RigidTransform::new(-2.5, Point2D::new(12.0, 7.5));
        let back = RigidTransform::from_reference_points(
            t.apply(Point2D::ZERO),
            t.apply(Point2D::new(1.0, 0.0)),
        );
        assert!(back.approx_eq(&t, 1e-9, 1e-9));
    }

    #[test]
    fn test_scaled() {
        let t = RigidTransform::new(0.2, Point2D::new(40.0, -8.0)).scaled(0.05);
        assert_relative_eq!(t.translation.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(t.translation.y, -0.4, epsilon = 1e-12);
        assert_relative_eq!(t.rotation, 0.2);
    }
}

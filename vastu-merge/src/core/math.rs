//! Mathematical utilities for angles and point sets.
//!
//! All angles are in radians, counter-clockwise positive.

use std::f64::consts::{PI, TAU};

use super::Point2D;

/// Normalize angle to [-π, π).
///
/// # Example
/// ```
/// use vastu_merge::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-12);
/// assert!((normalize_angle(-0.5 * PI) + 0.5 * PI).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a >= PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}

/// Signed shortest angular difference from `from` to `to`, in [-π, π).
#[inline]
pub fn angle_diff(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Check if two angles are equal within tolerance, modulo 2π.
///
/// # Example
/// ```
/// use vastu_merge::core::math::angles_approx_equal;
/// use std::f64::consts::PI;
///
/// assert!(angles_approx_equal(PI - 0.001, -PI + 0.001, 0.01));
/// assert!(!angles_approx_equal(0.0, PI, 0.1));
/// ```
#[inline]
pub fn angles_approx_equal(a: f64, b: f64, tolerance: f64) -> bool {
    angle_diff(a, b).abs() <= tolerance
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Compute the centroid of a set of points.
///
/// Returns `None` for an empty set; the mean of nothing is undefined and
/// callers decide whether that is an error.
///
/// # Example
/// ```
/// use vastu_merge::core::{Point2D, math::compute_centroid};
///
/// let points = [Point2D::new(0.0, 0.0), Point2D::new(2.0, 0.0), Point2D::new(1.0, 3.0)];
/// let centroid = compute_centroid(&points).unwrap();
/// assert!((centroid.x - 1.0).abs() < 1e-12);
/// assert!((centroid.y - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn compute_centroid(points: &[Point2D]) -> Option<Point2D> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let mut sum = Point2D::ZERO;
    for p in points {
        sum += *p;
    }

    Some(Point2D::new(sum.x / n, sum.y / n))
}

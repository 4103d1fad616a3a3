//! Core types for the vastu-merge library.
//!
//! Coordinates are in grid-cell units of the map they were extracted from,
//! with counter-clockwise positive rotation.
//!
//! ## Type Categories
//!
//! - [`Point2D`]: floating-point coordinate with vector arithmetic
//! - [`RigidTransform`]: rotation + translation isometry
//! - [`Matrix2`]: explicit 2x2 matrix for the closed-form rotation solver
//! - [`math`]: angle helpers and centroid computation
//!
//! ## Example
//!
//! ```
//! use vastu_merge::core::{Point2D, RigidTransform};
//!
//! let transform = RigidTransform::new(std::f64::consts::FRAC_PI_2, Point2D::new(5.0, 5.0));
//! let p = transform.apply(Point2D::new(1.0, 0.0));
//! assert!((p.x - 5.0).abs() < 1e-12);
//! assert!((p.y - 6.0).abs() < 1e-12);
//! ```

pub mod math;
mod point;
mod transform;

pub use math::compute_centroid;
pub use point::Point2D;
pub use transform::{Matrix2, RigidTransform};

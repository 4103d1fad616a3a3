//! # VastuMerge
//!
//! Multi-agent occupancy grid map merging by point-set registration.
//!
//! ## Overview
//!
//! Two robots exploring the same building each build their own occupancy
//! grid in their own frame. VastuMerge finds the rigid transform (rotation +
//! translation) that carries one map onto the other:
//!
//! - **Extraction** - occupied cells become 2D points
//! - **Subsampling** - each epoch drops a random share of points
//! - **Multi-start ICP** - ICP from evenly spaced start rotations
//! - **Closed-form solver** - analytic 2x2 SVD per ICP step
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use vastu_merge::{RegistrationConfig, register_maps};
//!
//! let config = RegistrationConfig::default();
//! let mut rng = StdRng::from_os_rng();
//! let result = register_maps(&grid_a, &grid_b, &config, &mut rng)?;
//!
//! if let Some(alignment) = result.alignment {
//!     println!("B -> A: {:?} (mse {:.3})", alignment.transform, alignment.evaluation);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! Points are grid indices: x is the column, y the row. Rotations are in
//! radians, CCW positive. Translations are in cells; use
//! [`RigidTransform::scaled`] with the grid resolution for meters.

#![warn(missing_docs)]

// Core types
pub mod core;

// Error types
pub mod error;

// Occupancy grid input
pub mod grid;

// Unified configuration
pub mod config;

// Point-set registration
pub mod matching;

// Persistence (save/load)
pub mod io;

use rand::Rng;

// Re-export commonly used types
pub use core::{Point2D, RigidTransform};

pub use error::{MergeError, Result};

pub use grid::{OccupancyGrid, extract_points};

pub use config::{ConfigLoadError, ExtractionSection, MergeConfig};

pub use matching::{
    Alignment, AttemptRecord, MultiStartIcp, PointSetRegistration, RegistrationConfig,
    RegistrationResult, RegistrationStats, TransformationMessage,
};

/// Register two point sets: find the transform mapping `points_b` into the
/// frame of `points_a`.
///
/// Empty input yields a result without an alignment rather than an error.
/// A NaN or infinite coordinate fails with [`MergeError::InvalidInput`].
pub fn register_points<R: Rng + ?Sized>(
    points_a: &[Point2D],
    points_b: &[Point2D],
    config: &RegistrationConfig,
    rng: &mut R,
) -> Result<RegistrationResult> {
    MultiStartIcp::new(config.clone()).register(points_a, points_b, rng)
}

/// Register two occupancy grids: find the transform mapping `grid_b` into
/// the frame of `grid_a`.
///
/// Cells at or above 50 are used. Fails with [`MergeError::InvalidInput`]
/// when either grid has a zero dimension or no occupied cells.
pub fn register_maps<R: Rng + ?Sized>(
    grid_a: &OccupancyGrid,
    grid_b: &OccupancyGrid,
    config: &RegistrationConfig,
    rng: &mut R,
) -> Result<RegistrationResult> {
    register_grids(
        grid_a,
        grid_b,
        grid::DEFAULT_OCCUPIED_THRESHOLD,
        config,
        rng,
    )
}

/// Like [`register_maps`], with the threshold and search settings of a
/// loaded [`MergeConfig`].
pub fn register_maps_with<R: Rng + ?Sized>(
    grid_a: &OccupancyGrid,
    grid_b: &OccupancyGrid,
    config: &MergeConfig,
    rng: &mut R,
) -> Result<RegistrationResult> {
    register_grids(
        grid_a,
        grid_b,
        config.occupied_threshold(),
        &config.registration,
        rng,
    )
}

fn register_grids<R: Rng + ?Sized>(
    grid_a: &OccupancyGrid,
    grid_b: &OccupancyGrid,
    threshold: i8,
    config: &RegistrationConfig,
    rng: &mut R,
) -> Result<RegistrationResult> {
    config.validate()?;

    let points_a = occupied_or_err(grid_a, threshold, "A")?;
    let points_b = occupied_or_err(grid_b, threshold, "B")?;
    log::debug!(
        "Registering map B ({} points) into map A ({} points)",
        points_b.len(),
        points_a.len()
    );

    register_points(&points_a, &points_b, config, rng)
}

fn occupied_or_err(grid: &OccupancyGrid, threshold: i8, label: &str) -> Result<Vec<Point2D>> {
    if grid.is_empty() {
        return Err(MergeError::InvalidInput(format!(
            "map {} has zero dimension ({}x{})",
            label,
            grid.width(),
            grid.height()
        )));
    }
    let points = grid.occupied_points(threshold);
    if points.is_empty() {
        return Err(MergeError::InvalidInput(format!(
            "map {} has no cells at or above {}",
            label, threshold
        )));
    }
    Ok(points)
}

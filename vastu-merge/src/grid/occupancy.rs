//! Occupancy grid container and point-set extraction.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;
use crate::error::{MergeError, Result};

/// Cell value for an unobserved cell.
pub const UNKNOWN: i8 = -1;

/// Cell value for an observed free cell.
pub const FREE: i8 = 0;

/// Cell value for a certainly occupied cell.
pub const OCCUPIED: i8 = 100;

/// Default threshold at or above which a cell counts as occupied.
pub const DEFAULT_OCCUPIED_THRESHOLD: i8 = 50;

/// Row-major occupancy grid as published by a mapping agent.
///
/// Cell values follow the ROS convention: `-1` unknown, `0..=100` occupancy
/// probability in percent. Cell `(x, y)` lives at index `x + y * width`.
///
/// Deserialization goes through [`OccupancyGrid::new`], so a decoded grid
/// always holds exactly `width * height` cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridFields")]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    /// Meters per cell. Metadata only; registration works in cell units.
    resolution: f64,
    /// World position of cell (0,0). Metadata only.
    origin: Point2D,
    data: Vec<i8>,
}

/// Wire form of [`OccupancyGrid`], checked before it becomes one.
#[derive(Deserialize)]
struct GridFields {
    width: usize,
    height: usize,
    #[serde(default = "unit_resolution")]
    resolution: f64,
    #[serde(default)]
    origin: Point2D,
    data: Vec<i8>,
}

fn unit_resolution() -> f64 {
    1.0
}

impl TryFrom<GridFields> for OccupancyGrid {
    type Error = MergeError;

    fn try_from(fields: GridFields) -> Result<Self> {
        Ok(Self::new(fields.width, fields.height, fields.data)?
            .with_geometry(fields.resolution, fields.origin))
    }
}

impl OccupancyGrid {
    /// Create a grid from row-major cell data.
    ///
    /// Fails with [`MergeError::InvalidInput`] when `data.len()` does not
    /// equal `width * height`.
    pub fn new(width: usize, height: usize, data: Vec<i8>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            MergeError::InvalidInput(format!("grid size {}x{} overflows", width, height))
        })?;
        if data.len() != expected {
            return Err(MergeError::InvalidInput(format!(
                "grid data has {} cells, expected {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            resolution: 1.0,
            origin: Point2D::ZERO,
            data,
        })
    }

    /// Create a grid with every cell set to `value`.
    ///
    /// Fails with [`MergeError::InvalidInput`] when `width * height`
    /// overflows.
    pub fn filled(width: usize, height: usize, value: i8) -> Result<Self> {
        let len = width.checked_mul(height).ok_or_else(|| {
            MergeError::InvalidInput(format!("grid size {}x{} overflows", width, height))
        })?;
        Self::new(width, height, vec![value; len])
    }

    /// Builder-style setter for resolution and origin metadata.
    pub fn with_geometry(mut self, resolution: f64, origin: Point2D) -> Self {
        self.resolution = resolution;
        self.origin = origin;
        self
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Meters per cell.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// World position of cell (0,0).
    #[inline]
    pub fn origin(&self) -> Point2D {
        self.origin
    }

    /// Raw row-major cell data.
    #[inline]
    pub fn data(&self) -> &[i8] {
        &self.data
    }

    /// True if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Cell value, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<i8> {
        if x < self.width && y < self.height {
            Some(self.data[x + y * self.width])
        } else {
            None
        }
    }

    /// Set a cell value. Returns false when out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: i8) -> bool {
        if x < self.width && y < self.height {
            self.data[x + y * self.width] = value;
            true
        } else {
            false
        }
    }

    /// Number of cells at or above `threshold`.
    pub fn count_occupied(&self, threshold: i8) -> usize {
        self.data.iter().filter(|&&v| v >= threshold).count()
    }

    /// Grid indices of every cell whose value is at or above `threshold`.
    ///
    /// Rows are scanned outermost, so points come out ordered by `y`, then
    /// `x`. A zero-dimension grid yields an empty set.
    pub fn occupied_points(&self, threshold: i8) -> Vec<Point2D> {
        let mut points = Vec::with_capacity(self.count_occupied(threshold));
        for (y, row) in self.data.chunks(self.width.max(1)).enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value >= threshold {
                    points.push(Point2D::new(x as f64, y as f64));
                }
            }
        }
        points
    }
}

/// Extract occupied cell coordinates with the default threshold (50).
///
/// # Example
/// ```
/// use vastu_merge::grid::{OccupancyGrid, extract_points};
///
/// let grid = OccupancyGrid::new(3, 2, vec![0, 100, -1, 49, 50, 0]).unwrap();
/// let points = extract_points(&grid);
/// assert_eq!(points.len(), 2);
/// assert_eq!((points[0].x, points[0].y), (1.0, 0.0));
/// assert_eq!((points[1].x, points[1].y), (1.0, 1.0));
/// ```
pub fn extract_points(grid: &OccupancyGrid) -> Vec<Point2D> {
    grid.occupied_points(DEFAULT_OCCUPIED_THRESHOLD)
}

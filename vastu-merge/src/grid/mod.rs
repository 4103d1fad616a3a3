//! Occupancy grid input and point-set extraction.
//!
//! Each agent publishes its map as a row-major occupancy grid. Registration
//! does not look at free or unknown space: a map is reduced to the grid
//! indices of its occupied cells, and those point sets are aligned.
//!
//! ```text
//!   value:  -1 unknown │ 0..49 free │ 50..100 occupied
//!                                        │
//!                                        ▼
//!                               Point2D(x, y) per cell
//! ```
//!
//! ## Example
//!
//! ```
//! use vastu_merge::grid::{OccupancyGrid, OCCUPIED, extract_points};
//!
//! let mut grid = OccupancyGrid::filled(10, 10, 0).unwrap();
//! grid.set(3, 4, OCCUPIED);
//! let points = extract_points(&grid);
//! assert_eq!(points.len(), 1);
//! ```

mod occupancy;

pub use occupancy::{
    DEFAULT_OCCUPIED_THRESHOLD, FREE, OCCUPIED, OccupancyGrid, UNKNOWN, extract_points,
};

//! Test utilities for map registration.
//!
//! This module provides point-set shapes and synthetic occupancy grids.

#![allow(dead_code)]

use vastu_merge::grid::{FREE, OCCUPIED};
use vastu_merge::{OccupancyGrid, Point2D, RigidTransform};

/// Room width in cells for [`room_grid`].
pub const ROOM_WIDTH: usize = 24;

/// Room height in cells for [`room_grid`].
pub const ROOM_HEIGHT: usize = 16;

/// Asymmetric L-shaped point set (14 points).
///
/// Long arm along +x, short arm along +y, plus two off-axis points so no
/// rotation maps the shape onto itself.
pub fn l_shape() -> Vec<Point2D> {
    let mut points: Vec<Point2D> = (0..8).map(|x| Point2D::new(x as f64, 0.0)).collect();
    points.extend((1..5).map(|y| Point2D::new(0.0, y as f64)));
    points.push(Point2D::new(7.0, 1.0));
    points.push(Point2D::new(3.0, 2.0));
    points
}

/// Unit square corners, counter-clockwise from the origin.
pub fn unit_square() -> Vec<Point2D> {
    vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 0.0),
        Point2D::new(1.0, 1.0),
        Point2D::new(0.0, 1.0),
    ]
}

/// Room with walls, an interior wall stub and a pillar.
pub fn room_grid() -> OccupancyGrid {
    let mut grid = OccupancyGrid::filled(ROOM_WIDTH, ROOM_HEIGHT, FREE).unwrap();

    for x in 2..22 {
        grid.set(x, 2, OCCUPIED);
        grid.set(x, 13, OCCUPIED);
    }
    for y in 2..14 {
        grid.set(2, y, OCCUPIED);
        grid.set(21, y, OCCUPIED);
    }
    // Interior wall stub
    for x in 6..11 {
        grid.set(x, 8, OCCUPIED);
    }
    // Pillar
    grid.set(17, 5, OCCUPIED);
    grid.set(17, 6, OCCUPIED);

    grid
}

/// Grid rotated 90° CCW: cell (x, y) moves to (height - 1 - y, x).
///
/// In point terms the result is `R(90°)·p + (height - 1, 0)`.
pub fn rotate_grid_ccw(grid: &OccupancyGrid) -> OccupancyGrid {
    let (w, h) = (grid.width(), grid.height());
    let mut rotated = OccupancyGrid::filled(h, w, FREE).unwrap();
    for y in 0..h {
        for x in 0..w {
            if let Some(value) = grid.get(x, y) {
                rotated.set(h - 1 - y, x, value);
            }
        }
    }
    rotated
}

/// Apply `transform` to every point.
pub fn transform_points(points: &[Point2D], transform: &RigidTransform) -> Vec<Point2D> {
    transform.apply_all(points)
}

/// Transform from rotation in degrees and translation.
pub fn transform_deg(degrees: f64, tx: f64, ty: f64) -> RigidTransform {
    RigidTransform::new(degrees.to_radians(), Point2D::new(tx, ty))
}

/// Largest distance between `transform(moving[i])` and its nearest fixed point.
pub fn max_residual(fixed: &[Point2D], moving: &[Point2D], transform: &RigidTransform) -> f64 {
    moving
        .iter()
        .map(|p| {
            let q = transform.apply(*p);
            fixed
                .iter()
                .map(|f| f.distance(&q))
                .fold(f64::INFINITY, f64::min)
        })
        .fold(0.0, f64::max)
}

//! Map storage in ROS map_server format (PGM image + YAML metadata).
//!
//! Files:
//! - `{name}.yaml` - metadata (image path, resolution, origin, thresholds)
//! - `{name}.pgm` - grayscale image, first row is the top of the map
//!
//! Images are decoded with the `image` crate and normalized to 8-bit luma.
//! Pixel to occupancy follows map_server's trinary mode: with
//! `p = (255 - v) / 255` (or `v / 255` when negated), `p` above
//! `occupied_thresh` is occupied (100), below `free_thresh` is free (0) and
//! anything between is unknown (-1).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::core::Point2D;
use crate::error::{MergeError, Result};
use crate::grid::{FREE, OCCUPIED, OccupancyGrid, UNKNOWN};

/// Pixel written for free cells.
const PIXEL_FREE: u8 = 255;
/// Pixel written for occupied cells.
const PIXEL_OCCUPIED: u8 = 0;
/// Pixel written for unknown cells.
const PIXEL_UNKNOWN: u8 = 205;

fn default_occupied_thresh() -> f64 {
    0.65
}

fn default_free_thresh() -> f64 {
    0.196
}

/// Map metadata in ROS-standard YAML format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    /// PGM image filename (relative to the YAML file).
    pub image: String,

    /// Map resolution in meters per pixel.
    pub resolution: f64,

    /// Origin of map [x, y, yaw] - world coordinates of bottom-left pixel.
    pub origin: [f64; 3],

    /// Occupancy probability above which a pixel is occupied.
    #[serde(default = "default_occupied_thresh")]
    pub occupied_thresh: f64,

    /// Occupancy probability below which a pixel is free.
    #[serde(default = "default_free_thresh")]
    pub free_thresh: f64,

    /// 1 if white means occupied.
    #[serde(default)]
    pub negate: i32,
}

impl MapMetadata {
    /// Metadata for `grid` stored next to the YAML file as `image`.
    pub fn for_grid(grid: &OccupancyGrid, image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            resolution: grid.resolution(),
            origin: [grid.origin().x, grid.origin().y, 0.0],
            occupied_thresh: default_occupied_thresh(),
            free_thresh: default_free_thresh(),
            negate: 0,
        }
    }

    /// Classify one 8-bit luma pixel.
    #[inline]
    pub fn pixel_to_cell(&self, value: u8) -> i8 {
        let max = u8::MAX as f64;
        let v = value as f64;
        let p = if self.negate != 0 {
            v / max
        } else {
            (max - v) / max
        };

        if p > self.occupied_thresh {
            OCCUPIED
        } else if p < self.free_thresh {
            FREE
        } else {
            UNKNOWN
        }
    }
}

/// Decode an in-memory PNM (PGM) image to 8-bit grayscale.
pub fn read_pgm(bytes: &[u8]) -> Result<GrayImage> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Pnm)?.into_luma8())
}

/// Convert an image to an occupancy grid, flipping rows so grid row 0 is
/// the bottom of the map.
pub fn image_to_grid(image: &GrayImage, metadata: &MapMetadata) -> Result<OccupancyGrid> {
    let (width, height) = image.dimensions();
    let (width, height) = (width as usize, height as usize);

    let pixels = width
        .checked_mul(height)
        .and_then(|len| image.as_raw().get(..len))
        .ok_or_else(|| {
            MergeError::InvalidInput(format!(
                "image buffer of {} bytes does not cover {}x{} pixels",
                image.as_raw().len(),
                width,
                height
            ))
        })?;

    let mut data = Vec::with_capacity(pixels.len());
    for row in pixels.chunks(width.max(1)).rev() {
        data.extend(row.iter().map(|&v| metadata.pixel_to_cell(v)));
    }

    Ok(OccupancyGrid::new(width, height, data)?.with_geometry(
        metadata.resolution,
        Point2D::new(metadata.origin[0], metadata.origin[1]),
    ))
}

/// Load a map image file as an occupancy grid.
pub fn load_pgm(path: &Path, metadata: &MapMetadata) -> Result<OccupancyGrid> {
    let image = image::open(path)
        .map_err(|e| match e {
            image::ImageError::IoError(io) => MergeError::Io(io),
            other => MergeError::Parse(format!(
                "Failed to load map image {}: {}",
                path.display(),
                other
            )),
        })?
        .into_luma8();
    image_to_grid(&image, metadata)
}

/// Write a grid as a binary PGM (free white, occupied black, unknown gray).
pub fn write_pgm(grid: &OccupancyGrid, path: &Path) -> Result<()> {
    let width = grid.width();
    let height = grid.height();

    let mut pixels = Vec::with_capacity(width * height);
    for row in grid.data().chunks(width.max(1)).rev() {
        pixels.extend(row.iter().map(|&v| match v {
            0..=49 => PIXEL_FREE,
            50..=100 => PIXEL_OCCUPIED,
            _ => PIXEL_UNKNOWN,
        }));
    }

    let mut file = fs::File::create(path)?;
    writeln!(file, "P5")?;
    writeln!(file, "{} {}", width, height)?;
    writeln!(file, "255")?;
    file.write_all(&pixels)?;
    Ok(())
}

/// Read the YAML metadata of a ROS map.
pub fn load_metadata(yaml_path: &Path) -> Result<MapMetadata> {
    let contents = fs::read_to_string(yaml_path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

fn image_path(yaml_path: &Path, metadata: &MapMetadata) -> PathBuf {
    let image = Path::new(&metadata.image);
    if image.is_absolute() {
        image.to_path_buf()
    } else {
        yaml_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(image)
    }
}

/// Load a ROS map given the path of its YAML file.
pub fn load_ros_map(yaml_path: &Path) -> Result<OccupancyGrid> {
    let metadata = load_metadata(yaml_path)?;
    let pgm_path = image_path(yaml_path, &metadata);
    let grid = load_pgm(&pgm_path, &metadata)?;

    log::info!(
        "Loaded map {} ({}x{}, {:.3} m/cell)",
        yaml_path.display(),
        grid.width(),
        grid.height(),
        grid.resolution()
    );
    Ok(grid)
}

/// Save a grid as `{stem}.pgm` + `{stem}.yaml` next to `yaml_path`.
pub fn save_ros_map(grid: &OccupancyGrid, yaml_path: &Path) -> Result<()> {
    let image = yaml_path
        .with_extension("pgm")
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            MergeError::InvalidInput(format!("invalid map path {}", yaml_path.display()))
        })?;

    let metadata = MapMetadata::for_grid(grid, image);
    write_pgm(grid, &image_path(yaml_path, &metadata))?;
    fs::write(yaml_path, serde_yaml::to_string(&metadata)?)?;

    log::info!("Saved map {}", yaml_path.display());
    Ok(())
}

//! Map persistence.
//!
//! Agents hand their maps around as ROS map_server files, so that is the
//! one on-disk format supported here.
//!
//! ## Loading Maps
//!
//! ```rust,ignore
//! use vastu_merge::io::load_ros_map;
//! use std::path::Path;
//!
//! // Reads agent_a.yaml and the image it names
//! let grid = load_ros_map(Path::new("maps/agent_a.yaml"))?;
//! ```
//!
//! ## Saving Maps
//!
//! ```rust,ignore
//! use vastu_merge::io::save_ros_map;
//!
//! // Creates merged.pgm and merged.yaml
//! save_ros_map(&grid, Path::new("maps/merged.yaml"))?;
//! ```

mod ros_map;

pub use ros_map::{
    MapMetadata, image_to_grid, load_metadata, load_pgm, load_ros_map, read_pgm,
    save_ros_map, write_pgm,
};

//! Unified configuration loading for map merging.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_merge::config::MergeConfig;
//!
//! // Load from default path (configs/merge.yaml)
//! let config = MergeConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = MergeConfig::default();
//!
//! let engine = MultiStartIcp::new(config.registration_config());
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`RegistrationConfig`](crate::matching::RegistrationConfig) | Subsampling, epochs, start rotations, ICP limits |
//! | [`ExtractionSection`] | Occupancy threshold for point extraction |
//!
//! ## Example YAML
//!
//! ```yaml
//! registration:
//!   ransac_fraction: 0.9         # keep 90% of points per epoch
//!   repetitions: 5               # resampling epochs
//!   starting_positions_amnt: 8   # start every 45 degrees
//!   max_iterations: 500
//!   convergence_threshold: 0.0001
//!
//! extraction:
//!   occupied_threshold: 50
//! ```

mod defaults;
mod error;
mod merge;

pub use error::ConfigLoadError;
pub use merge::{ExtractionSection, MergeConfig};

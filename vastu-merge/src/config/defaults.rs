//! Default value functions for serde deserialization.

use crate::grid::DEFAULT_OCCUPIED_THRESHOLD;

pub fn occupied_threshold() -> i8 {
    DEFAULT_OCCUPIED_THRESHOLD
}

pub fn config_path() -> &'static str {
    "configs/merge.yaml"
}

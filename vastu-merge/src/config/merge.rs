//! Main MergeConfig and loading methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::matching::RegistrationConfig;

use super::defaults;
use super::error::ConfigLoadError;

/// Point-set extraction settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSection {
    /// Cells at or above this value count as occupied.
    #[serde(default = "defaults::occupied_threshold")]
    pub occupied_threshold: i8,
}

impl Default for ExtractionSection {
    fn default() -> Self {
        Self {
            occupied_threshold: defaults::occupied_threshold(),
        }
    }
}

/// Full map-merging configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct MergeConfig {
    /// Registration search settings
    #[serde(default)]
    pub registration: RegistrationConfig,

    /// Point-set extraction settings
    #[serde(default)]
    pub extraction: ExtractionSection,
}

impl MergeConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/merge.yaml), falling back to
    /// built-in defaults when the file is absent
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(defaults::config_path());
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{} not found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Check the registration section's ranges
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.registration
            .validate()
            .map_err(|e| ConfigLoadError::Invalid(e.to_string()))
    }

    /// Get the registration config
    pub fn registration_config(&self) -> RegistrationConfig {
        self.registration.clone()
    }

    /// Get the occupancy threshold for point extraction
    pub fn occupied_threshold(&self) -> i8 {
        self.extraction.occupied_threshold
    }
}

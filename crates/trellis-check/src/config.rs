//! Engine options and their TOML loading

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use trellis_core::{Result, TrellisError};

/// Options recognized by [`crate::ErrorDetectionEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Gates whether `auto_fix_errors` changes anything
    pub enable_auto_fix: bool,
    /// Reserved. Validated to `0..=1` but not consulted by any detector.
    pub detection_threshold: f64,
    /// Gates `detect_silent_failures`
    pub report_silent_failures: bool,
    /// Gates the security scanner
    pub security_scan_enabled: bool,
    /// Alignment grid unit in pixels
    pub grid_size: f64,
    /// Emit the soft near-alignment warning
    pub near_alignment_warnings: bool,
    /// Pixel window for near-alignment
    pub near_alignment_tolerance: f64,
    /// Replacement `src` for images with an unusable URL
    pub image_placeholder: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            enable_auto_fix: true,
            detection_threshold: 0.7,
            report_silent_failures: true,
            security_scan_enabled: true,
            grid_size: 8.0,
            near_alignment_warnings: false,
            near_alignment_tolerance: 5.0,
            image_placeholder: "/placeholder.svg".to_string(),
        }
    }
}

impl EngineOptions {
    /// Load options from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load options from a TOML string. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: EngineOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.detection_threshold) {
            return Err(TrellisError::InvalidConfig(format!(
                "detection_threshold must be between 0 and 1, got {}",
                self.detection_threshold
            )));
        }
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(TrellisError::InvalidConfig(format!(
                "grid_size must be a positive number, got {}",
                self.grid_size
            )));
        }
        if !self.near_alignment_tolerance.is_finite() || self.near_alignment_tolerance < 0.0 {
            return Err(TrellisError::InvalidConfig(format!(
                "near_alignment_tolerance must be non-negative, got {}",
                self.near_alignment_tolerance
            )));
        }
        if !self.image_placeholder.starts_with('/')
            && !crate::property::is_absolute_url(&self.image_placeholder)
        {
            return Err(TrellisError::InvalidConfig(format!(
                "image_placeholder must be an absolute URL or start with '/', got '{}'",
                self.image_placeholder
            )));
        }
        Ok(())
    }
}

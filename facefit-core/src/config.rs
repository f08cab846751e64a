//! Tunable settings for placement and export

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Glasses placement constants.
///
/// The defaults were tuned by hand against a single device and have no
/// documented calibration; treat them as starting points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum nose depth proxy (mesh units) before the glasses are placed
    pub depth_threshold: f32,
    /// Vertical offset from the nose bridge to the glasses' origin
    pub vertical_offset: f32,
    /// Model scale while the glasses are shown fitted on the face
    pub fitted_model_scale: f32,
    /// Model scale while the debug overlay is on
    pub debug_model_scale: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            depth_threshold: 0.05,
            vertical_offset: -0.031,
            fitted_model_scale: 1.05,
            debug_model_scale: 1.0,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.depth_threshold.is_finite() || self.depth_threshold < 0.0 {
            return Err(Error::Config(format!(
                "depth_threshold must be a non-negative number, got {}",
                self.depth_threshold
            )));
        }
        if !self.vertical_offset.is_finite() {
            return Err(Error::Config("vertical_offset must be finite".to_string()));
        }
        for (name, scale) in [
            ("fitted_model_scale", self.fitted_model_scale),
            ("debug_model_scale", self.debug_model_scale),
        ] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(Error::Config(format!("{} must be positive, got {}", name, scale)));
            }
        }
        Ok(())
    }
}

/// Where captures are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub documents_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("Documents"),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacefitConfig {
    pub placement: PlacementConfig,
    pub export: ExportConfig,
}

impl FacefitConfig {
    pub fn validate(&self) -> Result<()> {
        self.placement.validate()
    }
}

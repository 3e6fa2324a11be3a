//! Render settings.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::integrator::PathConfig;
use crate::sampler::SampleType;
use crate::{RenderError, RenderResult};

/// Everything needed to render an image of a scene.
///
/// Missing JSON fields take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel added by each progressive step
    pub samples_per_pass: u32,
    /// Samples per pixel after which rendering stops
    pub total_samples: u32,
    pub sample_type: SampleType,
    /// Keys the per-pixel random streams
    pub seed: u32,
    /// Keys the id visualization colors
    pub color_seed: u32,
    pub bucket_size: u32,
    pub path: PathConfig,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            samples_per_pass: 1,
            total_samples: 1000,
            sample_type: SampleType::Color,
            seed: 1,
            color_seed: 1,
            bucket_size: DEFAULT_BUCKET_SIZE,
            path: PathConfig::default(),
        }
    }
}

impl RenderSettings {
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let settings: Self = serde_json::from_reader(reader)?;
        settings.validate()?;
        log::debug!("Loaded render settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn validate(&self) -> RenderResult<()> {
        let invalid = |msg: &str| Err(RenderError::InvalidSettings(msg.to_string()));

        if self.width == 0 || self.height == 0 {
            return invalid("resolution must be non-zero");
        }
        if self.width.checked_mul(self.height).is_none() {
            return invalid("resolution overflows the pixel index range");
        }
        if self.samples_per_pass == 0 {
            return invalid("samples_per_pass must be non-zero");
        }
        if self.total_samples == 0 {
            return invalid("total_samples must be non-zero");
        }
        if self.bucket_size == 0 {
            return invalid("bucket_size must be non-zero");
        }
        if self.path.max_depth == 0 {
            return invalid("path.max_depth must be non-zero");
        }
        Ok(())
    }
}

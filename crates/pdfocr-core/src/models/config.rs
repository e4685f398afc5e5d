//! Configuration structures for the preview widget.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::options::PreprocessingOptions;
use crate::error::ConfigError;

/// Main configuration for the preview widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Page rendering configuration.
    pub render: RenderConfig,

    /// Upload validation configuration.
    pub upload: UploadConfig,

    /// Code sample configuration.
    pub code_sample: CodeSampleConfig,

    /// Options selected when the widget is created.
    pub default_options: PreprocessingOptions,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            upload: UploadConfig::default(),
            code_sample: CodeSampleConfig::default(),
            default_options: PreprocessingOptions::default(),
        }
    }
}

/// Page rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Scale applied to the page size (in points) when rasterizing.
    pub scale: f32,

    /// Largest canvas side in pixels.
    pub max_dimension: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.5,
            max_dimension: 8192,
        }
    }
}

/// Upload validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Content types accepted by the file picker.
    pub accepted_content_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accepted_content_types: vec!["application/pdf".to_string()],
        }
    }
}

/// Code sample configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeSampleConfig {
    /// How long the "Copied!" confirmation stays visible, in milliseconds.
    pub copy_feedback_ms: u64,
}

impl Default for CodeSampleConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: 2000,
        }
    }
}

impl CodeSampleConfig {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

impl PreviewConfig {
    /// Parse configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check values serde cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.render.scale.is_finite() && self.render.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "render.scale must be positive, got {}",
                self.render.scale
            )));
        }
        if self.render.max_dimension == 0 {
            return Err(ConfigError::Invalid(
                "render.max_dimension must be non-zero".to_string(),
            ));
        }
        if self.upload.accepted_content_types.is_empty() {
            return Err(ConfigError::Invalid(
                "upload.accepted_content_types must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a file with this content type may be decoded.
    pub fn accepts(&self, content_type: &str) -> bool {
        self.upload
            .accepted_content_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(content_type.trim()))
    }
}

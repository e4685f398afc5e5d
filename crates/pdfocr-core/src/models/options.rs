//! Preprocessing options chosen on the page and the configuration sample
//! generated from them.

use serde::{Deserialize, Serialize};

use crate::error::OptionError;

/// Denoising method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denoise {
    /// Non-local means denoising.
    Fast,
    /// Median blur, for salt-and-pepper noise.
    Median,
    None,
}

/// Contrast adjustment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    /// Contrast Limited Adaptive Histogram Equalization.
    Clahe,
    None,
}

/// Binarization method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    Adaptive,
    None,
}

impl Denoise {
    pub const ALL: [Denoise; 3] = [Denoise::Fast, Denoise::Median, Denoise::None];

    /// Value used by the select control and the configuration sample.
    pub fn as_str(&self) -> &'static str {
        match self {
            Denoise::Fast => "fast",
            Denoise::Median => "median",
            Denoise::None => "none",
        }
    }

    /// Label shown in the select control.
    pub fn label(&self) -> &'static str {
        match self {
            Denoise::Fast => "Fast NL Means",
            Denoise::Median => "Median Blur",
            Denoise::None => "None",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s.trim())
    }

    fn sample_value(&self) -> Option<&'static str> {
        match self {
            Denoise::None => None,
            other => Some(other.as_str()),
        }
    }
}

impl Contrast {
    pub const ALL: [Contrast; 2] = [Contrast::Clahe, Contrast::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Contrast::Clahe => "clahe",
            Contrast::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Contrast::Clahe => "CLAHE",
            Contrast::None => "None",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s.trim())
    }

    fn sample_value(&self) -> Option<&'static str> {
        match self {
            Contrast::Clahe => Some("clahe"),
            Contrast::None => None,
        }
    }
}

impl Threshold {
    pub const ALL: [Threshold; 2] = [Threshold::Adaptive, Threshold::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Threshold::Adaptive => "adaptive",
            Threshold::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Threshold::Adaptive => "Adaptive",
            Threshold::None => "None",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s.trim())
    }

    fn sample_value(&self) -> Option<&'static str> {
        match self {
            Threshold::Adaptive => Some("adaptive"),
            Threshold::None => None,
        }
    }
}

/// The five preprocessing steps a visitor can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingOptions {
    /// Correct tilted pages.
    pub deskew: bool,

    /// Denoising method.
    pub denoise: Denoise,

    /// Contrast adjustment.
    pub contrast: Contrast,

    /// Sharpen edges with a kernel filter.
    pub sharpen: bool,

    /// Binarization.
    pub threshold: Threshold,
}

impl Default for PreprocessingOptions {
    fn default() -> Self {
        Self {
            deskew: true,
            denoise: Denoise::Fast,
            contrast: Contrast::Clahe,
            sharpen: true,
            threshold: Threshold::Adaptive,
        }
    }
}

/// Key of a single preprocessing option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    Deskew,
    Denoise,
    Contrast,
    Sharpen,
    Threshold,
}

impl OptionKey {
    /// Keys in configuration sample order.
    pub const ALL: [OptionKey; 5] = [
        OptionKey::Deskew,
        OptionKey::Denoise,
        OptionKey::Contrast,
        OptionKey::Sharpen,
        OptionKey::Threshold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::Deskew => "deskew",
            OptionKey::Denoise => "denoise",
            OptionKey::Contrast => "contrast",
            OptionKey::Sharpen => "sharpen",
            OptionKey::Threshold => "threshold",
        }
    }

    /// Label of the control for this option.
    pub fn label(&self) -> &'static str {
        match self {
            OptionKey::Deskew => "Deskew Image",
            OptionKey::Denoise => "Denoise Method",
            OptionKey::Contrast => "Contrast Adjustment",
            OptionKey::Sharpen => "Sharpen Image",
            OptionKey::Threshold => "Thresholding",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s.trim())
    }
}

/// A single option change, typed so the value always lies in the key's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionUpdate {
    Deskew(bool),
    Denoise(Denoise),
    Contrast(Contrast),
    Sharpen(bool),
    Threshold(Threshold),
}

impl OptionUpdate {
    /// Map a control's key and raw value onto a typed update.
    ///
    /// Checkboxes send `true`/`false`, selects send the option value
    /// (`fast`, `median`, `clahe`, `adaptive` or `none`).
    pub fn parse(key: &str, value: &str) -> Result<Self, OptionError> {
        let key_kind =
            OptionKey::from_str(key).ok_or_else(|| OptionError::UnknownKey(key.to_string()))?;
        let invalid = || OptionError::InvalidValue {
            key: key_kind.as_str().to_string(),
            value: value.to_string(),
        };

        let update = match key_kind {
            OptionKey::Deskew => OptionUpdate::Deskew(parse_bool(value).ok_or_else(invalid)?),
            OptionKey::Sharpen => OptionUpdate::Sharpen(parse_bool(value).ok_or_else(invalid)?),
            OptionKey::Denoise => {
                OptionUpdate::Denoise(Denoise::from_str(value).ok_or_else(invalid)?)
            }
            OptionKey::Contrast => {
                OptionUpdate::Contrast(Contrast::from_str(value).ok_or_else(invalid)?)
            }
            OptionKey::Threshold => {
                OptionUpdate::Threshold(Threshold::from_str(value).ok_or_else(invalid)?)
            }
        };

        Ok(update)
    }

    pub fn key(&self) -> OptionKey {
        match self {
            OptionUpdate::Deskew(_) => OptionKey::Deskew,
            OptionUpdate::Denoise(_) => OptionKey::Denoise,
            OptionUpdate::Contrast(_) => OptionKey::Contrast,
            OptionUpdate::Sharpen(_) => OptionKey::Sharpen,
            OptionUpdate::Threshold(_) => OptionKey::Threshold,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl PreprocessingOptions {
    /// Return a copy with one option replaced.
    pub fn with(self, update: OptionUpdate) -> Self {
        match update {
            OptionUpdate::Deskew(deskew) => Self { deskew, ..self },
            OptionUpdate::Denoise(denoise) => Self { denoise, ..self },
            OptionUpdate::Contrast(contrast) => Self { contrast, ..self },
            OptionUpdate::Sharpen(sharpen) => Self { sharpen, ..self },
            OptionUpdate::Threshold(threshold) => Self { threshold, ..self },
        }
    }

    /// Python dictionary that `preprocess_image` accepts for these options.
    ///
    /// Booleans are written as `true`/`false`, chosen methods are quoted and
    /// disabled methods become `None`.
    pub fn config_sample(&self) -> String {
        let quoted = |value: Option<&str>| match value {
            Some(v) => format!("'{}'", v),
            None => "None".to_string(),
        };

        let mut sample = String::new();
        sample.push_str("# This Python dictionary is generated based on your selections.\n");
        sample.push_str("# It can be passed directly to the preprocess_image function.\n");
        sample.push_str("custom_options = {\n");
        sample.push_str(&format!("    'deskew': {},\n", self.deskew));
        sample.push_str(&format!("    'denoise': {},\n", quoted(self.denoise.sample_value())));
        sample.push_str(&format!("    'contrast': {},\n", quoted(self.contrast.sample_value())));
        sample.push_str(&format!("    'sharpen': {},\n", self.sharpen));
        sample.push_str(&format!("    'threshold': {},\n", quoted(self.threshold.sample_value())));
        sample.push('}');
        sample
    }
}

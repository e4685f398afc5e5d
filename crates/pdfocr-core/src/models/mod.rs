//! Data models for the preview widget.

pub mod config;
pub mod extraction;
pub mod options;

pub use config::PreviewConfig;
pub use extraction::{ExtractedLine, SimulatedExtraction};
pub use options::{Contrast, Denoise, OptionKey, OptionUpdate, PreprocessingOptions, Threshold};

//! Core library for the offline PDF-to-CSV OCR guide.
//!
//! This crate provides:
//! - Preprocessing options and the Python configuration sample built from them
//! - PDF decoding and page rasterization (lopdf)
//! - The interactive preview widget: upload, render, paginate
//! - Simulated OCR output and copyable code samples

pub mod code_sample;
pub mod error;
pub mod models;
pub mod pdf;
pub mod preview;

pub use code_sample::{Clipboard, CodeSample, Language};
pub use error::{ConfigError, DecodeError, OptionError, PreviewError, RenderError, Result};
pub use models::{
    Contrast, Denoise, OptionKey, OptionUpdate, PreprocessingOptions, PreviewConfig,
    SimulatedExtraction, Threshold,
};
pub use pdf::{Bitmap, DocumentDecoder, LoadedPdf, LopdfDecoder};
pub use preview::{
    Completion, Direction, Phase, PreviewView, PreviewWidget, RenderTicket, UploadedFile,
};

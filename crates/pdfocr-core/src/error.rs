//! Error types for the pdfocr-core library.

use thiserror::Error;

/// Error surfaced by the preview widget.
///
/// Every variant is recoverable: the widget records the matching
/// [`user_message`](PreviewError::user_message) and stays interactive.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// The chosen file is not a PDF.
    #[error("unsupported content type: {content_type}")]
    Validation { content_type: String },

    /// The file could not be decoded as a document.
    #[error("failed to decode document: {0}")]
    Decode(#[from] DecodeError),

    /// A page of an already decoded document could not be rasterized.
    #[error("failed to render page {page}: {source}")]
    Render {
        page: u32,
        #[source]
        source: RenderError,
    },
}

impl PreviewError {
    /// Message shown to the visitor for this error.
    pub fn user_message(&self) -> String {
        match self {
            PreviewError::Validation { .. } => "Please upload a valid PDF file.".to_string(),
            PreviewError::Decode(_) => {
                "Failed to process the PDF. It might be corrupted or protected.".to_string()
            }
            PreviewError::Render { page, .. } => {
                format!("Failed to render page {}. The PDF might be corrupted.", page)
            }
        }
    }
}

/// Errors raised while decoding a PDF payload.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Failed to parse the PDF structure.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and the empty password did not open it.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while rasterizing a single page.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The page does not exist in the document.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// The page could not be turned into a canvas.
    #[error("cannot allocate canvas: {0}")]
    Canvas(String),
}

/// Errors raised while mapping the page controls onto typed options.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OptionError {
    /// No preprocessing option has this key.
    #[error("unknown option: {0}")]
    UnknownKey(String),

    /// The value is outside the option's domain.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Errors raised while loading widget configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration document.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("configuration error: {0}")]
    Invalid(String),
}

/// Result type for widget operations.
pub type Result<T> = std::result::Result<T, PreviewError>;

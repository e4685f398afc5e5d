//! State slices owned by the preview widget.
//!
//! Each slice is replaced as a whole value on every transition, so a page
//! image is never observed next to the extraction of another page.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::extraction::SimulatedExtraction;
use crate::pdf::Bitmap;

/// Lifecycle phase of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing loaded yet, or the last upload was reset.
    Empty,
    /// A decode or render is outstanding.
    Loading,
    /// A page is rendered.
    Ready,
    /// The last attempt failed.
    Error,
}

/// The rendered page and the output shown next to it.
#[derive(Debug, Clone)]
pub struct PageView {
    current_page: u32,
    image: Option<Arc<Bitmap>>,
    extraction: Option<SimulatedExtraction>,
}

impl PageView {
    pub(crate) fn empty() -> Self {
        Self {
            current_page: 1,
            image: None,
            extraction: None,
        }
    }

    pub(crate) fn rendered(page: u32, image: Bitmap) -> Self {
        Self {
            current_page: page,
            image: Some(Arc::new(image)),
            extraction: Some(SimulatedExtraction::for_page(page)),
        }
    }

    /// Keeps the confirmed page number but drops what was shown for it.
    pub(crate) fn failed(current_page: u32) -> Self {
        Self {
            current_page,
            image: None,
            extraction: None,
        }
    }

    /// Last successfully rendered page (1-indexed).
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_deref()
    }

    pub fn extraction(&self) -> Option<&SimulatedExtraction> {
        self.extraction.as_ref()
    }
}

/// File name, loading flag and error message of the current upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStatus {
    pub file_name: Option<String>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl UploadStatus {
    pub(crate) fn loading(file_name: Option<String>) -> Self {
        Self {
            file_name,
            is_loading: true,
            error_message: None,
        }
    }

    pub(crate) fn failed(file_name: Option<String>, message: String) -> Self {
        Self {
            file_name,
            is_loading: false,
            error_message: Some(message),
        }
    }

    pub(crate) fn settled(file_name: Option<String>) -> Self {
        Self {
            file_name,
            is_loading: false,
            error_message: None,
        }
    }
}

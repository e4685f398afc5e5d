//! PDF decoding and page rasterization.

mod decoder;

pub use decoder::{LopdfDecoder, LoadedPdf};

use crate::error::{DecodeError, RenderError};

/// Rasterized page.
pub type Bitmap = image::RgbaImage;

/// Trait for document decoders used by the preview widget.
///
/// The widget owns the decoded document; the decoder only knows how to
/// produce one and how to rasterize its pages.
pub trait DocumentDecoder {
    /// Decoded document handle.
    type Document;

    /// Decode a PDF from bytes.
    fn load(&self, data: &[u8]) -> Result<Self::Document, DecodeError>;

    /// Get the number of pages in a decoded document.
    fn page_count(&self, document: &Self::Document) -> u32;

    /// Rasterize a page (1-indexed) at the given scale.
    fn rasterize(&self, document: &Self::Document, page: u32, scale: f32)
        -> Result<Bitmap, RenderError>;
}

//! Request tickets for decode and render operations.
//!
//! Every operation the widget starts is stamped with the next generation.
//! Only a completion carrying the latest generation is applied; anything
//! older has been superseded and is dropped.

use std::sync::Arc;

use crate::error::RenderError;
use crate::pdf::{Bitmap, DocumentDecoder};

/// Pending decode of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) generation: u64,
}

/// Pending rasterization of one page.
///
/// Holds its own handle to the document so the rasterization can run
/// outside the widget, e.g. on a worker or inside a future.
#[derive(Debug)]
pub struct RenderTicket<Doc> {
    pub(crate) generation: u64,
    pub(crate) page: u32,
    pub(crate) scale: f32,
    pub(crate) document: Arc<Doc>,
}

impl<Doc> RenderTicket<Doc> {
    /// Requested page (1-indexed).
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Run the rasterization this ticket asks for.
    pub fn rasterize<D>(&self, decoder: &D) -> Result<Bitmap, RenderError>
    where
        D: DocumentDecoder<Document = Doc>,
    {
        decoder.rasterize(&self.document, self.page, self.scale)
    }
}

/// Outcome of completing a ticket.
#[derive(Debug, PartialEq, Eq)]
pub enum Completion<T> {
    /// The result was installed.
    Applied(T),
    /// A newer operation was started; the result was discarded.
    Superseded,
}

impl<T> Completion<T> {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Completion::Superseded)
    }
}

/// Monotonic generation counter.
#[derive(Debug, Default)]
pub(crate) struct Generations {
    latest: u64,
}

impl Generations {
    pub(crate) fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub(crate) fn is_latest(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

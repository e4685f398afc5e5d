//! Interactive PDF preview widget.
//!
//! The widget walks a visitor through "select options, upload a file, view a
//! rendered page, navigate pages". It owns all of that state and talks to an
//! injected [`DocumentDecoder`] for decoding and rasterization.
//!
//! Decode and render are split in two phases. `begin_*` validates the request,
//! enters the loading state and hands out a ticket; `complete_*` applies the
//! decoder's result if the ticket is still the latest one. Synchronous hosts
//! can use [`PreviewWidget::submit_file`], [`PreviewWidget::render_page`] and
//! the navigation helpers, which run both phases with the widget's decoder.

mod state;
mod ticket;
mod view;

pub use state::{PageView, Phase, UploadStatus};
pub use ticket::{Completion, LoadTicket, RenderTicket};
pub use view::{NO_OUTPUT_PLACEHOLDER, PreviewView};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{DecodeError, PreviewError, RenderError, Result};
use crate::models::config::PreviewConfig;
use crate::models::options::{OptionUpdate, PreprocessingOptions};
use crate::pdf::{Bitmap, DocumentDecoder};
use ticket::Generations;
use view::ViewInputs;

/// A file chosen by the visitor.
#[derive(Debug, Clone, Copy)]
pub struct UploadedFile<'a> {
    pub name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> UploadedFile<'a> {
    pub fn new(name: &'a str, content_type: &'a str, bytes: &'a [u8]) -> Self {
        Self {
            name,
            content_type,
            bytes,
        }
    }
}

/// Pagination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(&self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }

    pub fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            -1 => Some(Direction::Previous),
            1 => Some(Direction::Next),
            _ => None,
        }
    }
}

struct LoadedDocument<Doc> {
    handle: Arc<Doc>,
    page_count: u32,
}

/// The preview widget.
pub struct PreviewWidget<D: DocumentDecoder> {
    decoder: D,
    config: PreviewConfig,
    options: PreprocessingOptions,
    config_sample: String,
    document: Option<LoadedDocument<D::Document>>,
    page: PageView,
    page_input: String,
    upload: UploadStatus,
    generations: Generations,
}

impl<D: DocumentDecoder> PreviewWidget<D> {
    /// Create a widget with default configuration.
    pub fn new(decoder: D) -> Self {
        Self::with_config(decoder, PreviewConfig::default())
    }

    pub fn with_config(decoder: D, config: PreviewConfig) -> Self {
        let options = config.default_options;
        Self {
            decoder,
            config,
            options,
            config_sample: options.config_sample(),
            document: None,
            page: PageView::empty(),
            page_input: "1".to_string(),
            upload: UploadStatus::default(),
            generations: Generations::default(),
        }
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn options(&self) -> &PreprocessingOptions {
        &self.options
    }

    /// Python configuration sample for the current options.
    pub fn config_sample(&self) -> &str {
        &self.config_sample
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    pub fn current_page(&self) -> u32 {
        self.page.current_page()
    }

    pub fn page_image(&self) -> Option<&Bitmap> {
        self.page.image()
    }

    /// Unconfirmed text of the page-number field.
    pub fn page_input(&self) -> &str {
        &self.page_input
    }

    pub fn upload(&self) -> &UploadStatus {
        &self.upload
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Page count of the loaded document, or 0.
    pub fn page_count(&self) -> u32 {
        self.document.as_ref().map_or(0, |d| d.page_count)
    }

    pub fn phase(&self) -> Phase {
        if self.upload.is_loading {
            Phase::Loading
        } else if self.upload.error_message.is_some() {
            Phase::Error
        } else if self.page.image().is_some() {
            Phase::Ready
        } else {
            Phase::Empty
        }
    }

    pub fn view(&self) -> PreviewView {
        PreviewView::build(ViewInputs {
            phase: self.phase(),
            file_name: self.upload.file_name.as_deref(),
            is_loading: self.upload.is_loading,
            error_message: self.upload.error_message.as_deref(),
            page_count: self.page_count(),
            current_page: self.page.current_page(),
            page_input: &self.page_input,
            has_page_image: self.page.image().is_some(),
            extraction_text: self.page.extraction().map(|e| e.render()),
            config_sample: &self.config_sample,
        })
    }

    /// Replace one preprocessing option and regenerate the configuration sample.
    pub fn update_option(&mut self, update: OptionUpdate) {
        self.options = self.options.with(update);
        self.config_sample = self.options.config_sample();
        debug!("Option {} updated", update.key().as_str());
    }

    /// Validate an upload and drop every trace of the previous document.
    ///
    /// A non-PDF file resets the widget and fails with
    /// [`PreviewError::Validation`]. Otherwise the widget enters the loading
    /// state and the returned ticket must be completed with the result of
    /// [`DocumentDecoder::load`] on the file's bytes.
    pub fn begin_upload(&mut self, file: &UploadedFile<'_>) -> Result<LoadTicket> {
        let generation = self.generations.issue();
        self.document = None;
        self.page = PageView::empty();
        self.page_input = "1".to_string();

        if !self.config.accepts(file.content_type) {
            let err = PreviewError::Validation {
                content_type: file.content_type.to_string(),
            };
            warn!("Rejected upload {}: {}", file.name, err);
            self.upload = UploadStatus::failed(None, err.user_message());
            return Err(err);
        }

        debug!("Decoding {} ({} bytes)", file.name, file.bytes.len());
        self.upload = UploadStatus::loading(Some(file.name.to_string()));
        Ok(LoadTicket { generation })
    }

    /// Apply the outcome of a decode.
    ///
    /// On success the document is installed and a ticket for page 1 is
    /// returned.
    pub fn complete_upload(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<D::Document, DecodeError>,
    ) -> Result<Completion<RenderTicket<D::Document>>> {
        if !self.generations.is_latest(ticket.generation) {
            debug!("Discarding superseded decode (generation {})", ticket.generation);
            return Ok(Completion::Superseded);
        }

        let document = result.and_then(|doc| {
            let page_count = self.decoder.page_count(&doc);
            if page_count == 0 {
                Err(DecodeError::NoPages)
            } else {
                Ok(LoadedDocument {
                    handle: Arc::new(doc),
                    page_count,
                })
            }
        });

        match document {
            Ok(document) => {
                debug!("Document ready with {} pages", document.page_count);
                let render = RenderTicket {
                    generation: self.generations.issue(),
                    page: 1,
                    scale: self.config.render.scale,
                    document: Arc::clone(&document.handle),
                };
                self.document = Some(document);
                Ok(Completion::Applied(render))
            }
            Err(source) => {
                let err = PreviewError::Decode(source);
                warn!("{}", err);
                self.document = None;
                self.upload = UploadStatus::failed(self.upload.file_name.clone(), err.user_message());
                Err(err)
            }
        }
    }

    /// Start rendering a page.
    ///
    /// Returns `None` without touching any state when no document is loaded
    /// or the page is out of range.
    pub fn begin_render(&mut self, page: u32) -> Option<RenderTicket<D::Document>> {
        let document = self.document.as_ref()?;
        if page < 1 || page > document.page_count {
            return None;
        }

        let ticket = RenderTicket {
            generation: self.generations.issue(),
            page,
            scale: self.config.render.scale,
            document: Arc::clone(&document.handle),
        };
        self.upload = UploadStatus::loading(self.upload.file_name.clone());
        Some(ticket)
    }

    /// Apply the outcome of a rasterization.
    ///
    /// A failed render keeps the confirmed page number but clears the image
    /// and the extraction shown for it.
    pub fn complete_render(
        &mut self,
        ticket: RenderTicket<D::Document>,
        result: std::result::Result<Bitmap, RenderError>,
    ) -> Result<Completion<()>> {
        if !self.generations.is_latest(ticket.generation) {
            debug!(
                "Discarding superseded render of page {} (generation {})",
                ticket.page, ticket.generation
            );
            return Ok(Completion::Superseded);
        }

        let file_name = self.upload.file_name.clone();
        match result {
            Ok(bitmap) => {
                debug!(
                    "Rendered page {} ({}x{})",
                    ticket.page,
                    bitmap.width(),
                    bitmap.height()
                );
                self.page = PageView::rendered(ticket.page, bitmap);
                self.page_input = ticket.page.to_string();
                self.upload = UploadStatus::settled(file_name);
                Ok(Completion::Applied(()))
            }
            Err(source) => {
                let err = PreviewError::Render {
                    page: ticket.page,
                    source,
                };
                warn!("{}", err);
                self.page = PageView::failed(self.page.current_page());
                self.upload = UploadStatus::failed(file_name, err.user_message());
                Err(err)
            }
        }
    }

    /// Load a new file and render its first page.
    pub fn submit_file(&mut self, file: UploadedFile<'_>) -> Result<()> {
        let ticket = self.begin_upload(&file)?;
        let result = self.decoder.load(file.bytes);
        match self.complete_upload(ticket, result)? {
            Completion::Applied(render) => self.finish_render(render),
            Completion::Superseded => Ok(()),
        }
    }

    /// Render a page. Out-of-range pages and a missing document are ignored.
    pub fn render_page(&mut self, page: u32) -> Result<()> {
        match self.begin_render(page) {
            Some(render) => self.finish_render(render),
            None => Ok(()),
        }
    }

    /// Update the page-number field without confirming it.
    pub fn edit_page_input(&mut self, text: &str) {
        self.page_input = text.to_string();
    }

    /// Confirm the page-number field, starting a render if it names another
    /// valid page.
    ///
    /// Integer-valued numbers such as `2.0` or `2e0` are accepted. Text that
    /// is not a page number of the document reverts the field to the current
    /// page.
    pub fn begin_confirm_page_input(&mut self, text: &str) -> Option<RenderTicket<D::Document>> {
        let current = self.page.current_page();
        match parse_page_number(text, self.page_count()) {
            Some(page) => {
                self.page_input = text.to_string();
                if page == current {
                    None
                } else {
                    self.begin_render(page)
                }
            }
            _ => {
                debug!("Reverting page input {:?} to {}", text, current);
                self.page_input = current.to_string();
                None
            }
        }
    }

    pub fn confirm_page_input(&mut self, text: &str) -> Result<()> {
        match self.begin_confirm_page_input(text) {
            Some(render) => self.finish_render(render),
            None => Ok(()),
        }
    }

    /// Start rendering the neighbouring page, if there is one.
    pub fn begin_adjacent_page(&mut self, direction: Direction) -> Option<RenderTicket<D::Document>> {
        let target = i64::from(self.page.current_page()) + i64::from(direction.offset());
        if target < 1 || target > i64::from(self.page_count()) {
            return None;
        }
        self.begin_render(target as u32)
    }

    pub fn go_to_adjacent_page(&mut self, direction: Direction) -> Result<()> {
        match self.begin_adjacent_page(direction) {
            Some(render) => self.finish_render(render),
            None => Ok(()),
        }
    }

    fn finish_render(&mut self, render: RenderTicket<D::Document>) -> Result<()> {
        let result = render.rasterize(&self.decoder);
        self.complete_render(render, result).map(|_| ())
    }
}

/// Page number typed into the page field, if it names a page in `1..=page_count`.
fn parse_page_number(text: &str, page_count: u32) -> Option<u32> {
    let value: f64 = text.trim().parse().ok()?;
    if value.fract() != 0.0 || value < 1.0 || value > f64::from(page_count) {
        return None;
    }
    Some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::Denoise;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const PDF: &str = "application/pdf";

    /// Document described by its bytes: `pages=N` with optional `;broken=P`.
    struct FakeDoc {
        pages: u32,
        broken: Option<u32>,
    }

    #[derive(Default)]
    struct FakeDecoder {
        rendered: RefCell<Vec<u32>>,
    }

    impl FakeDecoder {
        fn rendered(&self) -> Vec<u32> {
            self.rendered.borrow().clone()
        }
    }

    impl DocumentDecoder for FakeDecoder {
        type Document = FakeDoc;

        fn load(&self, data: &[u8]) -> std::result::Result<FakeDoc, DecodeError> {
            let text = std::str::from_utf8(data).map_err(|e| DecodeError::Parse(e.to_string()))?;
            let mut doc = FakeDoc {
                pages: 0,
                broken: None,
            };
            for part in text.split(';') {
                match part.split_once('=') {
                    Some(("pages", n)) => doc.pages = n.parse().map_err(|_| DecodeError::Parse(text.into()))?,
                    Some(("broken", n)) => doc.broken = n.parse().ok(),
                    _ => return Err(DecodeError::Parse(text.to_string())),
                }
            }
            Ok(doc)
        }

        fn page_count(&self, document: &FakeDoc) -> u32 {
            document.pages
        }

        fn rasterize(
            &self,
            document: &FakeDoc,
            page: u32,
            _scale: f32,
        ) -> std::result::Result<Bitmap, RenderError> {
            self.rendered.borrow_mut().push(page);
            if document.broken == Some(page) {
                return Err(RenderError::Canvas("broken page".to_string()));
            }
            Ok(Bitmap::new(page * 10, 10))
        }
    }

    fn widget() -> PreviewWidget<FakeDecoder> {
        PreviewWidget::new(FakeDecoder::default())
    }

    fn pdf(bytes: &str) -> UploadedFile<'_> {
        UploadedFile::new("doc.pdf", PDF, bytes.as_bytes())
    }

    #[test]
    fn test_initial_state() {
        let w = widget();
        assert_eq!(w.phase(), Phase::Empty);
        assert_eq!(w.page_count(), 0);
        assert_eq!(w.page_input(), "1");
        assert!(!w.has_document());
        assert_eq!(w.config_sample(), PreprocessingOptions::default().config_sample());

        let view = w.view();
        assert_eq!(view.upload_label, "Upload a PDF");
        assert!(view.upload_enabled);
        assert!(!view.show_pagination);
        assert_eq!(view.extraction_text, NO_OUTPUT_PLACEHOLDER);
    }

    #[test]
    fn test_update_option_regenerates_sample() {
        let mut w = widget();
        w.update_option(OptionUpdate::Denoise(Denoise::None));
        w.update_option(OptionUpdate::Sharpen(false));

        assert_eq!(w.options().denoise, Denoise::None);
        assert!(w.config_sample().contains("    'denoise': None,\n"));
        assert!(w.config_sample().contains("    'sharpen': false,\n"));
        assert_eq!(w.config_sample(), w.options().config_sample());
    }

    #[test]
    fn test_upload_renders_first_page() {
        let mut w = widget();
        w.submit_file(pdf("pages=3")).unwrap();

        assert_eq!(w.phase(), Phase::Ready);
        assert_eq!(w.page_count(), 3);
        assert_eq!(w.current_page(), 1);
        assert_eq!(w.page_input(), "1");
        assert_eq!(w.page_image().map(|b| b.width()), Some(10));
        assert_eq!(w.page().extraction().map(|e| e.page), Some(1));
        assert_eq!(w.decoder().rendered(), vec![1]);

        let view = w.view();
        assert!(view.show_pagination);
        assert!(!view.previous_enabled);
        assert!(view.next_enabled);
        assert_eq!(view.file_name.as_deref(), Some("doc.pdf"));
        assert_eq!(view.upload_label, "Upload Different PDF");
        assert!(view.extraction_text.contains("Example Content from Page 1"));
    }

    #[test]
    fn test_single_page_hides_pagination() {
        let mut w = widget();
        w.submit_file(pdf("pages=1")).unwrap();

        let view = w.view();
        assert_eq!(view.page_count, 1);
        assert!(!view.show_pagination);
        assert!(!view.next_enabled);
    }

    #[test]
    fn test_non_pdf_upload_resets_state() {
        let mut w = widget();
        w.submit_file(pdf("pages=2")).unwrap();

        let err = w
            .submit_file(UploadedFile::new("photo.png", "image/png", b"pages=2"))
            .unwrap_err();

        assert!(matches!(err, PreviewError::Validation { .. }));
        assert!(!w.has_document());
        assert_eq!(w.page_count(), 0);
        assert!(w.page_image().is_none());
        assert!(w.page().extraction().is_none());
        assert_eq!(w.upload().file_name, None);
        assert!(!w.upload().is_loading);
        assert_eq!(
            w.upload().error_message.as_deref(),
            Some("Please upload a valid PDF file.")
        );
        assert_eq!(w.phase(), Phase::Error);
    }

    #[test]
    fn test_decode_failure() {
        let mut w = widget();
        w.submit_file(pdf("pages=2")).unwrap();

        let err = w.submit_file(pdf("garbage")).unwrap_err();

        assert!(matches!(err, PreviewError::Decode(DecodeError::Parse(_))));
        assert!(!w.has_document());
        assert!(w.page_image().is_none());
        assert!(!w.upload().is_loading);
        assert_eq!(w.upload().file_name.as_deref(), Some("doc.pdf"));
        assert_eq!(
            w.upload().error_message.as_deref(),
            Some("Failed to process the PDF. It might be corrupted or protected.")
        );
        assert_eq!(w.phase(), Phase::Error);
    }

    #[test]
    fn test_zero_page_document_is_decode_error() {
        let mut w = widget();
        let err = w.submit_file(pdf("pages=0")).unwrap_err();

        assert!(matches!(err, PreviewError::Decode(DecodeError::NoPages)));
        assert!(!w.has_document());
        assert!(!w.upload().is_loading);
    }

    #[test]
    fn test_render_failure_keeps_page() {
        let mut w = widget();
        w.submit_file(pdf("pages=3;broken=2")).unwrap();

        let err = w.go_to_adjacent_page(Direction::Next).unwrap_err();

        assert!(matches!(err, PreviewError::Render { page: 2, .. }));
        assert_eq!(w.current_page(), 1);
        assert!(w.page_image().is_none());
        assert!(w.page().extraction().is_none());
        assert!(w.has_document());
        assert_eq!(w.page_count(), 3);
        assert!(!w.upload().is_loading);
        assert_eq!(
            w.upload().error_message.as_deref(),
            Some("Failed to render page 2. The PDF might be corrupted.")
        );

        // The document stays usable.
        w.render_page(3).unwrap();
        assert_eq!(w.current_page(), 3);
        assert_eq!(w.phase(), Phase::Ready);
        assert_eq!(w.upload().error_message, None);
    }

    #[test]
    fn test_first_page_render_failure() {
        let mut w = widget();
        let err = w.submit_file(pdf("pages=3;broken=1")).unwrap_err();

        assert!(matches!(err, PreviewError::Render { page: 1, .. }));
        assert!(w.has_document());
        assert_eq!(w.page_count(), 3);
        assert!(!w.upload().is_loading);
        assert!(w.page_image().is_none());
        assert_eq!(w.phase(), Phase::Error);
        assert!(!w.view().show_pagination);

        w.go_to_adjacent_page(Direction::Next).unwrap();
        assert_eq!(w.current_page(), 2);
        assert_eq!(w.phase(), Phase::Ready);
    }

    #[test]
    fn test_validation_failure_supersedes_pending_render() {
        let mut w = widget();
        w.submit_file(pdf("pages=3")).unwrap();
        let pending = w.begin_render(2).unwrap();

        let err = w
            .submit_file(UploadedFile::new("notes.txt", "text/plain", b"pages=3"))
            .unwrap_err();
        assert!(matches!(err, PreviewError::Validation { .. }));

        let result = pending.rasterize(w.decoder());
        assert!(w.complete_render(pending, result).unwrap().is_superseded());
        assert!(!w.has_document());
        assert!(w.page_image().is_none());
        assert!(!w.upload().is_loading);
        assert_eq!(
            w.upload().error_message.as_deref(),
            Some("Please upload a valid PDF file.")
        );
    }

    #[test]
    fn test_render_ticket_uses_configured_scale() {
        let mut config = PreviewConfig::default();
        config.render.scale = 2.0;
        let mut w = PreviewWidget::with_config(FakeDecoder::default(), config);
        w.submit_file(pdf("pages=2")).unwrap();

        let ticket = w.begin_adjacent_page(Direction::Next).unwrap();
        assert_eq!(ticket.page(), 2);
        assert_eq!(ticket.scale(), 2.0);
    }

    #[test]
    fn test_direction_offsets() {
        for direction in [Direction::Previous, Direction::Next] {
            assert_eq!(Direction::from_offset(direction.offset()), Some(direction));
        }
        assert_eq!(Direction::from_offset(2), None);
    }

    #[test]
    fn test_render_page_guard() {
        let mut w = widget();
        w.render_page(1).unwrap();
        assert!(w.decoder().rendered().is_empty());

        w.submit_file(pdf("pages=2")).unwrap();
        w.render_page(0).unwrap();
        w.render_page(3).unwrap();
        assert_eq!(w.decoder().rendered(), vec![1]);
        assert_eq!(w.phase(), Phase::Ready);
    }

    #[test]
    fn test_adjacent_page_boundaries() {
        let mut w = widget();
        w.submit_file(pdf("pages=2")).unwrap();

        w.go_to_adjacent_page(Direction::Previous).unwrap();
        assert_eq!(w.current_page(), 1);

        w.go_to_adjacent_page(Direction::Next).unwrap();
        assert_eq!(w.current_page(), 2);

        w.go_to_adjacent_page(Direction::Next).unwrap();
        assert_eq!(w.current_page(), 2);
        assert_eq!(w.decoder().rendered(), vec![1, 2]);
    }

    #[test]
    fn test_confirm_page_input() {
        let mut w = widget();
        w.submit_file(pdf("pages=4")).unwrap();

        w.confirm_page_input("1").unwrap();
        assert_eq!(w.decoder().rendered(), vec![1]);

        w.edit_page_input("abc");
        assert_eq!(w.page_input(), "abc");
        w.confirm_page_input("abc").unwrap();
        assert_eq!(w.page_input(), "1");

        w.confirm_page_input("0").unwrap();
        assert_eq!(w.page_input(), "1");

        w.confirm_page_input(" 3 ").unwrap();
        assert_eq!(w.current_page(), 3);
        assert_eq!(w.page_input(), "3");
        assert_eq!(w.decoder().rendered(), vec![1, 3]);

        w.confirm_page_input("2.0").unwrap();
        assert_eq!(w.current_page(), 2);
        assert_eq!(w.page_input(), "2");

        w.confirm_page_input("2.5").unwrap();
        assert_eq!(w.page_input(), "2");
        w.confirm_page_input("4.0001").unwrap();
        assert_eq!(w.page_input(), "2");
        assert_eq!(w.decoder().rendered(), vec![1, 3, 2]);
    }

    #[test]
    fn test_three_page_walkthrough() {
        let mut w = widget();
        w.submit_file(pdf("pages=3")).unwrap();
        assert_eq!((w.current_page(), w.page_count()), (1, 3));

        w.go_to_adjacent_page(Direction::Next).unwrap();
        assert_eq!(w.current_page(), 2);
        assert_eq!(w.page_input(), "2");

        w.edit_page_input("99");
        w.confirm_page_input("99").unwrap();
        assert_eq!(w.page_input(), "2");
        assert_eq!(w.decoder().rendered(), vec![1, 2]);

        w.confirm_page_input("3").unwrap();
        assert_eq!(w.current_page(), 3);
        assert_eq!(w.page_input(), "3");

        w.go_to_adjacent_page(Direction::Next).unwrap();
        assert_eq!(w.current_page(), 3);
        assert_eq!(w.decoder().rendered(), vec![1, 2, 3]);
    }

    #[test]
    fn test_page_input_mirrors_after_render() {
        let mut w = widget();
        w.submit_file(pdf("pages=5")).unwrap();

        for page in [4, 2, 5, 1] {
            w.edit_page_input("partial");
            w.render_page(page).unwrap();
            assert_eq!(w.page_input(), page.to_string());
            assert_eq!(w.page().extraction().map(|e| e.page), Some(page));
            assert_eq!(w.page_image().map(|b| b.width()), Some(page * 10));
        }
    }

    #[test]
    fn test_loading_view() {
        let mut w = widget();
        let file = pdf("pages=2");
        let ticket = w.begin_upload(&file).unwrap();

        assert_eq!(w.phase(), Phase::Loading);
        let view = w.view();
        assert_eq!(view.upload_label, "Processing...");
        assert!(!view.upload_enabled);
        assert!(view.show_spinner);
        assert_eq!(view.file_name, None);

        let doc = w.decoder().load(file.bytes);
        let Completion::Applied(render) = w.complete_upload(ticket, doc).unwrap() else {
            panic!("decode should apply");
        };
        assert!(w.upload().is_loading);
        let bitmap = render.rasterize(w.decoder());
        w.complete_render(render, bitmap).unwrap();
        assert!(!w.upload().is_loading);

        // Navigation keeps the old image on screen while loading.
        let _pending = w.begin_adjacent_page(Direction::Next).unwrap();
        let view = w.view();
        assert!(view.is_loading);
        assert!(view.has_page_image);
        assert!(!view.show_spinner);
        assert!(!view.next_enabled);
        assert!(!view.page_input_enabled);
    }

    #[test]
    fn test_stale_render_is_discarded() {
        let mut w = widget();
        w.submit_file(pdf("pages=3")).unwrap();

        let to_two = w.begin_render(2).unwrap();
        let to_three = w.begin_render(3).unwrap();

        let result = to_two.rasterize(w.decoder());
        assert!(w.complete_render(to_two, result).unwrap().is_superseded());
        assert!(w.upload().is_loading);
        assert_eq!(w.current_page(), 1);

        let result = to_three.rasterize(w.decoder());
        assert_eq!(w.complete_render(to_three, result).unwrap(), Completion::Applied(()));
        assert_eq!(w.current_page(), 3);
        assert!(!w.upload().is_loading);
    }

    #[test]
    fn test_late_completion_after_new_upload() {
        let mut w = widget();
        w.submit_file(pdf("pages=3")).unwrap();
        let stale = w.begin_render(3).unwrap();

        w.submit_file(pdf("pages=2")).unwrap();
        assert_eq!(w.page_count(), 2);

        let result = stale.rasterize(w.decoder());
        assert!(w.complete_render(stale, result).unwrap().is_superseded());
        assert_eq!(w.current_page(), 1);
        assert_eq!(w.page_count(), 2);
    }

    #[test]
    fn test_stale_decode_is_discarded() {
        let mut w = widget();
        let first = pdf("pages=3");
        let first_ticket = w.begin_upload(&first).unwrap();

        w.submit_file(pdf("pages=2")).unwrap();

        let doc = w.decoder().load(first.bytes);
        assert!(w.complete_upload(first_ticket, doc).unwrap().is_superseded());
        assert_eq!(w.page_count(), 2);
        assert_eq!(w.phase(), Phase::Ready);
    }
}

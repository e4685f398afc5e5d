//! WASM bindings for the PDF preview widget.
//!
//! The page loads this module, builds its controls from
//! [`preprocessing_controls`], and forwards every visitor event to a
//! [`PdfPreview`]. Each event returns the fresh view model so the page can
//! redraw in one pass.

use std::io::Cursor;
use std::time::Duration;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use pdfocr_core::models::options::{Contrast, Denoise, OptionKey, Threshold};
use pdfocr_core::{
    CodeSample, Direction, Language, LopdfDecoder, OptionUpdate, PreviewConfig, PreviewWidget,
    UploadedFile,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Widget errors are already part of the view; they only go to the console.
fn report(result: pdfocr_core::Result<()>) {
    if let Err(e) = result {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
}

/// Convert a `Date.now()` timestamp into the widget's time base.
fn millis(now_ms: f64) -> Duration {
    Duration::try_from_secs_f64(now_ms.max(0.0) / 1000.0).unwrap_or_default()
}

#[derive(Serialize)]
struct ChoiceJs {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct ControlJs {
    key: &'static str,
    label: &'static str,
    /// "checkbox" or "select".
    kind: &'static str,
    choices: Vec<ChoiceJs>,
}

/// Describe the preprocessing controls in display order.
#[wasm_bindgen]
pub fn preprocessing_controls() -> Result<JsValue, JsValue> {
    let controls: Vec<ControlJs> = OptionKey::ALL
        .iter()
        .map(|key| {
            let choices: Vec<ChoiceJs> = match key {
                OptionKey::Deskew | OptionKey::Sharpen => Vec::new(),
                OptionKey::Denoise => Denoise::ALL
                    .iter()
                    .map(|d| ChoiceJs { value: d.as_str(), label: d.label() })
                    .collect(),
                OptionKey::Contrast => Contrast::ALL
                    .iter()
                    .map(|c| ChoiceJs { value: c.as_str(), label: c.label() })
                    .collect(),
                OptionKey::Threshold => Threshold::ALL
                    .iter()
                    .map(|t| ChoiceJs { value: t.as_str(), label: t.label() })
                    .collect(),
            };
            ControlJs {
                key: key.as_str(),
                label: key.label(),
                kind: if choices.is_empty() { "checkbox" } else { "select" },
                choices,
            }
        })
        .collect();

    to_js(&controls)
}

/// Preview widget class for browser use.
#[wasm_bindgen]
pub struct PdfPreview {
    widget: PreviewWidget<LopdfDecoder>,
}

#[wasm_bindgen]
impl PdfPreview {
    /// Create a widget with default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            widget: PreviewWidget::new(LopdfDecoder::new()),
        }
    }

    /// Create a widget from a JSON configuration document.
    #[wasm_bindgen]
    pub fn with_config(config_json: &str) -> Result<PdfPreview, JsValue> {
        let config =
            PreviewConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let decoder = LopdfDecoder::new().with_max_dimension(config.render.max_dimension);
        Ok(Self {
            widget: PreviewWidget::with_config(decoder, config),
        })
    }

    /// Change one preprocessing option, e.g. `("denoise", "median")`.
    #[wasm_bindgen]
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        let update = OptionUpdate::parse(key, value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.widget.update_option(update);
        Ok(())
    }

    /// Python configuration sample for the current options.
    #[wasm_bindgen]
    pub fn config_sample(&self) -> String {
        self.widget.config_sample().to_string()
    }

    /// Load a file picked by the visitor and render its first page.
    #[wasm_bindgen]
    pub fn submit_file(
        &mut self,
        name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<JsValue, JsValue> {
        report(
            self.widget
                .submit_file(UploadedFile::new(name, content_type, bytes)),
        );
        self.view()
    }

    #[wasm_bindgen]
    pub fn render_page(&mut self, page: u32) -> Result<JsValue, JsValue> {
        report(self.widget.render_page(page));
        self.view()
    }

    /// Step by -1 or +1; other offsets are ignored.
    #[wasm_bindgen]
    pub fn go_to_adjacent_page(&mut self, offset: i32) -> Result<JsValue, JsValue> {
        if let Some(direction) = Direction::from_offset(offset) {
            report(self.widget.go_to_adjacent_page(direction));
        }
        self.view()
    }

    #[wasm_bindgen]
    pub fn go_previous(&mut self) -> Result<JsValue, JsValue> {
        self.go_to_adjacent_page(-1)
    }

    #[wasm_bindgen]
    pub fn go_next(&mut self) -> Result<JsValue, JsValue> {
        self.go_to_adjacent_page(1)
    }

    /// Keystroke in the page-number field.
    #[wasm_bindgen]
    pub fn edit_page_input(&mut self, text: &str) {
        self.widget.edit_page_input(text);
    }

    /// Enter or blur on the page-number field.
    #[wasm_bindgen]
    pub fn confirm_page_input(&mut self, text: &str) -> Result<JsValue, JsValue> {
        report(self.widget.confirm_page_input(text));
        self.view()
    }

    /// PNG encoding of the rendered page, if any.
    #[wasm_bindgen]
    pub fn page_image_png(&self) -> Result<Option<js_sys::Uint8Array>, JsValue> {
        let Some(bitmap) = self.widget.page_image() else {
            return Ok(None);
        };

        let mut data = Vec::new();
        bitmap
            .write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Some(js_sys::Uint8Array::from(data.as_slice())))
    }

    /// Current view model.
    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.widget.view())
    }
}

impl Default for PdfPreview {
    fn default() -> Self {
        Self::new()
    }
}

/// Code sample with a copy button.
///
/// The clipboard write is asynchronous in browsers, so the page awaits
/// [`copy_to_clipboard`] and then calls `mark_copied`.
#[wasm_bindgen]
pub struct CodeBlock {
    sample: CodeSample,
}

#[wasm_bindgen]
impl CodeBlock {
    #[wasm_bindgen(constructor)]
    pub fn new(code: &str, language: &str) -> Result<CodeBlock, JsValue> {
        let language = Language::from_str(language)
            .ok_or_else(|| JsValue::from_str(&format!("unsupported language: {}", language)))?;
        let feedback = PreviewConfig::default().code_sample.copy_feedback();
        Ok(Self {
            sample: CodeSample::new(code, language).with_feedback(feedback),
        })
    }

    #[wasm_bindgen]
    pub fn code(&self) -> String {
        self.sample.code().to_string()
    }

    #[wasm_bindgen]
    pub fn language_label(&self) -> String {
        self.sample.language().label().to_string()
    }

    /// CSS class of the `<code>` element.
    #[wasm_bindgen]
    pub fn language_class(&self) -> String {
        format!("language-{}", self.sample.language().as_str())
    }

    #[wasm_bindgen]
    pub fn mark_copied(&mut self, now_ms: f64) {
        self.sample.mark_copied(millis(now_ms));
    }

    #[wasm_bindgen]
    pub fn copy_label(&self, now_ms: f64) -> String {
        self.sample.copy_label(millis(now_ms)).to_string()
    }
}

/// Write text to the system clipboard.
#[wasm_bindgen]
pub async fn copy_to_clipboard(text: String) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let promise = window.navigator().clipboard().write_text(&text);
    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_option_updates_sample() {
        let mut preview = PdfPreview::new();
        preview.set_option("denoise", "median").unwrap();
        preview.set_option("deskew", "false").unwrap();

        let sample = preview.config_sample();
        assert!(sample.contains("'denoise': 'median',"));
        assert!(sample.contains("'deskew': false,"));
    }

    #[wasm_bindgen_test]
    fn test_set_option_rejects_unknown_key() {
        let mut preview = PdfPreview::new();
        assert!(preview.set_option("blur", "true").is_err());
    }

    #[wasm_bindgen_test]
    fn test_non_pdf_upload() {
        let mut preview = PdfPreview::new();
        preview
            .submit_file("photo.png", "image/png", &[0u8; 4])
            .unwrap();
        assert!(preview.widget.upload().error_message.is_some());
        assert!(preview.page_image_png().unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_code_block_feedback() {
        let mut block = CodeBlock::new("pip install paddleocr", "bash").unwrap();
        assert_eq!(block.language_label(), "Bash");
        assert_eq!(block.language_class(), "language-bash");

        block.mark_copied(1_000.0);
        assert_eq!(block.copy_label(2_500.0), "Copied!");
        assert_eq!(block.copy_label(3_000.0), "Copy");
    }
}

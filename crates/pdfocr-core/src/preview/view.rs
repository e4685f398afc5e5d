//! Snapshot of everything the page draws for the widget.

use serde::{Deserialize, Serialize};

use super::state::Phase;

/// Placeholder shown when there is no extraction output.
pub const NO_OUTPUT_PLACEHOLDER: &str = "No output to display.";

/// Render-ready view of the widget state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewView {
    pub phase: Phase,

    /// File name, present only while no load is outstanding.
    pub file_name: Option<String>,
    pub is_loading: bool,
    pub error_message: Option<String>,

    pub page_count: u32,
    pub current_page: u32,
    pub page_input: String,

    /// Pagination controls are shown for multi-page documents.
    pub show_pagination: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub page_input_enabled: bool,

    pub upload_label: String,
    pub upload_enabled: bool,

    /// Full-size spinner shown while nothing is rendered yet.
    pub show_spinner: bool,
    pub has_page_image: bool,

    /// Simulated OCR output, or the placeholder text.
    pub extraction_text: String,
    pub config_sample: String,
}

pub(crate) struct ViewInputs<'a> {
    pub phase: Phase,
    pub file_name: Option<&'a str>,
    pub is_loading: bool,
    pub error_message: Option<&'a str>,
    pub page_count: u32,
    pub current_page: u32,
    pub page_input: &'a str,
    pub has_page_image: bool,
    pub extraction_text: Option<String>,
    pub config_sample: &'a str,
}

impl PreviewView {
    pub(crate) fn build(inputs: ViewInputs<'_>) -> Self {
        let ViewInputs {
            phase,
            file_name,
            is_loading,
            error_message,
            page_count,
            current_page,
            page_input,
            has_page_image,
            extraction_text,
            config_sample,
        } = inputs;

        let blocking = is_loading && !has_page_image;
        let upload_label = if blocking {
            "Processing...".to_string()
        } else if file_name.is_some() {
            "Upload Different PDF".to_string()
        } else {
            "Upload a PDF".to_string()
        };

        Self {
            phase,
            file_name: file_name.filter(|_| !is_loading).map(str::to_string),
            is_loading,
            error_message: error_message.map(str::to_string),
            page_count,
            current_page,
            page_input: page_input.to_string(),
            show_pagination: has_page_image && page_count > 1,
            previous_enabled: current_page > 1 && !is_loading,
            next_enabled: current_page < page_count && !is_loading,
            page_input_enabled: !is_loading,
            upload_label,
            upload_enabled: !blocking,
            show_spinner: blocking,
            has_page_image,
            extraction_text: extraction_text.unwrap_or_else(|| NO_OUTPUT_PLACEHOLDER.to_string()),
            config_sample: config_sample.to_string(),
        }
    }
}

//! Placeholder OCR output shown next to the rendered page.

use serde::{Deserialize, Serialize};

/// One recognized line of the simulated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedLine {
    /// Line number (1-indexed).
    pub line: u32,
    /// Recognized text.
    pub text: String,
    /// Confidence in percent.
    pub confidence: f64,
}

/// Simulated extraction result for a page.
///
/// Keyed only to the page number; the page content is never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedExtraction {
    /// Page number (1-indexed).
    pub page: u32,
    /// Lines in reading order.
    pub lines: Vec<ExtractedLine>,
}

impl SimulatedExtraction {
    /// Build the fixed payload for a page.
    pub fn for_page(page: u32) -> Self {
        let line = |line: u32, text: String, confidence: f64| ExtractedLine {
            line,
            text,
            confidence,
        };

        Self {
            page,
            lines: vec![
                line(1, format!("Example Content from Page {}", page), 99.8),
                line(2, "Invoice #12345".to_string(), 98.5),
                line(3, "Date: 2024-07-29".to_string(), 99.1),
            ],
        }
    }

    /// Commented JSON block displayed in the output panel.
    pub fn render(&self) -> String {
        let body = serde_json::to_string_pretty(&self.lines).unwrap_or_else(|_| "[]".to_string());

        format!(
            "// This is a simulation of the OCR output for page {}.\n\
             // In the full Python pipeline, PaddleOCR would process the image\n\
             // on the left (after applying your configured steps)\n\
             // to extract structured text and generate a CSV file.\n\
             \n\
             {}",
            self.page, body
        )
    }
}

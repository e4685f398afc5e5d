//! Labeled code samples with a copy-to-clipboard action.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Language tag of a code sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Bash,
    Json,
    Javascript,
}

impl Language {
    /// Label shown in the sample header.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Bash => "Bash",
            Language::Json => "JSON",
            Language::Javascript => "JavaScript",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Bash => "bash",
            Language::Json => "json",
            Language::Javascript => "javascript",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "python" => Some(Language::Python),
            "bash" => Some(Language::Bash),
            "json" => Some(Language::Json),
            "javascript" => Some(Language::Javascript),
            _ => None,
        }
    }
}

/// Destination of the copy action.
pub trait Clipboard {
    type Error: std::fmt::Display;

    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// A code sample and its transient "Copied!" state.
///
/// Time is passed in by the caller as a [`Duration`] since any fixed origin,
/// so the sample works where no monotonic clock is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSample {
    code: String,
    language: Language,
    feedback: Duration,
    copied_at: Option<Duration>,
}

impl CodeSample {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
            feedback: Duration::from_secs(2),
            copied_at: None,
        }
    }

    /// Set how long the copy confirmation stays visible.
    pub fn with_feedback(mut self, feedback: Duration) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Copy the literal code to the clipboard.
    ///
    /// The confirmation is only shown when the write succeeds.
    pub fn copy<C: Clipboard>(&mut self, clipboard: &mut C, now: Duration) -> bool {
        match clipboard.write_text(&self.code) {
            Ok(()) => {
                self.mark_copied(now);
                true
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                false
            }
        }
    }

    /// Record a copy completed by the host, e.g. an asynchronous browser write.
    pub fn mark_copied(&mut self, now: Duration) {
        self.copied_at = Some(now);
    }

    pub fn is_copied(&self, now: Duration) -> bool {
        self.copied_at
            .is_some_and(|at| now >= at && now - at < self.feedback)
    }

    /// Label of the copy button at `now`.
    pub fn copy_label(&self, now: Duration) -> &'static str {
        if self.is_copied(now) { "Copied!" } else { "Copy" }
    }
}

//! Inline `**bold**` run splitting for paragraph text.

use crate::model::IMAGE_MARKER;

/// A stretch of paragraph text with one font weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRun {
    /// Run text, whitespace preserved
    pub text: String,
    /// Whether the run is bold
    pub bold: bool,
}

impl InlineRun {
    /// Create a normal-weight run.
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Split text on `**` delimiters into alternating normal/bold runs.
///
/// An unmatched trailing `**` is kept as literal text. Empty runs are
/// dropped.
pub fn split_bold_runs(text: &str) -> Vec<InlineRun> {
    let parts: Vec<&str> = text.split("**").collect();
    let delimiters = parts.len() - 1;
    let mut runs: Vec<InlineRun> = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        let unmatched = delimiters % 2 == 1 && i == parts.len() - 1;
        if unmatched {
            // Re-attach the orphaned delimiter to the text that follows it.
            push_run(&mut runs, &format!("**{}", part), false);
        } else {
            push_run(&mut runs, part, i % 2 == 1);
        }
    }
    runs
}

fn push_run(runs: &mut Vec<InlineRun>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.bold == bold => last.text.push_str(text),
        _ => runs.push(InlineRun {
            text: text.to_string(),
            bold,
        }),
    }
}

/// Check if text contains at least one balanced `**bold**` span.
pub fn has_bold_runs(text: &str) -> bool {
    split_bold_runs(text).iter().any(|r| r.bold)
}

/// Remove image markers from running text.
pub fn strip_image_markers(text: &str) -> String {
    IMAGE_MARKER.replace_all(text, "").into_owned()
}

//! Document-level types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{classify_line, LineKind};

/// A markdown report loaded for rendering.
///
/// The document is an ordered list of lines. Sections are implied by the
/// level-2 headings between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Where the markdown was read from, if it came from disk
    pub source: Option<PathBuf>,

    /// Lines in document order, without line terminators
    lines: Vec<String>,
}

impl Document {
    /// Build a document from markdown text.
    pub fn from_markdown(markdown: &str) -> Self {
        let markdown = markdown.strip_prefix('\u{FEFF}').unwrap_or(markdown);
        let normalized = markdown.replace("\r\n", "\n").replace('\r', "\n");
        Self {
            source: None,
            lines: normalized.split('\n').map(str::to_string).collect(),
        }
    }

    /// Load a markdown file.
    ///
    /// A missing file is reported as [`Error::SourceNotFound`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::SourceNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        let mut doc = Self::from_markdown(&content);
        doc.source = Some(path.to_path_buf());
        Ok(doc)
    }

    /// All lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Check if the document has no visible content.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Classify every line.
    pub fn classify(&self) -> Vec<LineKind> {
        self.lines.iter().map(|l| classify_line(l)).collect()
    }

    /// Text of the first level-1 heading, used as the PDF title.
    pub fn title(&self) -> Option<String> {
        self.lines.iter().find_map(|l| match classify_line(l) {
            LineKind::Heading { level: 1, text } => Some(text),
            _ => None,
        })
    }

    /// Directory that relative image paths resolve against by default.
    pub fn base_dir(&self) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Markdown text joined back with `\n`.
    pub fn markdown(&self) -> String {
        self.lines.join("\n")
    }
}

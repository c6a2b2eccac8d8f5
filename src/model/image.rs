//! Image references found in a report and their section index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One embedded image marker whose file exists on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Resolved file location
    pub path: PathBuf,

    /// Bracketed label from the marker
    pub alt_text: String,

    /// Text of the nearest preceding level-2 heading (empty if none)
    pub section: String,

    /// Italic line right after the marker
    pub caption: Option<String>,

    /// Description line right before the marker, prefix removed
    pub description: Option<String>,

    /// Line index of the marker
    pub line: usize,

    /// Line index the caption was taken from
    pub caption_line: Option<usize>,

    /// Line index the description was taken from
    pub description_line: Option<usize>,
}

impl ImageReference {
    /// Create a reference with no caption or description.
    pub fn new(path: impl Into<PathBuf>, alt_text: impl Into<String>, section: impl Into<String>, line: usize) -> Self {
        Self {
            path: path.into(),
            alt_text: alt_text.into(),
            section: section.into(),
            caption: None,
            description: None,
            line,
            caption_line: None,
            description_line: None,
        }
    }

    /// Attach a caption taken from `line`.
    pub fn set_caption(&mut self, caption: impl Into<String>, line: usize) {
        self.caption = Some(caption.into());
        self.caption_line = Some(line);
    }

    /// Attach a description taken from `line`.
    pub fn set_description(&mut self, description: impl Into<String>, line: usize) {
        self.description = Some(description.into());
        self.description_line = Some(line);
    }

    /// Check if the image was seen before any level-2 heading.
    pub fn has_section(&self) -> bool {
        !self.section.is_empty()
    }
}

/// Section name to queued images, built once per render.
///
/// Layout takes a section's images when it reaches the matching heading;
/// whatever is never taken is left for the sweep.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    images: Vec<ImageReference>,
    by_section: HashMap<String, Vec<usize>>,
    placed: Vec<bool>,
}

impl ImageIndex {
    /// Index images by section. Images without a section are never queued.
    pub fn new(images: Vec<ImageReference>) -> Self {
        let mut by_section: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, image) in images.iter().enumerate() {
            if image.has_section() {
                by_section.entry(image.section.clone()).or_default().push(i);
            }
        }
        let placed = vec![false; images.len()];
        Self {
            images,
            by_section,
            placed,
        }
    }

    /// All indexed images in document order.
    pub fn images(&self) -> &[ImageReference] {
        &self.images
    }

    /// Get an image by index.
    pub fn get(&self, index: usize) -> Option<&ImageReference> {
        self.images.get(index)
    }

    /// Number of indexed images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if there are no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Check if a section has images still queued.
    pub fn has_section(&self, section: &str) -> bool {
        self.by_section.contains_key(section)
    }

    /// Remove and return the images queued under `section`, marking them placed.
    pub fn take_section(&mut self, section: &str) -> Vec<usize> {
        let taken = self.by_section.remove(section).unwrap_or_default();
        for &i in &taken {
            self.placed[i] = true;
        }
        taken
    }

    /// Remove and return every image not yet placed, in document order.
    pub fn take_remaining(&mut self) -> Vec<usize> {
        self.by_section.clear();
        let remaining: Vec<usize> = (0..self.images.len()).filter(|&i| !self.placed[i]).collect();
        for &i in &remaining {
            self.placed[i] = true;
        }
        remaining
    }

    /// Check if an image has been handed out.
    pub fn is_placed(&self, index: usize) -> bool {
        self.placed.get(index).copied().unwrap_or(false)
    }
}

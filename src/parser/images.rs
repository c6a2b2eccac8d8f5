//! Image locator: finds image markers and resolves them on disk.

use crate::model::{caption_text, classify_line, marker_target, Document, ImageReference, IMAGE_MARKER};
use std::path::{Path, PathBuf};

/// Default prefix that marks a description line above an image.
pub const DEFAULT_DESCRIPTION_PREFIX: &str = "Description:";

/// Result of scanning a document for images.
#[derive(Debug, Clone, Default)]
pub struct LocatedImages {
    /// Images whose files exist, in document order
    pub images: Vec<ImageReference>,

    /// Resolved paths of markers whose files were not found
    pub missing: Vec<PathBuf>,
}

/// Scans a document for `![alt](path)` markers.
#[derive(Debug, Clone)]
pub struct ImageLocator {
    base_dir: PathBuf,
    description_prefix: String,
}

impl ImageLocator {
    /// Create a locator resolving paths against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            description_prefix: DEFAULT_DESCRIPTION_PREFIX.to_string(),
        }
    }

    /// Set the description line prefix (empty disables descriptions).
    pub fn with_description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = prefix.into();
        self
    }

    /// Base directory in use.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Find every image marker in the document.
    ///
    /// Markers pointing at files that do not exist are left out of
    /// `images` and logged.
    pub fn locate(&self, doc: &Document) -> LocatedImages {
        let lines = doc.lines();
        let mut located = LocatedImages::default();
        let mut section = String::new();

        for (i, line) in lines.iter().enumerate() {
            if let Some(name) = classify_line(line).section_name() {
                section = name.to_string();
            }

            let first = located.images.len();
            for caps in IMAGE_MARKER.captures_iter(line) {
                let path = self.base_dir.join(marker_target(&caps[2]));
                if !path.is_file() {
                    log::warn!("Image not found, skipping: {}", path.display());
                    located.missing.push(path);
                    continue;
                }
                located
                    .images
                    .push(ImageReference::new(path, &caps[1], section.as_str(), i));
            }
            if located.images.len() == first {
                continue;
            }

            // A shared caption goes to the last image on the line, a shared
            // description to the first.
            if let Some(caption) = lines.get(i + 1).and_then(|next| caption_text(next)) {
                if let Some(last) = located.images.last_mut() {
                    last.set_caption(caption, i + 1);
                }
            }
            if let Some(prev) = i.checked_sub(1) {
                if let Some(description) = self.description_of(&lines[prev]) {
                    located.images[first].set_description(description, prev);
                }
            }
        }

        log::debug!(
            "Located {} images ({} missing) under {}",
            located.images.len(),
            located.missing.len(),
            self.base_dir.display()
        );
        located
    }

    fn description_of<'a>(&self, line: &'a str) -> Option<&'a str> {
        if self.description_prefix.is_empty() {
            return None;
        }
        let text = line.trim().strip_prefix(self.description_prefix.as_str())?.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Locate images in markdown text, resolving paths against `base_dir`.
///
/// # Example
///
/// ```no_run
/// use reportpdf::parser::locate_images;
///
/// let markdown = std::fs::read_to_string("reports/sprint.md").unwrap();
/// for image in locate_images(&markdown, "reports") {
///     println!("{} in {:?}", image.path.display(), image.section);
/// }
/// ```
pub fn locate_images(markdown: &str, base_dir: impl AsRef<Path>) -> Vec<ImageReference> {
    let doc = Document::from_markdown(markdown);
    ImageLocator::new(base_dir.as_ref()).locate(&doc).images
}

//! # reportpdf
//!
//! Renders markdown sprint reports into paginated PDF documents with
//! embedded chart images.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reportpdf::render_file;
//!
//! fn main() -> reportpdf::Result<()> {
//!     // Writes reports/sprint_12.pdf next to the source
//!     let pdf = render_file("reports/sprint_12.md")?;
//!     println!("{}", pdf.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Section-aware images**: charts are placed under the level-2 heading
//!   they were written beneath, with italic captions
//! - **Unplaced-image sweep**: anything left over lands under a trailing
//!   "Charts & Visuals" heading
//! - **ASCII sanitization**: emoji, smart quotes and accents are mapped to
//!   the standard PDF fonts' character set
//! - **Greedy word wrap** with inline `**bold**` runs
//! - **Parallel batch rendering** with Rayon

pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod pdf;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, ImageFormat};
pub use error::{Error, Result};
pub use layout::{FontSet, LaidOutDocument, LayoutEngine};
pub use model::{Document, ImageIndex, ImageReference, LineKind};
pub use parser::{extract_key_sections, extract_section, locate_images, ImageLocator, KeySections};
pub use pdf::PdfWriter;
pub use render::{
    sanitize, to_text, PageGeometry, RenderOptions, RenderResult, RenderStats, TextStyle,
};

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Render a markdown file to a PDF next to it.
///
/// Images resolve against the markdown file's directory. Returns the path
/// of the written PDF.
///
/// # Example
///
/// ```no_run
/// use reportpdf::render_file;
///
/// let pdf = render_file("reports/sprint_12.md").unwrap();
/// assert_eq!(pdf.extension().unwrap(), "pdf");
/// ```
pub fn render_file<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    Ok(ReportRenderer::new().render_file(path)?.pdf_path)
}

/// Render a markdown file to `output`.
pub fn render_file_to<P: AsRef<Path>, Q: AsRef<Path>>(path: P, output: Q) -> Result<PathBuf> {
    Ok(ReportRenderer::new().render_file_to(path, output)?.pdf_path)
}

/// Render a markdown file with custom options, returning statistics.
///
/// # Example
///
/// ```no_run
/// use reportpdf::{render_file_with_options, PageGeometry, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_geometry(PageGeometry::letter())
///     .with_output_dir("out");
/// let result = render_file_with_options("reports/sprint_12.md", options)?;
/// println!("{} pages", result.stats.page_count);
/// # Ok::<(), reportpdf::Error>(())
/// ```
pub fn render_file_with_options<P: AsRef<Path>>(path: P, options: RenderOptions) -> Result<RenderResult> {
    ReportRenderer::with_options(options).render_file(path)
}

/// Render markdown text to PDF bytes, resolving images against `base_dir`.
pub fn render_markdown<P: AsRef<Path>>(
    markdown: &str,
    base_dir: P,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let options = options.clone().with_image_dir(base_dir.as_ref());
    let (bytes, _) = ReportRenderer::with_options(options).render_document(&Document::from_markdown(markdown))?;
    Ok(bytes)
}

/// Render several markdown files in parallel.
///
/// Results are returned in input order; one failure does not stop the rest.
pub fn render_files<P: AsRef<Path> + Sync>(paths: &[P], options: RenderOptions) -> Vec<Result<RenderResult>> {
    ReportRenderer::with_options(options).render_files(paths)
}

/// Extract plain narrative text from a markdown file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = Document::open(path)?;
    Ok(to_text(&doc.markdown()))
}

/// Most recently modified `.md` file directly inside `dir`.
///
/// Returns `Ok(None)` when the directory holds no markdown files.
pub fn find_latest_report<P: AsRef<Path>>(dir: P) -> Result<Option<PathBuf>> {
    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        let is_markdown = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("md"))
            .unwrap_or(false);
        if !is_markdown || !path.is_file() {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if latest.as_ref().map_or(true, |(t, _)| modified > *t) {
            latest = Some((modified, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

/// Markdown files directly inside `dir`, sorted by name.
pub fn list_reports<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut reports = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && path.extension().map(|e| e.eq_ignore_ascii_case("md")).unwrap_or(false) {
            reports.push(path);
        }
    }
    reports.sort();
    Ok(reports)
}

/// Builder for rendering reports.
///
/// Holds the font set and options for any number of renders; it is `Sync`,
/// so one renderer can serve a parallel batch.
///
/// # Example
///
/// ```no_run
/// use reportpdf::{PageGeometry, ReportRenderer};
///
/// let result = ReportRenderer::new()
///     .with_geometry(PageGeometry::letter())
///     .with_image_dir("reports/charts")
///     .with_output_dir("out")
///     .render_file("reports/sprint_12.md")?;
/// println!("{}", result.to_json()?);
/// # Ok::<(), reportpdf::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    fonts: FontSet,
    options: RenderOptions,
}

impl ReportRenderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create a renderer with the given options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            fonts: FontSet::standard(),
            options,
        }
    }

    /// Set page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.options = self.options.with_geometry(geometry);
        self
    }

    /// Set the image directory.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_image_dir(dir);
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_output_dir(dir);
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.options = self.options.with_compression(compress);
        self
    }

    /// Options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Font set in use.
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Locate images and lay out a document without writing it.
    pub fn layout(&self, doc: &Document) -> LaidOutDocument {
        let base_dir = self
            .options
            .image_dir
            .clone()
            .unwrap_or_else(|| doc.base_dir());
        let located = ImageLocator::new(base_dir)
            .with_description_prefix(self.options.description_prefix.as_str())
            .locate(doc);
        LayoutEngine::new(&self.fonts, &self.options).layout(doc, located)
    }

    /// Render a document to PDF bytes.
    pub fn render_document(&self, doc: &Document) -> Result<(Vec<u8>, RenderStats)> {
        self.options.validate()?;
        let laid_out = self.layout(doc);
        let bytes = PdfWriter::from_options(&self.options).write(&laid_out)?;
        Ok((bytes, laid_out.stats))
    }

    /// Render a markdown file to its default destination.
    ///
    /// The destination is the source with a `.pdf` extension, placed in
    /// the output directory if one is set.
    pub fn render_file<P: AsRef<Path>>(&self, path: P) -> Result<RenderResult> {
        let output = self.options.output_path_for(path.as_ref());
        self.render_file_to(path, output)
    }

    /// Render a markdown file to `output`.
    pub fn render_file_to<P: AsRef<Path>, Q: AsRef<Path>>(&self, path: P, output: Q) -> Result<RenderResult> {
        self.options.validate()?;
        let doc = Document::open(path.as_ref())?;
        let laid_out = self.layout(&doc);

        let output = output.as_ref();
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        PdfWriter::from_options(&self.options).write_to(&laid_out, output)?;
        let stats = laid_out.stats;

        log::info!(
            "Wrote {} ({} pages, {} images, {} missing)",
            output.display(),
            stats.page_count,
            stats.images_placed(),
            stats.images_missing
        );
        Ok(RenderResult::new(output.to_path_buf(), stats))
    }

    /// Render several markdown files in parallel, in input order.
    pub fn render_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<Result<RenderResult>> {
        self.render_files_with_progress(paths, |_, _| {})
    }

    /// Like [`render_files`](Self::render_files), calling `on_done` as each
    /// file finishes.
    ///
    /// `on_done` runs on the worker thread that rendered the file, so calls
    /// arrive in completion order rather than input order.
    pub fn render_files_with_progress<P, F>(&self, paths: &[P], on_done: F) -> Vec<Result<RenderResult>>
    where
        P: AsRef<Path> + Sync,
        F: Fn(&Path, &Result<RenderResult>) + Sync,
    {
        paths
            .par_iter()
            .map(|path| {
                let result = self.render_file(path);
                on_done(path.as_ref(), &result);
                result
            })
            .collect()
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

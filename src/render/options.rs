//! Rendering options and configuration.

use crate::error::{Error, Result};
use crate::parser::DEFAULT_DESCRIPTION_PREFIX;
use std::path::{Path, PathBuf};

/// Heading used for images that never matched a section.
pub const DEFAULT_SWEEP_HEADING: &str = "Charts & Visuals";

/// Points per millimetre.
const MM: f32 = 72.0 / 25.4;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Top margin
    pub margin_top: f32,
    /// Bottom margin
    pub margin_bottom: f32,
    /// Left margin
    pub margin_left: f32,
    /// Right margin
    pub margin_right: f32,
}

impl PageGeometry {
    /// A4 portrait with 20mm side/top margins and a 15mm bottom margin.
    pub fn a4() -> Self {
        Self {
            width: 210.0 * MM,
            height: 297.0 * MM,
            margin_top: 20.0 * MM,
            margin_bottom: 15.0 * MM,
            margin_left: 20.0 * MM,
            margin_right: 20.0 * MM,
        }
    }

    /// US Letter portrait with the same margins as [`PageGeometry::a4`].
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            ..Self::a4()
        }
    }

    /// Custom page size with uniform margins.
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
        }
    }

    /// Usable width between the side margins.
    pub fn printable_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Usable height between the top and bottom margins.
    pub fn printable_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Lowest offset from the page top that content may reach.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Font size and row height for one kind of block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f32,
    /// Height of one row in points
    pub line_height: f32,
}

impl TextStyle {
    /// Create a text style.
    pub const fn new(size: f32, line_height: f32) -> Self {
        Self { size, line_height }
    }
}

/// Text styles per block kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    /// Level-1 headings
    pub h1: TextStyle,
    /// Level-2 headings
    pub h2: TextStyle,
    /// Level-3 and deeper headings
    pub h3: TextStyle,
    /// Paragraphs and bullets
    pub body: TextStyle,
    /// Image captions and descriptions
    pub caption: TextStyle,
}

impl Typography {
    /// Style for a heading level.
    pub fn heading(&self, level: u8) -> TextStyle {
        match level {
            1 => self.h1,
            2 => self.h2,
            _ => self.h3,
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            h1: TextStyle::new(20.0, 28.0),
            h2: TextStyle::new(16.0, 24.0),
            h3: TextStyle::new(13.0, 19.0),
            body: TextStyle::new(11.0, 16.0),
            caption: TextStyle::new(10.0, 14.0),
        }
    }
}

/// Vertical gaps and indents, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Gap emitted for a blank source line
    pub blank_line: f32,
    /// Gap when entering or leaving a bullet run
    pub list_gap: f32,
    /// Space above and below a horizontal rule
    pub rule_gap: f32,
    /// Space below an image
    pub image_gap: f32,
    /// Indent of bullet text from the left margin
    pub bullet_indent: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            blank_line: 8.0,
            list_gap: 4.0,
            rule_gap: 6.0,
            image_gap: 8.0,
            bullet_indent: 14.0,
        }
    }
}

/// Options for rendering a report to PDF.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page size and margins
    pub geometry: PageGeometry,

    /// Font sizes and row heights
    pub typography: Typography,

    /// Gaps and indents
    pub spacing: Spacing,

    /// Largest image width as a fraction of the page width
    pub max_image_width_fraction: f32,

    /// Directory image paths resolve against (default: the markdown's directory)
    pub image_dir: Option<PathBuf>,

    /// Directory the PDF is written to (default: next to the markdown)
    pub output_dir: Option<PathBuf>,

    /// Heading for images that never matched a section
    pub sweep_heading: String,

    /// Prefix marking a description line above an image
    pub description_prefix: String,

    /// Words that make a level-2 heading a visuals section (case-insensitive)
    pub visual_keywords: Vec<String>,

    /// Flate-compress page content streams
    pub compress: bool,

    /// Creator recorded in the PDF info dictionary
    pub creator: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set typography.
    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    /// Set spacing.
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the maximum image width fraction (clamped to 0.05..=1.0).
    pub fn with_max_image_width(mut self, fraction: f32) -> Self {
        self.max_image_width_fraction = fraction.clamp(0.05, 1.0);
        self
    }

    /// Set the image directory.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the sweep heading.
    pub fn with_sweep_heading(mut self, heading: impl Into<String>) -> Self {
        self.sweep_heading = heading.into();
        self
    }

    /// Set the description prefix.
    pub fn with_description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = prefix.into();
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the creator string.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Check if a level-2 heading introduces a visuals section.
    pub fn is_visual_heading(&self, heading: &str) -> bool {
        let heading = heading.to_lowercase();
        self.visual_keywords
            .iter()
            .any(|k| heading.contains(&k.to_lowercase()))
    }

    /// Where the PDF for `source` is written when no destination is given.
    ///
    /// The source extension is replaced with `.pdf`; with an output
    /// directory only the file name is kept.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let pdf = source.with_extension("pdf");
        match (&self.output_dir, pdf.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => pdf,
        }
    }

    /// Reject options that leave no room for content.
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        if g.printable_width() <= 0.0 || g.printable_height() <= 0.0 {
            return Err(Error::InvalidOptions(format!(
                "margins leave no printable area on a {}x{} page",
                g.width, g.height
            )));
        }

        let t = &self.typography;
        for style in [t.h1, t.h2, t.h3, t.body, t.caption] {
            if style.size <= 0.0 || style.line_height <= 0.0 {
                return Err(Error::InvalidOptions(
                    "font sizes and line heights must be positive".into(),
                ));
            }
            if style.line_height > g.printable_height() {
                return Err(Error::InvalidOptions(format!(
                    "line height {} exceeds printable height {}",
                    style.line_height,
                    g.printable_height()
                )));
            }
        }

        if self.spacing.bullet_indent >= g.printable_width() {
            return Err(Error::InvalidOptions(
                "bullet indent is wider than the printable width".into(),
            ));
        }

        if !(self.max_image_width_fraction > 0.0 && self.max_image_width_fraction <= 1.0) {
            return Err(Error::InvalidOptions(format!(
                "image width fraction {} is outside (0, 1]",
                self.max_image_width_fraction
            )));
        }

        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            typography: Typography::default(),
            spacing: Spacing::default(),
            max_image_width_fraction: 0.8,
            image_dir: None,
            output_dir: None,
            sweep_heading: DEFAULT_SWEEP_HEADING.to_string(),
            description_prefix: DEFAULT_DESCRIPTION_PREFIX.to_string(),
            visual_keywords: vec!["chart".to_string(), "visual".to_string()],
            compress: true,
            creator: format!("reportpdf {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

//! Width tables for the standard Helvetica faces.
//!
//! Text is sanitized to printable ASCII before layout, so the tables only
//! cover code points 32..=126. Widths are in thousandths of an em.

/// One of the three faces used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Body text
    Regular,
    /// Headings, labels and `**bold**` runs
    Bold,
    /// Captions, descriptions and `*emphasis*` lines
    Italic,
}

impl FontFace {
    /// All faces, in resource order.
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }
}

const FIRST_CHAR: u32 = 32;

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Metrics of a single face.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    widths: &'static [u16; 95],
    missing_width: u16,
}

impl FontMetrics {
    /// Advance width of a character in thousandths of an em.
    pub fn char_units(&self, c: char) -> u16 {
        (c as u32)
            .checked_sub(FIRST_CHAR)
            .and_then(|i| self.widths.get(i as usize))
            .copied()
            .unwrap_or(self.missing_width)
    }

    /// Width of `text` at `size` points.
    pub fn string_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_units(c))).sum();
        units as f32 * size / 1000.0
    }
}

/// The fonts a render measures and embeds.
///
/// Built once and shared read-only; a renderer owns one and parallel
/// batch renders borrow it.
#[derive(Debug, Clone)]
pub struct FontSet {
    regular: FontMetrics,
    bold: FontMetrics,
    italic: FontMetrics,
}

impl FontSet {
    /// Standard Helvetica, Helvetica-Bold and Helvetica-Oblique.
    pub fn standard() -> Self {
        let regular = FontMetrics {
            widths: &HELVETICA,
            missing_width: 556,
        };
        Self {
            regular,
            bold: FontMetrics {
                widths: &HELVETICA_BOLD,
                missing_width: 611,
            },
            // Oblique shares the upright advance widths.
            italic: regular,
        }
    }

    /// Metrics for a face.
    pub fn metrics(&self, face: FontFace) -> &FontMetrics {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Italic => &self.italic,
        }
    }

    /// Width of `text` in `face` at `size` points.
    pub fn string_width(&self, text: &str, face: FontFace, size: f32) -> f32 {
        self.metrics(face).string_width(text, size)
    }
}

impl Default for FontSet {
    fn default() -> Self {
        Self::standard()
    }
}

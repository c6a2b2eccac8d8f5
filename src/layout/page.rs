//! Positioned elements and laid-out pages.

use super::metrics::FontFace;
use crate::pdf::EncodedImage;
use crate::render::{PageGeometry, RenderStats};

/// Text in a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    /// Sanitized ASCII text
    pub text: String,
    /// Face to draw it in
    pub face: FontFace,
}

impl TextSegment {
    /// Create a segment.
    pub fn new(text: impl Into<String>, face: FontFace) -> Self {
        Self {
            text: text.into(),
            face,
        }
    }
}

/// Something drawn on a page. Vertical positions are offsets from the page top.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// One row of text, possibly switching faces
    Text {
        x: f32,
        top: f32,
        height: f32,
        size: f32,
        segments: Vec<TextSegment>,
    },
    /// Horizontal line
    Rule { x1: f32, x2: f32, y: f32 },
    /// Filled bullet dot
    Bullet { cx: f32, cy: f32, radius: f32 },
    /// Index into [`LaidOutDocument::images`]
    Image {
        image: usize,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
    },
}

impl Element {
    /// Top and bottom offsets of the element.
    pub fn bounds(&self) -> (f32, f32) {
        match *self {
            Element::Text { top, height, .. } => (top, top + height),
            Element::Rule { y, .. } => (y, y),
            Element::Bullet { cy, radius, .. } => (cy - radius, cy + radius),
            Element::Image { top, height, .. } => (top, top + height),
        }
    }

    /// Concatenated text of a text row.
    pub fn text(&self) -> Option<String> {
        match self {
            Element::Text { segments, .. } => {
                Some(segments.iter().map(|s| s.text.as_str()).collect())
            }
            _ => None,
        }
    }

    /// Check if this is a text row.
    pub fn is_text(&self) -> bool {
        matches!(self, Element::Text { .. })
    }

    /// Check if this is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Element::Image { .. })
    }
}

/// One output page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    /// Page number (1-based)
    pub number: u32,
    /// Elements in drawing order
    pub elements: Vec<Element>,
}

impl LaidOutPage {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    /// Text rows on this page, in order.
    pub fn text_rows(&self) -> Vec<String> {
        self.elements.iter().filter_map(Element::text).collect()
    }

    /// Number of images on this page.
    pub fn image_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_image()).count()
    }
}

/// Result of layout, ready to be written as PDF.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    /// Page geometry shared by every page
    pub geometry: PageGeometry,
    /// Pages in order; never empty
    pub pages: Vec<LaidOutPage>,
    /// Decoded images referenced by [`Element::Image`]
    pub images: Vec<EncodedImage>,
    /// First level-1 heading, sanitized
    pub title: Option<String>,
    /// Layout statistics
    pub stats: RenderStats,
}

impl LaidOutDocument {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Iterate over every element with its page number.
    pub fn elements(&self) -> impl Iterator<Item = (u32, &Element)> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter().map(move |e| (p.number, e)))
    }
}

//! Vertical cursor and page-break bookkeeping.

use crate::render::PageGeometry;

/// Tolerance for floating point comparisons against the page bottom.
pub(crate) const EPSILON: f32 = 1e-3;

/// Current position on the page being filled.
///
/// The offset is measured from the page top. A block is only placed when
/// `offset + height` stays within `height - margin_bottom`; otherwise a new
/// page is started first.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    offset: f32,
    page: u32,
}

impl LayoutCursor {
    /// Cursor at the top of page 1.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            offset: geometry.margin_top,
            page: 1,
        }
    }

    /// Offset from the page top.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Current page number (1-based).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Check if nothing has been placed on the current page yet.
    pub fn at_page_top(&self) -> bool {
        self.offset <= self.geometry.margin_top + EPSILON
    }

    /// Space left before the bottom margin.
    pub fn remaining(&self) -> f32 {
        self.geometry.content_bottom() - self.offset
    }

    /// Check if a block of `height` fits on the current page.
    pub fn fits(&self, height: f32) -> bool {
        self.offset + height <= self.geometry.content_bottom() + EPSILON
    }

    /// Start a new page if a block of `height` would cross the bottom margin.
    ///
    /// Returns `true` if a page break happened. A block taller than the
    /// whole printable area is never moved off an empty page.
    pub fn ensure_room(&mut self, height: f32) -> bool {
        if self.fits(height) || self.at_page_top() {
            return false;
        }
        self.new_page();
        true
    }

    /// Move down by `dy`.
    pub fn advance(&mut self, dy: f32) {
        self.offset += dy;
    }

    /// Move down by `dy` unless at the top of a page.
    pub fn gap(&mut self, dy: f32) {
        if !self.at_page_top() {
            self.offset += dy;
        }
    }

    /// Reset to the top margin of the next page.
    pub fn new_page(&mut self) {
        self.page += 1;
        self.offset = self.geometry.margin_top;
    }
}

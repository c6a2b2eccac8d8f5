//! Render result with output location and statistics.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of rendering a report to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// Where the PDF was written
    pub pdf_path: PathBuf,

    /// Layout statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(pdf_path: PathBuf, stats: RenderStats) -> Self {
        Self { pdf_path, stats }
    }

    /// Serialize the result as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Statistics collected during layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Pages produced
    pub page_count: u32,

    /// Headings rendered, including the sweep heading
    pub heading_count: u32,

    /// Paragraph and emphasis lines rendered
    pub paragraph_count: u32,

    /// Bullet items rendered
    pub bullet_count: u32,

    /// Image markers whose files exist
    pub images_located: u32,

    /// Image markers whose files were not found
    pub images_missing: u32,

    /// Images placed under their own section heading
    pub images_inline: u32,

    /// Images placed by the sweep
    pub images_swept: u32,

    /// Images that failed to decode and were skipped
    pub images_failed: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Images that made it onto a page.
    pub fn images_placed(&self) -> u32 {
        self.images_inline + self.images_swept
    }

    /// Check that every located image was placed or counted as failed.
    pub fn images_accounted(&self) -> bool {
        self.images_placed() + self.images_failed == self.images_located
    }

    /// Fold another document's statistics into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.page_count += other.page_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.bullet_count += other.bullet_count;
        self.images_located += other.images_located;
        self.images_missing += other.images_missing;
        self.images_inline += other.images_inline;
        self.images_swept += other.images_swept;
        self.images_failed += other.images_failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_accounted() {
        let stats = RenderStats {
            images_located: 3,
            images_inline: 1,
            images_swept: 1,
            images_failed: 1,
            ..Default::default()
        };
        assert_eq!(stats.images_placed(), 2);
        assert!(stats.images_accounted());
    }

    #[test]
    fn test_merge() {
        let mut total = RenderStats::new();
        let one = RenderStats {
            page_count: 2,
            bullet_count: 3,
            ..Default::default()
        };
        total.merge(&one);
        total.merge(&one);
        assert_eq!(total.page_count, 4);
        assert_eq!(total.bullet_count, 6);
    }

    #[test]
    fn test_to_json() {
        let result = RenderResult::new(
            PathBuf::from("out/report.pdf"),
            RenderStats {
                page_count: 1,
                ..Default::default()
            },
        );
        let json = result.to_json().unwrap();
        assert!(json.contains("\"page_count\": 1"));
        assert!(json.contains("report.pdf"));
    }
}

//! Layout of classified report lines onto pages.

use super::cursor::LayoutCursor;
use super::metrics::{FontFace, FontSet};
use super::page::{Element, LaidOutDocument, LaidOutPage, TextSegment};
use super::wrap::{wrap_runs, wrap_words};
use crate::model::{Document, ImageIndex, ImageReference, LineKind};
use crate::parser::{has_bold_runs, split_bold_runs, strip_image_markers, LocatedImages};
use crate::pdf::{load_image, EncodedImage};
use crate::render::{sanitize, RenderOptions, RenderStats, TextStyle};
use std::collections::HashSet;

/// Whether the previous rendered line was a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Normal,
    InsideBulletList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Inline,
    Swept,
}

/// Lays out a document's lines and located images onto pages.
///
/// # Example
///
/// ```no_run
/// use reportpdf::layout::{FontSet, LayoutEngine};
/// use reportpdf::model::Document;
/// use reportpdf::parser::ImageLocator;
/// use reportpdf::RenderOptions;
///
/// let doc = Document::open("reports/sprint_12.md")?;
/// let located = ImageLocator::new(doc.base_dir()).locate(&doc);
/// let fonts = FontSet::standard();
/// let options = RenderOptions::default();
/// let laid_out = LayoutEngine::new(&fonts, &options).layout(&doc, located);
/// println!("{} pages", laid_out.page_count());
/// # Ok::<(), reportpdf::Error>(())
/// ```
pub struct LayoutEngine<'a> {
    fonts: &'a FontSet,
    options: &'a RenderOptions,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine borrowing a font set and options.
    pub fn new(fonts: &'a FontSet, options: &'a RenderOptions) -> Self {
        Self { fonts, options }
    }

    /// Lay out `doc`. Every located image is placed once, either under its
    /// section heading or in the trailing sweep, unless it fails to decode.
    pub fn layout(&self, doc: &Document, located: LocatedImages) -> LaidOutDocument {
        let missing = located.missing.len();
        let mut index = ImageIndex::new(located.images);
        let consumed = self.consumed_lines(&index);

        let mut state = LayoutState::new(self.fonts, self.options);
        state.stats.images_located = index.len() as u32;
        state.stats.images_missing = missing as u32;

        for (i, kind) in doc.classify().into_iter().enumerate() {
            if consumed.contains(&i) {
                continue;
            }
            state.line(kind, &mut index);
        }

        let remaining = index.take_remaining();
        if !remaining.is_empty() {
            let heading = &self.options.sweep_heading;
            log::debug!("Sweeping {} unplaced images under {:?}", remaining.len(), heading);
            state.leave_list();
            state.heading(2, heading);
            let describe = self.options.is_visual_heading(heading);
            for i in remaining {
                if let Some(image) = index.get(i) {
                    state.image(image, describe, Placement::Swept);
                }
            }
        }

        state.finish(doc.title().map(|t| sanitize(&t)))
    }

    /// Source lines rendered as part of an image instead of on their own.
    fn consumed_lines(&self, index: &ImageIndex) -> HashSet<usize> {
        let sweep_describes = self.options.is_visual_heading(&self.options.sweep_heading);
        let mut consumed = HashSet::new();
        for image in index.images() {
            consumed.extend(image.caption_line);
            let describes = if image.has_section() {
                self.options.is_visual_heading(&image.section)
            } else {
                sweep_describes
            };
            if describes {
                consumed.extend(image.description_line);
            }
        }
        consumed
    }
}

struct LayoutState<'a> {
    fonts: &'a FontSet,
    options: &'a RenderOptions,
    cursor: LayoutCursor,
    pages: Vec<LaidOutPage>,
    images: Vec<EncodedImage>,
    stats: RenderStats,
    list: ListState,
}

impl<'a> LayoutState<'a> {
    fn new(fonts: &'a FontSet, options: &'a RenderOptions) -> Self {
        Self {
            fonts,
            options,
            cursor: LayoutCursor::new(options.geometry),
            pages: vec![LaidOutPage::new(1)],
            images: Vec::new(),
            stats: RenderStats::new(),
            list: ListState::Normal,
        }
    }

    fn line(&mut self, kind: LineKind, index: &mut ImageIndex) {
        if !kind.is_bullet() {
            self.leave_list();
        }

        match kind {
            LineKind::Blank => self.cursor.gap(self.options.spacing.blank_line),
            LineKind::Heading { level, text } => {
                self.heading(level, &text);
                if level == 2 {
                    let describe = self.options.is_visual_heading(&text);
                    for i in index.take_section(&text) {
                        if let Some(image) = index.get(i) {
                            self.image(image, describe, Placement::Inline);
                        }
                    }
                }
            }
            LineKind::ImageMarker { .. } => {}
            LineKind::Rule => self.rule(),
            LineKind::Emphasis { text, bold } => {
                let face = if bold { FontFace::Bold } else { FontFace::Italic };
                let text = sanitize(&strip_image_markers(&text));
                let style = self.options.typography.body;
                let left = self.options.geometry.margin_left;
                let width = self.options.geometry.printable_width();
                for line in self.wrap_plain(&text, face, style.size, width) {
                    self.row(vec![TextSegment::new(line, face)], left, style);
                }
                self.stats.paragraph_count += 1;
            }
            LineKind::Bullet { text } => self.bullet(&text),
            LineKind::Paragraph { text } => self.paragraph(&text),
        }
    }

    fn leave_list(&mut self) {
        if self.list == ListState::InsideBulletList {
            self.cursor.gap(self.options.spacing.list_gap);
            self.list = ListState::Normal;
        }
    }

    fn heading(&mut self, level: u8, text: &str) {
        let style = self.options.typography.heading(level);
        let text = sanitize(&strip_image_markers(text));
        let left = self.options.geometry.margin_left;
        let width = self.options.geometry.printable_width();
        for line in self.wrap_plain(&text, FontFace::Bold, style.size, width) {
            self.row(vec![TextSegment::new(line, FontFace::Bold)], left, style);
        }
        if level <= 2 {
            self.rule();
        }
        self.stats.heading_count += 1;
    }

    fn rule(&mut self) {
        let gap = self.options.spacing.rule_gap;
        let g = self.options.geometry;
        let top = self.reserve(gap * 2.0);
        self.push(Element::Rule {
            x1: g.margin_left,
            x2: g.width - g.margin_right,
            y: top + gap,
        });
        self.cursor.advance(gap * 2.0);
    }

    fn paragraph(&mut self, text: &str) {
        let text = sanitize(&strip_image_markers(text));
        if text.trim().is_empty() {
            return;
        }
        let g = self.options.geometry;
        let style = self.options.typography.body;
        for line in self.wrap_styled(&text, g.printable_width(), style.size) {
            self.row(line, g.margin_left, style);
        }
        self.stats.paragraph_count += 1;
    }

    fn bullet(&mut self, text: &str) {
        if self.list == ListState::Normal {
            self.cursor.gap(self.options.spacing.list_gap);
            self.list = ListState::InsideBulletList;
        }

        let g = self.options.geometry;
        let style = self.options.typography.body;
        let indent = self.options.spacing.bullet_indent;
        let text = sanitize(&strip_image_markers(text));

        let lines = self.wrap_styled(&text, g.printable_width() - indent, style.size);
        for (i, line) in lines.into_iter().enumerate() {
            let top = self.row(line, g.margin_left + indent, style);
            if i == 0 {
                self.push(Element::Bullet {
                    cx: g.margin_left + indent * 0.4,
                    cy: top + style.line_height / 2.0,
                    radius: style.size * 0.16,
                });
            }
        }
        self.stats.bullet_count += 1;
    }

    fn image(&mut self, reference: &ImageReference, describe: bool, placement: Placement) {
        let encoded = match load_image(&reference.path) {
            Ok(encoded) => encoded,
            Err(e) => {
                log::error!("Skipping image {}: {}", reference.path.display(), e);
                self.stats.images_failed += 1;
                return;
            }
        };

        let g = self.options.geometry;
        let (width, height) = self.image_size(&encoded);
        let top = self.reserve(height);
        let image = self.images.len();
        self.images.push(encoded);
        self.push(Element::Image {
            image,
            x: g.margin_left + (g.printable_width() - width) / 2.0,
            top,
            width,
            height,
        });
        self.cursor.advance(height);

        let style = self.options.typography.caption;
        if let Some(caption) = &reference.caption {
            self.centered(caption, FontFace::Italic, style);
        }
        if describe {
            if let Some(description) = &reference.description {
                self.centered(description, FontFace::Italic, style);
            }
        }
        self.cursor.gap(self.options.spacing.image_gap);

        match placement {
            Placement::Inline => self.stats.images_inline += 1,
            Placement::Swept => self.stats.images_swept += 1,
        }
    }

    /// Width and height in points for an image, keeping its aspect ratio.
    fn image_size(&self, image: &EncodedImage) -> (f32, f32) {
        let g = self.options.geometry;
        let mut width = g
            .printable_width()
            .min(g.width * self.options.max_image_width_fraction);
        let mut height = width * image.aspect_ratio();
        if height > g.printable_height() {
            width *= g.printable_height() / height;
            height = g.printable_height();
        }
        (width, height)
    }

    fn centered(&mut self, text: &str, face: FontFace, style: TextStyle) {
        let text = sanitize(text);
        let g = self.options.geometry;
        for line in self.wrap_plain(&text, face, style.size, g.printable_width()) {
            let width = self.fonts.string_width(&line, face, style.size);
            let x = g.margin_left + ((g.printable_width() - width) / 2.0).max(0.0);
            self.row(vec![TextSegment::new(line, face)], x, style);
        }
    }

    fn wrap_plain(&self, text: &str, face: FontFace, size: f32, width: f32) -> Vec<String> {
        let fonts = self.fonts;
        wrap_words(text, width, |s| fonts.string_width(s, face, size))
    }

    /// Wrap text with `**bold**` runs into rows of segments.
    fn wrap_styled(&self, text: &str, width: f32, size: f32) -> Vec<Vec<TextSegment>> {
        if !has_bold_runs(text) {
            return self
                .wrap_plain(text, FontFace::Regular, size, width)
                .into_iter()
                .map(|line| vec![TextSegment::new(line, FontFace::Regular)])
                .collect();
        }
        let runs = split_bold_runs(text);
        let styled: Vec<(&str, FontFace)> = runs
            .iter()
            .map(|r| {
                let face = if r.bold { FontFace::Bold } else { FontFace::Regular };
                (r.text.as_str(), face)
            })
            .collect();
        wrap_runs(&styled, width, self.fonts, size)
            .into_iter()
            .map(|line| line.segments)
            .collect()
    }

    /// Place one text row and return its top offset.
    fn row(&mut self, segments: Vec<TextSegment>, x: f32, style: TextStyle) -> f32 {
        let top = self.reserve(style.line_height);
        self.push(Element::Text {
            x,
            top,
            height: style.line_height,
            size: style.size,
            segments,
        });
        self.cursor.advance(style.line_height);
        top
    }

    /// Break the page if `height` does not fit and return the top offset.
    fn reserve(&mut self, height: f32) -> f32 {
        if self.cursor.ensure_room(height) {
            log::debug!("Page break, starting page {}", self.cursor.page());
            self.pages.push(LaidOutPage::new(self.cursor.page()));
        }
        self.cursor.offset()
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn finish(mut self, title: Option<String>) -> LaidOutDocument {
        self.stats.page_count = self.pages.len() as u32;
        LaidOutDocument {
            geometry: self.options.geometry,
            pages: self.pages,
            images: self.images,
            title,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ImageLocator;
    use crate::render::PageGeometry;
    use std::path::Path;

    fn layout(markdown: &str, base: &Path, options: &RenderOptions) -> LaidOutDocument {
        let doc = Document::from_markdown(markdown);
        let located = ImageLocator::new(base).locate(&doc);
        LayoutEngine::new(&FontSet::standard(), options).layout(&doc, located)
    }

    fn tops(page: &LaidOutPage) -> Vec<f32> {
        page.elements
            .iter()
            .filter(|e| e.is_text())
            .map(|e| e.bounds().0)
            .collect()
    }

    #[test]
    fn test_headings_get_rules() {
        let options = RenderOptions::default();
        let laid_out = layout("# Title\n## Section\n### Detail", Path::new("."), &options);
        let rules = laid_out.pages[0]
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Rule { .. }))
            .count();
        assert_eq!(rules, 2);
        assert_eq!(laid_out.stats.heading_count, 3);
        assert_eq!(laid_out.title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_bold_label_segments() {
        let options = RenderOptions::default();
        let laid_out = layout("**Sprint**: 12", Path::new("."), &options);
        match &laid_out.pages[0].elements[0] {
            Element::Text { segments, .. } => {
                assert_eq!(segments[0], TextSegment::new("Sprint", FontFace::Bold));
                assert_eq!(segments[1], TextSegment::new(": 12", FontFace::Regular));
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_list_gap_on_enter_and_leave() {
        let options = RenderOptions::default();
        let laid_out = layout("Intro\n- one\n- two\nOutro", Path::new("."), &options);
        let tops = tops(&laid_out.pages[0]);
        let body = options.typography.body.line_height;
        let gap = options.spacing.list_gap;

        assert_eq!(tops.len(), 4);
        assert!((tops[1] - tops[0] - (body + gap)).abs() < 1e-3);
        assert!((tops[2] - tops[1] - body).abs() < 1e-3);
        assert!((tops[3] - tops[2] - (body + gap)).abs() < 1e-3);
        assert_eq!(laid_out.stats.bullet_count, 2);
    }

    #[test]
    fn test_blank_gap_skipped_at_page_top() {
        let options = RenderOptions::default();
        let laid_out = layout("\n\nFirst", Path::new("."), &options);
        assert_eq!(tops(&laid_out.pages[0]), vec![options.geometry.margin_top]);
    }

    #[test]
    fn test_sanitized_text_and_stripped_markers() {
        let options = RenderOptions::default();
        let laid_out = layout("✅ Done ![x](x.png) — next", Path::new("."), &options);
        assert_eq!(laid_out.pages[0].text_rows(), vec!["[v] Done - next".to_string()]);
    }

    #[test]
    fn test_shared_caption_renders_once() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png"] {
            image::RgbImage::new(40, 20).save(dir.path().join(name)).unwrap();
        }

        let options = RenderOptions::default();
        let laid_out = layout(
            "## Charts\n![A](a.png) ![B](b.png)\n*Both charts.*",
            dir.path(),
            &options,
        );

        let page = &laid_out.pages[0];
        assert_eq!(page.text_rows(), vec!["Charts", "Both charts."]);
        assert_eq!(page.image_count(), 2);
        assert_eq!(laid_out.stats.images_inline, 2);

        let kinds: Vec<bool> = page
            .elements
            .iter()
            .filter(|e| e.is_text() || e.is_image())
            .map(Element::is_image)
            .collect();
        assert_eq!(kinds, vec![false, true, true, false]);
    }

    #[test]
    fn test_image_with_caption_and_description() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::new(200, 100)
            .save(dir.path().join("burn.png"))
            .unwrap();

        let markdown = "## Charts & Visuals\nDescription: Weekly burn\n![Burn](burn.png)\n*Shows burn rate.*";
        let options = RenderOptions::default();
        let laid_out = layout(markdown, dir.path(), &options);

        let page = &laid_out.pages[0];
        assert_eq!(page.image_count(), 1);
        assert_eq!(
            page.text_rows(),
            vec!["Charts & Visuals", "Shows burn rate.", "Weekly burn"]
        );
        assert_eq!(laid_out.stats.images_inline, 1);

        let g = options.geometry;
        match page.elements.iter().find(|e| e.is_image()) {
            Some(Element::Image { x, width, height, .. }) => {
                let expected = g.printable_width().min(g.width * 0.8);
                assert!((width - expected).abs() < 1e-3);
                assert!((height - expected / 2.0).abs() < 1e-3);
                assert!((x + width / 2.0 - g.width / 2.0).abs() < 1e-3);
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_description_kept_as_text_outside_visual_sections() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::new(10, 10)
            .save(dir.path().join("risk.png"))
            .unwrap();

        let markdown = "## Risk Analysis\nDescription: heat map\n![Risk](risk.png)";
        let laid_out = layout(markdown, dir.path(), &RenderOptions::default());
        let rows = laid_out.pages[0].text_rows();
        assert_eq!(rows, vec!["Risk Analysis", "Description: heat map"]);
    }

    #[test]
    fn test_unsectioned_image_is_swept() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::new(10, 10)
            .save(dir.path().join("cover.png"))
            .unwrap();

        let markdown = "# Report\n![Cover](cover.png)\n## Summary\nAll good.";
        let laid_out = layout(markdown, dir.path(), &RenderOptions::default());
        assert_eq!(laid_out.stats.images_swept, 1);
        assert_eq!(laid_out.stats.images_inline, 0);

        let rows: Vec<String> = laid_out.pages.iter().flat_map(|p| p.text_rows()).collect();
        assert_eq!(rows.last().map(String::as_str), Some("Charts & Visuals"));
    }

    #[test]
    fn test_undecodable_image_is_skipped_with_caption() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"\x89PNG\r\n\x1a\ngarbage").unwrap();

        let markdown = "## Charts\n![Bad](bad.png)\n*Never shown*\nAfter";
        let laid_out = layout(markdown, dir.path(), &RenderOptions::default());
        assert_eq!(laid_out.stats.images_failed, 1);
        assert_eq!(laid_out.stats.images_swept, 0);
        assert!(laid_out.images.is_empty());
        assert_eq!(laid_out.pages[0].text_rows(), vec!["Charts", "After"]);
    }

    #[test]
    fn test_tall_image_scaled_to_printable_height() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::new(10, 100)
            .save(dir.path().join("tall.png"))
            .unwrap();

        let options = RenderOptions::new().with_geometry(PageGeometry::new(300.0, 400.0, 20.0));
        let laid_out = layout("## Visuals\n![Tall](tall.png)", dir.path(), &options);
        let image = laid_out
            .elements()
            .find(|(_, e)| e.is_image())
            .map(|(_, e)| e.bounds());
        let (top, bottom) = image.unwrap();
        assert!((bottom - top - 360.0).abs() < 1e-3);
        assert!(bottom <= 380.0 + 1e-3);
    }
}

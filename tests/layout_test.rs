//! Integration tests for pagination and image placement.

use std::path::Path;

use proptest::prelude::*;
use reportpdf::layout::{wrap_runs, wrap_words, Element, FontFace, FontSet, LaidOutDocument, LayoutEngine};
use reportpdf::model::Document;
use reportpdf::parser::ImageLocator;
use reportpdf::{PageGeometry, RenderOptions, TextStyle};

fn layout(markdown: &str, base: &Path, options: &RenderOptions) -> LaidOutDocument {
    let doc = Document::from_markdown(markdown);
    let located = ImageLocator::new(base).locate(&doc);
    LayoutEngine::new(&FontSet::standard(), options).layout(&doc, located)
}

/// 300x432pt page, 36pt margins and 18pt body rows: exactly 20 rows per page.
fn twenty_row_options() -> RenderOptions {
    let mut options = RenderOptions::new().with_geometry(PageGeometry::new(300.0, 432.0, 36.0));
    options.typography.body = TextStyle::new(11.0, 18.0);
    options
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]))
        .save(dir.join(name))
        .unwrap();
}

fn assert_within_printable_area(doc: &LaidOutDocument) {
    let g = doc.geometry;
    for (page, element) in doc.elements() {
        let (top, bottom) = element.bounds();
        assert!(
            top >= g.margin_top - 1e-3 && bottom <= g.content_bottom() + 1e-3,
            "element on page {} outside printable area: {:?}",
            page,
            element
        );
    }
}

#[test]
fn test_forty_two_row_paragraphs_fill_four_pages() {
    let paragraph = vec!["aaaa"; 12].join(" ");
    let markdown = vec![paragraph.as_str(); 40].join("\n");

    let options = twenty_row_options();
    let doc = layout(&markdown, Path::new("."), &options);

    assert_eq!(doc.page_count(), 4);
    assert_eq!(doc.stats.page_count, 4);
    assert_eq!(doc.stats.paragraph_count, 40);
    for page in &doc.pages {
        assert_eq!(page.text_rows().len(), 20);
    }
    assert_within_printable_area(&doc);
}

#[test]
fn test_paragraph_breaks_between_rows_only() {
    let paragraph = vec!["aaaa"; 12].join(" ");
    // 19 single rows, then a two-row paragraph straddling the break
    let mut lines = vec!["row"; 19];
    lines.push(paragraph.as_str());
    let doc = layout(&lines.join("\n"), Path::new("."), &twenty_row_options());

    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages[0].text_rows().len(), 20);
    assert_eq!(doc.pages[1].text_rows().len(), 1);
}

#[test]
fn test_three_bullets_are_consecutive_rows() {
    let options = RenderOptions::default();
    let doc = layout("- Fix login\n- Update docs\n- Ship v2", Path::new("."), &options);
    let page = &doc.pages[0];

    assert_eq!(page.text_rows(), vec!["Fix login", "Update docs", "Ship v2"]);
    let tops: Vec<f32> = page
        .elements
        .iter()
        .filter(|e| e.is_text())
        .map(|e| e.bounds().0)
        .collect();
    let row = options.typography.body.line_height;
    assert!((tops[1] - tops[0] - row).abs() < 1e-3);
    assert!((tops[2] - tops[1] - row).abs() < 1e-3);

    let dots = page
        .elements
        .iter()
        .filter(|e| matches!(e, Element::Bullet { .. }))
        .count();
    assert_eq!(dots, 3);
    assert_eq!(doc.stats.bullet_count, 3);
}

#[test]
fn test_wrapped_bullet_text_is_indented() {
    let options = twenty_row_options();
    let item = format!("- {}", vec!["aaaa"; 12].join(" "));
    let doc = layout(&item, Path::new("."), &options);
    let xs: Vec<f32> = doc.pages[0]
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::Text { x, .. } => Some(*x),
            _ => None,
        })
        .collect();

    let indent = options.geometry.margin_left + options.spacing.bullet_indent;
    assert!(xs.len() >= 2);
    assert!(xs.iter().all(|x| (x - indent).abs() < 1e-3));
}

#[test]
fn test_every_located_image_placed_once() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["cover.png", "burndown.png", "velocity.png", "risk.png"] {
        write_png(dir.path(), name, 120, 60);
    }

    let markdown = "\
# Sprint 12 Report
![Cover](cover.png)
## Sprint Burndown
![Burndown](burndown.png)
*Remaining points per day.*
## Charts & Visuals
![Velocity](velocity.png)
*Velocity by sprint.*
![Missing](missing.png)
## Risk Analysis
- Scope creep
![Risk](risk.png)
";
    let doc = layout(markdown, dir.path(), &RenderOptions::default());
    let stats = &doc.stats;

    assert_eq!(stats.images_located, 4);
    assert_eq!(stats.images_missing, 1);
    assert_eq!(stats.images_inline, 3);
    assert_eq!(stats.images_swept, 1);
    assert!(stats.images_accounted());

    let placed: usize = doc.pages.iter().map(|p| p.image_count()).sum();
    assert_eq!(placed, 4);
    assert_eq!(doc.images.len(), 4);

    let rows: Vec<String> = doc.pages.iter().flat_map(|p| p.text_rows()).collect();
    let captions = rows.iter().filter(|r| r.as_str() == "Remaining points per day.").count();
    assert_eq!(captions, 1);
}

#[test]
fn test_mixed_document_respects_page_bounds() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "wide.png", 400, 100);
    write_png(dir.path(), "tall.png", 50, 400);

    let mut markdown = String::from("# Long Report\n");
    for i in 0..12 {
        markdown.push_str(&format!("## Section {}\n", i));
        markdown.push_str("The team completed **21** points with **5** carried over into the next sprint.\n");
        markdown.push_str("- **Blocker**: waiting on API keys from the vendor\n- Second item\n");
        markdown.push_str("---\n\n");
        if i % 3 == 0 {
            markdown.push_str("![Wide](wide.png)\n*Wide chart*\n![Tall](tall.png)\n");
        }
    }

    let options = RenderOptions::new().with_geometry(PageGeometry::new(320.0, 400.0, 30.0));
    let doc = layout(&markdown, dir.path(), &options);

    assert!(doc.page_count() > 3);
    assert_within_printable_area(&doc);
    assert_eq!(doc.stats.images_inline, 8);
    for (i, page) in doc.pages.iter().enumerate() {
        assert_eq!(page.number as usize, i + 1);
    }
}

#[test]
fn test_empty_document_has_one_page() {
    let doc = layout("", Path::new("."), &RenderOptions::default());
    assert_eq!(doc.page_count(), 1);
    assert!(doc.pages[0].elements.is_empty());
    assert!(doc.title.is_none());
}

proptest! {
    #[test]
    fn prop_wrapped_lines_fit_and_keep_words(
        words in prop::collection::vec("[A-Za-z0-9.,:%()-]{1,24}", 0..60),
        limit in 20.0f32..500.0,
    ) {
        let fonts = FontSet::standard();
        let measure = |s: &str| fonts.string_width(s, FontFace::Regular, 11.0);
        let text = words.join(" ");
        let lines = wrap_words(&text, limit, measure);

        for line in &lines {
            if line.contains(' ') {
                prop_assert!(measure(line) <= limit + 1e-3, "{:?} wider than {}", line, limit);
            }
        }

        let rejoined = lines.join(" ");
        let rejoined: Vec<&str> = rejoined.split_whitespace().collect();
        prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_styled_rows_fit_and_keep_words(
        runs in prop::collection::vec(("[a-z ]{0,30}", any::<bool>()), 0..12),
        limit in 20.0f32..400.0,
    ) {
        let fonts = FontSet::standard();
        let styled: Vec<(&str, FontFace)> = runs
            .iter()
            .map(|(text, bold)| {
                let face = if *bold { FontFace::Bold } else { FontFace::Regular };
                (text.as_str(), face)
            })
            .collect();
        let lines = wrap_runs(&styled, limit, &fonts, 11.0);

        for line in &lines {
            let measured: f32 = line
                .segments
                .iter()
                .map(|s| fonts.string_width(&s.text, s.face, 11.0))
                .sum();
            prop_assert!((measured - line.width).abs() < 1e-2);
            if line.text().contains(' ') {
                prop_assert!(line.width <= limit + 1e-3, "{:?} wider than {}", line.text(), limit);
            }
        }

        let source: String = runs.iter().map(|(text, _)| text.as_str()).collect();
        let rejoined = lines.iter().map(|l| l.text()).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            source.split_whitespace().collect::<Vec<_>>()
        );
    }
}

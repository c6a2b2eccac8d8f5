//! Serialization of laid-out pages to PDF bytes.

use super::image::compress;
use crate::error::Result;
use crate::layout::{Element, FontFace, LaidOutDocument, LaidOutPage};
use crate::render::RenderOptions;
use chrono::{Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::path::Path;

/// Control point offset for approximating a quarter circle with a cubic.
const KAPPA: f32 = 0.552_284_8;

/// Writes a [`LaidOutDocument`] with the standard Type1 fonts.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    compress: bool,
    creator: String,
}

impl PdfWriter {
    /// Create a writer with compression on.
    pub fn new() -> Self {
        Self {
            compress: true,
            creator: format!("reportpdf {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a writer configured from render options.
    pub fn from_options(options: &RenderOptions) -> Self {
        Self {
            compress: options.compress,
            creator: options.creator.clone(),
        }
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Produce the PDF bytes.
    pub fn write(&self, doc: &LaidOutDocument) -> Result<Vec<u8>> {
        let mut pdf = Pdf::new();
        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let pages_id = alloc.bump();
        let info_id = alloc.bump();

        let fonts: Vec<(FontFace, Ref)> = FontFace::ALL.iter().map(|&f| (f, alloc.bump())).collect();
        for (face, id) in &fonts {
            pdf.type1_font(*id)
                .base_font(Name(face.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let mut xobjects: Vec<(String, Ref)> = Vec::with_capacity(doc.images.len());
        for (i, image) in doc.images.iter().enumerate() {
            let id = alloc.bump();
            let mask_id = match &image.alpha {
                Some(alpha) => {
                    let mask_id = alloc.bump();
                    let mut mask = pdf.image_xobject(mask_id, alpha);
                    mask.filter(Filter::FlateDecode);
                    mask.width(image.width as i32);
                    mask.height(image.height as i32);
                    mask.color_space().device_gray();
                    mask.bits_per_component(8);
                    Some(mask_id)
                }
                None => None,
            };

            let mut xobj = pdf.image_xobject(id, &image.rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(image.width as i32);
            xobj.height(image.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_id) = mask_id {
                xobj.s_mask(mask_id);
            }
            xobj.finish();
            xobjects.push((image_name(i), id));
        }

        let g = doc.geometry;
        let mut page_ids = Vec::with_capacity(doc.pages.len());
        for page in &doc.pages {
            let page_id = alloc.bump();
            let content_id = alloc.bump();

            let raw = self.page_content(page, g.height).finish();
            if self.compress {
                let compressed = compress(&raw)?;
                pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);
            } else {
                pdf.stream(content_id, &raw);
            }

            let mut writer = pdf.page(page_id);
            writer
                .media_box(Rect::new(0.0, 0.0, g.width, g.height))
                .parent(pages_id)
                .contents(content_id);
            let mut resources = writer.resources();
            {
                let mut font_dict = resources.fonts();
                for (face, id) in &fonts {
                    font_dict.pair(Name(face.resource_name().as_bytes()), *id);
                }
            }
            if !xobjects.is_empty() {
                let mut dict = resources.x_objects();
                for (name, id) in &xobjects {
                    dict.pair(Name(name.as_bytes()), *id);
                }
            }
            resources.finish();
            writer.finish();
            page_ids.push(page_id);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        let mut info = pdf.document_info(info_id);
        if let Some(title) = &doc.title {
            info.title(TextStr(title));
        }
        info.creator(TextStr(&self.creator));
        info.creation_date(now());
        info.finish();

        log::debug!(
            "Serialized {} pages, {} images",
            page_ids.len(),
            doc.images.len()
        );
        Ok(pdf.finish())
    }

    /// Produce the PDF and write it to `path`.
    pub fn write_to(&self, doc: &LaidOutDocument, path: &Path) -> Result<()> {
        let bytes = self.write(doc)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn page_content(&self, page: &LaidOutPage, page_height: f32) -> Content {
        let mut content = Content::new();
        for element in &page.elements {
            match element {
                Element::Text {
                    x,
                    top,
                    height,
                    size,
                    segments,
                } => {
                    let baseline = page_height - (top + height * 0.5 + size * 0.35);
                    content.begin_text();
                    content.next_line(*x, baseline);
                    let mut current: Option<FontFace> = None;
                    for segment in segments {
                        if current != Some(segment.face) {
                            content.set_font(Name(segment.face.resource_name().as_bytes()), *size);
                            current = Some(segment.face);
                        }
                        content.show(Str(segment.text.as_bytes()));
                    }
                    content.end_text();
                }
                Element::Rule { x1, x2, y } => {
                    content.set_line_width(0.5);
                    content.move_to(*x1, page_height - y);
                    content.line_to(*x2, page_height - y);
                    content.stroke();
                }
                Element::Bullet { cx, cy, radius } => {
                    circle(&mut content, *cx, page_height - cy, *radius);
                    content.fill_nonzero();
                }
                Element::Image {
                    image,
                    x,
                    top,
                    width,
                    height,
                } => {
                    let name = image_name(*image);
                    content.save_state();
                    content.transform([*width, 0.0, 0.0, *height, *x, page_height - top - height]);
                    content.x_object(Name(name.as_bytes()));
                    content.restore_state();
                }
            }
        }
        content
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn circle(content: &mut Content, cx: f32, cy: f32, r: f32) {
    let k = KAPPA * r;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
}

fn now() -> Date {
    let now = Utc::now();
    Date::new(now.year().clamp(0, 9999) as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(0)
}

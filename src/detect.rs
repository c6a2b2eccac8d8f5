//! Raster image format detection for referenced chart files.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raster formats accepted for embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
}

impl ImageFormat {
    /// Matching decoder format.
    pub fn decoder_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }

    /// MIME type of the format.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// PNG signature: \x89PNG\r\n\x1a\n
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
/// JPEG SOI marker followed by any marker prefix
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Detect the image format from the first bytes of a file.
///
/// # Example
/// ```no_run
/// use reportpdf::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("reports/burndown_chart.png").unwrap();
/// println!("format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(PNG_MAGIC.len());
    reader
        .by_ref()
        .take(PNG_MAGIC.len() as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header).ok_or_else(|| Error::UnknownImageFormat(path.to_path_buf()))
}

/// Detect the image format from bytes.
///
/// Returns `None` when the data is neither PNG nor JPEG.
pub fn detect_format_from_bytes(data: &[u8]) -> Option<ImageFormat> {
    if data.starts_with(PNG_MAGIC) {
        Some(ImageFormat::Png)
    } else if data.starts_with(JPEG_MAGIC) {
        Some(ImageFormat::Jpeg)
    } else {
        None
    }
}

/// Check if bytes look like an embeddable raster image.
pub fn is_supported_image(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_some()
}

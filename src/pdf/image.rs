//! Image decoding for embedding as PDF image XObjects.

use crate::detect::{detect_format_from_bytes, ImageFormat};
use crate::error::{Error, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A decoded image, Flate-compressed and split into color and alpha planes.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// File the image was read from
    pub source: PathBuf,
    /// Source format
    pub format: ImageFormat,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Zlib-compressed 8-bit RGB samples
    pub rgb: Vec<u8>,
    /// Zlib-compressed 8-bit alpha samples, if any pixel is translucent
    pub alpha: Option<Vec<u8>>,
}

impl EncodedImage {
    /// Height over width.
    pub fn aspect_ratio(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

/// Read and decode a PNG or JPEG file.
pub fn load_image(path: &Path) -> Result<EncodedImage> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::ImageMissing(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    decode_image(path, &data)
}

/// Decode image bytes that were read from `path`.
pub fn decode_image(path: &Path, data: &[u8]) -> Result<EncodedImage> {
    let format =
        detect_format_from_bytes(data).ok_or_else(|| Error::UnknownImageFormat(path.to_path_buf()))?;

    let decoded = image::load_from_memory_with_format(data, format.decoder_format()).map_err(|e| {
        Error::ImageDecode {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::ImageDecode {
            path: path.to_path_buf(),
            message: "image has no pixels".into(),
        });
    }

    let rgb: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
    let alpha = if has_alpha {
        let samples: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
        Some(compress(&samples)?)
    } else {
        None
    };

    Ok(EncodedImage {
        source: path.to_path_buf(),
        format,
        width,
        height,
        rgb: compress(&rgb)?,
        alpha,
    })
}

/// Zlib-compress a byte buffer.
pub(crate) fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

//! Error types for reportpdf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for reportpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a report.
///
/// Only [`Error::SourceNotFound`], [`Error::Io`] and [`Error::InvalidOptions`]
/// escape a render. Image-level errors are logged and counted in
/// [`RenderStats`](crate::RenderStats) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The markdown source file does not exist.
    #[error("Markdown source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A referenced image file does not exist.
    #[error("Image not found: {}", .0.display())]
    ImageMissing(PathBuf),

    /// The image bytes are neither PNG nor JPEG.
    #[error("Unknown image format: {}", .0.display())]
    UnknownImageFormat(PathBuf),

    /// The image exists but could not be decoded.
    #[error("Failed to decode image {}: {message}", .path.display())]
    ImageDecode {
        /// Image location
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// Render options are inconsistent (e.g. margins wider than the page).
    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    /// Error while producing the PDF stream.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(err.to_string())
    }
}

impl Error {
    /// Whether this error is recovered locally during a render.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ImageMissing(_) | Error::UnknownImageFormat(_) | Error::ImageDecode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::SourceNotFound(PathBuf::from("reports/sprint.md"));
        assert_eq!(
            err.to_string(),
            "Markdown source not found: reports/sprint.md"
        );

        let err = Error::ImageDecode {
            path: PathBuf::from("chart.png"),
            message: "truncated".into(),
        };
        assert_eq!(err.to_string(), "Failed to decode image chart.png: truncated");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::ImageMissing(PathBuf::from("a.png")).is_recoverable());
        assert!(Error::UnknownImageFormat(PathBuf::from("a.gif")).is_recoverable());
        assert!(!Error::SourceNotFound(PathBuf::from("a.md")).is_recoverable());
        assert!(!Error::InvalidOptions("margins".into()).is_recoverable());
    }
}

//! Document model types for markdown report content.
//!
//! This module defines the intermediate representation between the raw
//! markdown text and the layout engine: the loaded document, the tagged
//! classification of each line, and the images referenced by the report.

mod document;
mod image;
mod line;

pub use document::Document;
pub use image::{ImageIndex, ImageReference};
pub use line::{classify_line, LineKind};

pub(crate) use line::{caption_text, marker_target, IMAGE_MARKER};

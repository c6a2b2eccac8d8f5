//! Pagination: font metrics, word wrapping and element placement.

mod cursor;
mod engine;
mod metrics;
mod page;
mod wrap;

pub use cursor::LayoutCursor;
pub use engine::LayoutEngine;
pub use metrics::{FontFace, FontMetrics, FontSet};
pub use page::{Element, LaidOutDocument, LaidOutPage, TextSegment};
pub use wrap::{wrap_runs, wrap_words, WrappedLine};

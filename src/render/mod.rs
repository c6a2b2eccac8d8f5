//! Rendering configuration, text preparation and results.

mod options;
mod result;
mod sanitize;
mod text;

pub use options::{
    PageGeometry, RenderOptions, Spacing, TextStyle, Typography, DEFAULT_SWEEP_HEADING,
};
pub use result::{RenderResult, RenderStats};
pub use sanitize::{is_sanitized, replacement, sanitize};
pub use text::to_text;

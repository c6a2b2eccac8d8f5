//! Markdown scanning: image markers, inline runs and report sections.

mod images;
mod inline;
mod sections;

pub use images::{locate_images, ImageLocator, LocatedImages, DEFAULT_DESCRIPTION_PREFIX};
pub use inline::{has_bold_runs, split_bold_runs, strip_image_markers, InlineRun};
pub use sections::{extract_key_sections, extract_section, KeySections};

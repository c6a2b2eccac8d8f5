//! PDF output: image embedding and document serialization.

mod image;
mod writer;

pub use self::image::{decode_image, load_image, EncodedImage};
pub use writer::PdfWriter;

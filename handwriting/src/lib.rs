//! # handwriting
//!
//! Turns an answer text into a simulated handwritten notebook page: white
//! canvas, dark-blue ink, left margin, greedy word wrapping, JPEG output.
//! The canvas grows vertically to fit the text; width is fixed by [`PageStyle`].
//!
//! The renderer is pure and synchronous: same text + same style produces
//! byte-identical output, and concurrent calls share nothing but the loaded font.

mod font;
mod render;
mod wrap;

pub use font::PageFont;
pub use render::{HandwritingRenderer, PageStyle, RenderError};
pub use wrap::wrap_text;

//! Page layout and rasterization: wrapped lines onto a white canvas, JPEG out.

use std::io::Cursor;

use ab_glyph::PxScale;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use thiserror::Error;
use tracing::debug;

use crate::font::PageFont;
use crate::wrap::wrap_text;

/// Average glyph width as a fraction of the font size. An empirical constant,
/// not a measured advance: line breaks intentionally reproduce the original
/// notebook layout rather than exact proportional-font metrics.
const GLYPH_WIDTH_FACTOR: f32 = 0.6;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Fixed page configuration. All dimensions in pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStyle {
    pub width: u32,
    pub font_size: u32,
    pub line_spacing: u32,
    pub margin: u32,
    /// Pages never shrink below this, so short answers still look like a page.
    pub min_height: u32,
    pub ink: Rgb<u8>,
    pub jpeg_quality: u8,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            font_size: 40,
            line_spacing: 10,
            margin: 50,
            min_height: 1000,
            ink: Rgb([0, 0, 150]),
            jpeg_quality: 85,
        }
    }
}

impl PageStyle {
    /// Per-line character budget: usable width over the estimated glyph width.
    pub fn chars_per_line(&self) -> usize {
        let usable = self.width.saturating_sub(2 * self.margin) as f32;
        let budget = (usable / (self.font_size as f32 * GLYPH_WIDTH_FACTOR)) as usize;
        budget.max(1)
    }

    /// Canvas height for `line_count` wrapped lines, clamped to `min_height`.
    pub fn page_height(&self, line_count: usize) -> u32 {
        let text_height = line_count as u32 * (self.font_size + self.line_spacing);
        self.min_height.max(text_height + 2 * self.margin)
    }
}

/// Renders answer text as a handwritten-style notebook page.
///
/// Stateless apart from the loaded font; one allocation per call, no I/O.
#[derive(Clone)]
pub struct HandwritingRenderer {
    style: PageStyle,
    font: PageFont,
}

impl HandwritingRenderer {
    pub fn new(font: PageFont) -> Self {
        Self::with_style(PageStyle::default(), font)
    }

    pub fn with_style(style: PageStyle, font: PageFont) -> Self {
        Self { style, font }
    }

    pub fn style(&self) -> &PageStyle {
        &self.style
    }

    /// Produces JPEG bytes for the given text. Empty text yields a blank page
    /// of `min_height`; the only error is a failed JPEG encode.
    pub fn render(&self, text: &str) -> Result<Vec<u8>, RenderError> {
        let lines = wrap_text(text, self.style.chars_per_line());
        let height = self.style.page_height(lines.len());

        debug!(
            lines = lines.len(),
            width = self.style.width,
            height,
            "Rendering handwriting page"
        );

        let mut page = RgbImage::from_pixel(self.style.width, height, Rgb([255, 255, 255]));
        let scale = PxScale::from(self.style.font_size as f32);
        let step = (self.style.font_size + self.style.line_spacing) as i32;
        let mut y = self.style.margin as i32;

        for line in &lines {
            if !line.is_empty() {
                draw_text_mut(
                    &mut page,
                    self.style.ink,
                    self.style.margin as i32,
                    y,
                    scale,
                    self.font.font(),
                    line,
                );
            }
            y += step;
        }

        let mut buf = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buf, self.style.jpeg_quality);
        page.write_with_encoder(encoder)?;
        Ok(buf.into_inner())
    }
}

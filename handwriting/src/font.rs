//! Font resolution: preferred handwriting face from disk, built-in fallback otherwise.
//!
//! A missing or unparsable font file must never fail a render, so the lookup
//! degrades to an embedded default face and logs the degradation once (the
//! font is loaded a single time at startup and shared from then on).

use std::fs;
use std::path::Path;

use ab_glyph::FontArc;
use tracing::{debug, warn};

/// DejaVu Sans, compiled in so a usable face is always available.
/// License: assets/DejaVuSans-LICENSE.txt.
static DEFAULT_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// The face used to draw page lines, plus whether it is the fallback.
#[derive(Clone)]
pub struct PageFont {
    font: FontArc,
    fallback: bool,
}

impl PageFont {
    /// Loads the handwriting face from `path`, falling back to the embedded
    /// default when the file is absent or not a parsable font.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read(path)
            .ok()
            .and_then(|data| FontArc::try_from_vec(data).ok())
        {
            Some(font) => {
                debug!(path = %path.display(), "Loaded handwriting font");
                Self {
                    font,
                    fallback: false,
                }
            }
            None => {
                warn!(
                    path = %path.display(),
                    "Handwriting font missing or unreadable, using built-in default face"
                );
                Self::default()
            }
        }
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    /// True when the embedded default face is in use instead of the preferred one.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl Default for PageFont {
    fn default() -> Self {
        let font =
            FontArc::try_from_slice(DEFAULT_FONT).expect("embedded default font must parse");
        Self {
            font,
            fallback: true,
        }
    }
}

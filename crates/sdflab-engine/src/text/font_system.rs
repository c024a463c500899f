use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use fontdue::{Font, FontSettings};

use crate::coords::Vec2;

/// Height of an empty line, relative to the font size.
const LINE_HEIGHT: f32 = 1.2;

/// Font bytes fontdue rejected.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to parse font: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Index of a font inside a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Fonts shared by layout and the text renderer.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| FontLoadError(e.to_string()))?;
        self.fonts.push(font);
        let id = FontId(self.fonts.len() - 1);
        log::debug!("font {id:?} loaded ({} bytes)", bytes.len());
        Ok(id)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(id.0)
    }

    /// Extent of `text` at `size` logical pixels, in logical pixels.
    ///
    /// Layout happens at `size * scale` so rounding matches what the text
    /// renderer rasterizes for the same `scale`. Unknown fonts and empty
    /// strings measure as one empty line.
    #[must_use]
    pub fn measure(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>, scale: f32) -> Vec2 {
        let blank = Vec2::new(0.0, size * LINE_HEIGHT);
        let Some(font) = self.get(id) else {
            return blank;
        };

        let scale = scale.max(0.01);
        let px = size * scale;
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width: max_width.map(|w| w * scale), ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, px, 0));

        // Measure to each glyph's advance so trailing spaces count.
        let right = layout.glyphs().iter().fold(None, |right: Option<f32>, g| {
            let m = font.metrics_indexed(g.key.glyph_index, px);
            let pen = (g.x - m.xmin as f32 + m.advance_width).max(0.0);
            Some(right.map_or(pen, |r| r.max(pen)))
        });
        match right {
            Some(width) => Vec2::new(width, layout.height().max(px)) / scale,
            None => blank,
        }
    }
}

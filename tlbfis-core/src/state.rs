//! Persistent drawing state
//!
//! Set once through the encoder's setters and applied to every following
//! frame until changed again.

use tlbfis_protocol::{Alignment, BitmapStyle, Color, Font, TextStyle, Transparency};

use crate::config::DEFAULT_LINE_SPACING;

/// Styles applied to text, bitmaps and shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawState {
    pub text: TextStyle,
    pub bitmap: BitmapStyle,
    /// Color of lines and rectangles
    pub draw_color: Color,
    /// Extra pixels between lines of multi-line text
    pub line_spacing: u8,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            text: TextStyle::default(),
            bitmap: BitmapStyle::default(),
            draw_color: Color::Normal,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

impl DrawState {
    pub fn with_line_spacing(line_spacing: u8) -> Self {
        Self {
            line_spacing,
            ..Self::default()
        }
    }

    /// Color used for text, bitmaps and shapes alike
    pub fn set_color(&mut self, color: Color) {
        self.text.color = color;
        self.bitmap.color = color;
        self.draw_color = color;
    }

    pub fn set_font(&mut self, font: Font) {
        self.text.font = font;
    }

    pub fn set_text_transparency(&mut self, transparency: Transparency) {
        self.text.transparency = transparency;
    }

    pub fn set_text_alignment(&mut self, alignment: Alignment) {
        self.text.alignment = alignment;
    }

    pub fn set_bitmap_transparency(&mut self, transparency: Transparency) {
        self.bitmap.transparency = transparency;
    }

    pub fn font(&self) -> Font {
        self.text.font
    }

    pub fn is_compact(&self) -> bool {
        self.text.font == Font::Compact
    }

    pub fn is_graphics(&self) -> bool {
        self.text.font == Font::Graphics
    }
}

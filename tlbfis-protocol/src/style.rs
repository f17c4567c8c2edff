//! Drawing style and its option-byte encoding
//!
//! The cluster firmware takes text and bitmap style as a bitmask in the
//! OPTIONS byte. Styles are kept as plain structs and packed only when a
//! frame is built, so the mapping can be tested on its own.
//!
//! Text option bits:
//! ```text
//! bit0  transparent (1) / opaque (0)
//! bit1  or-output, normal color (1) / xor-output, inverted color (0)
//! bit2  compact font
//! bit3  graphics font
//! bit4  right alignment (computed by the encoder, stripped before sending)
//! bit5  center alignment
//! ```
//! Bitmap option bits use bit0 and bit1 with the same meaning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const TEXT_TRANSPARENT: u8 = 0x01;
pub const TEXT_OR_OUTPUT: u8 = 0x02;
pub const TEXT_COMPACT: u8 = 0x04;
pub const TEXT_GRAPHICS: u8 = 0x08;
pub const TEXT_RIGHT: u8 = 0x10;
pub const TEXT_CENTER: u8 = 0x20;

pub const BITMAP_TRANSPARENT: u8 = 0x01;
pub const BITMAP_OR_OUTPUT: u8 = 0x02;

/// Draw color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    /// Lit pixels on a dark background
    #[default]
    Normal = 0,
    /// Dark pixels on a lit background
    Inverted = 1,
}

impl Color {
    /// The opposite color
    pub const fn inverse(self) -> Self {
        match self {
            Color::Normal => Color::Inverted,
            Color::Inverted => Color::Normal,
        }
    }

    /// 0 for Normal, 1 for Inverted, as added to clear option bytes
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// Text font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Font {
    /// Fixed 6 px wide characters
    #[default]
    Standard,
    /// Proportional characters (see the width table)
    Compact,
    /// Device-resident icons and segments, codes are not translated
    Graphics,
}

/// Text or bitmap transparency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Transparency {
    #[default]
    Opaque,
    Transparent,
}

/// Horizontal text alignment inside the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    #[default]
    Left,
    /// Centered by the cluster
    Center,
    /// Computed by the encoder from the text width
    Right,
}

/// Style of text frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextStyle {
    pub color: Color,
    pub font: Font,
    pub transparency: Transparency,
    pub alignment: Alignment,
}

impl TextStyle {
    /// Full option byte, including the local right-alignment bit
    pub const fn options(&self) -> u8 {
        let mut byte = 0;
        if matches!(self.transparency, Transparency::Transparent) {
            byte |= TEXT_TRANSPARENT;
        }
        if matches!(self.color, Color::Normal) {
            byte |= TEXT_OR_OUTPUT;
        }
        match self.font {
            Font::Standard => {}
            Font::Compact => byte |= TEXT_COMPACT,
            Font::Graphics => byte |= TEXT_GRAPHICS,
        }
        match self.alignment {
            Alignment::Left => {}
            Alignment::Center => byte |= TEXT_CENTER,
            Alignment::Right => byte |= TEXT_RIGHT,
        }
        byte
    }

    /// Option byte as sent on the bus (right-alignment bit stripped)
    pub const fn wire_options(&self) -> u8 {
        self.options() & !TEXT_RIGHT
    }

    /// Decode an option byte
    ///
    /// Graphics wins over compact when both bits are set, matching the
    /// cluster. Unknown bits (6, 7) are ignored.
    pub const fn from_options(byte: u8) -> Self {
        let font = if byte & TEXT_GRAPHICS != 0 {
            Font::Graphics
        } else if byte & TEXT_COMPACT != 0 {
            Font::Compact
        } else {
            Font::Standard
        };
        let alignment = if byte & TEXT_CENTER != 0 {
            Alignment::Center
        } else if byte & TEXT_RIGHT != 0 {
            Alignment::Right
        } else {
            Alignment::Left
        };
        Self {
            color: if byte & TEXT_OR_OUTPUT != 0 {
                Color::Normal
            } else {
                Color::Inverted
            },
            font,
            transparency: if byte & TEXT_TRANSPARENT != 0 {
                Transparency::Transparent
            } else {
                Transparency::Opaque
            },
            alignment,
        }
    }
}

/// Style of bitmap frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitmapStyle {
    pub color: Color,
    pub transparency: Transparency,
}

impl BitmapStyle {
    /// Option byte as sent on the bus
    pub const fn options(&self) -> u8 {
        let mut byte = 0;
        if matches!(self.transparency, Transparency::Transparent) {
            byte |= BITMAP_TRANSPARENT;
        }
        if matches!(self.color, Color::Normal) {
            byte |= BITMAP_OR_OUTPUT;
        }
        byte
    }

    /// Decode an option byte
    pub const fn from_options(byte: u8) -> Self {
        Self {
            color: if byte & BITMAP_OR_OUTPUT != 0 {
                Color::Normal
            } else {
                Color::Inverted
            },
            transparency: if byte & BITMAP_TRANSPARENT != 0 {
                Transparency::Transparent
            } else {
                Transparency::Opaque
            },
        }
    }
}

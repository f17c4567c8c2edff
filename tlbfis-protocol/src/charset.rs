//! Character set and compact-font metrics
//!
//! The cluster has its own 8-bit character set. Outgoing text in the
//! standard and compact fonts is translated byte by byte from ISO-8859-1
//! (with a few cluster extras in the C0 range) to the cluster's codes.
//! Graphics-font text is already in glyph codes and is never translated.
//!
//! Both tables are plain data. Applications with a different code page
//! build their own [`Charset`] from two 256-entry tables.

/// Width of every character in the standard and graphics fonts
pub const FIXED_GLYPH_WIDTH: u8 = 6;

/// Height of one text row in pixels, excluding line spacing
pub const GLYPH_HEIGHT: u8 = 7;

/// Line separator for standard and compact text
pub const NEWLINE: u8 = b'\n';

/// Line separator for graphics-font text
pub const GRAPHICS_NEWLINE: u8 = 0x7A;

/// Blank glyphs of fixed width (source codes, translated by the map)
pub const SPACE_2PX: u8 = 0x01;
pub const SPACE_3PX: u8 = 0x02;
/// As wide as a compact digit
pub const SPACE_5PX: u8 = 0x03;
pub const SPACE_6PX: u8 = 0x04;
/// Blanks the rest of the row
pub const LINE_CLEAR: u8 = 0x05;

/// Solid block glyph of the graphics font
pub const GRAPHICS_BLOCK: u8 = 0x3A;

/// Eleven graphics blocks cover one 64 px row
pub const HIGHLIGHT_ROW: [u8; 11] = [GRAPHICS_BLOCK; 11];

/// Source code to cluster code
pub const ISO_8859_1_MAP: [u8; 256] = [
    0x00, 0x20, 0x17, 0x6C, 0x65, 0xD7, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20,
    0x18, 0x19, 0x1B, 0x1A, 0x1D, 0x6E, 0x69, 0x5E, 0x67, 0x1E, 0x1F, 0xD9, 0xAB, 0x11, 0x15, 0x16,
    0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x2B, 0x2C, 0x2D, 0x2E, 0x2F,
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x3B, 0x3C, 0x3D, 0x3E, 0x3F,
    0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x4B, 0x4C, 0x4D, 0x4E, 0x4F,
    0x50, 0x51, 0x52, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x5B, 0x5C, 0x5D, 0x5E, 0x66,
    0x62, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
    0x10, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x7B, 0x7C, 0x7D, 0x7E, 0x7F,
    0xEB, 0xFB, 0xCB, 0xDB, 0xA4, 0x9D, 0xEA, 0xFA, 0xCA, 0xDA, 0xEC, 0xFC, 0xCC, 0xDC, 0x8C, 0x9C,
    0xED, 0xFD, 0xCD, 0xDD, 0xE4, 0x20, 0x20, 0x20, 0xDE, 0xA5, 0xB5, 0x9E, 0xA7, 0xB7, 0xB6, 0xA6,
    0xA3, 0x8E, 0xA9, 0xAA, 0x14, 0x20, 0x13, 0xBF, 0x20, 0xA2, 0xA0, 0xEE, 0xFE, 0x68, 0xCF, 0xDF,
    0xBB, 0xB4, 0xB2, 0xB3, 0xA1, 0xB8, 0xA8, 0xE9, 0xF9, 0xB1, 0xB0, 0xF4, 0xBC, 0xBD, 0xBE, 0xB9,
    0xC1, 0xC0, 0xE1, 0xE0, 0x5F, 0xD0, 0xE2, 0x8B, 0xC3, 0xC2, 0xD2, 0xD3, 0xC5, 0xC4, 0xD4, 0xD5,
    0xCE, 0x8A, 0xC7, 0xC6, 0xD6, 0xE6, 0x60, 0x6D, 0xE7, 0x89, 0x88, 0xD8, 0x61, 0xE5, 0xE8, 0x8D,
    0x81, 0x80, 0xF1, 0xF0, 0x91, 0x90, 0xF2, 0x9B, 0x83, 0x82, 0x92, 0x93, 0x85, 0x84, 0x94, 0x95,
    0xEF, 0x9A, 0x8F, 0x9F, 0xE3, 0xF3, 0x97, 0xBA, 0xF7, 0xC9, 0xC8, 0x98, 0x99, 0xF5, 0xF8, 0x20,
];

/// Pixel width of every source code in the compact font
pub const COMPACT_WIDTHS: [u8; 256] = [
     0,  2,  3,  5,  6, 64,  2,  2,  2,  2,  2,  2,  2,  2,  2,  2,
     6,  6,  6,  6,  4,  5,  5,  6,  6,  6,  6,  6,  6,  6,  6,  6,
     2,  2,  4,  6,  6,  6,  6,  2,  3,  3,  4,  6,  3,  4,  3,  4,
     5,  5,  5,  5,  5,  5,  5,  5,  5,  5,  3,  3,  4,  4,  4,  5,
     6,  5,  5,  5,  5,  4,  4,  5,  5,  4,  4,  5,  4,  6,  5,  5,
     5,  5,  5,  5,  4,  5,  6,  6,  4,  4,  4,  3,  4,  3,  6,  5,
     3,  5,  5,  5,  5,  5,  4,  5,  5,  2,  4,  5,  4,  6,  5,  5,
     5,  5,  4,  4,  4,  5,  4,  6,  4,  4,  4,  4,  2,  4,  6,  6,
     5,  5,  5,  5,  5,  5,  5,  4,  5,  4,  5,  4,  5,  4,  5,  4,
     4,  4,  4,  4,  4,  2,  2,  2,  6,  5,  4,  4,  6,  6,  5,  5,
     6,  2,  5,  5,  6,  2,  6,  6,  2,  6,  5,  4,  5,  6,  4,  4,
     4,  4,  5,  4,  6,  6,  6,  6,  5,  3,  5,  6,  6,  6,  6,  5,
     5,  5,  5,  5,  5,  6,  5,  5,  4,  4,  4,  4,  4,  4,  4,  4,
     5,  5,  5,  5,  5,  5,  6,  6,  6,  5,  5,  5,  5,  4,  5,  6,
     5,  5,  5,  5,  5,  5,  6,  5,  5,  5,  5,  5,  3,  3,  3,  3,
     5,  5,  6,  6,  5,  6,  5,  4,  6,  5,  5,  5,  5,  4,  5,  2,
];

/// Translation and metrics tables used by the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    map: &'static [u8; 256],
    widths: &'static [u8; 256],
}

impl Default for Charset {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Charset {
    /// The cluster's ISO-8859-1 mapping with compact-font widths
    pub const DEFAULT: Charset = Charset {
        map: &ISO_8859_1_MAP,
        widths: &COMPACT_WIDTHS,
    };

    /// Build a charset from application-supplied tables
    pub const fn new(map: &'static [u8; 256], widths: &'static [u8; 256]) -> Self {
        Self { map, widths }
    }

    /// Cluster code for a source byte
    #[inline]
    pub fn translate(&self, code: u8) -> u8 {
        self.map[code as usize]
    }

    /// Compact-font width of a source byte in pixels
    #[inline]
    pub fn compact_width(&self, code: u8) -> u8 {
        self.widths[code as usize]
    }
}

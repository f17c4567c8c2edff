//! Text frames
//!
//! Text is sent in source bytes translated through the character map,
//! except in the graphics font whose codes go to the cluster unchanged.
//! One frame holds at most 37 characters; longer text is cut.
//!
//! Right alignment is not understood by the cluster. The encoder measures
//! the text and moves it to the right edge of the workspace itself.

use tlbfis_hal::Transport;
use tlbfis_protocol::charset::{
    FIXED_GLYPH_WIDTH, GLYPH_HEIGHT, GRAPHICS_NEWLINE, HIGHLIGHT_ROW, NEWLINE, SPACE_5PX,
};
use tlbfis_protocol::command::{write_header, OP_TEXT};
use tlbfis_protocol::{Alignment, Color, Font, FrameKind, Transparency};

use crate::diagnostics::Warning;
use crate::encoder::Encoder;
use crate::error::{DrawError, FirstError};
use crate::source::Source;

/// Most characters in one text frame
pub const MAX_TEXT_LEN: usize = FrameKind::Text.payload_budget();

/// Bytes read at a time while looking for line breaks
const SCAN_CHUNK: usize = 32;

impl<T: Transport> Encoder<T> {
    /// Width of one character in the current font
    pub fn char_width(&self, code: u8) -> u8 {
        if self.state.is_compact() {
            self.charset.compact_width(code)
        } else {
            FIXED_GLYPH_WIDTH
        }
    }

    /// Width of `text` in the current font
    ///
    /// Compact widths are looked up by source byte, before translation.
    pub fn string_width(&self, text: &[u8]) -> u16 {
        if self.state.is_compact() {
            text.iter().fold(0u16, |width, &code| {
                width.wrapping_add(u16::from(self.charset.compact_width(code)))
            })
        } else {
            (text.len() as u16).wrapping_mul(u16::from(FIXED_GLYPH_WIDTH))
        }
    }

    /// Write a single character
    pub fn write_char(&mut self, x: u8, y: u8, code: u8) -> Result<(), DrawError> {
        let mut x = x;
        if self.state.text.alignment == Alignment::Right {
            let width = self.char_width(code);
            let available = self.workspace.width();
            x = if width < available {
                x.wrapping_add(available - width + 1)
            } else {
                0
            };
        }
        self.emit_text(x, y, &[code])
    }

    /// Write text at (`x`, `y`)
    ///
    /// Empty text sends nothing. Text longer than [`MAX_TEXT_LEN`] is cut.
    pub fn write_text<'s>(
        &mut self,
        x: u8,
        y: u8,
        text: impl Into<Source<'s>>,
    ) -> Result<(), DrawError> {
        let mut source = text.into();
        let len = source.len();
        self.write_segment(x, y, &mut source, 0, len)
    }

    /// Write text containing line breaks, one frame per line
    ///
    /// Lines are separated by `\n`, or by `0x7A` in the graphics font.
    /// Each line starts `7 + line_spacing` pixels below the previous one
    /// (7 in the graphics font). Empty lines send nothing but still take
    /// up their row.
    pub fn write_multi_line_text<'s>(
        &mut self,
        x: u8,
        y: u8,
        text: impl Into<Source<'s>>,
    ) -> Result<(), DrawError> {
        let mut source = text.into();
        let graphics = self.state.is_graphics();
        let separator = if graphics { GRAPHICS_NEWLINE } else { NEWLINE };
        let pitch = if graphics {
            GLYPH_HEIGHT
        } else {
            GLYPH_HEIGHT.wrapping_add(self.state.line_spacing)
        };

        let mut errors = FirstError::default();
        let mut row: u8 = 0;
        let mut start = 0;
        let len = source.len();
        let mut chunk = [0u8; SCAN_CHUNK];
        let mut chunk_start = 0;
        while chunk_start < len {
            let count = (len - chunk_start).min(SCAN_CHUNK);
            source.read(chunk_start, &mut chunk[..count]);
            for (i, &code) in chunk[..count].iter().enumerate() {
                if code != separator {
                    continue;
                }
                let offset = chunk_start + i;
                if offset > start {
                    let line_y = y.wrapping_add(pitch.wrapping_mul(row));
                    errors.record(self.write_segment(
                        x,
                        line_y,
                        &mut source,
                        start,
                        offset - start,
                    ));
                }
                start = offset + 1;
                row = row.wrapping_add(1);
            }
            chunk_start += count;
        }
        let line_y = y.wrapping_add(pitch.wrapping_mul(row));
        errors.record(self.write_segment(x, line_y, &mut source, start, len - start));
        errors.finish()
    }

    /// Widen spaces in a formatted number so digits line up
    ///
    /// In the compact font a space is narrower than a digit. While the
    /// compact font is selected every `' '` is replaced by the 5 px space;
    /// other fonts leave the text unchanged.
    pub fn fix_number_padding(&self, text: &mut [u8]) {
        if !self.state.is_compact() {
            return;
        }
        for code in text.iter_mut().filter(|code| **code == b' ') {
            *code = SPACE_5PX;
        }
    }

    /// Invert a whole text row starting at `y`
    ///
    /// Calling it twice on the same row restores it. The text style is
    /// restored afterwards, but the draw color used by lines, rectangles
    /// and bitmaps stays inverted.
    pub fn toggle_highlight(&mut self, y: u8) -> Result<(), DrawError> {
        let saved = self.state.text;
        self.state.set_font(Font::Graphics);
        self.state.set_text_alignment(Alignment::Left);
        self.state.set_color(Color::Inverted);
        self.state.set_text_transparency(Transparency::Transparent);

        let result = self.emit_text(0, y, &HIGHLIGHT_ROW);
        self.state.text = saved;
        result
    }

    /// Write `len` bytes of `source` starting at `start`
    fn write_segment(
        &mut self,
        x: u8,
        y: u8,
        source: &mut Source<'_>,
        start: usize,
        len: usize,
    ) -> Result<(), DrawError> {
        if len == 0 {
            return Ok(());
        }
        let kept = len.min(MAX_TEXT_LEN);
        if kept < len {
            self.diagnostics
                .record(Warning::TextTruncated { length: len, kept });
        }

        let mut bytes = [0u8; MAX_TEXT_LEN];
        source.read(start, &mut bytes[..kept]);
        let text = &bytes[..kept];

        let mut x = x;
        if self.state.text.alignment == Alignment::Right {
            let width = self.string_width(text);
            let available = u16::from(self.workspace.width());
            x = if width < available {
                x.wrapping_add((available - width) as u8)
            } else {
                0
            };
        }
        self.emit_text(x, y, text)
    }

    /// Build and send one text frame at the final position
    fn emit_text(&mut self, x: u8, y: u8, text: &[u8]) -> Result<(), DrawError> {
        write_header(
            &mut self.text_buf,
            OP_TEXT,
            text.len(),
            self.state.text.wire_options(),
            x,
            y,
        );
        let graphics = self.state.is_graphics();
        for &code in text {
            let code = if graphics {
                code
            } else {
                self.charset.translate(code)
            };
            self.text_buf.push(code);
        }
        self.send(FrameKind::Text)
    }
}

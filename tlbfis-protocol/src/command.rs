//! Command opcodes, frame writers and frame decoding
//!
//! The encoder builds frames in place with the `write_*` helpers. A frame
//! that has been put on the bus can be turned back into a [`Command`],
//! which is what bus monitors and the test suites use.

use heapless::Vec;

use crate::frame::{
    ClearBuffer, CommandBuffer, FrameError, RadioBuffer, MAX_FRAME_LEN, PARAM_LEN,
    RADIO_CAPACITY,
};
use crate::style::{BitmapStyle, Color, TextStyle};

// Opcodes
pub const OP_CLEAR: u8 = 0x53;
pub const OP_BITMAP: u8 = 0x55;
pub const OP_TEXT: u8 = 0x56;
pub const OP_THIN_LINE: u8 = 0x63;
pub const OP_RADIO: u8 = 0x81;

/// LENGTH of clear/claim/workspace frames
pub const CLEAR_LENGTH: u8 = 5;

/// LENGTH of thin line frames
pub const THIN_LINE_LENGTH: u8 = 4;

// Clear option bytes (color bit added)
pub const CLAIM_AND_CLEAR: u8 = 0x82;
pub const WORKSPACE_AND_CLEAR: u8 = 0x02;
pub const WORKSPACE_ONLY: u8 = 0x00;

// Thin line option bytes
pub const THIN_LINE_VERTICAL: u8 = 0x10;
pub const THIN_LINE_HORIZONTAL: u8 = 0x20;

// Radio frame layout
pub const RADIO_LENGTH: u8 = 0x11;
pub const RADIO_OPTIONS: u8 = 0xF0;
pub const RADIO_HEADER: [u8; 3] = [OP_RADIO, RADIO_LENGTH, RADIO_OPTIONS];
pub const RADIO_LINE_LEN: usize = 8;

/// Rectangle in cluster pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl Rect {
    pub const fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// What a clear-opcode frame does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClearMode {
    /// Claim the screen area and fill it
    Claim(Color),
    /// Move the workspace and fill it
    Clear(Color),
    /// Move the workspace, leave pixels alone
    WorkspaceOnly,
}

impl ClearMode {
    /// Option byte as sent on the bus
    pub const fn options(self) -> u8 {
        match self {
            ClearMode::Claim(color) => CLAIM_AND_CLEAR + color.bit(),
            ClearMode::Clear(color) => WORKSPACE_AND_CLEAR + color.bit(),
            ClearMode::WorkspaceOnly => WORKSPACE_ONLY,
        }
    }

    /// Decode an option byte
    pub fn from_options(byte: u8) -> Result<Self, FrameError> {
        match byte {
            0x82 => Ok(ClearMode::Claim(Color::Normal)),
            0x83 => Ok(ClearMode::Claim(Color::Inverted)),
            0x02 => Ok(ClearMode::Clear(Color::Normal)),
            0x03 => Ok(ClearMode::Clear(Color::Inverted)),
            0x00 => Ok(ClearMode::WorkspaceOnly),
            other => Err(FrameError::InvalidOptions(other)),
        }
    }
}

/// Line orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Thin line option byte
    pub const fn thin_line_options(self) -> u8 {
        match self {
            Orientation::Horizontal => THIN_LINE_HORIZONTAL,
            Orientation::Vertical => THIN_LINE_VERTICAL,
        }
    }
}

/// One of the two radio-mode text lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioLine {
    Upper,
    Lower,
}

impl RadioLine {
    /// Offset of the line's slot inside the radio frame
    pub const fn offset(self) -> usize {
        match self {
            RadioLine::Upper => RADIO_HEADER.len(),
            RadioLine::Lower => RADIO_HEADER.len() + RADIO_LINE_LEN,
        }
    }
}

/// Write a complete clear/claim/workspace frame
pub fn write_clear(buf: &mut ClearBuffer, mode: ClearMode, rect: Rect) {
    buf.clear_and_push(OP_CLEAR);
    buf.push(CLEAR_LENGTH);
    buf.push(mode.options());
    buf.push(rect.x);
    buf.push(rect.y);
    buf.push(rect.width);
    buf.push(rect.height);
}

/// Write a complete thin line frame
pub fn write_thin_line(buf: &mut ClearBuffer, orientation: Orientation, x: u8, y: u8, length: u8) {
    buf.clear_and_push(OP_THIN_LINE);
    buf.push(THIN_LINE_LENGTH);
    buf.push(orientation.thin_line_options());
    buf.push(x);
    buf.push(y);
    buf.push(length);
}

/// Start a text or bitmap frame
///
/// `payload_len` is the number of data bytes that will follow the header.
pub fn write_header<const N: usize>(
    buf: &mut CommandBuffer<N>,
    opcode: u8,
    payload_len: usize,
    options: u8,
    x: u8,
    y: u8,
) {
    buf.clear_and_push(opcode);
    buf.push((payload_len + PARAM_LEN) as u8);
    buf.push(options);
    buf.push(x);
    buf.push(y);
}

/// Start a radio frame, leaving both line slots untouched
pub fn write_radio_header(buf: &mut RadioBuffer) {
    buf.clear_and_extend(&RADIO_HEADER);
}

/// A decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Claim, clear or workspace change
    Clear { mode: ClearMode, rect: Rect },
    /// Text in cluster codes
    Text {
        style: TextStyle,
        x: u8,
        y: u8,
        text: &'a [u8],
    },
    /// Block of bitmap rows
    Bitmap {
        style: BitmapStyle,
        x: u8,
        y: u8,
        data: &'a [u8],
    },
    /// Single-pixel line
    ThinLine {
        orientation: Orientation,
        x: u8,
        y: u8,
        length: u8,
    },
    /// Both radio-mode lines
    Radio { upper: &'a [u8], lower: &'a [u8] },
}

impl<'a> Command<'a> {
    /// Parse a frame
    ///
    /// Bytes after the declared length are ignored.
    pub fn parse(frame: &'a [u8]) -> Result<Self, FrameError> {
        if frame.len() < 2 {
            return Err(FrameError::Incomplete);
        }
        let opcode = frame[0];
        let length = frame[1] as usize;
        let body = frame.get(2..2 + length).ok_or(FrameError::Incomplete)?;

        match opcode {
            OP_CLEAR => {
                if length != CLEAR_LENGTH as usize {
                    return Err(FrameError::LengthMismatch);
                }
                Ok(Command::Clear {
                    mode: ClearMode::from_options(body[0])?,
                    rect: Rect::new(body[1], body[2], body[3], body[4]),
                })
            }
            OP_TEXT => {
                if length < PARAM_LEN {
                    return Err(FrameError::LengthMismatch);
                }
                Ok(Command::Text {
                    style: TextStyle::from_options(body[0]),
                    x: body[1],
                    y: body[2],
                    text: &body[PARAM_LEN..],
                })
            }
            OP_BITMAP => {
                if length < PARAM_LEN {
                    return Err(FrameError::LengthMismatch);
                }
                Ok(Command::Bitmap {
                    style: BitmapStyle::from_options(body[0]),
                    x: body[1],
                    y: body[2],
                    data: &body[PARAM_LEN..],
                })
            }
            OP_THIN_LINE => {
                if length != THIN_LINE_LENGTH as usize {
                    return Err(FrameError::LengthMismatch);
                }
                let orientation = match body[0] {
                    THIN_LINE_HORIZONTAL => Orientation::Horizontal,
                    THIN_LINE_VERTICAL => Orientation::Vertical,
                    other => return Err(FrameError::InvalidOptions(other)),
                };
                Ok(Command::ThinLine {
                    orientation,
                    x: body[1],
                    y: body[2],
                    length: body[3],
                })
            }
            OP_RADIO => {
                if length != RADIO_LENGTH as usize {
                    return Err(FrameError::LengthMismatch);
                }
                if body[0] != RADIO_OPTIONS {
                    return Err(FrameError::InvalidOptions(body[0]));
                }
                Ok(Command::Radio {
                    upper: &frame[RadioLine::Upper.offset()..RadioLine::Lower.offset()],
                    lower: &frame[RadioLine::Lower.offset()..RADIO_CAPACITY],
                })
            }
            other => Err(FrameError::UnknownOpcode(other)),
        }
    }

    /// Opcode of the frame this command came from
    pub fn opcode(&self) -> u8 {
        match self {
            Command::Clear { .. } => OP_CLEAR,
            Command::Text { .. } => OP_TEXT,
            Command::Bitmap { .. } => OP_BITMAP,
            Command::ThinLine { .. } => OP_THIN_LINE,
            Command::Radio { .. } => OP_RADIO,
        }
    }

    /// Encode this command back into a frame
    ///
    /// Text and bitmap payloads are taken as they are, so the text must
    /// already be in cluster codes.
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_LEN>, FrameError> {
        let mut out = Vec::new();
        let overflow = |_| FrameError::PayloadTooLarge;
        match *self {
            Command::Clear { mode, rect } => {
                out.extend_from_slice(&[
                    OP_CLEAR,
                    CLEAR_LENGTH,
                    mode.options(),
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                ])
                .map_err(overflow)?;
            }
            Command::Text { style, x, y, text } => {
                out.extend_from_slice(&[
                    OP_TEXT,
                    (text.len() + PARAM_LEN) as u8,
                    style.wire_options(),
                    x,
                    y,
                ])
                .map_err(overflow)?;
                out.extend_from_slice(text).map_err(overflow)?;
            }
            Command::Bitmap { style, x, y, data } => {
                out.extend_from_slice(&[
                    OP_BITMAP,
                    (data.len() + PARAM_LEN) as u8,
                    style.options(),
                    x,
                    y,
                ])
                .map_err(overflow)?;
                out.extend_from_slice(data).map_err(overflow)?;
            }
            Command::ThinLine {
                orientation,
                x,
                y,
                length,
            } => {
                out.extend_from_slice(&[
                    OP_THIN_LINE,
                    THIN_LINE_LENGTH,
                    orientation.thin_line_options(),
                    x,
                    y,
                    length,
                ])
                .map_err(overflow)?;
            }
            Command::Radio { upper, lower } => {
                if upper.len() > RADIO_LINE_LEN || lower.len() > RADIO_LINE_LEN {
                    return Err(FrameError::PayloadTooLarge);
                }
                let mut frame = [0u8; RADIO_CAPACITY];
                frame[..RADIO_HEADER.len()].copy_from_slice(&RADIO_HEADER);
                let upper_at = RadioLine::Upper.offset();
                let lower_at = RadioLine::Lower.offset();
                frame[upper_at..upper_at + upper.len()].copy_from_slice(upper);
                frame[lower_at..lower_at + lower.len()].copy_from_slice(lower);
                out.extend_from_slice(&frame).map_err(overflow)?;
            }
        }
        Ok(out)
    }
}

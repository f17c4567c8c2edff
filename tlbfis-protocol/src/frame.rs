//! Fixed-capacity frame buffers for the 3LB display protocol.
//!
//! Frame format:
//! - OPCODE (1 byte): command identifier
//! - LENGTH (1 byte): number of bytes that follow
//! - OPTIONS (1 byte): command-specific flags
//! - X, Y (1 byte each): target coordinates
//! - PAYLOAD: command-specific data
//!
//! Buffers are reused destructively: a new frame starts by resetting the
//! cursor, and bytes that do not fit are dropped without error.

/// Largest frame the cluster accepts
pub const MAX_FRAME_LEN: usize = 42;

/// Bytes before the payload (opcode, length, options, x, y)
pub const HEADER_LEN: usize = 5;

/// Bytes counted by LENGTH that are not payload (options, x, y)
pub const PARAM_LEN: usize = 3;

/// Capacity of the clear/claim/workspace frame
pub const CLEAR_CAPACITY: usize = 7;

/// Capacity of the text frame
pub const TEXT_CAPACITY: usize = MAX_FRAME_LEN;

/// Capacity of the radio-mode text frame
pub const RADIO_CAPACITY: usize = 19;

/// Capacity of the bitmap frame
pub const BITMAP_CAPACITY: usize = MAX_FRAME_LEN;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame is shorter than its header or declared length
    Incomplete,
    /// Opcode is not one the encoder emits
    UnknownOpcode(u8),
    /// LENGTH byte does not match the command's fixed layout
    LengthMismatch,
    /// Option byte is not valid for the command
    InvalidOptions(u8),
    /// Payload does not fit in the frame
    PayloadTooLarge,
}

/// The four kinds of frame buffer an encoder owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    /// Claim, clear, workspace change, lines and rectangles
    Clear,
    /// Free-positioned text
    Text,
    /// Radio-mode text (two fixed lines)
    Radio,
    /// Bitmap block
    Bitmap,
}

impl FrameKind {
    /// Buffer capacity in bytes
    pub const fn capacity(self) -> usize {
        match self {
            FrameKind::Clear => CLEAR_CAPACITY,
            FrameKind::Text => TEXT_CAPACITY,
            FrameKind::Radio => RADIO_CAPACITY,
            FrameKind::Bitmap => BITMAP_CAPACITY,
        }
    }

    /// Bytes available after the 5-byte header
    pub const fn payload_budget(self) -> usize {
        self.capacity().saturating_sub(HEADER_LEN)
    }
}

/// A reusable frame buffer of `N` bytes with a write cursor
///
/// Writes never fail: anything past the capacity is silently dropped and
/// the number of bytes actually stored is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuffer<const N: usize> {
    bytes: [u8; N],
    cursor: usize,
}

/// Buffer for clear/claim/workspace/shape frames
pub type ClearBuffer = CommandBuffer<CLEAR_CAPACITY>;
/// Buffer for text frames
pub type TextBuffer = CommandBuffer<TEXT_CAPACITY>;
/// Buffer for radio-mode frames
pub type RadioBuffer = CommandBuffer<RADIO_CAPACITY>;
/// Buffer for bitmap frames
pub type BitmapBuffer = CommandBuffer<BITMAP_CAPACITY>;

impl<const N: usize> Default for CommandBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandBuffer<N> {
    /// Buffer capacity in bytes
    pub const CAPACITY: usize = N;

    /// Create a zeroed buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            cursor: 0,
        }
    }

    /// Append one byte
    ///
    /// Returns 1 if the byte was stored, 0 if the buffer was full.
    pub fn push(&mut self, byte: u8) -> usize {
        if self.cursor < N {
            self.bytes[self.cursor] = byte;
            self.cursor += 1;
            1
        } else {
            0
        }
    }

    /// Append as many of `data` as fit
    ///
    /// Copies `min(data.len(), N - cursor)` bytes and returns that count.
    pub fn extend(&mut self, data: &[u8]) -> usize {
        let count = data.len().min(self.remaining());
        self.bytes[self.cursor..self.cursor + count].copy_from_slice(&data[..count]);
        self.cursor += count;
        count
    }

    /// Start a new frame with `byte`
    pub fn clear_and_push(&mut self, byte: u8) -> usize {
        self.cursor = 0;
        self.push(byte)
    }

    /// Start a new frame with `data`
    pub fn clear_and_extend(&mut self, data: &[u8]) -> usize {
        self.cursor = 0;
        self.extend(data)
    }

    /// Zero the whole buffer and reset the cursor
    ///
    /// Used before frames with sparse payload, so skipped bytes read as zero.
    pub fn wipe(&mut self) {
        self.bytes = [0; N];
        self.cursor = 0;
    }

    /// Zero `len` bytes starting at `start` without moving the cursor
    pub fn wipe_range(&mut self, start: usize, len: usize) {
        let start = start.min(N);
        let end = start.saturating_add(len).min(N);
        self.bytes[start..end].fill(0);
    }

    /// Move the cursor to `position` (clamped to the capacity)
    pub fn seek(&mut self, position: usize) {
        self.cursor = position.min(N);
    }

    /// Advance the cursor over `count` bytes without writing them
    ///
    /// Returns the number of bytes actually skipped.
    pub fn skip(&mut self, count: usize) -> usize {
        let count = count.min(self.remaining());
        self.cursor += count;
        count
    }

    /// Current write position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes left before the buffer is full
    pub fn remaining(&self) -> usize {
        N - self.cursor
    }

    /// Bytes written since the last reset
    pub fn written(&self) -> &[u8] {
        &self.bytes[..self.cursor]
    }

    /// The whole buffer, including bytes past the cursor
    pub fn raw(&self) -> &[u8; N] {
        &self.bytes
    }

    /// The frame as it goes on the bus
    ///
    /// This is the opcode, the LENGTH byte and LENGTH further bytes, capped
    /// at the capacity. Bytes past the cursor but inside LENGTH are sent as
    /// they are, which is how the radio frame keeps its other line.
    pub fn frame(&self) -> &[u8] {
        if N < 2 {
            return &self.bytes;
        }
        let declared = self.bytes[1] as usize + 2;
        &self.bytes[..declared.min(N)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_capacities() {
        assert_eq!(FrameKind::Clear.capacity(), 7);
        assert_eq!(FrameKind::Text.capacity(), 42);
        assert_eq!(FrameKind::Radio.capacity(), 19);
        assert_eq!(FrameKind::Bitmap.capacity(), 42);
        assert_eq!(FrameKind::Bitmap.payload_budget(), 37);
        assert_eq!(ClearBuffer::CAPACITY, 7);
    }

    #[test]
    fn test_extend_truncates_silently() {
        let mut buf = CommandBuffer::<4>::new();
        assert_eq!(buf.push(1), 1);
        assert_eq!(buf.extend(&[2, 3, 4, 5, 6]), 3);
        assert_eq!(buf.push(7), 0);
        assert_eq!(buf.written(), &[1, 2, 3, 4]);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_clear_and_push_reuses_buffer() {
        let mut buf = CommandBuffer::<4>::new();
        buf.extend(&[9, 9, 9]);
        buf.clear_and_push(1);

        assert_eq!(buf.written(), &[1]);
        // Old bytes past the cursor are still there
        assert_eq!(buf.raw(), &[1, 9, 9, 0]);
    }

    #[test]
    fn test_wipe_zeroes_everything() {
        let mut buf = CommandBuffer::<4>::new();
        buf.extend(&[9, 9, 9, 9]);
        buf.wipe();

        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.raw(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_wipe_range_and_skip() {
        let mut buf = CommandBuffer::<6>::new();
        buf.extend(&[1, 2, 3, 4, 5, 6]);
        buf.wipe_range(2, 10);
        assert_eq!(buf.raw(), &[1, 2, 0, 0, 0, 0]);
        assert_eq!(buf.cursor(), 6);

        buf.seek(1);
        assert_eq!(buf.skip(3), 3);
        assert_eq!(buf.cursor(), 4);
        assert_eq!(buf.skip(10), 2);
    }

    #[test]
    fn test_frame_uses_declared_length() {
        let mut buf = CommandBuffer::<19>::new();
        buf.clear_and_extend(&[0x81, 0x11, 0xF0]);

        // Declared length 0x11 covers all 19 bytes even though only 3 were written
        assert_eq!(buf.frame().len(), 19);

        let mut buf = CommandBuffer::<7>::new();
        buf.clear_and_extend(&[0x63, 0x04, 0x20, 1, 2, 30]);
        assert_eq!(buf.frame(), &[0x63, 0x04, 0x20, 1, 2, 30]);
    }

    #[test]
    fn test_frame_capped_at_capacity() {
        let mut buf = CommandBuffer::<7>::new();
        buf.clear_and_extend(&[0x53, 0xFF]);
        assert_eq!(buf.frame().len(), 7);
    }
}

//! Clamp and truncation reporting
//!
//! The cluster protocol silently clamps coordinates and truncates payloads,
//! and the encoder reproduces that byte for byte. With
//! [`DiagnosticMode::Report`] every such adjustment is also kept here so
//! callers can find out why something was drawn smaller than requested.
//! The frames sent are the same in both modes.

use heapless::Deque;
use tlbfis_protocol::{RadioLine, Rect};

use crate::config::DiagnosticMode;

/// Number of warnings kept before the oldest are dropped
pub const WARNING_CAPACITY: usize = 16;

/// A silent adjustment made while encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Warning {
    /// Requested workspace was wrapped or shrunk to fit the screen
    WorkspaceClamped { requested: Rect, applied: Rect },
    /// Text longer than one frame, only `kept` bytes were sent
    TextTruncated { length: usize, kept: usize },
    /// Radio line longer than its 8-byte slot
    RadioTextTruncated { line: RadioLine, length: usize },
    /// Bitmap taller than the space below its start row
    BitmapHeightClamped { requested: u8, applied: u8 },
    /// Bitmap rows wider than the space right of its start column
    BitmapRowsCropped { row_bytes: usize, kept: usize },
    /// Bitmap source shorter than width x height, missing bytes sent as zero
    BitmapSourceShort { expected: usize, available: usize },
    /// Bitmap could not be placed at all
    BitmapSkipped { x: u8, y: u8 },
    /// Transport answered `Fail`
    TransportFailed { opcode: u8 },
}

/// Bounded warning log
#[derive(Debug, Clone)]
pub struct Diagnostics {
    mode: DiagnosticMode,
    warnings: Deque<Warning, WARNING_CAPACITY>,
    dropped: u32,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DiagnosticMode::default())
    }
}

impl Diagnostics {
    pub fn new(mode: DiagnosticMode) -> Self {
        Self {
            mode,
            warnings: Deque::new(),
            dropped: 0,
        }
    }

    pub fn mode(&self) -> DiagnosticMode {
        self.mode
    }

    /// Change the mode; switching to `Silent` keeps what was recorded
    pub fn set_mode(&mut self, mode: DiagnosticMode) {
        self.mode = mode;
    }

    /// Record a warning if reporting is enabled
    ///
    /// When the log is full the oldest warning is dropped and counted.
    pub fn record(&mut self, warning: Warning) {
        if self.mode == DiagnosticMode::Silent {
            return;
        }
        warn!("tlbfis: {:?}", warning);
        if self.warnings.is_full() {
            self.warnings.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        // Cannot fail, a slot was freed above
        let _ = self.warnings.push_back(warning);
    }

    /// Take the oldest recorded warning
    pub fn pop(&mut self) -> Option<Warning> {
        self.warnings.pop_front()
    }

    /// Recorded warnings, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warnings lost because the log was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Forget all warnings and reset the drop count
    pub fn clear(&mut self) {
        self.warnings.clear();
        self.dropped = 0;
    }
}

//! Recording transport for host tests and bring-up
//!
//! `MockTransport` accepts every frame and keeps a copy of it, so a test can
//! assert on the exact bytes the encoder put on the bus. Responses can be
//! scripted to exercise the `Repeat` and `Fail` paths.

use heapless::{Deque, Vec};

use crate::transport::{ErrorHandler, SendStatus, Transport};

/// Largest frame the cluster accepts
///
/// Must equal `tlbfis_protocol::frame::MAX_FRAME_LEN`; this crate sits below
/// the protocol crate and cannot name it.
pub const MAX_FRAME_LEN: usize = 42;

/// Maximum number of scripted responses
pub const MAX_SCRIPT: usize = 16;

/// One recorded frame
pub type RecordedFrame = Vec<u8, MAX_FRAME_LEN>;

/// Transport that records up to `N` frames
///
/// Frames beyond `N` are still acknowledged but only counted.
#[derive(Debug, Default)]
pub struct MockTransport<const N: usize> {
    frames: Vec<RecordedFrame, N>,
    script: Deque<SendStatus, MAX_SCRIPT>,
    attempts: usize,
    dropped: usize,
    begun: bool,
    updates: u32,
    turned_off: bool,
    error_handler: Option<ErrorHandler>,
}

impl<const N: usize> MockTransport<N> {
    /// Create a transport that acknowledges every frame
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            script: Deque::new(),
            attempts: 0,
            dropped: 0,
            begun: false,
            updates: 0,
            turned_off: false,
            error_handler: None,
        }
    }

    /// Queue responses for the next send attempts
    ///
    /// Once the script is exhausted every attempt succeeds. Responses that
    /// do not fit in the script are ignored.
    pub fn script(&mut self, responses: &[SendStatus]) {
        for &status in responses {
            let _ = self.script.push_back(status);
        }
    }

    /// Frames that were acknowledged or failed, in send order
    ///
    /// A frame answered with `Repeat` is recorded once, when it resolves.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Get a recorded frame by index
    pub fn frame(&self, index: usize) -> Option<&[u8]> {
        self.frames.get(index).map(|f| f.as_slice())
    }

    /// Total number of calls to `send`, including repeats
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Frames resolved after the record was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Forget all recorded frames
    pub fn clear(&mut self) {
        self.frames.clear();
        self.attempts = 0;
        self.dropped = 0;
    }

    /// Whether `begin` was called more recently than `end`
    pub fn is_begun(&self) -> bool {
        self.begun
    }

    /// Number of `update` calls
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Whether `turn_off` was called
    pub fn is_turned_off(&self) -> bool {
        self.turned_off
    }

    /// The registered error handler, if any
    pub fn error_handler(&self) -> Option<ErrorHandler> {
        self.error_handler
    }

    fn record(&mut self, frame: &[u8]) {
        let mut copy = RecordedFrame::new();
        let len = frame.len().min(MAX_FRAME_LEN);
        let _ = copy.extend_from_slice(&frame[..len]);
        if self.frames.push(copy).is_err() {
            self.dropped += 1;
        }
    }
}

impl<const N: usize> Transport for MockTransport<N> {
    fn send(&mut self, frame: &[u8]) -> SendStatus {
        self.attempts += 1;
        let status = self.script.pop_front().unwrap_or(SendStatus::Success);
        if status.is_resolved() {
            self.record(frame);
        }
        status
    }

    fn begin(&mut self) {
        self.begun = true;
        self.turned_off = false;
    }

    fn end(&mut self) {
        self.begun = false;
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn turn_off(&mut self) {
        self.turned_off = true;
    }

    fn set_error_handler(&mut self, handler: ErrorHandler) {
        self.error_handler = Some(handler);
    }
}

//! Bus transport abstraction
//!
//! The 3LB bus driver owns the ENA line, bit timing, keepalive and
//! electrical retries. The encoder only hands it finished frames.

/// Outcome of a single frame transmission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendStatus {
    /// Frame was acknowledged by the cluster
    Success,
    /// Frame was rejected or the bus timed out
    Fail,
    /// Bus was busy; the same frame must be offered again
    Repeat,
}

impl SendStatus {
    /// Returns true if the transmission has reached a final outcome
    pub fn is_resolved(self) -> bool {
        !matches!(self, SendStatus::Repeat)
    }
}

/// Callback invoked by the transport when it detects a bus error
///
/// The argument is the time in milliseconds the transport spent waiting
/// before giving up.
pub type ErrorHandler = fn(elapsed_ms: u32);

/// Frame transport
///
/// Implemented by the bus driver. `send` receives exactly the bytes of one
/// frame: opcode, length byte and `length` further bytes.
pub trait Transport {
    /// Offer one frame to the bus
    ///
    /// Must not block indefinitely; return [`SendStatus::Repeat`] when the
    /// bus is busy and the caller should try again.
    fn send(&mut self, frame: &[u8]) -> SendStatus;

    /// Initialize the bus
    fn begin(&mut self) {}

    /// Release the bus
    fn end(&mut self) {}

    /// Maintain the connection
    ///
    /// Must be called frequently while no frames are being sent.
    fn update(&mut self) {}

    /// Return the cluster to its own (trip computer) screen
    ///
    /// The screen must be claimed again before anything can be displayed.
    fn turn_off(&mut self) {}

    /// Register a function to be called when a bus error is detected
    fn set_error_handler(&mut self, _handler: ErrorHandler) {}
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, frame: &[u8]) -> SendStatus {
        (**self).send(frame)
    }

    fn begin(&mut self) {
        (**self).begin()
    }

    fn end(&mut self) {
        (**self).end()
    }

    fn update(&mut self) {
        (**self).update()
    }

    fn turn_off(&mut self) {
        (**self).turn_off()
    }

    fn set_error_handler(&mut self, handler: ErrorHandler) {
        (**self).set_error_handler(handler)
    }
}

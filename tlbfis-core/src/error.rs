//! Drawing errors

/// Errors returned by drawing operations
///
/// Out-of-range coordinates and oversized payloads are not errors: they are
/// clamped or truncated the way the cluster expects and only show up as
/// diagnostics warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawError {
    /// The transport answered `Fail` for a frame of this opcode
    ///
    /// The remaining frames of the operation were still sent.
    TransportFailed { opcode: u8 },
    /// Outline rectangles need at least 2 px in each direction
    RectangleTooSmall { width: u8, height: u8 },
}

/// Keeps the first error of a multi-frame operation
#[derive(Debug, Default)]
pub(crate) struct FirstError(Option<DrawError>);

impl FirstError {
    pub(crate) fn record(&mut self, result: Result<(), DrawError>) {
        if let Err(e) = result {
            self.0.get_or_insert(e);
        }
    }

    pub(crate) fn finish(self) -> Result<(), DrawError> {
        match self.0 {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

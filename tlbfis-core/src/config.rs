//! Encoder configuration
//!
//! Small enough to keep in a flash page next to the rest of the firmware
//! settings; with the `serde` feature it round-trips through postcard.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default vertical gap between text lines in pixels
pub const DEFAULT_LINE_SPACING: u8 = 1;

/// Whether silent clamps and truncations are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticMode {
    /// Clamp and truncate without a trace
    #[default]
    Silent,
    /// Record a warning for every clamp and truncation
    Report,
}

/// What to do when the transport answers `Fail`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FailPolicy {
    /// Give up on the frame and report it to the caller
    #[default]
    Report,
    /// Offer the same frame again until it is acknowledged
    Resend,
}

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    pub diagnostics: DiagnosticMode,
    /// Extra pixels between lines of multi-line text
    pub line_spacing: u8,
    pub fail_policy: FailPolicy,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            diagnostics: DiagnosticMode::Silent,
            line_spacing: DEFAULT_LINE_SPACING,
            fail_policy: FailPolicy::Report,
        }
    }
}

/// Errors from storing or loading a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small
    Serialize,
    /// Stored bytes are not a valid configuration
    Deserialize,
}

impl EncoderConfig {
    /// Enable diagnostics
    pub const fn with_diagnostics(mut self, mode: DiagnosticMode) -> Self {
        self.diagnostics = mode;
        self
    }

    /// Set the multi-line spacing
    pub const fn with_line_spacing(mut self, spacing: u8) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the transport failure policy
    pub const fn with_fail_policy(mut self, policy: FailPolicy) -> Self {
        self.fail_policy = policy;
        self
    }

    /// Serialize into `buffer`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_postcard<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize from bytes written by [`EncoderConfig::to_postcard`]
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
    }
}

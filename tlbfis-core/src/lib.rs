//! TLBFIS frame encoder
//!
//! Turns drawing requests into frames for the instrument-cluster display
//! on the three line bus:
//!
//! ```text
//! write_text / draw_bitmap / draw_rect / ...
//!          │
//!          ▼
//! ┌──────────────────────────────────────────┐
//! │ Encoder                                  │
//! │  workspace ─ draw state ─ charset        │
//! │  clear / text / radio / bitmap buffers   │
//! └──────────────────────────────────────────┘
//!          │ frames (≤ 42 bytes)
//!          ▼
//!     Transport (bus driver)
//! ```
//!
//! Coordinates and payloads that do not fit are clamped and truncated the
//! way the cluster firmware expects. Turn on [`DiagnosticMode::Report`] to
//! see where that happened.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod bitmap;
pub mod config;
pub mod diagnostics;
pub mod encoder;
pub mod error;
pub mod radio;
pub mod shapes;
pub mod source;
pub mod state;
pub mod text;
pub mod workspace;

pub use bitmap::{BitmapBlock, BitmapPlan};
pub use config::{ConfigError, DiagnosticMode, EncoderConfig, FailPolicy};
pub use diagnostics::{Diagnostics, Warning};
pub use encoder::Encoder;
pub use error::DrawError;
pub use shapes::RectFill;
pub use source::Source;
pub use state::DrawState;
pub use text::MAX_TEXT_LEN;
pub use workspace::{ScreenMode, Workspace};

// Protocol types that appear in the encoder API
pub use tlbfis_protocol::{
    Alignment, Charset, Color, Font, Orientation, RadioLine, Rect, Transparency,
};

//! 3LB Display Protocol (TLBFIS)
//!
//! This crate defines the frames understood by the instrument-cluster
//! display firmware on the three line bus. Every frame shares one header:
//! ```text
//! ┌────────┬────────┬─────────┬───┬───┬─────────────┐
//! │ OPCODE │ LENGTH │ OPTIONS │ X │ Y │ PAYLOAD     │
//! │ 1B     │ 1B     │ 1B      │1B │1B │ 0–37B       │
//! └────────┴────────┴─────────┴───┴───┴─────────────┘
//! ```
//!
//! LENGTH counts every byte after itself. Frames live in fixed-capacity
//! [`CommandBuffer`]s that are reused between commands; the cluster never
//! accepts more than 42 bytes in one frame.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod charset;
pub mod command;
pub mod frame;
pub mod style;

pub use charset::Charset;
pub use command::{ClearMode, Command, Orientation, RadioLine, Rect};
pub use frame::{
    BitmapBuffer, ClearBuffer, CommandBuffer, FrameError, FrameKind, RadioBuffer, TextBuffer,
    HEADER_LEN, MAX_FRAME_LEN,
};
pub use style::{Alignment, BitmapStyle, Color, Font, TextStyle, Transparency};

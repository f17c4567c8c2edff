//! TLBFIS collaborator traits
//!
//! The frame encoder in `tlbfis-core` never touches the bus directly. It talks
//! to two collaborators that the surrounding firmware provides:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tlbfis-core (Encoder)                  │
//! └─────────────────────────────────────────┘
//!          │ frames                │ bitmap / text bytes
//!          ▼                       ▼
//! ┌──────────────────┐    ┌──────────────────┐
//! │ Transport        │    │ AssetStore       │
//! │ (3LB bus driver) │    │ (read-only data) │
//! └──────────────────┘    └──────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Frame send/retry primitive of the bus driver
//! - [`asset::AssetStore`] - Read-only program asset storage (external flash, etc.)
//!
//! With the `mock` feature, [`mock::MockTransport`] records sent frames for tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod asset;
#[cfg(feature = "mock")]
pub mod mock;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use asset::{AssetError, AssetStore};
pub use transport::{ErrorHandler, SendStatus, Transport};

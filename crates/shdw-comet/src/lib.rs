// SPDX-License-Identifier: MIT

//! # shdw-comet: the comet cursor effect
//!
//! - **[`config`]**: validated effect settings (`EffectConfig`)
//! - **[`trail`]**: time-stamped position history with count and age limits
//! - **[`stars`]**: randomly spawned, self-expiring background stars
//! - **[`state`]**: last mouse position, event time, and the derived mode
//! - **[`render`]**: frame composition: stars, trail, head, aura
//! - **[`runner`]**: the frame loop tying input, state and rendering together
//!
//! Terminal plumbing (mouse decoding, cbreak mode, escape codes) lives in
//! `shdw-term`; this crate only decides what to draw and when.

pub mod config;
pub mod render;
pub mod runner;
pub mod stars;
pub mod state;
pub mod trail;

use std::io;

use thiserror::Error;

pub use config::{ConfigError, EffectConfig};
pub use runner::{ExitReason, Runner};

/// Everything that can stop the effect.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings rejected before the terminal was touched.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The terminal could not be switched into effect mode, or a frame
    /// could not be written.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for effect operations.
pub type Result<T> = std::result::Result<T, Error>;

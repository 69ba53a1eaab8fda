// SPDX-License-Identifier: MIT

//! Effect settings.
//!
//! Everything here is read once at startup and never changes while the
//! effect runs. Validation happens in [`EffectConfig::new`], before the
//! terminal is switched into cbreak mode, so a bad color string fails with
//! a readable message on an untouched terminal.

use std::time::Duration;

use shdw_term::color::{self, ColorError, Rgb};
use shdw_term::reader::DEFAULT_POLL_TIMEOUT;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::stars::DEFAULT_MAX_STARS;

/// Default head color (dark red).
pub const DEFAULT_HEAD_COLOR: &str = "681414";
/// Default tail color (periwinkle).
pub const DEFAULT_TAIL_COLOR: &str = "7b87ed";
/// Default head glyph cluster.
pub const DEFAULT_HEAD_SYMBOL: &str = "{#@#}";
/// Default cap on trail points.
pub const DEFAULT_TRAIL_LENGTH: usize = 20;
/// Default post-render sleep, in seconds.
pub const DEFAULT_FRAME_DELAY_SECS: f64 = 0.0001;

/// The head is always a single row.
pub const HEAD_HEIGHT: u16 = 1;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// A setting that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `--color-head` or `--color-tail` is not a six-digit hex color.
    #[error(transparent)]
    InvalidColor(#[from] ColorError),

    /// The head symbol has no visible width.
    #[error("head symbol must not be empty")]
    EmptySymbol,

    /// A trail that can never hold a point.
    #[error("trail length must be at least 1")]
    ZeroTrailLength,

    /// Negative, NaN or infinite frame delay.
    #[error("frame delay must be a finite number of seconds >= 0, got {0}")]
    InvalidFrameDelay(f64),
}

// ---------------------------------------------------------------------------
// EffectConfig
// ---------------------------------------------------------------------------

/// Validated, immutable effect settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectConfig {
    /// Color of the head and of the newest trail points.
    pub head_color: Rgb,
    /// Color of the oldest trail points and of the aura.
    pub tail_color: Rgb,
    /// Glyph cluster drawn at the pointer.
    pub head_symbol: String,
    /// Maximum number of trail points kept.
    pub trail_length: usize,
    /// Sleep after each rendered frame.
    pub frame_delay: Duration,
    /// Longest wait for input per frame.
    pub poll_timeout: Duration,
    /// Maximum number of live stars.
    pub max_stars: usize,
    /// Fixed star RNG seed, for reproducible runs.
    pub seed: Option<u64>,
}

impl EffectConfig {
    /// Build and validate the settings that come from the command line.
    ///
    /// Poll timeout, star cap and seed start at their defaults; adjust them
    /// with the `with_*` methods.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a malformed color, an empty symbol, a
    /// zero trail length, or a frame delay that is negative or not finite.
    pub fn new(
        head_color: &str,
        tail_color: &str,
        head_symbol: &str,
        trail_length: usize,
        frame_delay_secs: f64,
    ) -> Result<Self, ConfigError> {
        let head_color = color::hex_to_rgb(head_color)?;
        let tail_color = color::hex_to_rgb(tail_color)?;

        if head_symbol.width() == 0 {
            return Err(ConfigError::EmptySymbol);
        }
        if trail_length == 0 {
            return Err(ConfigError::ZeroTrailLength);
        }
        let frame_delay = Duration::try_from_secs_f64(frame_delay_secs)
            .map_err(|_| ConfigError::InvalidFrameDelay(frame_delay_secs))?;

        Ok(Self {
            head_color,
            tail_color,
            head_symbol: head_symbol.to_owned(),
            trail_length,
            frame_delay,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            max_stars: DEFAULT_MAX_STARS,
            seed: None,
        })
    }

    /// Set the per-frame input wait.
    #[must_use]
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Set the star cap. Zero disables stars.
    #[must_use]
    pub fn with_max_stars(mut self, max_stars: usize) -> Self {
        self.max_stars = max_stars;
        self
    }

    /// Fix the star RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Display width of the head symbol in terminal cells.
    #[must_use]
    pub fn head_width(&self) -> u16 {
        u16::try_from(self.head_symbol.width()).unwrap_or(u16::MAX)
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            head_color: Rgb::new(0x68, 0x14, 0x14),
            tail_color: Rgb::new(0x7b, 0x87, 0xed),
            head_symbol: DEFAULT_HEAD_SYMBOL.to_owned(),
            trail_length: DEFAULT_TRAIL_LENGTH,
            frame_delay: Duration::from_secs_f64(DEFAULT_FRAME_DELAY_SECS),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            max_stars: DEFAULT_MAX_STARS,
            seed: None,
        }
    }
}

// SPDX-License-Identifier: MIT
//
// Command-line options.
//
// Parsed once at startup with clap and turned into a validated
// `EffectConfig` before the terminal is touched. The flag names and
// defaults are the user-facing contract; everything past this module sees
// only the validated struct.

use std::time::Duration;

use clap::Parser;
use shdw_comet::config::{
    DEFAULT_FRAME_DELAY_SECS, DEFAULT_HEAD_COLOR, DEFAULT_HEAD_SYMBOL, DEFAULT_TAIL_COLOR,
    DEFAULT_TRAIL_LENGTH,
};
use shdw_comet::stars::DEFAULT_MAX_STARS;
use shdw_comet::{ConfigError, EffectConfig};

const DEFAULT_POLL_TIMEOUT_MS: u64 = 10;

/// A comet that follows the mouse pointer around the terminal.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "term-shdw")]
#[command(version)]
#[command(about = "A comet that follows the mouse pointer around the terminal", long_about = None)]
pub struct CliArgs {
    /// Head color as six hex digits (leading `#` optional)
    #[arg(long, value_name = "HEX", default_value = DEFAULT_HEAD_COLOR)]
    pub color_head: String,

    /// Tail and aura color as six hex digits
    #[arg(long, value_name = "HEX", default_value = DEFAULT_TAIL_COLOR)]
    pub color_tail: String,

    /// Glyphs drawn at the pointer
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_HEAD_SYMBOL)]
    pub symbol_head: String,

    /// Maximum number of trail points
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TRAIL_LENGTH)]
    pub trail_length: usize,

    /// Pause after each frame, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_FRAME_DELAY_SECS)]
    pub frame_delay: f64,

    /// Longest wait for input per frame, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_POLL_TIMEOUT_MS)]
    pub poll_timeout_ms: u64,

    /// Maximum number of background stars (0 turns them off)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_STARS)]
    pub max_stars: usize,

    /// Seed for star placement, for reproducible runs
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl CliArgs {
    /// Validate the options and build the effect settings.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn into_config(self) -> Result<EffectConfig, ConfigError> {
        let config = EffectConfig::new(
            &self.color_head,
            &self.color_tail,
            &self.symbol_head,
            self.trail_length,
            self.frame_delay,
        )?
        .with_poll_timeout(Duration::from_millis(self.poll_timeout_ms))
        .with_max_stars(self.max_stars)
        .with_seed(self.seed);

        log::debug!("config: {config:?}");
        Ok(config)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use shdw_term::color::Rgb;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("term-shdw").chain(args.iter().copied()))
            .unwrap()
    }

    // ── Parsing ────────────────────────────────────────────────────────

    #[test]
    fn command_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn no_flags_gives_default_config() {
        assert_eq!(parse(&[]).into_config().unwrap(), EffectConfig::default());
    }

    #[test]
    fn all_flags_are_applied() {
        let config = parse(&[
            "--color-head",
            "#ff0000",
            "--color-tail",
            "00FF00",
            "--symbol-head",
            "@",
            "--trail-length",
            "5",
            "--frame-delay",
            "0.02",
            "--poll-timeout-ms",
            "16",
            "--max-stars",
            "0",
            "--seed",
            "99",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.head_color, Rgb::new(255, 0, 0));
        assert_eq!(config.tail_color, Rgb::new(0, 255, 0));
        assert_eq!(config.head_symbol, "@");
        assert_eq!(config.trail_length, 5);
        assert_eq!(config.frame_delay, Duration::from_secs_f64(0.02));
        assert_eq!(config.poll_timeout, Duration::from_millis(16));
        assert_eq!(config.max_stars, 0);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn non_numeric_trail_length_is_a_parse_error() {
        let argv = ["term-shdw", "--trail-length", "lots"];
        assert!(CliArgs::try_parse_from(argv).is_err());
    }

    // ── Validation ─────────────────────────────────────────────────────

    #[test]
    fn bad_color_is_rejected() {
        let err = parse(&["--color-head", "nothex"]).into_config().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor(_)));
    }

    #[test]
    fn zero_trail_is_rejected() {
        let err = parse(&["--trail-length", "0"]).into_config().unwrap_err();
        assert_eq!(err, ConfigError::ZeroTrailLength);
    }

    #[test]
    fn negative_delay_is_rejected() {
        let err = parse(&["--frame-delay=-1"]).into_config().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFrameDelay(_)));
    }
}

// SPDX-License-Identifier: MIT

//! The frame loop.
//!
//! One [`Runner::tick`] is one frame: query the terminal size, wait briefly
//! for input, fold any mouse reports into the comet state, expire old trail
//! points, maybe spawn a star, and repaint. [`Runner::run`] repeats that
//! until the interrupt flag is raised.
//!
//! The runner is generic over its [`InputSource`] and its RNG, and the size
//! query is a plain function pointer, so the whole loop runs in tests with
//! scripted bytes, a seeded generator and a fixed terminal size.

use std::io::Write;
use std::thread;
use std::time::Instant;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shdw_term::geometry::{self, Position};
use shdw_term::input::MouseDecoder;
use shdw_term::output::OutputBuffer;
use shdw_term::reader::{InputSource, READ_BUF_SIZE};
use shdw_term::signal;
use shdw_term::terminal::{self, Size};

use crate::config::{EffectConfig, HEAD_HEIGHT};
use crate::render::Renderer;
use crate::stars::StarField;
use crate::state::{CometMode, CometState};

/// Why [`Runner::run`] returned normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// SIGINT, SIGTERM or SIGHUP arrived.
    Interrupted,
}

/// Owns all effect state and drives it one frame at a time.
pub struct Runner<S, R = StdRng> {
    config: EffectConfig,
    source: S,
    decoder: MouseDecoder,
    comet: CometState,
    stars: StarField,
    renderer: Renderer,
    rng: R,
    out: OutputBuffer,
    size_fn: fn() -> Size,
    read_buf: Vec<u8>,
    frames: u64,
}

impl<S: InputSource> Runner<S, StdRng> {
    /// A runner reading from `source` and drawing with `config`.
    ///
    /// Stars use `config.seed` if set, OS entropy otherwise. The terminal
    /// size is queried with [`terminal::terminal_size`] every frame.
    #[must_use]
    pub fn new(config: EffectConfig, source: S) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let now = Instant::now();

        Self {
            decoder: MouseDecoder::new(),
            comet: CometState::new(config.trail_length, now),
            stars: StarField::new(config.max_stars),
            renderer: Renderer::new(&config),
            rng,
            out: OutputBuffer::new(),
            size_fn: terminal::terminal_size,
            read_buf: vec![0; READ_BUF_SIZE],
            frames: 0,
            config,
            source,
        }
    }
}

impl<S: InputSource, R: Rng> Runner<S, R> {
    /// Swap in a different random number generator.
    #[must_use]
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Runner<S, R2> {
        Runner {
            config: self.config,
            source: self.source,
            decoder: self.decoder,
            comet: self.comet,
            stars: self.stars,
            renderer: self.renderer,
            rng,
            out: self.out,
            size_fn: self.size_fn,
            read_buf: self.read_buf,
            frames: self.frames,
        }
    }

    /// Replace the per-frame terminal size query.
    #[must_use]
    pub fn with_size_fn(mut self, size_fn: fn() -> Size) -> Self {
        self.size_fn = size_fn;
        self
    }

    /// Decode raw input bytes and record every new pointer position.
    ///
    /// Positions are clamped so the head fits on screen. Returns how many
    /// positions were recorded (repeats of the last one are not).
    pub fn feed(&mut self, bytes: &[u8], size: Size, now: Instant) -> usize {
        let head_width = self.config.head_width();
        let mut recorded = 0;

        for event in self.decoder.advance(bytes) {
            let pos = geometry::clamp_to_drawable(event.position, head_width, HEAD_HEIGHT, size);
            trace!(
                "mouse {:?} at ({}, {}) -> ({}, {})",
                event.protocol, event.position.x, event.position.y, pos.x, pos.y
            );
            if self.comet.record(pos, now) {
                recorded += 1;
            }
        }
        recorded
    }

    /// Run one frame at time `now` and write it to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the frame fails.
    pub fn tick(&mut self, w: &mut impl Write, now: Instant) -> std::io::Result<CometMode> {
        self.tick_with(w, || now)
    }

    /// Run one frame, taking its time from `clock` once the input wait is
    /// over. Reports are stamped when they arrive, not when the wait began.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the frame fails.
    pub fn tick_with(
        &mut self,
        w: &mut impl Write,
        clock: impl FnOnce() -> Instant,
    ) -> std::io::Result<CometMode> {
        let size = (self.size_fn)();
        let n = self.poll_input();
        let now = clock();

        if n > 0 {
            let buf = std::mem::take(&mut self.read_buf);
            self.feed(&buf[..n], size, now);
            self.read_buf = buf;
        }

        self.comet.prune(now);
        self.stars.maybe_spawn(&mut self.rng, size, now);
        self.render(w, size, now)
    }

    /// Wait for input. A failed poll or read counts as no input.
    fn poll_input(&mut self) -> usize {
        match self.source.poll_read(&mut self.read_buf, self.config.poll_timeout) {
            Ok(n) => n,
            Err(e) => {
                debug!("input unavailable this frame: {e}");
                0
            }
        }
    }

    /// Compose a frame from the current state and flush it to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn render(
        &mut self,
        w: &mut impl Write,
        size: Size,
        now: Instant,
    ) -> std::io::Result<CometMode> {
        let mode = self
            .renderer
            .frame(&mut self.out, &self.comet, &mut self.stars, size, now)?;
        let bytes = self.out.flush_to(w)?;
        self.frames += 1;
        trace!("frame {} {mode:?}: {bytes} bytes", self.frames);
        Ok(mode)
    }

    /// Tick until an interrupt is requested, sleeping the frame delay
    /// between frames.
    ///
    /// # Errors
    ///
    /// Returns the first error from writing a frame.
    pub fn run(&mut self, w: &mut impl Write) -> crate::Result<ExitReason> {
        debug!(
            "frame loop start: trail {} stars {} poll {:?} delay {:?}",
            self.config.trail_length,
            self.config.max_stars,
            self.config.poll_timeout,
            self.config.frame_delay
        );

        loop {
            if signal::take_interrupt() {
                debug!("interrupted after {} frames", self.frames);
                return Ok(ExitReason::Interrupted);
            }

            self.tick_with(w, Instant::now)?;

            if !self.config.frame_delay.is_zero() {
                thread::sleep(self.config.frame_delay);
            }
        }
    }

    #[must_use]
    pub const fn comet(&self) -> &CometState {
        &self.comet
    }

    #[must_use]
    pub const fn stars(&self) -> &StarField {
        &self.stars
    }

    /// Last recorded pointer position.
    #[must_use]
    pub const fn last_pos(&self) -> Option<Position> {
        self.comet.last_pos()
    }

    /// Frames rendered so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

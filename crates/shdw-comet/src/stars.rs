// SPDX-License-Identifier: MIT

//! Background stars.
//!
//! Each frame has a small chance of adding one star at a random cell; every
//! star vanishes four seconds after it appeared. With the default 2% chance
//! and a frame every ~10 ms the sky settles at a few dozen stars, well under
//! the cap, which only matters for very fast frame rates.
//!
//! Randomness comes in through `&mut impl Rng` so tests can use a seeded
//! generator and get the same sky every run.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;
use shdw_term::ansi;
use shdw_term::geometry::Position;
use shdw_term::terminal::Size;

/// Glyphs a star may be drawn with.
pub const STAR_GLYPHS: [char; 3] = ['.', '+', '*'];
/// Per-frame chance of spawning a star.
pub const STAR_SPAWN_CHANCE: f64 = 0.02;
/// Stars at least this old are removed.
pub const STAR_MAX_AGE: Duration = Duration::from_secs(4);
/// Default cap on live stars.
pub const DEFAULT_MAX_STARS: usize = 100;

/// One star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub position: Position,
    pub created: Instant,
    pub glyph: char,
}

impl Star {
    /// Time since the star appeared. Zero if `now` is earlier.
    #[inline]
    #[must_use]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created)
    }
}

/// The set of live stars.
#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
    capacity: usize,
    spawn_chance: f64,
}

impl StarField {
    /// An empty field holding at most `capacity` stars.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_spawn_chance(capacity, STAR_SPAWN_CHANCE)
    }

    /// An empty field with a custom per-frame spawn chance (clamped to `[0, 1]`).
    #[must_use]
    pub fn with_spawn_chance(capacity: usize, spawn_chance: f64) -> Self {
        let spawn_chance = if spawn_chance.is_nan() {
            0.0
        } else {
            spawn_chance.clamp(0.0, 1.0)
        };
        Self {
            stars: Vec::with_capacity(capacity.min(DEFAULT_MAX_STARS)),
            capacity,
            spawn_chance,
        }
    }

    /// Maybe add one star somewhere inside `size`.
    ///
    /// Returns whether a star was added. Never adds past the cap.
    pub fn maybe_spawn(&mut self, rng: &mut impl Rng, size: Size, now: Instant) -> bool {
        if self.stars.len() >= self.capacity || !rng.gen_bool(self.spawn_chance) {
            return false;
        }

        let x = rng.gen_range(1..=i32::from(size.cols.max(1)));
        let y = rng.gen_range(1..=i32::from(size.rows.max(1)));
        let glyph = *STAR_GLYPHS.choose(rng).unwrap_or(&STAR_GLYPHS[0]);

        self.stars.push(Star {
            position: Position::new(x, y),
            created: now,
            glyph,
        });
        true
    }

    /// Draw every live star that fits in `size`, then drop the expired ones.
    ///
    /// Stars outside the current bounds (the terminal shrank) are kept but
    /// not drawn; they come back if the terminal grows before they expire.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn render_and_prune(
        &mut self,
        out: &mut impl Write,
        size: Size,
        now: Instant,
    ) -> io::Result<()> {
        for star in &self.stars {
            if star.age(now) < STAR_MAX_AGE && star.position.is_within(size) {
                ansi::cursor_to(out, star.position.x, star.position.y)?;
                ansi::fg_bright_white(out)?;
                write!(out, "{}", star.glyph)?;
                ansi::reset(out)?;
            }
        }
        self.prune(now);
        Ok(())
    }

    /// Drop every star whose age has reached [`STAR_MAX_AGE`].
    pub fn prune(&mut self, now: Instant) {
        self.stars.retain(|s| s.age(now) < STAR_MAX_AGE);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Live stars, in spawn order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Star> + '_ {
        self.stars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TERM: Size = Size { cols: 80, rows: 24 };

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    // ── Spawning ─────────────────────────────────────────────────────

    #[test]
    fn certain_spawn_adds_in_bounds_star() {
        let mut field = StarField::with_spawn_chance(10, 1.0);
        assert!(field.maybe_spawn(&mut rng(), TERM, Instant::now()));

        let star = field.iter().next().unwrap();
        assert!(star.position.is_within(TERM));
        assert!(STAR_GLYPHS.contains(&star.glyph));
    }

    #[test]
    fn zero_chance_never_spawns() {
        let mut field = StarField::with_spawn_chance(10, 0.0);
        let mut r = rng();
        let now = Instant::now();
        for _ in 0..1000 {
            assert!(!field.maybe_spawn(&mut r, TERM, now));
        }
        assert!(field.is_empty());
    }

    #[test]
    fn default_chance_spawns_sometimes() {
        let mut field = StarField::new(DEFAULT_MAX_STARS);
        let mut r = rng();
        let now = Instant::now();
        let spawned = (0..2000).filter(|_| field.maybe_spawn(&mut r, TERM, now)).count();
        // Expect ~40; anything in a generous band means the chance is wired up.
        assert!((5..=100).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn cap_is_respected() {
        let mut field = StarField::with_spawn_chance(3, 1.0);
        let mut r = rng();
        let now = Instant::now();
        for _ in 0..10 {
            field.maybe_spawn(&mut r, TERM, now);
        }
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn one_cell_terminal() {
        let mut field = StarField::with_spawn_chance(1, 1.0);
        field.maybe_spawn(&mut rng(), Size { cols: 1, rows: 1 }, Instant::now());
        assert_eq!(field.iter().next().unwrap().position, Position::new(1, 1));
    }

    #[test]
    fn nan_chance_is_zero() {
        let mut field = StarField::with_spawn_chance(1, f64::NAN);
        assert!(!field.maybe_spawn(&mut rng(), TERM, Instant::now()));
    }

    // ── Rendering and expiry ─────────────────────────────────────────

    #[test]
    fn render_draws_star_in_white_then_resets() {
        let t0 = Instant::now();
        let mut field = StarField::with_spawn_chance(1, 1.0);
        field.maybe_spawn(&mut rng(), TERM, t0);
        let star = *field.iter().next().unwrap();

        let mut out = Vec::new();
        field.render_and_prune(&mut out, TERM, t0).unwrap();

        let expected = format!(
            "\x1b[{};{}H\x1b[97m{}\x1b[0m",
            star.position.y, star.position.x, star.glyph
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn expired_star_not_drawn_and_removed() {
        let t0 = Instant::now();
        let mut field = StarField::with_spawn_chance(1, 1.0);
        field.maybe_spawn(&mut rng(), TERM, t0);

        let mut out = Vec::new();
        field.render_and_prune(&mut out, TERM, t0 + STAR_MAX_AGE).unwrap();

        assert!(out.is_empty());
        assert!(field.is_empty());
    }

    #[test]
    fn star_outside_shrunk_terminal_kept_but_hidden() {
        let t0 = Instant::now();
        let mut field = StarField::with_spawn_chance(1, 1.0);
        let big = Size { cols: 200, rows: 100 };
        let mut r = rng();
        // Retry seeds until the star lands outside the small terminal.
        while field.is_empty() || field.iter().next().unwrap().position.is_within(TERM) {
            field = StarField::with_spawn_chance(1, 1.0);
            field.maybe_spawn(&mut r, big, t0);
        }

        let mut out = Vec::new();
        field.render_and_prune(&mut out, TERM, t0 + secs(1.0)).unwrap();

        assert!(out.is_empty());
        assert_eq!(field.len(), 1);
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        #[test]
        fn count_never_exceeds_cap(cap in 0usize..20, attempts in 0usize..200, seed in any::<u64>()) {
            let mut field = StarField::with_spawn_chance(cap, 1.0);
            let mut r = StdRng::seed_from_u64(seed);
            let now = Instant::now();
            for _ in 0..attempts {
                field.maybe_spawn(&mut r, TERM, now);
                prop_assert!(field.len() <= cap);
            }
        }

        #[test]
        fn prune_leaves_no_expired_stars(offsets in proptest::collection::vec(0u64..8000, 0..30)) {
            let t0 = Instant::now();
            let mut field = StarField::with_spawn_chance(64, 1.0);
            let mut r = StdRng::seed_from_u64(1);
            for &off in &offsets {
                field.maybe_spawn(&mut r, TERM, t0 + Duration::from_millis(off));
            }
            let now = t0 + Duration::from_millis(8000);
            field.prune(now);
            prop_assert!(field.iter().all(|s| s.age(now) < STAR_MAX_AGE));
        }
    }
}

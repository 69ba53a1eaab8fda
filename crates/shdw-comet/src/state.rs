// SPDX-License-Identifier: MIT

//! Where the pointer is and what the comet should look like about it.
//!
//! [`CometState`] owns the last clamped mouse position, the time of the last
//! accepted mouse event and the trail. The display mode is never stored; it
//! is derived from the clock on every frame by [`CometState::mode`].

use std::time::{Duration, Instant};

use shdw_term::geometry::Position;

use crate::trail::Trail;

/// How long after the last mouse event the comet stays in trail mode.
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_millis(400);

/// What the renderer draws for the comet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CometMode {
    /// No mouse event seen yet; draw nothing.
    Hidden,
    /// The pointer moved recently; draw trail and head.
    Active,
    /// The pointer has rested; draw aura and head.
    Idle,
}

/// Mutable comet state carried from frame to frame.
#[derive(Debug, Clone)]
pub struct CometState {
    last_pos: Option<Position>,
    last_event: Instant,
    trail: Trail,
}

impl CometState {
    /// A comet that has not seen the pointer yet.
    ///
    /// `now` only seeds the event clock; the mode stays [`CometMode::Hidden`]
    /// until the first [`record`](Self::record).
    #[must_use]
    pub fn new(trail_length: usize, now: Instant) -> Self {
        Self {
            last_pos: None,
            last_event: now,
            trail: Trail::new(trail_length),
        }
    }

    /// Accept an already clamped pointer position.
    ///
    /// A position equal to the last one changes nothing (the event clock is
    /// not refreshed either). Returns whether the position was new.
    pub fn record(&mut self, pos: Position, now: Instant) -> bool {
        if self.last_pos == Some(pos) {
            return false;
        }
        self.last_pos = Some(pos);
        self.last_event = now;
        self.trail.push(pos, now);
        true
    }

    /// Display mode at `now`.
    #[must_use]
    pub fn mode(&self, now: Instant) -> CometMode {
        match self.last_pos {
            None => CometMode::Hidden,
            Some(_) if now.saturating_duration_since(self.last_event) < INACTIVITY_TIMEOUT => {
                CometMode::Active
            }
            Some(_) => CometMode::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub const fn last_pos(&self) -> Option<Position> {
        self.last_pos
    }

    #[inline]
    #[must_use]
    pub const fn last_event(&self) -> Instant {
        self.last_event
    }

    #[inline]
    #[must_use]
    pub const fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Expire old trail points.
    pub fn prune(&mut self, now: Instant) {
        self.trail.prune(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // ── Mode ───────────────────────────────────────────────────────────

    #[test]
    fn fresh_state_is_hidden() {
        let t0 = Instant::now();
        let state = CometState::new(20, t0);
        assert_eq!(state.mode(t0), CometMode::Hidden);
        assert_eq!(state.mode(t0 + ms(5000)), CometMode::Hidden);
        assert_eq!(state.last_pos(), None);
    }

    #[test]
    fn active_until_timeout_then_idle() {
        let t0 = Instant::now();
        let mut state = CometState::new(20, t0);
        state.record(Position::new(10, 5), t0);

        assert_eq!(state.mode(t0), CometMode::Active);
        assert_eq!(state.mode(t0 + ms(399)), CometMode::Active);
        assert_eq!(state.mode(t0 + INACTIVITY_TIMEOUT), CometMode::Idle);
        assert_eq!(state.mode(t0 + ms(10_000)), CometMode::Idle);
    }

    #[test]
    fn new_event_reactivates() {
        let t0 = Instant::now();
        let mut state = CometState::new(20, t0);
        state.record(Position::new(10, 5), t0);
        state.record(Position::new(11, 5), t0 + ms(1000));
        assert_eq!(state.mode(t0 + ms(1100)), CometMode::Active);
    }

    // ── Record ─────────────────────────────────────────────────────────

    #[test]
    fn record_appends_to_trail() {
        let t0 = Instant::now();
        let mut state = CometState::new(20, t0);
        assert!(state.record(Position::new(1, 1), t0));
        assert!(state.record(Position::new(2, 1), t0));
        assert_eq!(state.trail().len(), 2);
        assert_eq!(state.last_pos(), Some(Position::new(2, 1)));
    }

    #[test]
    fn repeated_position_is_ignored() {
        let t0 = Instant::now();
        let mut state = CometState::new(20, t0);
        state.record(Position::new(4, 4), t0);
        assert!(!state.record(Position::new(4, 4), t0 + ms(300)));

        assert_eq!(state.trail().len(), 1);
        assert_eq!(state.last_event(), t0);
        // The repeat did not refresh the clock, so the comet still goes idle.
        assert_eq!(state.mode(t0 + ms(450)), CometMode::Idle);
    }

    #[test]
    fn returning_to_earlier_position_is_recorded() {
        let t0 = Instant::now();
        let mut state = CometState::new(20, t0);
        state.record(Position::new(1, 1), t0);
        state.record(Position::new(2, 1), t0);
        assert!(state.record(Position::new(1, 1), t0));
        assert_eq!(state.trail().len(), 3);
    }

    #[test]
    fn prune_empties_trail_but_keeps_position() {
        let t0 = Instant::now();
        let mut state = CometState::new(20, t0);
        state.record(Position::new(3, 3), t0);
        state.prune(t0 + ms(2500));

        assert!(state.trail().is_empty());
        assert_eq!(state.last_pos(), Some(Position::new(3, 3)));
        assert_eq!(state.mode(t0 + ms(2500)), CometMode::Idle);
    }
}

// SPDX-License-Identifier: MIT

//! The comet's trail: recent pointer positions, oldest first.
//!
//! Two limits keep it short: a count cap enforced on every push (FIFO
//! eviction) and an age limit enforced by [`Trail::prune`], which the frame
//! loop calls once per frame. There is no explicit clear; a trail empties
//! itself two seconds after the pointer stops.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use shdw_term::geometry::Position;

/// Points at least this old are removed by [`Trail::prune`].
pub const TRAIL_MAX_AGE: Duration = Duration::from_secs(2);

/// One recorded pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailPoint {
    pub position: Position,
    pub created: Instant,
}

impl TrailPoint {
    /// Time since the point was recorded. Zero if `now` is earlier.
    #[inline]
    #[must_use]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created)
    }
}

/// Bounded, time-ordered position history.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl Trail {
    /// An empty trail holding at most `capacity` points.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest ones past the cap.
    pub fn push(&mut self, position: Position, now: Instant) {
        self.points.push_back(TrailPoint {
            position,
            created: now,
        });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Drop every point whose age has reached [`TRAIL_MAX_AGE`].
    pub fn prune(&mut self, now: Instant) {
        self.points.retain(|p| p.age(now) < TRAIL_MAX_AGE);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    /// The most recent point.
    #[cfg(test)]
    fn newest(&self) -> Option<&TrailPoint> {
        self.points.back()
    }
}

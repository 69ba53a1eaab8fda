// SPDX-License-Identifier: MIT
//
// Screen geometry: 1-based cell positions and drawable-region clamping.
//
// Terminals address cells from (1, 1). Mouse reports arrive in the same
// space, so positions stay 1-based end to end and are only ever clamped,
// never re-based.

use crate::terminal::Size;

/// A 1-based terminal cell position: `x` is the column, `y` the row.
///
/// Signed so that footprint offsets (`x - 1`, `y - 1`) can be computed
/// before the bounds check that discards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This position shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the position lies inside `[1, cols] × [1, rows]`.
    #[inline]
    #[must_use]
    pub fn is_within(self, size: Size) -> bool {
        (1..=i32::from(size.cols)).contains(&self.x) && (1..=i32::from(size.rows)).contains(&self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Clamp a position so a symbol anchored on it stays on screen.
///
/// `x` is clamped to `[symbol_width/2 + 1, cols - symbol_width/2]` and `y`
/// to `[1, rows - symbol_height]`, with truncating integer division. The
/// lower bound is applied first and the upper bound last, so on a terminal
/// narrower than the symbol the upper bound wins instead of panicking.
#[must_use]
pub fn clamp_to_drawable(
    pos: Position,
    symbol_width: u16,
    symbol_height: u16,
    size: Size,
) -> Position {
    let half_width = i32::from(symbol_width / 2);
    let cols = i32::from(size.cols);
    let rows = i32::from(size.rows);

    let x = pos.x.max(half_width + 1).min(cols - half_width);
    let y = pos.y.max(1).min(rows - i32::from(symbol_height));

    Position { x, y }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

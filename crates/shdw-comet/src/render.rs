// SPDX-License-Identifier: MIT

//! Frame composition.
//!
//! Every frame is a full repaint: clear, stars, then the comet. There is no
//! cell grid and no diffing; the terminal is the framebuffer. Callers pass
//! an [`OutputBuffer`](shdw_term::output::OutputBuffer) so the whole frame
//! reaches the terminal in one write.
//!
//! Every comet glyph is emitted as cursor move, 24-bit color, glyph, bold.
//! The bold lands after the glyph and so styles whatever is drawn next; it
//! is part of the look and kept as is.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use shdw_term::ansi;
use shdw_term::color::{self, Rgb};
use shdw_term::geometry::Position;
use shdw_term::terminal::Size;

use crate::config::{EffectConfig, HEAD_HEIGHT};
use crate::stars::StarField;
use crate::state::{CometMode, CometState};
use crate::trail::Trail;

/// Trail points older than this are not drawn (they stay until pruned).
pub const TRAIL_FADE_AGE: Duration = Duration::from_millis(500);

/// Trail glyphs by eased age: fresh points are `+`, fading ones blank.
pub const TRAIL_GLYPHS: [char; 2] = ['+', ' '];

/// The aura glyph.
pub const AURA_GLYPH: char = '+';

/// The head symbol is drawn five times: left, right, up, down, center.
const HEAD_OFFSETS: [(i32, i32); 5] = [(-1, 0), (1, 0), (0, -1), (0, 1), (0, 0)];

const SINGLE: &[(i32, i32)] = &[(0, 0)];
const PAIR: &[(i32, i32)] = &[(0, 0), (1, 0)];
const BLOCK: &[(i32, i32)] = &[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Glyph for a trail point of the given age, or `None` once it has faded.
///
/// `t = age / 0.5 s` is eased with `1 - (1 - t)^2` and mapped onto
/// [`TRAIL_GLYPHS`].
#[must_use]
pub fn trail_glyph(age: Duration) -> Option<char> {
    if age > TRAIL_FADE_AGE {
        return None;
    }
    let t = age.as_secs_f64() / TRAIL_FADE_AGE.as_secs_f64();
    let eased = 1.0 - (1.0 - t).powi(2);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let idx = ((eased * TRAIL_GLYPHS.len() as f64) as usize).min(TRAIL_GLYPHS.len() - 1);
    Some(TRAIL_GLYPHS[idx])
}

/// Interpolation factor from head color toward tail color for point `index`
/// of a trail holding `len` points (index 0 is the oldest).
///
/// The oldest point gets 1.0 (pure tail color), the newest 0.0 (pure head
/// color). A one-point trail is pure tail color.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trail_gradient(index: usize, len: usize) -> f64 {
    let span = len.saturating_sub(1).max(1);
    1.0 - index as f64 / span as f64
}

/// Cell offsets drawn for the trail point `rank` places behind the newest.
///
/// The five newest points are one cell, the next three a horizontal pair,
/// and everything older a 3×3 block.
#[must_use]
pub const fn trail_footprint(rank: usize) -> &'static [(i32, i32)] {
    match rank {
        0..5 => SINGLE,
        5..8 => PAIR,
        _ => BLOCK,
    }
}

/// Cells of the idle aura around a head anchored at `pos`.
///
/// The head box starts at column `pos.x - width/2`, is `width` cells wide
/// and [`HEAD_HEIGHT`] rows tall. The aura is every cell of that box grown
/// by two in each direction, minus the head box and the four outer corners.
/// Off-screen cells are left out.
#[must_use]
pub fn aura_cells(pos: Position, head_width: u16, size: Size) -> Vec<Position> {
    let width = i32::from(head_width);
    let height = i32::from(HEAD_HEIGHT);
    let left = pos.x - width / 2;
    let top = pos.y;

    let (x0, x1) = (left - 2, left + width + 1);
    let (y0, y1) = (top - 2, top + height + 1);

    let mut cells = Vec::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let in_head = (top..top + height).contains(&y) && (left..left + width).contains(&x);
            let corner = (x == x0 || x == x1) && (y == y0 || y == y1);
            let cell = Position::new(x, y);
            if !in_head && !corner && cell.is_within(size) {
                cells.push(cell);
            }
        }
    }
    cells
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws frames for one effect configuration.
#[derive(Debug, Clone)]
pub struct Renderer {
    head_color: Rgb,
    tail_color: Rgb,
    head_symbol: String,
    head_width: u16,
}

impl Renderer {
    #[must_use]
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            head_color: config.head_color,
            tail_color: config.tail_color,
            head_symbol: config.head_symbol.clone(),
            head_width: config.head_width(),
        }
    }

    /// Compose one full frame into `out` and return the mode it was drawn in.
    ///
    /// Stars are drawn and expired here; the trail is only read.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn frame(
        &self,
        out: &mut impl Write,
        comet: &CometState,
        stars: &mut StarField,
        size: Size,
        now: Instant,
    ) -> io::Result<CometMode> {
        ansi::clear_screen(out)?;
        stars.render_and_prune(out, size, now)?;

        let mode = comet.mode(now);
        if let Some(pos) = comet.last_pos() {
            match mode {
                CometMode::Active => {
                    self.draw_trail(out, comet.trail(), size, now)?;
                    self.draw_head(out, pos, size)?;
                }
                CometMode::Idle => {
                    self.draw_aura(out, pos, size)?;
                    self.draw_head(out, pos, size)?;
                }
                CometMode::Hidden => {}
            }
        }
        Ok(mode)
    }

    /// Draw the head symbol at its five offsets around `pos`.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn draw_head(&self, out: &mut impl Write, pos: Position, size: Size) -> io::Result<()> {
        let half = i32::from(self.head_width / 2);
        let rows = 1..=i32::from(size.rows);

        for (dx, dy) in HEAD_OFFSETS {
            let cell = pos.offset(dx, dy);
            if !rows.contains(&cell.y) {
                continue;
            }
            let col = (cell.x - half).max(1);
            ansi::cursor_to(out, col, cell.y)?;
            ansi::fg(out, self.head_color)?;
            out.write_all(self.head_symbol.as_bytes())?;
            ansi::bold(out)?;
        }
        Ok(())
    }

    /// Draw every trail point that has not faded yet.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn draw_trail(
        &self,
        out: &mut impl Write,
        trail: &Trail,
        size: Size,
        now: Instant,
    ) -> io::Result<()> {
        let len = trail.len();
        for (i, point) in trail.iter().enumerate() {
            let Some(glyph) = trail_glyph(point.age(now)) else {
                continue;
            };
            let color =
                color::lerp_color(self.head_color, self.tail_color, trail_gradient(i, len));

            for &(dx, dy) in trail_footprint(len - 1 - i) {
                let cell = point.position.offset(dx, dy);
                if cell.is_within(size) {
                    put(out, cell, color, glyph)?;
                }
            }
        }
        Ok(())
    }

    /// Draw the idle aura around a head anchored at `pos`.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn draw_aura(&self, out: &mut impl Write, pos: Position, size: Size) -> io::Result<()> {
        for cell in aura_cells(pos, self.head_width, size) {
            put(out, cell, self.tail_color, AURA_GLYPH)?;
        }
        Ok(())
    }
}

/// One styled glyph at one cell.
fn put(out: &mut impl Write, cell: Position, color: Rgb, glyph: char) -> io::Result<()> {
    ansi::cursor_to(out, cell.x, cell.y)?;
    ansi::fg(out, color)?;
    write!(out, "{glyph}")?;
    ansi::bold(out)
}

// SPDX-License-Identifier: MIT
//
// Escape sequences the effect emits.
//
// Each function appends one command to an `impl Write`, normally the
// frame's `OutputBuffer`. Nothing here tracks terminal state; the renderer
// and the terminal guard decide what to send and when.
//
// Coordinates are 1-based `i32`, exactly as mouse reports deliver them.
// Footprint math can produce 0 or negative values; callers clip those
// before calling `cursor_to`.

use std::io::{self, Write};

use crate::color::Rgb;

// ─── Cursor Movement ─────────────────────────────────────────────────────────

/// Move the cursor to `(col, row)` using the CUP (Cursor Position) sequence.
#[inline]
pub fn cursor_to(w: &mut impl Write, col: i32, row: i32) -> io::Result<()> {
    write!(w, "\x1b[{row};{col}H")
}

/// Move the cursor to the top-left corner.
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// `CSI ? 25 l`: cursor invisible.
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// `CSI ? 25 h`: cursor visible.
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen Buffer ───────────────────────────────────────────────────────────

/// `CSI 2 J`: erase the whole screen. Every frame starts with this.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Switch to the alternate screen (`CSI ? 1049 h`).
///
/// The shell's scrollback survives the effect untouched; leaving restores it.
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Back to the normal screen, scrollback intact (`CSI ? 1049 l`).
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// `SGR 0`: drop color and bold.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Turn on bold (SGR 1).
#[inline]
pub fn bold(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[1m")
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// Set a 24-bit `TrueColor` foreground.
#[inline]
pub fn fg(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

/// Set the bright white palette foreground (SGR 97).
///
/// Follows the terminal theme's notion of "bright white" instead of a fixed
/// RGB value, which keeps stars neutral on light and dark backgrounds alike.
#[inline]
pub fn fg_bright_white(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[97m")
}

// ─── Mouse Reporting ────────────────────────────────────────────────────────

/// Enable any-motion mouse tracking (DEC 1003) with SGR encoding (DEC 1006).
///
/// Terminals that ignore 1006 fall back to the legacy `ESC [ M` encoding,
/// which the input decoder also understands.
pub fn enable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1003h")?;
    w.write_all(b"\x1b[?1006h")
}

/// Disable mouse tracking and the SGR encoding.
pub fn disable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1003l")?;
    w.write_all(b"\x1b[?1006l")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: run a writer function and return the output as a string.
    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ─────────────────────────────────────────────────────────

    #[test]
    fn cursor_to_is_row_then_col() {
        assert_eq!(emit(|w| cursor_to(w, 10, 5)), "\x1b[5;10H");
    }

    #[test]
    fn cursor_to_origin() {
        assert_eq!(emit(|w| cursor_to(w, 1, 1)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_home_sequence() {
        assert_eq!(emit(|w| cursor_home(w)), "\x1b[H");
    }

    #[test]
    fn cursor_hide_sequence() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
    }

    #[test]
    fn cursor_show_sequence() {
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    // ── Screen ─────────────────────────────────────────────────────────

    #[test]
    fn clear_screen_sequence() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
    }

    #[test]
    fn alt_screen_sequences() {
        assert_eq!(emit(|w| enter_alt_screen(w)), "\x1b[?1049h");
        assert_eq!(emit(|w| exit_alt_screen(w)), "\x1b[?1049l");
    }

    // ── Attributes ─────────────────────────────────────────────────────

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn bold_sequence() {
        assert_eq!(emit(|w| bold(w)), "\x1b[1m");
    }

    // ── Colors ─────────────────────────────────────────────────────────

    #[test]
    fn fg_truecolor() {
        let c = Rgb::new(0x68, 0x14, 0x14);
        assert_eq!(emit(|w| fg(w, c)), "\x1b[38;2;104;20;20m");
    }

    #[test]
    fn fg_matches_color_code() {
        let c = Rgb::new(123, 135, 237);
        assert_eq!(emit(|w| fg(w, c)), c.color_code());
    }

    #[test]
    fn fg_bright_white_sequence() {
        assert_eq!(emit(|w| fg_bright_white(w)), "\x1b[97m");
    }

    // ── Mouse ──────────────────────────────────────────────────────────

    #[test]
    fn enable_mouse_any_motion_sgr() {
        assert_eq!(emit(|w| enable_mouse(w)), "\x1b[?1003h\x1b[?1006h");
    }

    #[test]
    fn disable_mouse_any_motion_sgr() {
        assert_eq!(emit(|w| disable_mouse(w)), "\x1b[?1003l\x1b[?1006l");
    }

    #[test]
    fn sequences_compose() {
        let out = emit(|w| {
            cursor_to(w, 3, 2)?;
            fg(w, Rgb::new(1, 2, 3))?;
            w.write_all(b"+")?;
            bold(w)
        });
        assert_eq!(out, "\x1b[2;3H\x1b[38;2;1;2;3m+\x1b[1m");
    }
}

// SPDX-License-Identifier: MIT
//
// Mouse input decoder.
//
// Turns raw stdin bytes into mouse positions. Two encodings are understood,
// matching what `ansi::enable_mouse` asks for:
//
// - Legacy X10 (`ESC [ M cb cx cy`): three raw bytes, each biased by 32.
//   Coordinates saturate at 223 because a byte can't go higher.
// - SGR (`ESC [ < cb ; x ; y M|m`): decimal ASCII fields, no upper limit.
//   Terminals that honour DEC 1006 send this; the rest fall back to legacy.
//
// Everything else (keystrokes, unknown escape sequences, malformed mouse
// reports) is consumed and dropped. The decoder never fails: a bad
// sequence is simply "no event this frame".
//
// # Design
//
// The decoder keeps a small internal byte buffer because a report can be
// split across two `read()` calls. Feed bytes with
// [`MouseDecoder::advance`] and take the events from the returned `Vec`.
// Incomplete sequences stay buffered until the rest arrives.

use bitflags::bitflags;

use crate::geometry::Position;

/// Longest SGR parameter body we wait for before declaring it garbage.
///
/// `65535;65535;65535` is 17 bytes; anything much longer without a
/// terminator is not a mouse report.
const MAX_SGR_BODY: usize = 32;

const ESC: u8 = 0x1B;

// ─── Event Types ────────────────────────────────────────────────────────────

/// Which wire encoding a report arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseProtocol {
    /// `ESC [ M` with 32-biased raw bytes.
    Legacy,
    /// `ESC [ <` with decimal fields.
    Sgr,
}

bitflags! {
    /// Keyboard modifiers held during a mouse report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

/// One decoded mouse report.
///
/// The effect only cares about `position`; the rest is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// 1-based terminal cell the pointer is over.
    pub position: Position,
    /// Raw button code with the legacy 32 bias removed.
    pub button: u16,
    /// Modifier keys decoded from the button code.
    pub modifiers: Modifiers,
    /// Encoding the report arrived in.
    pub protocol: MouseProtocol,
}

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Incremental mouse report decoder.
///
/// # Example
///
/// ```
/// use shdw_term::input::MouseDecoder;
///
/// let mut decoder = MouseDecoder::new();
/// let events = decoder.advance(b"\x1b[<35;10;5M");
/// assert_eq!(events[0].position.x, 10);
/// assert_eq!(events[0].position.y, 5);
/// ```
#[derive(Debug, Default)]
pub struct MouseDecoder {
    /// Bytes of a sequence that has started but not finished.
    buf: Vec<u8>,
}

impl MouseDecoder {
    /// Create a decoder with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed raw bytes and return every mouse report they complete.
    pub fn advance(&mut self, data: &[u8]) -> Vec<MouseEvent> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }

        events
    }

    /// Are there buffered bytes waiting for the rest of a sequence?
    #[cfg(test)]
    fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }
}

// ─── Stateless Parsing Functions ────────────────────────────────────────────

/// Result of trying to parse one sequence from the front of the buffer.
#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    /// A mouse report, consuming `usize` bytes.
    Event(MouseEvent, usize),
    /// The sequence has started but needs more bytes.
    Incomplete,
    /// Not a mouse report (or a malformed one); drop `usize` bytes.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    if buf.first() != Some(&ESC) {
        return Parsed::Skip(1);
    }
    let Some(&second) = buf.get(1) else {
        return Parsed::Incomplete;
    };

    match second {
        b'[' => {}
        // A second ESC may start the real sequence; only drop the first.
        ESC => return Parsed::Skip(1),
        _ => return Parsed::Skip(2),
    }

    match buf.get(2) {
        None => Parsed::Incomplete,
        Some(b'M') => parse_legacy(buf),
        Some(b'<') => parse_sgr(buf),
        Some(_) => Parsed::Skip(3),
    }
}

// ── Legacy (X10) ────────────────────────────────────────────────────────────

fn parse_legacy(buf: &[u8]) -> Parsed {
    // Format: ESC [ M cb cx cy, each of the last three biased by 32.
    debug_assert!(buf.len() >= 3 && buf[2] == b'M');

    if buf.len() < 6 {
        return Parsed::Incomplete;
    }

    let button = u16::from(buf[3].saturating_sub(32));
    let x = i32::from(buf[4]) - 32;
    let y = i32::from(buf[5]) - 32;

    Parsed::Event(
        MouseEvent {
            position: Position::new(x, y),
            button,
            modifiers: decode_modifiers(button),
            protocol: MouseProtocol::Legacy,
        },
        6,
    )
}

// ── SGR (DEC 1006) ──────────────────────────────────────────────────────────

fn parse_sgr(buf: &[u8]) -> Parsed {
    // Format: ESC [ < Pb ; Px ; Py M    (press / motion)
    //         ESC [ < Pb ; Px ; Py m    (release)
    debug_assert!(buf.len() >= 3 && buf[2] == b'<');

    let start = 3;
    let Some(len) = buf[start..].iter().position(|&b| b == b'M' || b == b'm') else {
        if buf.len() - start > MAX_SGR_BODY {
            log::trace!("dropping unterminated SGR mouse sequence");
            return Parsed::Skip(buf.len());
        }
        return Parsed::Incomplete;
    };

    let end = start + len;
    let consumed = end + 1;

    match parse_sgr_body(&buf[start..end]) {
        Some((button, x, y)) => Parsed::Event(
            MouseEvent {
                position: Position::new(x, y),
                button,
                modifiers: decode_modifiers(button),
                protocol: MouseProtocol::Sgr,
            },
            consumed,
        ),
        None => {
            log::trace!(
                "malformed SGR mouse sequence: {:?}",
                String::from_utf8_lossy(&buf[..consumed])
            );
            Parsed::Skip(consumed)
        }
    }
}

/// Split `button;x;y` and parse the fields.
///
/// Coordinates must be integers; an unparsable button code is tolerated
/// (it is only informational) and reads as 0.
fn parse_sgr_body(body: &[u8]) -> Option<(u16, i32, i32)> {
    let text = std::str::from_utf8(body).ok()?;
    let mut fields = text.split(';');

    let button = fields.next()?.parse::<u16>().unwrap_or(0);
    let x = fields.next()?.parse::<i32>().ok()?;
    let y = fields.next()?.parse::<i32>().ok()?;

    Some((button, x, y))
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Decode the modifier bits shared by both encodings.
const fn decode_modifiers(button: u16) -> Modifiers {
    let mut bits = 0;
    if button & 4 != 0 {
        bits |= Modifiers::SHIFT.bits();
    }
    if button & 8 != 0 {
        bits |= Modifiers::ALT.bits();
    }
    if button & 16 != 0 {
        bits |= Modifiers::CTRL.bits();
    }
    Modifiers::from_bits_truncate(bits)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT
//
// Terminal modes for the effect, and getting out of them again.
//
// `Terminal::enter` borrows three things from the user's terminal:
//
//   line discipline → cbreak (no canonical input, no echo, ISIG kept so
//                     Ctrl+C still raises SIGINT)
//   screen          → alternate buffer, cleared, cursor hidden
//   mouse           → any-motion reporting, SGR encoding
//
// `Terminal::leave` hands all three back and `Drop` calls it. The escape
// halves are plain writers (`write_enter_sequence`, `write_leave_sequence`)
// so their bytes are testable without a tty.
//
// A panic gets the same cleanup from a hook installed on the first `enter`.
// The hook writes `RESTORE_SEQUENCE` straight to fd 1, since the stdout
// lock may be held by a half-written frame, then reapplies the saved
// termios if nobody else holds it.
#![allow(unsafe_code)]

use std::io::{self, Write};
use std::sync::Once;
#[cfg(unix)]
use std::sync::Mutex;

use crate::ansi;

/// Size reported when the terminal cannot be queried.
pub const FALLBACK_SIZE: Size = Size { cols: 80, rows: 24 };

// ─── Size ───────────────────────────────────────────────────────────────────

/// Visible area in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Default for Size {
    fn default() -> Self {
        FALLBACK_SIZE
    }
}

// ─── Queries ────────────────────────────────────────────────────────────────

/// Ask the tty on stdout for its size.
///
/// `None` when stdout is not a terminal, the ioctl fails, or the terminal
/// reports a zero dimension.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws = unsafe { std::mem::zeroed::<libc::winsize>() };
    if unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) } != 0 {
        return None;
    }
    (ws.ws_col > 0 && ws.ws_row > 0).then_some(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// The current size, or [`FALLBACK_SIZE`] if it cannot be read.
///
/// One ioctl; the frame loop calls it every frame and so follows resizes
/// without a SIGWINCH handler.
#[must_use]
pub fn terminal_size() -> Size {
    get_size().unwrap_or_else(|| {
        log::trace!("terminal size query failed, using {FALLBACK_SIZE:?}");
        FALLBACK_SIZE
    })
}

/// Whether stdin is a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Escape Sequences ───────────────────────────────────────────────────────

/// Screen and mouse setup written by [`Terminal::enter`].
///
/// # Errors
///
/// Propagates write errors from `w`.
pub fn write_enter_sequence(w: &mut impl Write) -> io::Result<()> {
    ansi::enter_alt_screen(w)?;
    ansi::enable_mouse(w)?;
    ansi::clear_screen(w)?;
    ansi::cursor_home(w)?;
    ansi::cursor_hide(w)
}

/// Screen and mouse teardown written by [`Terminal::leave`].
///
/// The alternate screen is exited last so the shell reappears with colors
/// already reset and the cursor visible.
///
/// # Errors
///
/// Propagates write errors from `w`.
pub fn write_leave_sequence(w: &mut impl Write) -> io::Result<()> {
    ansi::disable_mouse(w)?;
    ansi::reset(w)?;
    ansi::cursor_show(w)?;
    ansi::exit_alt_screen(w)
}

/// [`write_leave_sequence`] as a constant, for the panic hook.
#[rustfmt::skip]
const RESTORE_SEQUENCE: &[u8] = b"\
    \x1b[?1003l\x1b[?1006l\
    \x1b[0m\
    \x1b[?25h\
    \x1b[?1049l";

// ─── Line Discipline ────────────────────────────────────────────────────────

/// Stdin's termios as it was before `enter`.
#[cfg(unix)]
#[derive(Clone, Copy)]
struct SavedTermios(libc::termios);

/// Copy of the saved termios reachable from the panic hook.
#[cfg(unix)]
static SAVED_TERMIOS: Mutex<Option<SavedTermios>> = Mutex::new(None);

#[cfg(unix)]
impl SavedTermios {
    fn capture() -> io::Result<Self> {
        let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self(termios))
    }

    /// The saved settings with canonical input and echo off and reads
    /// returning as soon as one byte is available.
    fn cbreak(self) -> libc::termios {
        let mut termios = self.0;
        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;
        termios
    }
}

#[cfg(unix)]
fn set_termios(termios: &libc::termios, action: libc::c_int) -> io::Result<()> {
    if unsafe { libc::tcsetattr(libc::STDIN_FILENO, action, termios) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

// ─── Panic Hook ─────────────────────────────────────────────────────────────

static PANIC_HOOK: Once = Once::new();

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        emergency_restore();
        previous(info);
    }));
}

fn emergency_restore() {
    #[cfg(unix)]
    {
        let _ = unsafe {
            libc::write(
                libc::STDOUT_FILENO,
                RESTORE_SEQUENCE.as_ptr().cast::<libc::c_void>(),
                RESTORE_SEQUENCE.len(),
            )
        };
        if let Ok(slot) = SAVED_TERMIOS.try_lock() {
            if let Some(saved) = *slot {
                let _ = set_termios(&saved.0, libc::TCSANOW);
            }
        }
    }

    #[cfg(not(unix))]
    {
        let mut out = io::stdout();
        let _ = out.write_all(RESTORE_SEQUENCE);
        let _ = out.flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Guard over the effect's terminal modes.
///
/// # Example
///
/// ```no_run
/// use shdw_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // draw frames
/// term.leave()?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    #[cfg(unix)]
    saved: Option<SavedTermios>,
    active: bool,
}

impl Terminal {
    /// A guard that has not changed anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            #[cfg(unix)]
            saved: None,
            active: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Switch to cbreak input, the alternate screen and mouse reporting.
    ///
    /// Does nothing if already active. When stdin is not a tty the line
    /// discipline is left alone and only the escape sequences are written.
    ///
    /// # Errors
    ///
    /// Returns an error if termios cannot be read or set, or stdout cannot
    /// be written. Whatever was switched on before the failure is switched
    /// off again by `leave` or on drop.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        PANIC_HOOK.call_once(install_panic_hook);

        self.start_cbreak()?;
        self.active = true;

        let mut out = io::stdout().lock();
        write_enter_sequence(&mut out)?;
        out.flush()?;

        log::debug!("terminal modes on");
        Ok(())
    }

    /// Undo everything [`enter`](Self::enter) did. Does nothing if inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written or termios cannot be
    /// restored. The guard then stays active, so drop tries again.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        {
            let mut out = io::stdout().lock();
            write_leave_sequence(&mut out)?;
            out.flush()?;
        }
        self.end_cbreak()?;

        self.active = false;
        log::debug!("terminal modes off");
        Ok(())
    }

    #[cfg(unix)]
    fn start_cbreak(&mut self) -> io::Result<()> {
        if !is_tty() {
            return Ok(());
        }
        let saved = SavedTermios::capture()?;
        self.saved = Some(saved);
        if let Ok(mut slot) = SAVED_TERMIOS.lock() {
            *slot = Some(saved);
        }
        set_termios(&saved.cbreak(), libc::TCSAFLUSH)
    }

    #[cfg(unix)]
    fn end_cbreak(&mut self) -> io::Result<()> {
        let Some(saved) = self.saved else {
            return Ok(());
        };
        set_termios(&saved.0, libc::TCSADRAIN)?;
        self.saved = None;
        if let Ok(mut slot) = SAVED_TERMIOS.lock() {
            *slot = None;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn start_cbreak(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(not(unix))]
    fn end_cbreak(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            log::warn!("failed to restore terminal: {e}");
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Bounded stdin polling: the loop's only suspension point.
//
// The effect is single-threaded: each frame waits at most `timeout` for
// stdin to become readable, reads whatever is there, and moves on to
// rendering. The wait doubles as frame pacing, so a quiet terminal still
// animates stars and the idle aura at roughly 1 / timeout frames per second.
//
// `InputSource` is the seam the frame loop is generic over, so tests can
// feed scripted byte chunks without a terminal.

use std::io;
use std::time::Duration;

/// Default bound on how long one poll may wait for input.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Size of one read. Mouse reports are 6 to ~20 bytes; a fast flick can
/// queue a few dozen between frames.
pub const READ_BUF_SIZE: usize = 1024;

/// A source of raw input bytes with a bounded wait.
pub trait InputSource {
    /// Wait up to `timeout` for input and read it into `buf`.
    ///
    /// Returns `Ok(0)` if nothing arrived in time. An interrupted wait
    /// (a signal landed) also counts as "nothing arrived".
    ///
    /// # Errors
    ///
    /// Returns an error if polling or reading the underlying source fails.
    fn poll_read(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<usize>;
}

/// Standard input, read with `poll(2)` + `read(2)`.
#[derive(Debug, Default)]
pub struct StdinSource {
    _private: (),
}

impl StdinSource {
    /// Create a source over the process's standard input.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(unix)]
impl InputSource for StdinSource {
    fn poll_read(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        let timeout_ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);

        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd: libc::STDIN_FILENO,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, timeout_ms)
        };

        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(0);
            }
            return Err(err);
        }
        if ready == 0 {
            return Ok(0);
        }

        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };

        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(0);
            }
            return Err(err);
        }

        #[allow(clippy::cast_sign_loss)] // n >= 0 guaranteed above.
        Ok(n as usize)
    }
}

/// Non-unix fallback: no input, just the bounded wait.
#[cfg(not(unix))]
impl InputSource for StdinSource {
    fn poll_read(&mut self, _buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        std::thread::sleep(timeout);
        Ok(0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

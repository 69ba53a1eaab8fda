// SPDX-License-Identifier: MIT
//
// Frame staging.
//
// One comet frame is a clear plus a few hundred positioned glyphs, each
// carrying its own cursor move and color. `OutputBuffer` stages all of it
// in memory so the terminal receives the frame in one write and never
// shows it half drawn.

use std::io::{self, Write};

/// Starting capacity. A frame with a full 3×3 trail, the aura and a sky of
/// stars stays well under this.
const FRAME_CAPACITY: usize = 16 * 1024;

/// In-memory staging area for one frame of escape sequences.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    buf: Vec<u8>,
}

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(FRAME_CAPACITY)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes staged so far.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.buf.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Hand the staged frame to `w` in one `write_all`, flush `w`, and
    /// start over. Returns the number of bytes handed over; an empty
    /// buffer writes nothing and does not flush.
    ///
    /// # Errors
    ///
    /// Returns the error from `w`. The staged bytes are kept in that case.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<usize> {
        if self.buf.is_empty() {
            return Ok(0);
        }
        w.write_all(&self.buf)?;
        w.flush()?;
        let n = self.buf.len();
        self.buf.clear();
        Ok(n)
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Staging only; the real flush is [`OutputBuffer::flush_to`].
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

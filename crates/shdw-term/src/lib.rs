// SPDX-License-Identifier: MIT
//
// shdw-term: Terminal plumbing for term-shdw.
//
// Everything the comet effect needs from the terminal and nothing more:
// cbreak mode with RAII cleanup, bounded stdin polling, a decoder for the
// legacy and SGR mouse encodings, 24-bit color math, and raw ANSI output
// collected into one buffer per frame.
//
// No TUI framework sits in between. Frames are absolute-positioned glyphs
// after a full clear, so a cell grid or a diff renderer would only add
// bookkeeping the effect never reads.

pub mod ansi;
pub mod color;
pub mod geometry;
pub mod input;
pub mod output;
pub mod reader;
pub mod signal;
pub mod terminal;

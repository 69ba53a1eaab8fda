// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Interrupt flag: SIGINT, SIGTERM and SIGHUP turn into a polled boolean.
//
// The handler only stores to an atomic, one of the few things that is
// async-signal-safe. The frame loop checks the flag once per iteration and
// returns normally, so terminal restoration runs through ordinary `Drop`
// instead of from inside a signal handler.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag set by the interrupt handler.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install handlers for SIGINT, SIGTERM and SIGHUP that set the flag.
///
/// Safe to call more than once; later calls reinstall the same handler.
#[cfg(unix)]
pub fn install_interrupt_handler() {
    for signal in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
        unsafe {
            let mut sa: libc::sigaction = std::mem::zeroed();
            sa.sa_sigaction = interrupt_handler as *const () as usize;
            sa.sa_flags = 0;
            libc::sigemptyset(&raw mut sa.sa_mask);
            libc::sigaction(signal, &raw const sa, std::ptr::null_mut());
        }
    }
    log::debug!("interrupt handlers installed");
}

#[cfg(unix)]
extern "C" fn interrupt_handler(_sig: libc::c_int) {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
pub fn install_interrupt_handler() {
    // No-op on non-unix platforms.
}

/// Whether an interrupt has been requested.
#[inline]
#[must_use]
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}

/// Request an interrupt from inside the process.
pub fn request_interrupt() {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

/// Consume a pending interrupt, returning whether one was set.
pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::Relaxed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! Intercepting terminator and unwind helpers.
//!
//! Fatal paths never return. In tests the terminator unwinds with a
//! [`Terminated`] payload instead of exiting, and the helpers below catch it.

use logbridge_ports::{LoggedPanic, Terminator};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// Unwind payload carrying the exit code a fatal call asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminated {
    /// Requested exit status.
    pub code: i32,
}

/// Terminator that records exit codes and unwinds instead of exiting.
#[derive(Debug, Clone, Default)]
pub struct RecordingTerminator {
    codes: Arc<Mutex<Vec<i32>>>,
}

impl RecordingTerminator {
    /// Create a terminator with no recorded exits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every code passed to `terminate`, in order.
    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().expect("terminator lock").clone()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, code: i32) -> ! {
        self.codes.lock().expect("terminator lock").push(code);
        panic::panic_any(Terminated { code })
    }
}

/// Run `f` and return the [`Terminated`] payload if it unwound with one.
///
/// Any other panic is resumed.
pub fn catch_termination<F: FnOnce()>(f: F) -> Option<Terminated> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => match payload.downcast::<Terminated>() {
            Ok(terminated) => Some(*terminated),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

/// Run `f` and return the [`LoggedPanic`] payload if it unwound with one.
///
/// Any other panic is resumed.
pub fn catch_logged_panic<F: FnOnce()>(f: F) -> Option<LoggedPanic> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => match payload.downcast::<LoggedPanic>() {
            Ok(logged) => Some(*logged),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

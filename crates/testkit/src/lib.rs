//! # logbridge-testkit
//!
//! Test doubles for the shared logging capability.
//! This crate depends on `ports` and `shared`.

pub mod recording;
pub mod sink;
pub mod termination;

pub use recording::{RecordedEntry, RecordingLogger};
pub use sink::MemorySink;
pub use termination::{RecordingTerminator, Terminated, catch_logged_panic, catch_termination};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

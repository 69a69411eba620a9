//! Process termination capability.
//!
//! Fatal paths end the process. The capability is injected so tests can
//! intercept the exit instead of losing the test runner.

/// Exit status used by fatal log calls.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Ends the process (or, in tests, unwinds in its place).
pub trait Terminator: Send + Sync {
    /// Terminate with `code`. Never returns.
    fn terminate(&self, code: i32) -> !;
}

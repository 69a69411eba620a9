//! Production terminator.

use logbridge_ports::Terminator;

/// Ends the process with `std::process::exit`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) -> ! {
        tracing::debug!(code, "terminating process after fatal log");
        std::process::exit(code)
    }
}

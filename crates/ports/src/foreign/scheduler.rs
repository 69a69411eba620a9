//! Job scheduler logger contract: info and error with trailing key/values.

use serde_json::Value;
use std::error::Error;

/// Logger accepted by the job scheduler.
pub trait SchedulerLogger: Send + Sync {
    /// Routine scheduler activity (job added, run started, ...).
    fn info(&self, msg: &str, keys_and_values: &[Value]);

    /// A job or schedule failure with its cause.
    fn error(&self, err: &dyn Error, msg: &str, keys_and_values: &[Value]);
}

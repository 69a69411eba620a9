//! Job scheduler adapter: info/error with a trailing key/value list.

use logbridge_ports::{LogFields, SchedulerLogger, StructuredLogger};
use serde_json::Value;
use std::error::Error;
use std::sync::Arc;

/// Field carrying the scheduler's key/value list, verbatim.
pub const ARGS_FIELD: &str = "args";

/// Forwards scheduler messages with their key/value list attached as one field.
#[derive(Clone)]
pub struct SchedulerLogAdapter {
    logger: Arc<dyn StructuredLogger>,
}

impl SchedulerLogAdapter {
    /// Wrap the shared logger.
    #[must_use]
    pub fn new(logger: Arc<dyn StructuredLogger>) -> Self {
        Self { logger }
    }
}

fn args_field(keys_and_values: &[Value]) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert(ARGS_FIELD.into(), Value::Array(keys_and_values.to_vec()));
    fields
}

impl SchedulerLogger for SchedulerLogAdapter {
    fn info(&self, msg: &str, keys_and_values: &[Value]) {
        self.logger.info(msg, Some(args_field(keys_and_values)));
    }

    // The causal error is not forwarded; only the message and list are.
    fn error(&self, _err: &dyn Error, msg: &str, keys_and_values: &[Value]) {
        self.logger.error(msg, Some(args_field(keys_and_values)));
    }
}

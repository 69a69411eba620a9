//! Storage engine adapter: format-string logging at four levels.

use logbridge_ports::{StorageEngineLogger, StructuredLogger};
use std::fmt;
use std::sync::Arc;

/// Forwards storage engine messages to the shared logger without fields.
#[derive(Clone)]
pub struct StorageLogAdapter {
    logger: Arc<dyn StructuredLogger>,
}

impl StorageLogAdapter {
    /// Wrap the shared logger.
    #[must_use]
    pub fn new(logger: Arc<dyn StructuredLogger>) -> Self {
        Self { logger }
    }
}

impl StorageEngineLogger for StorageLogAdapter {
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logger.error(&args.to_string(), None);
    }

    fn warningf(&self, args: fmt::Arguments<'_>) {
        self.logger.warn(&args.to_string(), None);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.logger.info(&args.to_string(), None);
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logger.debug(&args.to_string(), None);
    }
}

//! Storage engine logger contract: four levels, format strings only.

use std::fmt;

/// Logger accepted by the embedded storage engine.
pub trait StorageEngineLogger: Send + Sync {
    /// Error message.
    fn errorf(&self, args: fmt::Arguments<'_>);
    /// Warning message.
    fn warningf(&self, args: fmt::Arguments<'_>);
    /// Info message.
    fn infof(&self, args: fmt::Arguments<'_>);
    /// Debug message.
    fn debugf(&self, args: fmt::Arguments<'_>);
}

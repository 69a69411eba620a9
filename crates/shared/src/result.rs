//! Shared result alias.

use crate::errors::ErrorEnvelope;

/// Result type used by fallible workspace APIs (config loading, wiring).
///
/// Logging calls themselves never fail; only setup does.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

//! Level translation between the shared ladder and foreign vocabularies.

use logbridge_ports::{LogLevel, PluginLevel, WebLevel};

/// Web framework level for a shared threshold.
///
/// Only the four levels the framework shares with the shared ladder map
/// through; everything else reads as `OFF`.
pub const fn web_level(level: LogLevel) -> WebLevel {
    match level {
        LogLevel::Debug => WebLevel::Debug,
        LogLevel::Info => WebLevel::Info,
        LogLevel::Warn => WebLevel::Warn,
        LogLevel::Error => WebLevel::Error,
        LogLevel::Trace | LogLevel::Fatal | LogLevel::Panic => WebLevel::Off,
    }
}

/// Plugin framework level for a shared threshold.
///
/// `Fatal` and `Panic` fold into `Error`, the nearest level the plugin
/// vocabulary has.
pub const fn plugin_level(level: LogLevel) -> PluginLevel {
    match level {
        LogLevel::Trace => PluginLevel::Trace,
        LogLevel::Debug => PluginLevel::Debug,
        LogLevel::Info => PluginLevel::Info,
        LogLevel::Warn => PluginLevel::Warn,
        LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => PluginLevel::Error,
    }
}

/// Shared level a plugin emission is forwarded at.
///
/// `NoLevel` and `Off` carry no emission. `Trace` is not forwarded either:
/// the plugin adapter treats it as a no-op level.
pub const fn shared_level(level: PluginLevel) -> Option<LogLevel> {
    match level {
        PluginLevel::Debug => Some(LogLevel::Debug),
        PluginLevel::Info => Some(LogLevel::Info),
        PluginLevel::Warn => Some(LogLevel::Warn),
        PluginLevel::Error => Some(LogLevel::Error),
        PluginLevel::NoLevel | PluginLevel::Trace | PluginLevel::Off => None,
    }
}

//! The four foreign-contract adapters over one shared logger.

use crate::InfraResult;
use crate::logger_factory::build_shared_logger;
use crate::subscriber::init_tracing;
use logbridge_adapters::plugin::SUBSYSTEM_NAME_FIELD;
use logbridge_adapters::{
    PluginLogAdapter, ProcessExit, SchedulerLogAdapter, StorageLogAdapter, WebLogAdapter,
};
use logbridge_config::{LoggerBackend, LoggingConfig, load_logging_config_std_env};
use logbridge_ports::{LogFields, StructuredLogger, Terminator};
use std::path::Path;
use std::sync::Arc;

/// One adapter per foreign contract, all writing through the same logger.
#[derive(Clone)]
pub struct LoggerAdapters {
    /// Storage engine contract.
    pub storage: StorageLogAdapter,
    /// Job scheduler contract.
    pub scheduler: SchedulerLogAdapter,
    /// Web framework contract.
    pub web: WebLogAdapter,
    /// Plugin/RPC framework contract.
    pub plugin: PluginLogAdapter,
    shared: Arc<dyn StructuredLogger>,
}

impl LoggerAdapters {
    /// Wrap `shared`. A non-empty `plugin_name` names the root plugin logger.
    pub fn new(
        shared: Arc<dyn StructuredLogger>,
        plugin_name: &str,
        terminator: Arc<dyn Terminator>,
    ) -> Self {
        let plugin_logger = if plugin_name.is_empty() {
            Arc::clone(&shared)
        } else {
            let mut fields = LogFields::new();
            fields.insert(SUBSYSTEM_NAME_FIELD.into(), plugin_name.into());
            Arc::from(shared.child(fields))
        };

        Self {
            storage: StorageLogAdapter::new(Arc::clone(&shared)),
            scheduler: SchedulerLogAdapter::new(Arc::clone(&shared)),
            web: WebLogAdapter::new(Arc::clone(&shared)),
            plugin: PluginLogAdapter::new(plugin_logger, plugin_name).with_terminator(terminator),
            shared,
        }
    }

    /// Build the shared logger from `config`, then wrap it.
    pub fn from_config(config: &LoggingConfig, terminator: Arc<dyn Terminator>) -> Self {
        let shared = build_shared_logger(config, Arc::clone(&terminator));
        Self::new(shared, &config.plugin_name, terminator)
    }

    /// The shared logger behind every adapter.
    pub fn shared(&self) -> &Arc<dyn StructuredLogger> {
        &self.shared
    }
}

/// Load config from the process env (and optional file), install the
/// subscriber when the tracing backend is selected, and build the adapters.
pub fn init_from_env(config_path: Option<&Path>) -> InfraResult<LoggerAdapters> {
    let config = load_logging_config_std_env(config_path)?;
    if config.backend == LoggerBackend::Tracing {
        init_tracing(&config)?;
    }
    Ok(LoggerAdapters::from_config(&config, Arc::new(ProcessExit)))
}

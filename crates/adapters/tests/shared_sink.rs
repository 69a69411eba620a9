//! All four adapters funnel into one sink-backed logger.

use logbridge_adapters::{
    PluginLogAdapter, SchedulerLogAdapter, SinkLogger, StorageLogAdapter, TextFormatter,
    WebLogAdapter,
};
use logbridge_ports::{
    LogLevel, PluginLogger, SchedulerLogger, StorageEngineLogger, StructuredLogger, WebLevel,
    WebLogger,
};
use logbridge_testkit::MemorySink;
use serde_json::{Value, json};
use std::sync::Arc;
use std::thread;

fn shared(sink: &Arc<MemorySink>) -> Arc<dyn StructuredLogger> {
    Arc::new(SinkLogger::new(sink.clone()).with_min_level(LogLevel::Debug))
}

fn payloads(sink: &MemorySink) -> Result<Vec<Value>, serde_json::Error> {
    sink.take()
        .iter()
        .map(|line| serde_json::from_str(line.trim_end()))
        .collect()
}

#[test]
fn adapters_share_one_output() -> Result<(), Box<dyn std::error::Error>> {
    let sink = Arc::new(MemorySink::new());
    let logger = shared(&sink);

    let storage: Box<dyn StorageEngineLogger> = Box::new(StorageLogAdapter::new(logger.clone()));
    let scheduler: Box<dyn SchedulerLogger> = Box::new(SchedulerLogAdapter::new(logger.clone()));
    let web: Box<dyn WebLogger> = Box::new(WebLogAdapter::new(logger.clone()));
    let plugin: Box<dyn PluginLogger> = Box::new(PluginLogAdapter::new(logger, ""));

    storage.debugf(format_args!("x={}", 5));
    scheduler.info("cron tick", &[json!("entry"), json!(3)]);
    web.infoj(json!({ "status": 200 }).as_object().ok_or("object")?);
    plugin
        .named("grpc")
        .info("plugin started", &[json!("pid"), json!(4242)]);

    let lines = payloads(&sink)?;
    assert_eq!(lines.len(), 4);

    assert_eq!(lines[0]["level"], json!("debug"));
    assert_eq!(lines[0]["message"], json!("x=5"));
    assert!(lines[0].get("fields").is_none());

    assert_eq!(lines[1]["fields"]["args"], json!(["entry", 3]));

    assert_eq!(lines[2]["message"], json!("{\"status\":200}"));

    assert_eq!(lines[3]["fields"]["subsystem_name"], json!("grpc"));
    assert_eq!(lines[3]["fields"]["pid"], json!(4242));
    Ok(())
}

#[test]
fn web_adapter_reads_sink_logger_configuration() {
    let sink = Arc::new(MemorySink::new());
    let logger: Arc<dyn StructuredLogger> = Arc::new(
        SinkLogger::new(sink.clone())
            .with_min_level(LogLevel::Warn)
            .with_formatter(Arc::new(TextFormatter)),
    );
    let web = WebLogAdapter::new(logger);

    assert_eq!(web.level(), WebLevel::Warn);
    assert_eq!(web.output().label(), "memory");
    assert_eq!(web.formatter().map(|f| f.name()), Some("text"));

    web.info(&[&"filtered"]);
    web.warn(&[&"kept"]);
    let lines = sink.take();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("msg=\"kept\""));
}

#[test]
fn secret_plugin_args_are_redacted() -> Result<(), Box<dyn std::error::Error>> {
    let sink = Arc::new(MemorySink::new());
    let plugin = PluginLogAdapter::new(shared(&sink), "auth");

    plugin.info("login", &[json!("password"), json!("hunter2"), json!("user"), json!("ada")]);

    let lines = payloads(&sink)?;
    assert_eq!(lines[0]["fields"]["password"], json!("[REDACTED]"));
    assert_eq!(lines[0]["fields"]["user"], json!("ada"));
    Ok(())
}

#[test]
fn concurrent_derivation_is_independent() -> Result<(), Box<dyn std::error::Error>> {
    let sink = Arc::new(MemorySink::new());
    let root = PluginLogAdapter::new(shared(&sink), "pool");

    thread::scope(|scope| {
        for worker in 0..4 {
            let root = &root;
            scope.spawn(move || {
                let child = root
                    .named(&format!("w{worker}"))
                    .with(&[json!("worker"), json!(worker)]);
                child.info("ready", &[]);
            });
        }
    });

    let lines = payloads(&sink)?;
    assert_eq!(lines.len(), 4);
    for line in &lines {
        let worker = line["fields"]["worker"].as_i64().ok_or("worker field")?;
        assert_eq!(line["fields"]["subsystem_name"], json!(format!("pool.w{worker}")));
    }
    assert!(root.implied_args().is_empty());
    Ok(())
}

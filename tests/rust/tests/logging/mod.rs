//! Logging pipeline integration tests
//!
//! Merge precedence, verbosity gating, and error rendering on the full
//! logger, driven through real context scopes.

use pretty_assertions::assert_eq;
use tests::capture_logger;
use vitals_core::logging::{LogLevel, LogOptions};
use vitals_core::{context, meta, ContextMap};

#[tokio::test]
async fn scope_fields_are_merged_into_the_record() {
    let (logger, sink) = capture_logger(LogLevel::Verbose);

    context::scope(ContextMap::new(), async {
        context::set("requestPath", "/api/health");
        logger.info("health check", ContextMap::new());
    })
    .await;

    let line = sink.joined();
    assert!(line.contains("health check"));
    assert!(line.contains("\"requestPath\":\"/api/health\""));
}

#[tokio::test]
async fn scope_fields_win_over_call_site_metadata() {
    let (logger, sink) = capture_logger(LogLevel::Verbose);

    context::scope(ContextMap::new(), async {
        context::set("requestId", "from-scope");
        logger.info("collision", meta! { "requestId": "from-call-site" });
    })
    .await;

    let line = sink.joined();
    assert!(line.contains("\"requestId\":\"from-scope\""));
    assert!(!line.contains("from-call-site"));
}

#[test]
fn metadata_blob_is_suppressed_below_verbose() {
    let (logger, sink) = capture_logger(LogLevel::Info);
    logger.info("terse", meta! { "extra": "metadata" });

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("terse"));
    assert!(!lines[0].contains("extra"));
}

#[test]
fn per_call_verbose_option_forces_the_blob() {
    let (logger, sink) = capture_logger(LogLevel::Info);
    logger.log(
        LogLevel::Info,
        "chatty",
        meta! { "extra": "metadata" },
        LogOptions {
            verbose: true,
            error: None,
        },
    );

    assert!(sink.joined().contains("\"extra\":\"metadata\""));
}

#[test]
fn structured_error_renders_message_and_chain() {
    let (logger, sink) = capture_logger(LogLevel::Error);

    let err = anyhow::anyhow!("connection refused").context("health probe failed");
    logger.log(
        LogLevel::Error,
        "boom",
        ContextMap::new(),
        LogOptions {
            verbose: false,
            error: Some(err.into()),
        },
    );

    let line = sink.joined();
    assert!(line.contains("boom"));
    assert!(line.contains("health probe failed"));
    assert!(line.contains("connection refused"));
}

#[test]
fn arbitrary_error_values_render_as_strings() {
    let (logger, sink) = capture_logger(LogLevel::Error);
    logger.error("boom", meta! { "error": "db timeout" });

    assert!(sink.joined().contains("db timeout"));
}

#[test]
fn records_below_the_threshold_are_dropped() {
    let (logger, sink) = capture_logger(LogLevel::Warn);
    logger.info("filtered", ContextMap::new());
    logger.silly("filtered too", ContextMap::new());
    logger.error("kept", ContextMap::new());

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("kept"));
}

#[test]
fn logger_is_usable_outside_any_scope() {
    let (logger, sink) = capture_logger(LogLevel::Verbose);
    logger.info("no scope here", meta! { "still": "works" });

    let line = sink.joined();
    assert!(line.contains("no scope here"));
    assert!(line.contains("\"still\":\"works\""));
}

#[test]
fn environment_default_field_is_carried() {
    let (logger, sink) = capture_logger(LogLevel::Verbose);
    logger.info("tagged", ContextMap::new());

    assert!(sink.joined().contains("\"environment\":\"test\""));
}

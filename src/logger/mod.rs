//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error, warning and debug logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        config.is_debug(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start<'a>(
    addr: &SocketAddr,
    config: &Config,
    handlers: impl Iterator<Item = &'a str>,
) {
    write_info("======================================");
    write_info("Async server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    let handlers: Vec<&str> = handlers.collect();
    write_info(&format!("Handler hooks: {}", handlers.join(", ")));
    for route in &config.routes.handlers {
        let rule = &route.match_rule;
        let target = rule
            .path
            .as_deref()
            .or(rule.prefix.as_deref())
            .unwrap_or("*");
        write_info(&format!("  - {target} -> {}", route.handler));
    }
    write_info("Using Tokio runtime for concurrency");
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

/// Whether debug messages are emitted; check before formatting one
pub fn debug_enabled() -> bool {
    writer::get().is_some_and(writer::LogWriter::debug_enabled)
}

/// Only emitted when the writer was initialized with level `debug`
pub fn log_debug(message: &str) {
    if let Some(w) = writer::get() {
        if w.debug_enabled() {
            w.write_info(&format!("[DEBUG] {message}"));
        }
    }
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        write_info(&format!("[Headers] Count: {count}"));
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown(remaining_connections: usize) {
    if remaining_connections == 0 {
        write_info("[Shutdown] Listener closed, all connections finished");
    } else {
        write_info(&format!(
            "[Shutdown] Listener closed, dropping {remaining_connections} connection(s) still open after drain timeout"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_disabled_without_writer() {
        // The global writer is only set by the binary
        assert!(!debug_enabled());
    }
}

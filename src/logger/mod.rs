//! Logger module
//!
//! Provides logging utilities for the server:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
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

pub fn log_server_start(root: &Path, url: &str) {
    write_info(&format!(
        "Web server serving directory {} at {url}",
        root.display()
    ));
}

pub fn log_server_config(config: &Config) {
    write_info(&format!(
        "[CONFIG] CORS: {}, WASM multithreading headers: {}, immutable caching: {}",
        config.policy.enable_cors,
        config.policy.enable_wasm_multithreading,
        config.static_files.immutable,
    ));
    match config.server.workers {
        Some(workers) => write_info(&format!("[CONFIG] Worker threads: {workers}")),
        None => write_info("[CONFIG] Worker threads: CPU cores"),
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("[CONFIG] Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("[CONFIG] Error log: {path}"));
    }
}

pub fn log_server_stopped() {
    write_info("Server stopped.");
}

pub fn log_listener_error(err: &std::io::Error) {
    write_error(&format!("[ERROR] Listener error: {err}"));
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

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    match writer::get() {
        Some(w) => w.write_access(&entry.format(format)),
        None => println!("{}", entry.format(format)),
    }
}

pub fn log_shutdown_requested(signal: &str, active_connections: usize) {
    write_info(&format!(
        "[SIGNAL] {signal} received, closing listener ({active_connections} connections open)"
    ));
}

//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use crate::config::{AppState, Config};

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
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    let cfg = &state.config;
    write_info("======================================");
    write_info("Static site server started");
    write_info(&format!(
        "Started at: {}",
        state.started_at.format("%d/%b/%Y:%H:%M:%S %z")
    ));
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Document root: {}", cfg.site.root));
    write_info(&format!("Log level: {}", cfg.logging.level));
    if let Some(workers) = cfg.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = cfg.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = cfg.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Routes:");
    let mut routes: Vec<_> = cfg.site.pages.iter().collect();
    routes.sort();
    for (route, file) in routes {
        write_info(&format!("  {route} -> {file}"));
    }
    write_info(&format!(
        "  {}/* -> static assets",
        cfg.site.asset_prefix
    ));
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

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_signal(name: &str) {
    write_info(&format!(
        "\n[Signal] {name} received, initiating graceful shutdown"
    ));
}

pub fn log_shutdown_started() {
    write_info("[Shutdown] No longer accepting connections");
}

pub fn log_drain_complete() {
    write_info("[Shutdown] All in-flight responses finished");
}

pub fn log_shutdown_complete() {
    write_info("[Shutdown] Socket released, exiting");
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    write_error(&format!("[ERROR] Failed to bind {addr}: {err}"));
}

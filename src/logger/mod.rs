//! Logger module
//!
//! Provides logging utilities for the file server:
//! - Startup banner and shutdown notice on stdout
//! - Request echo in Common Log Format on stderr
//! - Error and warning lines on stderr

mod format;

pub use format::{version_label, AccessLogEntry};

use crate::config::Config;
use std::net::SocketAddr;

/// Write to info log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

/// Write to access log
///
/// Request echo goes to stderr so stdout only carries the banner.
fn write_access(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("Starting WebAssembly development server...");
    write_info(&format!(
        "Serving files from: {}",
        config.server.root.display()
    ));
    write_info(&format!("Server running at: http://localhost:{}/", addr.port()));
    write_info("Press Ctrl+C to stop the server");
}

pub fn log_server_stopped() {
    write_info("\nServer stopped.");
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
pub fn log_access(entry: &AccessLogEntry) {
    write_access(&entry.format_common());
}

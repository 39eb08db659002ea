// Server status dashboard - Public API

use std::io::Write;

// Re-export error types
pub mod error;
pub use error::{Result, StatusError};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;

/// Initialize logging, optionally into a pipe instead of stderr
pub fn init_logging(pipe: Option<Box<dyn Write + Send>>) {
    let mut builder = env_logger::Builder::new();
    // RUST_LOG still overrides the default level
    builder.filter_level(log::LevelFilter::Info).parse_default_env();
    if let Some(pipe) = pipe {
        builder.target(env_logger::Target::Pipe(pipe));
    }
    // a second call (tests, re-entry from a command) keeps the first logger
    let _ = builder.try_init();
}

/// Logging while the dashboard owns the terminal and no log file is configured
pub fn init_logging_quiet() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Off)
        .parse_default_env()
        .try_init();
}

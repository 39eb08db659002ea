// Command handlers module
pub mod check_local;
pub mod config;
pub mod snapshot;
pub mod version;
pub mod watch;

use crate::core::Config;
use anyhow::Result;

// Re-exports for cleaner imports
pub use check_local::execute as check_local;
pub use snapshot::execute as snapshot;
pub use version::execute as version;
pub use watch::execute as watch;

/// Stored configuration with the command line's `--server` applied on top
pub fn load_config(matches: &clap::ArgMatches) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(server) = matches.get_one::<String>("server") {
        config.set_server_url(server);
    }
    Ok(config)
}

use anyhow::{Context, Result};
use colored::Colorize;

use super::load_config;
use crate::core::ApiClient;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    // before loading, so config warnings are not lost
    crate::init_logging(None);
    let config = load_config(matches)?;

    let client = ApiClient::new(&config).context("Failed to create API client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let local = runtime
        .block_on(client.on_local_network())
        .context("Could not compare client and server addresses")?;

    if local {
        println!("{}", "✓ On the server's local network".green());
    } else {
        println!("{}", "✗ Not on the server's local network".yellow());
    }
    Ok(())
}

use anyhow::Result;

use super::load_config;
use crate::ui::run_dashboard;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    run_dashboard(&config)
}

use crate::core::Config;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn handle_config(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("set-server", sub_matches)) => set_server(sub_matches),
        Some(("set-scale", sub_matches)) => set_scale(sub_matches),
        Some(("reset", _)) => reset(),
        _ => {
            println!("Use 'serverstatus config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    let path = Config::get_config_path()?;

    println!("{}", format!("Config file: {}", path.display()).dimmed());
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{}", json);
    Ok(())
}

fn set_server(matches: &clap::ArgMatches) -> Result<()> {
    let url = matches
        .get_one::<String>("url")
        .context("URL argument is required")?;
    url::Url::parse(url).with_context(|| format!("Invalid server URL: {}", url))?;

    let mut config = Config::load()?;
    config.set_server_url(url);
    config.save()?;

    println!("{} {}", "✓ Server set to:".green(), config.server_url.cyan().bold());
    Ok(())
}

fn set_scale(matches: &clap::ArgMatches) -> Result<()> {
    let mbps = *matches
        .get_one::<f64>("mbps")
        .context("Mbps argument is required")?;

    let mut config = Config::load()?;
    config.set_full_scale_mbps(mbps)?;
    config.save()?;

    println!(
        "{} {} Mbps",
        "✓ Throughput bars now fill at".green(),
        config.throughput_full_scale_mbps
    );
    Ok(())
}

fn reset() -> Result<()> {
    let mut config = Config::load()?;
    config.reset_to_defaults();
    config.save()?;

    println!("{}", "✓ Configuration reset to defaults".green());
    Ok(())
}

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};

use serverstatus::commands;

fn cli() -> Command {
    Command::new("serverstatus")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal dashboard for a home server's status API")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .value_name("URL")
                .help("Server root to poll, overriding the saved configuration")
                .global(true),
        )
        .subcommand(Command::new("watch").about("Open the live dashboard (default)"))
        .subcommand(
            Command::new("snapshot")
                .about("Poll every panel once and print the result")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the display board as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check-local")
                .about("Check whether this machine shares the server's public address"),
        )
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'serverstatus config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the current configuration"))
                .subcommand(
                    Command::new("set-server")
                        .about("Set the server root URL")
                        .arg(
                            Arg::new("url")
                                .help("Server root, e.g. http://nas.lan:5000/")
                                .required(true)
                                .index(1),
                        ),
                )
                .subcommand(
                    Command::new("set-scale")
                        .about("Set the throughput that fills a speed bar, in Mbps")
                        .arg(
                            Arg::new("mbps")
                                .help("Full-scale throughput in Mbps")
                                .required(true)
                                .value_parser(value_parser!(f64))
                                .index(1),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore the default configuration")),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("watch", sub_matches)) => commands::watch(sub_matches),
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches),
        Some(("check-local", sub_matches)) => commands::check_local(sub_matches),
        Some(("config", sub_matches)) => commands::config::handle_config(sub_matches),
        Some(("version", _)) => commands::version(),
        _ => commands::watch(&matches),
    }
}

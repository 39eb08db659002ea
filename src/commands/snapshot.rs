use anyhow::{Context, Result};

use super::load_config;
use crate::core::PollRuntime;
use crate::ui::print_board;

/// Run every poll task once and print what the board ends up showing
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    // before loading, so config warnings are not lost
    crate::init_logging(None);
    let config = load_config(matches)?;

    let poller = PollRuntime::new(&config)?;
    poller.run_once();

    let board = poller.board.lock();
    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&*board)
            .context("Failed to serialize display board")?;
        println!("{}", json);
    } else {
        print_board(&board);
    }
    drop(board);

    poller.shutdown();
    Ok(())
}

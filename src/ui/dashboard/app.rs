use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::Mutex;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::config::Config;
use crate::core::poller::PollRuntime;
use crate::core::render::{toggler_for_panel, DisplayBoard};

use super::event_handler::DashboardEvent;
use super::render::render_ui;

/// How often the screen is redrawn; data arrives on the poll tiers
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Collapsible panels in display order: (panel id, title)
pub const PANELS: [(&str, &str); 6] = [
    ("network", "Network"),
    ("system-info", "System"),
    ("storage", "Storage"),
    ("services", "Services"),
    ("weather", "Weather"),
    ("media", "Media"),
];

/// Dashboard application state
pub struct DashboardApp {
    pub board: Arc<Mutex<DisplayBoard>>,
    pub should_quit: bool,
    pub show_help: bool,
    pub refresh_requested: bool,
    pub server_url: String,
}

impl DashboardApp {
    pub fn new(board: Arc<Mutex<DisplayBoard>>, server_url: &str) -> Self {
        Self {
            board,
            should_quit: false,
            show_help: false,
            refresh_requested: false,
            server_url: server_url.to_string(),
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Quit => self.should_quit = true,
            DashboardEvent::ToggleHelp => self.show_help = !self.show_help,
            DashboardEvent::TogglePanel(index) => {
                if let Some((panel, _)) = PANELS.get(index) {
                    let visible = self
                        .board
                        .lock()
                        .panels_mut()
                        .toggle(&toggler_for_panel(panel));
                    log::debug!("Panel '{}' visible: {}", panel, visible);
                }
            }
            DashboardEvent::ShowAllPanels => self.board.lock().panels_mut().show_all(),
            DashboardEvent::RefreshAll => self.refresh_requested = true,
            DashboardEvent::None => {}
        }
    }
}

/// Route logs to the configured file while the terminal is in raw mode
fn redirect_logs(config: &Config) -> Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path))?;
        crate::init_logging(Some(Box::new(file)));
    } else {
        crate::init_logging_quiet();
    }
    Ok(())
}

/// Run the dashboard until the user quits
pub fn run_dashboard(config: &Config) -> Result<()> {
    redirect_logs(config)?;

    let mut poller = PollRuntime::new(config)?;
    poller.start();

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = DashboardApp::new(Arc::clone(&poller.board), &config.server_url);
    let result = event_loop(&mut terminal, &mut app, &poller);

    // Restore terminal even if the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    poller.shutdown();
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashboardApp,
    poller: &PollRuntime,
) -> Result<()> {
    loop {
        let state: &DashboardApp = app;
        terminal.draw(|frame| {
            let board = state.board.lock();
            render_ui(frame, state, &board);
        })?;

        if event::poll(REDRAW_INTERVAL).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    let dashboard_event = if app.show_help {
                        // any key closes the help overlay
                        DashboardEvent::ToggleHelp
                    } else {
                        DashboardEvent::from_key(key.code)
                    };
                    app.handle_event(dashboard_event);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        if app.refresh_requested {
            app.refresh_requested = false;
            poller.refresh_all();
        }
    }
}

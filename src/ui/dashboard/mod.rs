//! Terminal dashboard for the server status board.
//!
//! Draws the shared display board with ratatui while the poll tasks update it.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_dashboard, DashboardApp, PANELS};
pub use event_handler::DashboardEvent;

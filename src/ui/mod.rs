// UI and formatting module

pub mod board_formatters;
pub mod dashboard;

// Re-export commonly used items for cleaner imports
pub use board_formatters::{format_board, print_board};
pub use dashboard::run_dashboard;

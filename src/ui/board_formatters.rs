use crate::core::render::format::format_width;
use crate::core::render::views::LOAD_WINDOWS;
use crate::core::render::{DisplayBoard, TargetState};
use colored::*;

const LABEL_WIDTH: usize = 14;

pub fn print_board(board: &DisplayBoard) {
    print!("{}", format_board(board));
}

/// Plain-terminal rendition of the board, one section per panel
pub fn format_board(board: &DisplayBoard) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "SERVER STATUS".bold().bright_cyan()));
    out.push_str(&format!("{}\n", "=".repeat(60)));

    if !board.failures().is_empty() {
        section(&mut out, "Failing");
        for (task, failure) in board.failures() {
            out.push_str(&format!(
                "  {:<LABEL_WIDTH$} {} {}\n",
                task,
                failure.reason.red(),
                format!("({} attempts)", failure.attempts).dimmed()
            ));
        }
    }

    section(&mut out, "Network");
    value_row(&mut out, "Server IP", board.get("#server_ip"));
    value_row(&mut out, "Client IP", board.get("#client_ip"));
    value_row(&mut out, "Ping", board.get("#ping"));
    bar_row(&mut out, "Download", board.get("#download"), board.get("#progress-bar-down"));
    bar_row(&mut out, "Upload", board.get("#upload"), board.get("#progress-bar-up"));

    section(&mut out, "System");
    value_row(&mut out, "Uptime", board.get("#uptime"));
    value_row(&mut out, "Memory", board.get("#memory-progress-bar-base"));
    if let Some(tooltip) = board.tooltip("#memory-tooltip") {
        out.push_str(&format!("  {:<LABEL_WIDTH$} {}\n", "", tooltip.dimmed()));
    }
    for window in LOAD_WINDOWS {
        bar_row(
            &mut out,
            &format!("Load {} min", window),
            board.get(&format!("#{}-min-load", window)),
            board.get(&format!("#{}-min-load-bar", window)),
        );
    }

    section(&mut out, "Storage");
    let paths = board.storage_paths();
    if paths.is_empty() {
        out.push_str(&format!("  {}\n", "no data".dimmed()));
    }
    for path in paths {
        bar_row(
            &mut out,
            &path,
            board.get(&format!("#{}-storage", path)),
            board.get(&format!("#progressbar-{}", path)),
        );
        if let Some(tooltip) = board.tooltip(&format!("#tooltip-{}", path)) {
            out.push_str(&format!("  {:<LABEL_WIDTH$} {}\n", "", tooltip.dimmed()));
        }
    }

    for (_, state) in board.iter().filter(|(key, _)| key.starts_with('.')) {
        // fragment containers, keyed ".class"
        if let Some(text) = state.markup_text() {
            if !text.is_empty() {
                out.push_str(&format!("  {}{}\n", text, stale_suffix(Some(state))));
            }
        }
    }

    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n", title.to_uppercase().bold().yellow()));
}

fn value_row(out: &mut String, label: &str, state: Option<&TargetState>) {
    let value = state
        .and_then(|s| s.text.clone())
        .unwrap_or_else(|| "--".to_string());
    out.push_str(&format!(
        "  {:<LABEL_WIDTH$} {}{}\n",
        label,
        value.white(),
        stale_suffix(state)
    ));
}

fn bar_row(out: &mut String, label: &str, text: Option<&TargetState>, bar: Option<&TargetState>) {
    let value = text
        .and_then(|s| s.text.clone())
        .unwrap_or_else(|| "--".to_string());
    let width = bar
        .and_then(|s| s.width)
        .map(format_width)
        .unwrap_or_default();
    out.push_str(&format!(
        "  {:<LABEL_WIDTH$} {:<12} {}{}\n",
        label,
        value.white(),
        width.dimmed(),
        stale_suffix(text)
    ));
}

fn stale_suffix(state: Option<&TargetState>) -> String {
    match state {
        Some(s) if s.stale => format!(
            " {}",
            format!("(stale: {})", s.error.as_deref().unwrap_or("refresh failed")).red()
        ),
        _ => String::new(),
    }
}

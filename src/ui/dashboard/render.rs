use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{DashboardApp, PANELS};
use super::widgets::{label_span, target_gauge, value_span};
use crate::core::render::views::LOAD_WINDOWS;
use crate::core::render::DisplayBoard;

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &DashboardApp, board: &DisplayBoard) {
    let area = frame.area();

    let visible: Vec<(usize, &str, &str)> = PANELS
        .iter()
        .enumerate()
        .filter(|(_, (id, _))| board.panels().is_visible(id))
        .map(|(i, (id, title))| (i, *id, *title))
        .collect();

    let mut constraints = vec![Constraint::Length(3)]; // Header
    for (_, id, _) in &visible {
        constraints.push(panel_constraint(id, board));
    }
    constraints.push(Constraint::Length(1)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(frame, chunks[0], app, board);

    for (slot, (index, id, title)) in visible.iter().enumerate() {
        let chunk = chunks[slot + 1];
        let title = format!(" {} {} ", index + 1, title);
        match *id {
            "network" => render_network_section(frame, chunk, board, &title),
            "system-info" => render_system_section(frame, chunk, board, &title),
            "storage" => render_storage_section(frame, chunk, board, &title),
            class => render_fragment_section(frame, chunk, board, class, &title),
        }
    }

    render_footer(frame, chunks[chunks.len() - 1]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn panel_constraint(id: &str, board: &DisplayBoard) -> Constraint {
    match id {
        "network" => Constraint::Length(4),
        "system-info" => Constraint::Length(6),
        "storage" => Constraint::Length(board.storage_paths().len().max(1) as u16 + 2),
        _ => Constraint::Fill(1),
    }
}

/// Addresses, latency and uptime
fn render_header(frame: &mut Frame, area: Rect, app: &DashboardApp, board: &DisplayBoard) {
    let updated = board
        .last_tick()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "waiting".to_string());

    let line = Line::from(vec![
        label_span("Server "),
        value_span(board.get("#server_ip")),
        label_span("  Client "),
        value_span(board.get("#client_ip")),
        label_span("  Ping "),
        value_span(board.get("#ping")),
        label_span("  Up "),
        value_span(board.get("#uptime")),
    ]);

    let mut block = Block::default()
        .title(format!(" {} ", app.server_url))
        .title_bottom(Line::from(format!(" updated {} ", updated)).right_aligned())
        .borders(Borders::ALL);
    if let Some(summary) = failure_summary(board) {
        block = block.title_bottom(
            Line::from(Span::styled(summary, Style::default().fg(Color::Red))).left_aligned(),
        );
    }

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// `" failing: ping (timed out), storage (HTTP 503) "`
fn failure_summary(board: &DisplayBoard) -> Option<String> {
    if board.failures().is_empty() {
        return None;
    }
    let tasks: Vec<String> = board
        .failures()
        .iter()
        .map(|(task, failure)| format!("{} ({})", task, failure.reason))
        .collect();
    Some(format!(" failing: {} ", tasks.join(", ")))
}

fn section_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn render_network_section(frame: &mut Frame, area: Rect, board: &DisplayBoard, title: &str) {
    let block = section_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let down = format!("Down {}", board.text("#download").unwrap_or("--"));
    let up = format!("Up   {}", board.text("#upload").unwrap_or("--"));
    frame.render_widget(target_gauge(board.get("#progress-bar-down"), down), rows[0]);
    frame.render_widget(target_gauge(board.get("#progress-bar-up"), up), rows[1]);
}

fn render_system_section(frame: &mut Frame, area: Rect, board: &DisplayBoard, title: &str) {
    let block = section_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 4])
        .split(inner);

    // the three memory segments add up to the used percentage
    let memory_width: f64 = ["#progress-bar-min", "#progress-bar-mid", "#progress-bar-max"]
        .iter()
        .filter_map(|id| board.width(id))
        .sum();
    let memory_state = board.get("#memory-progress-bar-base").map(|s| {
        let mut state = s.clone();
        state.width = Some(memory_width);
        state
    });
    let memory_label = format!(
        "Memory {}  {}",
        board.text("#memory-progress-bar-base").unwrap_or("--"),
        board.tooltip("#memory-tooltip").unwrap_or("")
    );
    frame.render_widget(target_gauge(memory_state.as_ref(), memory_label), rows[0]);

    for (row, window) in LOAD_WINDOWS.iter().enumerate() {
        let label = format!(
            "Load {:>2} min {}",
            window,
            board
                .text(&format!("#{}-min-load", window))
                .unwrap_or("--")
        );
        let bar = board.get(&format!("#{}-min-load-bar", window));
        frame.render_widget(target_gauge(bar, label), rows[row + 1]);
    }
}

fn render_storage_section(frame: &mut Frame, area: Rect, board: &DisplayBoard, title: &str) {
    let block = section_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paths = board.storage_paths();
    if paths.is_empty() {
        frame.render_widget(
            Paragraph::new("waiting for storage data").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); paths.len()])
        .split(inner);

    for (row, path) in paths.iter().enumerate() {
        let label = format!(
            "{:<12} {:>4}  {}",
            path,
            board.text(&format!("#{}-storage", path)).unwrap_or("--"),
            board.tooltip(&format!("#tooltip-{}", path)).unwrap_or("")
        );
        let bar = board.get(&format!("#progressbar-{}", path));
        frame.render_widget(target_gauge(bar, label), rows[row]);
    }
}

/// Server-rendered fragment shown as plain text
fn render_fragment_section(
    frame: &mut Frame,
    area: Rect,
    board: &DisplayBoard,
    class: &str,
    title: &str,
) {
    let state = board.get(&format!(".{}", class));
    let (text, style) = match state {
        Some(s) if s.stale => (
            s.markup_text().unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        ),
        Some(s) => (s.markup_text().unwrap_or_default(), Style::default()),
        None => (
            "waiting for data".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(section_block(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = " q: Quit │ ?: Help │ 1-6: Toggle panel │ a: Show all │ r: Refresh now ";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
    Server Status - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    q / Esc     Quit the application
    ? / h       Toggle this help screen
    1 - 6       Expand/collapse a panel
    a           Show all panels
    r           Refresh every panel now

    Grey values are stale: the last refresh
    failed and the previous value is shown.

    Press any key to close this help
    "#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

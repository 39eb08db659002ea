use ratatui::{prelude::*, widgets::Gauge};

use crate::core::render::TargetState;

/// Color for a bar width, by threshold
pub fn width_color(width: f64) -> Color {
    match width {
        w if w < 50.0 => Color::Cyan,
        w if w < 75.0 => Color::LightYellow,
        w if w < 90.0 => Color::LightRed,
        _ => Color::Red,
    }
}

/// Gauge drawn from a bar target; stale bars are greyed out.
///
/// Widths above 100% fill the gauge, the label still shows the real value.
pub fn target_gauge<'a>(state: Option<&TargetState>, label: String) -> Gauge<'a> {
    let (ratio, width, stale) = match state {
        Some(s) => (s.ratio(), s.width.unwrap_or(0.0), s.stale),
        None => (0.0, 0.0, false),
    };

    let color = if stale { Color::DarkGray } else { width_color(width) };
    let label = if stale {
        format!("{} (stale)", label)
    } else {
        label
    };

    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(ratio)
        .label(label)
}

/// Text slot as a styled span, `--` until the first value arrives
pub fn value_span<'a>(state: Option<&TargetState>) -> Span<'a> {
    match state.and_then(|s| s.text.clone().map(|t| (t, s.stale))) {
        Some((text, false)) => Span::styled(text, Style::default().fg(Color::White)),
        Some((text, true)) => Span::styled(
            text,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
        None => Span::styled("--", Style::default().fg(Color::DarkGray)),
    }
}

pub fn label_span<'a>(label: &'a str) -> Span<'a> {
    Span::styled(label, Style::default().fg(Color::Gray))
}

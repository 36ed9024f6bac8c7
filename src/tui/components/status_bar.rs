use crate::app::App;
use crate::engine::Mode;
use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// The tmux status bar: session name, window list with the active marker,
/// prefix/mode indicators, and a clock.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let base = Style::default().bg(Color::Green).fg(Color::Black);

    let session_name = app
        .engine
        .active_session()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "0".to_string());

    let mut left = vec![Span::styled(
        format!(" [{session_name}] "),
        base.add_modifier(Modifier::BOLD),
    )];

    if let Some(session) = app.engine.active_session() {
        for window in &session.windows {
            let is_active = window.id == session.active_window_id;
            let marker = if is_active { "*" } else { "" };
            let zoom = if is_active && app.engine.zoomed_pane_id().is_some() {
                "Z"
            } else {
                ""
            };
            let style = if is_active {
                base.add_modifier(Modifier::BOLD)
            } else {
                base
            };
            left.push(Span::styled(
                format!("{}:{}{marker}{zoom} ", window.index, window.name),
                style,
            ));
        }
    }

    let mut right = Vec::new();
    match app.engine.mode() {
        Mode::Copy => right.push(Span::styled(
            "[COPY] ",
            base.fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Mode::Command => right.push(Span::styled("[CMD] ", base.add_modifier(Modifier::BOLD))),
        _ => {}
    }
    if app.engine.prefix_active() {
        right.push(Span::styled(
            "^B ",
            base.fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    right.push(Span::styled(
        format!(" {} ", Local::now().format("%H:%M")),
        base,
    ));

    let left_len: usize = left.iter().map(|s| s.content.len()).sum();
    let right_len: usize = right.iter().map(|s| s.content.len()).sum();
    let padding = area.width.saturating_sub(left_len as u16 + right_len as u16);

    let mut spans = left;
    spans.push(Span::styled(" ".repeat(padding as usize), base));
    spans.extend(right);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Completion toast floated over the bottom-right corner.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(message) = app.toast() else {
        return;
    };

    let frame_area = frame.area();
    let width = (message.len() as u16 + 4).min(frame_area.width);
    let area = Rect {
        x: frame_area.width.saturating_sub(width + 1),
        y: frame_area.height.saturating_sub(4),
        width,
        height: 3,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let paragraph = Paragraph::new(format!(" {message} "))
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

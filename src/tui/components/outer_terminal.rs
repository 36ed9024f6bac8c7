use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use super::{prompt_line, shell_lines};

const PROMPT: &str = "user@tmux-learn:~$ ";

/// The plain terminal shown before any tmux session is attached.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for entry in app.outer_lines() {
        lines.extend(shell_lines(entry));
    }
    lines.push(prompt_line(PROMPT, app.outer_input(), true));

    // bottom-anchored scrollback
    let visible = area.height as usize;
    if lines.len() > visible {
        lines.drain(..lines.len() - visible);
    }

    frame.render_widget(Paragraph::new(lines), area);
}

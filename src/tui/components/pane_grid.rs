use crate::app::App;
use crate::engine::{prompt_for, LayoutKind, LayoutNode};
use crate::models::{Pane, Window};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{prompt_line, shell_lines};

/// Render the active window's panes according to its layout tree. A zoomed
/// pane takes over the whole area; the tree itself is untouched.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(window) = app.engine.active_window() else {
        return;
    };

    if let Some(zoomed) = app
        .engine
        .zoomed_pane_id()
        .and_then(|id| window.pane(id))
    {
        render_pane(frame, area, zoomed);
        return;
    }

    render_node(frame, area, &window.layout, window);
}

fn render_node(frame: &mut Frame, area: Rect, node: &LayoutNode, window: &Window) {
    match &node.kind {
        LayoutKind::Leaf { pane_id } => {
            if let Some(pane) = window.pane(pane_id) {
                render_pane(frame, area, pane);
            }
        }
        LayoutKind::Split {
            orientation,
            children,
        } => {
            let direction = match orientation {
                crate::engine::Orientation::Horizontal => Direction::Horizontal,
                crate::engine::Orientation::Vertical => Direction::Vertical,
            };
            let constraints: Vec<Constraint> = children
                .iter()
                .map(|child| Constraint::Percentage(child.size.round() as u16))
                .collect();
            let chunks = Layout::default()
                .direction(direction)
                .constraints(constraints)
                .split(area);

            for (child, chunk) in children.iter().zip(chunks.iter()) {
                render_node(frame, *chunk, child, window);
            }
        }
    }
}

fn render_pane(frame: &mut Frame, area: Rect, pane: &Pane) {
    let border_style = if pane.is_active {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);

    let prompt = prompt_for(&pane.cwd);
    let mut lines = Vec::new();
    for entry in &pane.shell_history {
        lines.extend(shell_lines(entry));
    }
    lines.push(prompt_line(&prompt, &pane.current_input, pane.is_active));

    let visible = inner.height as usize;
    if lines.len() > visible {
        lines.drain(..lines.len() - visible);
    }

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

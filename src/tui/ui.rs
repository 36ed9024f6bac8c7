use crate::app::App;
use crate::engine::{ConfirmAction, Mode};
use crate::tui::components::{outer_terminal, pane_grid, sidebar, status_bar, toast};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Terminal
            Constraint::Length(42), // Sidebar
        ])
        .split(frame.area());

    let terminal_area = chunks[0];
    let sidebar_area = chunks[1];

    if app.in_tmux() {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Panes
                Constraint::Length(1), // Status bar
            ])
            .split(terminal_area);

        pane_grid::render(frame, vertical[0], app);
        status_bar::render(frame, vertical[1], app);
        draw_mode_overlay(frame, vertical[0], app);
    } else {
        outer_terminal::render(frame, terminal_area, app);
    }

    sidebar::render(frame, sidebar_area, app);
    toast::render(frame, app);
}

/// Modal prompts drawn over the pane area, mirroring where tmux puts them.
fn draw_mode_overlay(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.engine.state();
    let bottom = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    match state.mode {
        Mode::Confirm => {
            let question = match state.confirm_action {
                Some(ConfirmAction::CloseWindow) => "kill-window? (y/n)",
                _ => "kill-pane? (y/n)",
            };
            frame.render_widget(
                Paragraph::new(question)
                    .style(Style::default().bg(Color::Yellow).fg(Color::Black)),
                bottom,
            );
        }
        Mode::Command => {
            let line = Line::from(vec![
                Span::raw(":"),
                Span::raw(state.command_input.to_string()),
                Span::styled("█", Style::default().fg(Color::White)),
            ]);
            frame.render_widget(
                Paragraph::new(line).style(Style::default().bg(Color::Black).fg(Color::Yellow)),
                bottom,
            );
        }
        Mode::Rename => {
            let line = Line::from(vec![
                Span::raw("(rename-window) "),
                Span::raw(state.rename_input.to_string()),
                Span::styled("█", Style::default().fg(Color::White)),
            ]);
            frame.render_widget(
                Paragraph::new(line).style(Style::default().bg(Color::Yellow).fg(Color::Black)),
                bottom,
            );
        }
        Mode::Copy => {
            let label = "[COPY MODE] Press q to exit";
            let width = label.len() as u16;
            let top_right = Rect {
                x: area.x + area.width.saturating_sub(width + 1),
                y: area.y,
                width: width.min(area.width),
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(label).style(
                    Style::default()
                        .bg(Color::Yellow)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ),
                top_right,
            );
        }
        Mode::Normal => {}
    }
}

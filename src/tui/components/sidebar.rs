use crate::app::{App, TrainerMode};
use crate::curriculum::{self, ValidationRule};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// The training sidebar: current lesson (learn mode) or current task and
/// streak (challenge mode).
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.tracker.mode() {
        TrainerMode::Learn => " tmux trainer: learn ",
        TrainerMode::Challenge => " tmux trainer: challenge ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match app.tracker.mode() {
        TrainerMode::Learn => learn_lines(app),
        TrainerMode::Challenge => challenge_lines(app),
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn learn_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            format!(
                "Progress: {}/{} lessons",
                app.tracker.completed_count(),
                curriculum::total_lessons()
            ),
            Style::default().fg(Color::Gray),
        ),
        Line::raw(""),
    ];

    let Some(lesson) = app.tracker.current_lesson() else {
        lines.push(Line::styled(
            "Course complete!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
        return lines;
    };

    if let Some(chapter) = curriculum::chapter_for(lesson.id) {
        lines.push(Line::styled(
            chapter.title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::styled(
        lesson.title,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::raw(""));
    for part in lesson.description.split('\n') {
        lines.push(Line::styled(part.to_string(), Style::default().fg(Color::Gray)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Goal: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled(lesson.objective, Style::default().fg(Color::Yellow)),
    ]));

    if app.tracker.hint_index() > 0 && !lesson.hints.is_empty() {
        let idx = (app.tracker.hint_index() - 1).min(lesson.hints.len() - 1);
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Hint: ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            Span::styled(lesson.hints[idx], Style::default().fg(Color::Magenta)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(footer());
    lines
}

fn challenge_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            format!("Streak: {}", app.tracker.streak()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];

    match app.tracker.current_task() {
        Some(task) => {
            lines.push(Line::styled(
                task.instruction,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            if app.tracker.hint_index() > 0 {
                lines.push(Line::raw(""));
                lines.push(Line::from(vec![
                    Span::styled(
                        "Hint: ",
                        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(task.hint, Style::default().fg(Color::Magenta)),
                ]));
            }
            if let ValidationRule::Command(_) = task.validation {
                lines.push(Line::raw(""));
                lines.push(Line::styled(
                    "(type the command in the terminal)",
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
        None => lines.push(Line::styled(
            "No task fits the current state. Change the tmux state and one will appear.",
            Style::default().fg(Color::Gray),
        )),
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "F3 skip task",
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(footer());
    lines
}

fn footer() -> Line<'static> {
    Line::styled(
        "F2 mode  F4 hint  Ctrl+q quit",
        Style::default().fg(Color::DarkGray),
    )
}

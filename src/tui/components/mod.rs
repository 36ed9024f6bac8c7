pub mod outer_terminal;
pub mod pane_grid;
pub mod sidebar;
pub mod status_bar;
pub mod toast;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::models::{ShellLine, ShellLineKind};

pub const PROMPT_COLOR: Color = Color::Green;
pub const OUTPUT_COLOR: Color = Color::Gray;
pub const ERROR_COLOR: Color = Color::Red;
pub const SYSTEM_COLOR: Color = Color::Blue;

/// Render one history entry as text lines. Output may span several lines;
/// input lines carry their prompt.
pub(crate) fn shell_lines(line: &ShellLine) -> Vec<Line<'_>> {
    match line.kind {
        ShellLineKind::Input => {
            let mut spans = Vec::new();
            if let Some(prompt) = &line.prompt {
                spans.push(Span::styled(
                    prompt.as_str(),
                    Style::default().fg(PROMPT_COLOR),
                ));
            }
            spans.push(Span::raw(line.content.as_str()));
            vec![Line::from(spans)]
        }
        ShellLineKind::Output => colored_lines(&line.content, OUTPUT_COLOR),
        ShellLineKind::Error => colored_lines(&line.content, ERROR_COLOR),
        ShellLineKind::System => colored_lines(&line.content, SYSTEM_COLOR),
    }
}

fn colored_lines(content: &str, color: Color) -> Vec<Line<'_>> {
    content
        .split('\n')
        .map(|part| Line::styled(part, Style::default().fg(color)))
        .collect()
}

/// The live prompt line with the in-progress input and a block cursor.
pub(crate) fn prompt_line<'a>(prompt: &'a str, input: &'a str, focused: bool) -> Line<'a> {
    let mut spans = vec![
        Span::styled(prompt, Style::default().fg(PROMPT_COLOR)),
        Span::raw(input),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

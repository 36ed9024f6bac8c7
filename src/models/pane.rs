/// One entry in a pane's scrollback. Append-only; never edited after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellLineKind {
    Input,
    Output,
    Error,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLine {
    pub kind: ShellLineKind,
    pub content: String,
    /// Rendered prompt, present on input lines only
    pub prompt: Option<String>,
}

impl ShellLine {
    pub fn input(content: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            kind: ShellLineKind::Input,
            content: content.into(),
            prompt: Some(prompt.into()),
        }
    }

    pub fn output(content: impl Into<String>) -> Self {
        Self {
            kind: ShellLineKind::Output,
            content: content.into(),
            prompt: None,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: ShellLineKind::Error,
            content: content.into(),
            prompt: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            kind: ShellLineKind::System,
            content: content.into(),
            prompt: None,
        }
    }
}

/// A single terminal surface: its own scrollback, input buffer, and cwd.
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    pub id: String,
    pub shell_history: Vec<ShellLine>,
    pub current_input: String,
    pub cwd: String,
    pub is_active: bool,
}

impl Pane {
    pub fn new(id: String, cwd: String) -> Self {
        Self {
            id,
            shell_history: Vec::new(),
            current_input: String::new(),
            cwd,
            is_active: true,
        }
    }
}

use std::fmt;

use super::Mode;
use crate::models::ShellLine;

/// Action tags recorded in the engine history and broadcast to validators.
/// The string forms are a stable vocabulary; lesson and challenge rules
/// match against them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    EnterPressed,
    PrefixActivated,
    PrefixDeactivated,
    PaneSplitHorizontal,
    PaneSplitVertical,
    PaneNavigated,
    PaneResized,
    PaneZoomed,
    PaneClosed,
    WindowCreated,
    WindowSwitched,
    WindowSwitchedByNumber,
    WindowRenamed,
    WindowRenameStarted,
    WindowClosed,
    SessionCreated,
    SessionAttached,
    SessionDetached,
    CopyModeEntered,
    CopyModeExited,
    CommandModeEntered,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::EnterPressed => "enter-pressed",
            Action::PrefixActivated => "prefix-activated",
            Action::PrefixDeactivated => "prefix-deactivated",
            Action::PaneSplitHorizontal => "pane-split-horizontal",
            Action::PaneSplitVertical => "pane-split-vertical",
            Action::PaneNavigated => "pane-navigated",
            Action::PaneResized => "pane-resized",
            Action::PaneZoomed => "pane-zoomed",
            Action::PaneClosed => "pane-closed",
            Action::WindowCreated => "window-created",
            Action::WindowSwitched => "window-switched",
            Action::WindowSwitchedByNumber => "window-switched-by-number",
            Action::WindowRenamed => "window-renamed",
            Action::WindowRenameStarted => "window-rename-started",
            Action::WindowClosed => "window-closed",
            Action::SessionCreated => "session-created",
            Action::SessionAttached => "session-attached",
            Action::SessionDetached => "session-detached",
            Action::CopyModeEntered => "copy-mode-entered",
            Action::CopyModeExited => "copy-mode-exited",
            Action::CommandModeEntered => "command-mode-entered",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the engine tells the outside world. Delivered synchronously,
/// in subscription order, on the same call stack as the mutation that
/// produced it; listeners must treat engine state as read-only until
/// control returns.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StateChanged,
    PaneOutput { pane_id: String, line: ShellLine },
    Notification { message: String },
    PrefixActivated,
    PrefixDeactivated,
    ModeChanged { mode: Mode },
    ActionPerformed { action: Action },
}

pub type ListenerId = usize;

type Listener = Box<dyn FnMut(&EngineEvent)>;

/// Single-channel publish/subscribe. `off` uses the token returned by `on`
/// so identical closures never collide.
pub struct EventBus {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn on(&mut self, callback: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    pub fn off(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    pub fn emit(&mut self, event: &EngineEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

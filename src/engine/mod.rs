//! The multiplexer state engine: sessions, windows, panes, the recursive
//! split layout, and the key-event interpreter that drives them. The engine
//! owns all state; the UI and the lesson/challenge validators only consume
//! query methods and the event feed.

pub mod events;
mod keys;
pub mod layout;
mod shell;

pub use events::{Action, EngineEvent, EventBus, ListenerId};
pub use layout::{LayoutKind, LayoutNode, Orientation};
pub use shell::ShellError;
pub(crate) use shell::prompt_for;

use std::time::{Duration, Instant};

use crate::models::{Pane, Session, ShellLine, Window};
use crate::vfs::{Vfs, HOME};

/// How long an armed prefix waits for a follow-up key.
pub const PREFIX_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Copy,
    Command,
    Confirm,
    Rename,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Copy => "copy",
            Mode::Command => "command",
            Mode::Confirm => "confirm",
            Mode::Rename => "rename",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClosePane,
    CloseWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Next,
    Prev,
}

/// Read-only snapshot of the engine handed to the UI and to challenge
/// `can_attempt` predicates.
#[derive(Clone, Copy)]
pub struct StateView<'a> {
    pub sessions: &'a [Session],
    pub active_session_id: Option<&'a str>,
    pub is_attached: bool,
    pub is_inside_tmux: bool,
    pub mode: Mode,
    pub prefix_active: bool,
    pub zoomed_pane_id: Option<&'a str>,
    pub confirm_action: Option<ConfirmAction>,
    pub command_input: &'a str,
    pub rename_input: &'a str,
}

impl StateView<'_> {
    pub fn active_session(&self) -> Option<&Session> {
        let id = self.active_session_id?;
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn active_window(&self) -> Option<&Window> {
        self.active_session()?.active_window()
    }
}

pub struct TmuxEngine {
    sessions: Vec<Session>,
    active_session_id: Option<String>,
    is_attached: bool,
    is_inside_tmux: bool,
    mode: Mode,
    prefix_active: bool,
    prefix_deadline: Option<Instant>,
    prefix_timeout: Duration,
    zoomed_pane_id: Option<String>,
    confirm_action: Option<ConfirmAction>,
    command_input: String,
    rename_input: String,
    next_pane_id: u64,
    next_window_id: u64,
    next_session_id: u64,
    bus: EventBus,
    action_history: Vec<Action>,
    typed_commands: Vec<String>,
    vfs: Vfs,
}

impl Default for TmuxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TmuxEngine {
    pub fn new() -> Self {
        Self::with_prefix_timeout(PREFIX_TIMEOUT)
    }

    /// Injectable timeout so expiry tests never sleep for real.
    pub fn with_prefix_timeout(prefix_timeout: Duration) -> Self {
        Self {
            sessions: Vec::new(),
            active_session_id: None,
            is_attached: false,
            is_inside_tmux: false,
            mode: Mode::Normal,
            prefix_active: false,
            prefix_deadline: None,
            prefix_timeout,
            zoomed_pane_id: None,
            confirm_action: None,
            command_input: String::new(),
            rename_input: String::new(),
            next_pane_id: 0,
            next_window_id: 0,
            next_session_id: 0,
            bus: EventBus::new(),
            action_history: Vec::new(),
            typed_commands: Vec::new(),
            vfs: Vfs::new(),
        }
    }

    /// Discard everything (sessions, id counters, filesystem, the pending
    /// prefix timer) and return to the fresh-start state. Listeners stay
    /// subscribed.
    pub fn reset(&mut self) {
        self.sessions.clear();
        self.active_session_id = None;
        self.is_attached = false;
        self.is_inside_tmux = false;
        self.mode = Mode::Normal;
        self.prefix_active = false;
        self.prefix_deadline = None;
        self.zoomed_pane_id = None;
        self.confirm_action = None;
        self.command_input.clear();
        self.rename_input.clear();
        self.next_pane_id = 0;
        self.next_window_id = 0;
        self.next_session_id = 0;
        self.action_history.clear();
        self.typed_commands.clear();
        self.vfs = Vfs::new();
        self.emit(EngineEvent::StateChanged);
    }

    // ==================== Event feed ====================

    pub fn on(&mut self, callback: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        self.bus.on(callback)
    }

    pub fn off(&mut self, id: ListenerId) {
        self.bus.off(id);
    }

    pub(crate) fn emit(&mut self, event: EngineEvent) {
        self.bus.emit(&event);
    }

    pub(crate) fn record_action(&mut self, action: Action) {
        self.action_history.push(action);
        self.emit(EngineEvent::ActionPerformed { action });
    }

    /// Log a command typed outside any pane (the pre-tmux shell) so
    /// command-based validation rules can see it.
    pub fn record_command(&mut self, command: &str) {
        self.typed_commands.push(command.to_string());
        self.emit(EngineEvent::StateChanged);
    }

    // ==================== Queries ====================

    pub fn state(&self) -> StateView<'_> {
        StateView {
            sessions: &self.sessions,
            active_session_id: self.active_session_id.as_deref(),
            is_attached: self.is_attached,
            is_inside_tmux: self.is_inside_tmux,
            mode: self.mode,
            prefix_active: self.prefix_active,
            zoomed_pane_id: self.zoomed_pane_id.as_deref(),
            confirm_action: self.confirm_action,
            command_input: &self.command_input,
            rename_input: &self.rename_input,
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_attached(&self) -> bool {
        self.is_attached
    }

    pub fn is_inside_tmux(&self) -> bool {
        self.is_inside_tmux
    }

    pub fn prefix_active(&self) -> bool {
        self.prefix_active
    }

    pub fn zoomed_pane_id(&self) -> Option<&str> {
        self.zoomed_pane_id.as_deref()
    }

    pub fn action_history(&self) -> &[Action] {
        &self.action_history
    }

    pub fn typed_commands(&self) -> &[String] {
        &self.typed_commands
    }

    pub(crate) fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub(crate) fn vfs_mut(&mut self) -> &mut Vfs {
        &mut self.vfs
    }

    pub fn active_session(&self) -> Option<&Session> {
        let id = self.active_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    fn active_session_mut(&mut self) -> Option<&mut Session> {
        let id = self.active_session_id.clone()?;
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn active_window(&self) -> Option<&Window> {
        self.active_session()?.active_window()
    }

    fn active_window_mut(&mut self) -> Option<&mut Window> {
        self.active_session_mut()?.active_window_mut()
    }

    pub fn active_pane(&self) -> Option<&Pane> {
        self.active_window()?.active_pane()
    }

    pub fn find_pane(&self, pane_id: &str) -> Option<&Pane> {
        self.sessions
            .iter()
            .flat_map(|s| &s.windows)
            .flat_map(|w| &w.panes)
            .find(|p| p.id == pane_id)
    }

    pub(crate) fn find_pane_mut(&mut self, pane_id: &str) -> Option<&mut Pane> {
        self.sessions
            .iter_mut()
            .flat_map(|s| &mut s.windows)
            .flat_map(|w| &mut w.panes)
            .find(|p| p.id == pane_id)
    }

    // ==================== Session / window / pane registry ====================

    fn create_pane(&mut self, cwd: String) -> Pane {
        let id = self.next_pane_id.to_string();
        self.next_pane_id += 1;
        Pane::new(id, cwd)
    }

    fn create_window(&mut self, name: &str, index: usize) -> Window {
        let id = self.next_window_id.to_string();
        self.next_window_id += 1;
        let pane = self.create_pane(HOME.to_string());
        Window::new(id, name.to_string(), pane, index)
    }

    /// Allocate a session with one window and one pane, make it active, and
    /// attach to it.
    pub fn create_session(&mut self, name: Option<&str>) {
        let id = self.next_session_id.to_string();
        self.next_session_id += 1;
        let session_name = match name {
            Some(n) => n.to_string(),
            None => id.clone(),
        };

        let window = self.create_window("bash", 0);
        let first_pane_id = window.panes[0].id.clone();
        let session = Session::new(id.clone(), session_name.clone(), window);

        self.sessions.push(session);
        self.active_session_id = Some(id);
        self.is_attached = true;
        self.is_inside_tmux = true;

        self.add_system_message(
            &first_pane_id,
            &format!("[tmux] Session \"{session_name}\" created"),
        );
        self.emit(EngineEvent::StateChanged);
    }

    /// Split the active pane, placing a new pane (inheriting the cwd) beside
    /// or below it at 50/50.
    pub fn split_pane(&mut self, orientation: Orientation) {
        let Some((old_pane_id, cwd)) = self
            .active_window()
            .and_then(|w| w.active_pane())
            .map(|p| (p.id.clone(), p.cwd.clone()))
        else {
            return;
        };

        let new_pane = self.create_pane(cwd);
        let new_pane_id = new_pane.id.clone();

        let Some(window) = self.active_window_mut() else {
            return;
        };
        if let Some(old) = window.pane_mut(&old_pane_id) {
            old.is_active = false;
        }
        window.panes.push(new_pane);
        window.active_pane_id = new_pane_id.clone();

        let current = std::mem::take(&mut window.layout);
        window.layout = layout::insert_split(current, &old_pane_id, &new_pane_id, orientation);

        let action = match orientation {
            Orientation::Horizontal => Action::PaneSplitHorizontal,
            Orientation::Vertical => Action::PaneSplitVertical,
        };
        self.record_action(action);
        self.emit(EngineEvent::StateChanged);
    }

    /// Cycle the active pane through the window's pane list. Direction is
    /// order-based, not geometric: right/down advance, left/up go back.
    pub fn navigate_pane(&mut self, direction: NavDirection) {
        let Some(window) = self.active_window_mut() else {
            return;
        };
        if window.panes.len() < 2 {
            return;
        }

        let current = window
            .panes
            .iter()
            .position(|p| p.id == window.active_pane_id)
            .unwrap_or(0);
        let len = window.panes.len();
        let next = match direction {
            NavDirection::Right | NavDirection::Down => (current + 1) % len,
            NavDirection::Left | NavDirection::Up => (current + len - 1) % len,
        };

        window.deactivate_panes();
        window.panes[next].is_active = true;
        window.active_pane_id = window.panes[next].id.clone();

        self.record_action(Action::PaneNavigated);
        self.emit(EngineEvent::StateChanged);
    }

    /// Nudge the active pane's share of its split by 5 points. A boundary
    /// pane with no sibling in that direction leaves the layout untouched,
    /// but the action is still recorded.
    pub fn resize_pane(&mut self, direction: NavDirection) {
        let Some(pane_id) = self.active_pane().map(|p| p.id.clone()) else {
            return;
        };
        let Some(window) = self.active_window_mut() else {
            return;
        };

        layout::resize(&mut window.layout, &pane_id, direction, layout::RESIZE_STEP);

        self.record_action(Action::PaneResized);
        self.emit(EngineEvent::StateChanged);
    }

    /// Toggle full-window display of the active pane. The layout tree is
    /// untouched; only the render target changes.
    pub fn zoom_pane(&mut self) {
        let Some(pane_id) = self.active_pane().map(|p| p.id.clone()) else {
            return;
        };

        if self.zoomed_pane_id.as_deref() == Some(pane_id.as_str()) {
            self.zoomed_pane_id = None;
        } else {
            self.zoomed_pane_id = Some(pane_id);
        }

        self.record_action(Action::PaneZoomed);
        self.emit(EngineEvent::StateChanged);
    }

    /// Remove a pane from the active window. Closing the last pane cascades
    /// into closing the window itself.
    pub fn close_pane_by_id(&mut self, pane_id: &str) {
        let Some(window) = self.active_window_mut() else {
            return;
        };
        let Some(idx) = window.panes.iter().position(|p| p.id == pane_id) else {
            return;
        };

        window.panes.remove(idx);
        let current = std::mem::take(&mut window.layout);
        window.layout = layout::remove_leaf(current, pane_id);

        let window_id = window.id.clone();
        let now_empty = window.panes.is_empty();
        if !now_empty {
            let next = idx.min(window.panes.len() - 1);
            window.deactivate_panes();
            window.panes[next].is_active = true;
            window.active_pane_id = window.panes[next].id.clone();
        }

        if self.zoomed_pane_id.as_deref() == Some(pane_id) {
            self.zoomed_pane_id = None;
        }

        if now_empty {
            self.close_window(&window_id);
        }

        self.emit(EngineEvent::StateChanged);
    }

    pub fn create_new_window(&mut self, name: Option<&str>) {
        let Some(count) = self.active_session().map(|s| s.windows.len()) else {
            return;
        };

        if let Some(current) = self.active_window_mut() {
            current.deactivate_panes();
        }

        let window = self.create_window(name.unwrap_or("bash"), count);
        let window_id = window.id.clone();

        let Some(session) = self.active_session_mut() else {
            return;
        };
        session.windows.push(window);
        session.active_window_id = window_id;

        self.zoomed_pane_id = None;
        self.record_action(Action::WindowCreated);
        self.emit(EngineEvent::StateChanged);
    }

    pub fn switch_window(&mut self, direction: CycleDirection) {
        let Some(session) = self.active_session() else {
            return;
        };
        if session.windows.len() < 2 {
            return;
        }

        let current = session
            .windows
            .iter()
            .position(|w| w.id == session.active_window_id)
            .unwrap_or(0);
        let len = session.windows.len();
        let next = match direction {
            CycleDirection::Next => (current + 1) % len,
            CycleDirection::Prev => (current + len - 1) % len,
        };

        self.activate_window(next);
        self.record_action(Action::WindowSwitched);
    }

    pub fn switch_window_by_number(&mut self, number: usize) {
        let Some(session) = self.active_session() else {
            return;
        };
        let Some(idx) = session.windows.iter().position(|w| w.index == number) else {
            return;
        };

        self.activate_window(idx);
        self.record_action(Action::WindowSwitchedByNumber);
    }

    fn activate_window(&mut self, index: usize) {
        let Some(session) = self.active_session_mut() else {
            return;
        };
        let Some(target_id) = session.windows.get(index).map(|w| w.id.clone()) else {
            return;
        };

        if let Some(old) = session.active_window_mut() {
            old.deactivate_panes();
        }
        session.active_window_id = target_id;
        if let Some(new) = session.active_window_mut() {
            new.restore_active_pane();
        }

        self.zoomed_pane_id = None;
        self.emit(EngineEvent::StateChanged);
    }

    pub fn rename_window(&mut self, name: &str) {
        let Some(window) = self.active_window_mut() else {
            return;
        };
        window.name = name.to_string();
        self.record_action(Action::WindowRenamed);
        self.emit(EngineEvent::StateChanged);
    }

    /// Close a window in the active session, re-deriving the dense window
    /// indices. An emptied session is removed; removing the last session
    /// fully detaches the engine.
    pub fn close_window(&mut self, window_id: &str) {
        let Some(session) = self.active_session_mut() else {
            return;
        };
        let Some(idx) = session.windows.iter().position(|w| w.id == window_id) else {
            return;
        };

        session.windows.remove(idx);
        for (i, window) in session.windows.iter_mut().enumerate() {
            window.index = i;
        }

        if session.windows.is_empty() {
            let session_id = session.id.clone();
            self.sessions.retain(|s| s.id != session_id);
            if self.sessions.is_empty() {
                self.active_session_id = None;
                self.is_attached = false;
                self.is_inside_tmux = false;
            } else {
                self.active_session_id = Some(self.sessions[0].id.clone());
            }
        } else {
            let next = idx.min(session.windows.len() - 1);
            session.active_window_id = session.windows[next].id.clone();
            session.windows[next].restore_active_pane();
        }

        self.record_action(Action::WindowClosed);
        self.emit(EngineEvent::StateChanged);
    }

    /// Leave the session without destroying it: clears attachment, mode,
    /// prefix, and zoom; pane data is retained for a later attach.
    pub fn detach_session(&mut self) {
        self.is_attached = false;
        self.is_inside_tmux = false;
        self.mode = Mode::Normal;
        self.prefix_active = false;
        self.prefix_deadline = None;
        self.zoomed_pane_id = None;

        if let Some(session) = self.active_session_mut() {
            for window in &mut session.windows {
                window.deactivate_panes();
            }
        }

        self.record_action(Action::SessionDetached);
        self.emit(EngineEvent::StateChanged);
    }

    /// Make a specific pane in the active window the active one (mouse or
    /// programmatic focus).
    pub fn focus_pane(&mut self, pane_id: &str) {
        let Some(window) = self.active_window_mut() else {
            return;
        };
        if window.pane(pane_id).is_none() {
            return;
        }

        window.deactivate_panes();
        if let Some(pane) = window.pane_mut(pane_id) {
            pane.is_active = true;
        }
        window.active_pane_id = pane_id.to_string();

        self.emit(EngineEvent::StateChanged);
    }

    pub(crate) fn restore_active_pane(&mut self) {
        if let Some(window) = self.active_window_mut() {
            window.restore_active_pane();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub(crate) fn record_events(engine: &mut TmuxEngine) -> Rc<RefCell<Vec<EngineEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        engine.on(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    /// Structural invariants from the data model: one active pane per
    /// window, layout leaves exactly mirror the pane collection, sibling
    /// sizes sum to 100.
    pub(crate) fn assert_invariants(engine: &TmuxEngine) {
        for session in engine.sessions() {
            for window in &session.windows {
                if session.active_window_id == window.id && engine.is_attached() {
                    let active: Vec<_> = window.panes.iter().filter(|p| p.is_active).collect();
                    assert_eq!(active.len(), 1, "window {} active panes", window.id);
                    assert_eq!(active[0].id, window.active_pane_id);
                }

                let mut from_layout = window.layout.pane_ids();
                from_layout.sort();
                let mut from_panes: Vec<String> =
                    window.panes.iter().map(|p| p.id.clone()).collect();
                from_panes.sort();
                assert_eq!(from_layout, from_panes, "window {} layout leaves", window.id);

                assert_sizes(&window.layout);
            }
        }
    }

    fn assert_sizes(node: &LayoutNode) {
        if let LayoutKind::Split { children, .. } = &node.kind {
            let sum: f32 = children.iter().map(|c| c.size).sum();
            assert!((sum - 100.0).abs() < 0.01, "sibling sizes sum to {sum}");
            for child in children {
                assert_sizes(child);
            }
        }
    }

    #[test]
    fn test_create_session_from_empty() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);

        assert_eq!(engine.sessions().len(), 1);
        assert_eq!(engine.sessions()[0].windows.len(), 1);
        assert_eq!(engine.sessions()[0].windows[0].panes.len(), 1);
        assert!(engine.is_attached());
        assert!(engine.is_inside_tmux());
        assert_invariants(&engine);
    }

    #[test]
    fn test_pane_ids_are_never_recycled() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.create_session(None);
        let second_pane = engine.active_pane().unwrap().id.clone();

        engine.split_pane(Orientation::Horizontal);
        let third_pane = engine.active_pane().unwrap().id.clone();
        engine.close_pane_by_id(&third_pane);
        engine.split_pane(Orientation::Horizontal);
        let fourth_pane = engine.active_pane().unwrap().id.clone();

        assert_ne!(second_pane, third_pane);
        assert_ne!(third_pane, fourth_pane);
        assert_invariants(&engine);
    }

    #[test]
    fn test_split_inherits_cwd() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        let pane_id = engine.active_pane().unwrap().id.clone();
        engine.execute_command(&pane_id, "cd projects");

        engine.split_pane(Orientation::Vertical);
        assert_eq!(engine.active_pane().unwrap().cwd, "/home/user/projects");
        assert_invariants(&engine);
    }

    #[test]
    fn test_navigate_pane_cycles() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.split_pane(Orientation::Horizontal);
        engine.split_pane(Orientation::Horizontal);

        // pane list is [a, b, c]; focus is on c after two splits
        let a = engine.active_window().unwrap().panes[0].id.clone();
        engine.focus_pane(&a);

        engine.navigate_pane(NavDirection::Right);
        let b = engine.active_pane().unwrap().id.clone();
        assert_ne!(a, b);

        engine.navigate_pane(NavDirection::Right);
        engine.navigate_pane(NavDirection::Right);
        assert_eq!(engine.active_pane().unwrap().id, a);
        assert_invariants(&engine);
    }

    #[test]
    fn test_navigate_requires_two_panes() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        let log = record_events(&mut engine);
        engine.navigate_pane(NavDirection::Right);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_resize_without_room_still_records() {
        // a single pane has no sibling to trade space with, yet the attempt
        // counts as a resize for history and validation purposes
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        let layout_before = engine.active_window().unwrap().layout.clone();

        let log = record_events(&mut engine);
        engine.resize_pane(NavDirection::Right);

        assert_eq!(engine.active_window().unwrap().layout, layout_before);
        assert_eq!(engine.action_history().last(), Some(&Action::PaneResized));
        let events = log.borrow();
        assert!(events.contains(&EngineEvent::ActionPerformed {
            action: Action::PaneResized
        }));
        assert!(events.contains(&EngineEvent::StateChanged));
    }

    #[test]
    fn test_zoom_toggle_is_idempotent() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);

        assert_eq!(engine.zoomed_pane_id(), None);
        engine.zoom_pane();
        assert_eq!(
            engine.zoomed_pane_id(),
            Some(engine.active_pane().unwrap().id.as_str())
        );
        engine.zoom_pane();
        assert_eq!(engine.zoomed_pane_id(), None);
    }

    #[test]
    fn test_close_pane_cascades_to_window_and_session() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        let pane_id = engine.active_pane().unwrap().id.clone();

        engine.close_pane_by_id(&pane_id);

        assert!(engine.sessions().is_empty());
        assert!(!engine.is_attached());
        assert!(!engine.is_inside_tmux());
    }

    #[test]
    fn test_close_pane_selects_neighbor() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.split_pane(Orientation::Horizontal);
        engine.split_pane(Orientation::Horizontal);
        let panes: Vec<String> = engine
            .active_window()
            .unwrap()
            .panes
            .iter()
            .map(|p| p.id.clone())
            .collect();

        // close the middle pane; the one that slid into its index is next
        engine.close_pane_by_id(&panes[1]);
        assert_eq!(engine.active_pane().unwrap().id, panes[2]);
        assert_invariants(&engine);
    }

    #[test]
    fn test_close_pane_clears_matching_zoom() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.split_pane(Orientation::Horizontal);
        let pane_id = engine.active_pane().unwrap().id.clone();
        engine.zoom_pane();
        assert!(engine.zoomed_pane_id().is_some());

        engine.close_pane_by_id(&pane_id);
        assert_eq!(engine.zoomed_pane_id(), None);
        assert_invariants(&engine);
    }

    #[test]
    fn test_close_window_reindexes() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.create_new_window(None);
        engine.create_new_window(None);

        let second = engine.sessions()[0].windows[1].id.clone();
        engine.close_window(&second);

        let indices: Vec<usize> = engine.sessions()[0].windows.iter().map(|w| w.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_invariants(&engine);
    }

    #[test]
    fn test_switch_window_cycles_and_restores_pane() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.create_new_window(None);

        let second = engine.active_window().unwrap().id.clone();
        engine.switch_window(CycleDirection::Next);
        assert_ne!(engine.active_window().unwrap().id, second);
        assert!(engine.active_pane().unwrap().is_active);

        engine.switch_window(CycleDirection::Prev);
        assert_eq!(engine.active_window().unwrap().id, second);
        assert_invariants(&engine);
    }

    #[test]
    fn test_switch_window_by_number() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.create_new_window(None);
        engine.create_new_window(None);

        engine.switch_window_by_number(0);
        assert_eq!(engine.active_window().unwrap().index, 0);
        assert_eq!(
            engine.action_history().last(),
            Some(&Action::WindowSwitchedByNumber)
        );

        // unknown number is a silent no-op
        engine.switch_window_by_number(7);
        assert_eq!(engine.active_window().unwrap().index, 0);
    }

    #[test]
    fn test_switch_window_clears_zoom() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.zoom_pane();
        engine.create_new_window(None);
        assert_eq!(engine.zoomed_pane_id(), None);
    }

    #[test]
    fn test_rename_window() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.rename_window("editor");
        assert_eq!(engine.active_window().unwrap().name, "editor");
        assert_eq!(engine.action_history().last(), Some(&Action::WindowRenamed));
    }

    #[test]
    fn test_detach_retains_session_data() {
        let mut engine = TmuxEngine::new();
        engine.create_session(Some("work"));
        engine.split_pane(Orientation::Horizontal);
        engine.detach_session();

        assert!(!engine.is_attached());
        assert!(!engine.is_inside_tmux());
        assert_eq!(engine.sessions().len(), 1);
        assert_eq!(engine.sessions()[0].windows[0].panes.len(), 2);
        assert!(engine.sessions()[0].windows[0].panes.iter().all(|p| !p.is_active));
    }

    #[test]
    fn test_reset_returns_to_fresh_state() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.split_pane(Orientation::Horizontal);
        engine.record_command("tmux");
        engine.reset();

        assert!(engine.sessions().is_empty());
        assert!(engine.action_history().is_empty());
        assert!(engine.typed_commands().is_empty());
        assert!(!engine.is_attached());

        // id counters restart after reset
        engine.create_session(None);
        assert_eq!(engine.sessions()[0].id, "0");
    }

    #[test]
    fn test_off_stops_delivery() {
        let mut engine = TmuxEngine::new();
        let log = Rc::new(RefCell::new(0));
        let sink = log.clone();
        let id = engine.on(move |_| *sink.borrow_mut() += 1);

        engine.create_session(None);
        let after_create = *log.borrow();
        assert!(after_create > 0);

        engine.off(id);
        engine.create_new_window(None);
        assert_eq!(*log.borrow(), after_create);
    }

    #[test]
    fn test_focus_pane() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine.split_pane(Orientation::Horizontal);
        let first = engine.active_window().unwrap().panes[0].id.clone();

        engine.focus_pane(&first);
        assert_eq!(engine.active_pane().unwrap().id, first);
        assert_invariants(&engine);

        // unknown pane is ignored
        engine.focus_pane("999");
        assert_eq!(engine.active_pane().unwrap().id, first);
    }
}

//! Key-event interpretation: the Ctrl+b prefix, the prefix binding table,
//! and the modal input layers (command prompt, rename prompt, confirm,
//! copy mode). Keys not consumed here fall through to whatever shell owns
//! the focus.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{
    Action, ConfirmAction, CycleDirection, EngineEvent, Mode, NavDirection, Orientation,
    TmuxEngine,
};
use crate::models::ShellLine;

impl TmuxEngine {
    /// Feed one key event through the mode stack. Returns true when the key
    /// was consumed; false means the caller should treat it as plain input
    /// for the focused shell.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        match self.mode {
            Mode::Confirm => {
                self.handle_confirm_key(key);
                true
            }
            Mode::Command => {
                self.handle_command_key(key);
                true
            }
            Mode::Rename => {
                self.handle_rename_key(key);
                true
            }
            Mode::Copy => {
                self.handle_copy_key(key);
                true
            }
            Mode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        let is_prefix_key =
            key.code == KeyCode::Char('b') && key.modifiers.contains(KeyModifiers::CONTROL);

        if !self.prefix_active {
            if is_prefix_key {
                self.activate_prefix();
                return true;
            }
            return false;
        }

        // a bare modifier press must not burn the armed prefix
        if matches!(key.code, KeyCode::Modifier(_)) {
            return true;
        }
        if is_prefix_key {
            self.activate_prefix();
            return true;
        }

        self.deactivate_prefix();
        if !self.is_inside_tmux {
            return false;
        }

        let resizing = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('%') => self.split_pane(Orientation::Horizontal),
            KeyCode::Char('"') => self.split_pane(Orientation::Vertical),
            KeyCode::Up if resizing => self.resize_and_rearm(NavDirection::Up),
            KeyCode::Down if resizing => self.resize_and_rearm(NavDirection::Down),
            KeyCode::Left if resizing => self.resize_and_rearm(NavDirection::Left),
            KeyCode::Right if resizing => self.resize_and_rearm(NavDirection::Right),
            KeyCode::Up => self.navigate_pane(NavDirection::Up),
            KeyCode::Down => self.navigate_pane(NavDirection::Down),
            KeyCode::Left => self.navigate_pane(NavDirection::Left),
            KeyCode::Right => self.navigate_pane(NavDirection::Right),
            KeyCode::Char('c') => self.create_new_window(None),
            KeyCode::Char('n') => self.switch_window(CycleDirection::Next),
            KeyCode::Char('p') => self.switch_window(CycleDirection::Prev),
            KeyCode::Char(',') => self.enter_rename_mode(),
            KeyCode::Char('&') => self.enter_confirm_mode(ConfirmAction::CloseWindow),
            KeyCode::Char('x') => self.enter_confirm_mode(ConfirmAction::ClosePane),
            KeyCode::Char('z') => self.zoom_pane(),
            KeyCode::Char('d') => self.detach_session(),
            KeyCode::Char('[') => self.enter_copy_mode(),
            KeyCode::Char(':') => self.enter_command_mode(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.switch_window_by_number(c as usize - '0' as usize);
            }
            _ => return false,
        }
        true
    }

    /// Resizing is usually repeated, so the prefix stays armed afterwards.
    fn resize_and_rearm(&mut self, direction: NavDirection) {
        self.resize_pane(direction);
        self.activate_prefix();
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
        let action = self.confirm_action.take();
        self.set_mode(Mode::Normal);

        if confirmed {
            match action {
                Some(ConfirmAction::ClosePane) => {
                    if let Some(pane_id) = self.active_pane().map(|p| p.id.clone()) {
                        self.close_pane_by_id(&pane_id);
                        self.record_action(Action::PaneClosed);
                    }
                }
                Some(ConfirmAction::CloseWindow) => {
                    if let Some(window_id) = self.active_window().map(|w| w.id.clone()) {
                        self.close_window(&window_id);
                    }
                }
                None => {}
            }
        }
        self.emit(EngineEvent::StateChanged);
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.command_input.clear();
                self.set_mode(Mode::Normal);
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.command_input);
                self.set_mode(Mode::Normal);
                self.execute_prompt_command(&input);
            }
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.command_input.push(c);
            }
            _ => {}
        }
        self.emit(EngineEvent::StateChanged);
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.rename_input.clear();
                self.set_mode(Mode::Normal);
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.rename_input);
                self.set_mode(Mode::Normal);
                let name = input.trim();
                if !name.is_empty() {
                    self.rename_window(name);
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.rename_input.clear();
            }
            KeyCode::Backspace => {
                self.rename_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.rename_input.push(c);
            }
            _ => {}
        }
        self.emit(EngineEvent::StateChanged);
    }

    fn handle_copy_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.set_mode(Mode::Normal);
            self.record_action(Action::CopyModeExited);
            self.emit(EngineEvent::StateChanged);
        }
        // everything else is swallowed; there is no real scrollback here
    }

    /// Input routed at a specific pane: mode/prefix handling first, then the
    /// pane's line editor.
    pub fn handle_pane_key(&mut self, pane_id: &str, key: KeyEvent) {
        if self.handle_key_event(key) {
            return;
        }
        if key.kind == KeyEventKind::Release {
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let input = match self.find_pane_mut(pane_id) {
                    Some(pane) => std::mem::take(&mut pane.current_input),
                    None => return,
                };
                self.execute_command(pane_id, &input);
            }
            KeyCode::Backspace => {
                if let Some(pane) = self.find_pane_mut(pane_id) {
                    pane.current_input.pop();
                }
                self.emit(EngineEvent::StateChanged);
            }
            KeyCode::Tab => self.tab_complete(pane_id),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(pane) = self.find_pane_mut(pane_id) {
                    let interrupted = format!("{}^C", pane.current_input);
                    let prompt = super::shell::prompt_for(&pane.cwd);
                    pane.shell_history.push(ShellLine::input(interrupted, prompt));
                    pane.current_input.clear();
                }
                self.emit(EngineEvent::StateChanged);
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(pane) = self.find_pane_mut(pane_id) {
                    pane.shell_history.clear();
                }
                self.emit(EngineEvent::StateChanged);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(pane) = self.find_pane_mut(pane_id) {
                    pane.current_input.clear();
                }
                self.emit(EngineEvent::StateChanged);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_pane_input(pane_id, c);
            }
            _ => {}
        }
    }

    pub fn handle_pane_input(&mut self, pane_id: &str, c: char) {
        if let Some(pane) = self.find_pane_mut(pane_id) {
            pane.current_input.push(c);
            self.emit(EngineEvent::StateChanged);
        }
    }

    // ==================== Prefix timer ====================

    pub fn activate_prefix(&mut self) {
        self.prefix_active = true;
        self.prefix_deadline = Some(Instant::now() + self.prefix_timeout);
        self.record_action(Action::PrefixActivated);
        self.emit(EngineEvent::PrefixActivated);
        self.emit(EngineEvent::StateChanged);
    }

    pub fn deactivate_prefix(&mut self) {
        self.prefix_active = false;
        self.prefix_deadline = None;
        self.record_action(Action::PrefixDeactivated);
        self.emit(EngineEvent::PrefixDeactivated);
        self.emit(EngineEvent::StateChanged);
    }

    /// Expire an armed prefix whose follow-up never came. Driven by the
    /// caller's clock so tests control time.
    pub fn tick(&mut self, now: Instant) {
        if self.prefix_active && self.prefix_deadline.is_some_and(|deadline| now >= deadline) {
            self.deactivate_prefix();
        }
    }

    pub fn prefix_deadline(&self) -> Option<Instant> {
        self.prefix_deadline
    }

    // ==================== Mode transitions ====================

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.emit(EngineEvent::ModeChanged { mode });
        }
    }

    fn enter_copy_mode(&mut self) {
        self.set_mode(Mode::Copy);
        self.record_action(Action::CopyModeEntered);
        self.emit(EngineEvent::StateChanged);
    }

    fn enter_command_mode(&mut self) {
        self.command_input.clear();
        self.set_mode(Mode::Command);
        self.record_action(Action::CommandModeEntered);
        self.emit(EngineEvent::StateChanged);
    }

    fn enter_rename_mode(&mut self) {
        self.rename_input = self
            .active_window()
            .map(|w| w.name.clone())
            .unwrap_or_default();
        self.set_mode(Mode::Rename);
        self.record_action(Action::WindowRenameStarted);
        self.emit(EngineEvent::StateChanged);
    }

    fn enter_confirm_mode(&mut self, action: ConfirmAction) {
        self.confirm_action = Some(action);
        self.set_mode(Mode::Confirm);
        self.emit(EngineEvent::StateChanged);
    }

    /// The `:` prompt accepts a small subset of tmux commands.
    fn execute_prompt_command(&mut self, input: &str) {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match parts[0] {
            "split-window" => {
                if parts.contains(&"-h") {
                    self.split_pane(Orientation::Horizontal);
                } else {
                    self.split_pane(Orientation::Vertical);
                }
            }
            "new-window" => {
                let name = parts.get(1).copied();
                self.create_new_window(name);
            }
            "rename-window" => {
                if let Some(name) = parts.get(1) {
                    self.rename_window(name);
                }
            }
            other => {
                self.emit(EngineEvent::Notification {
                    message: format!("Unknown command: {other}"),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::assert_invariants;
    use super::*;
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn attached_engine() -> TmuxEngine {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        engine
    }

    #[test]
    fn test_prefix_then_percent_splits() {
        let mut engine = attached_engine();

        assert!(engine.handle_key_event(ctrl('b')));
        assert!(engine.prefix_active());

        assert!(engine.handle_key_event(press(KeyCode::Char('%'))));
        assert!(!engine.prefix_active());
        assert_eq!(engine.active_window().unwrap().panes.len(), 2);
        assert_eq!(
            engine.action_history().last(),
            Some(&Action::PaneSplitHorizontal)
        );
        assert_invariants(&engine);
    }

    #[test]
    fn test_percent_without_prefix_falls_through() {
        let mut engine = attached_engine();
        assert!(!engine.handle_key_event(press(KeyCode::Char('%'))));
        assert_eq!(engine.active_window().unwrap().panes.len(), 1);
    }

    #[test]
    fn test_prefix_expires_on_tick() {
        let mut engine = TmuxEngine::with_prefix_timeout(Duration::from_millis(100));
        engine.create_session(None);

        engine.handle_key_event(ctrl('b'));
        let deadline = engine.prefix_deadline().unwrap();

        engine.tick(deadline - Duration::from_millis(1));
        assert!(engine.prefix_active());

        engine.tick(deadline);
        assert!(!engine.prefix_active());
        assert_eq!(
            engine.action_history().last(),
            Some(&Action::PrefixDeactivated)
        );
    }

    #[test]
    fn test_repeat_prefix_rearms() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        let first = engine.prefix_deadline().unwrap();
        engine.handle_key_event(ctrl('b'));
        assert!(engine.prefix_active());
        assert!(engine.prefix_deadline().unwrap() >= first);
    }

    #[test]
    fn test_bare_modifier_keeps_prefix_armed() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        assert!(engine.handle_key_event(press(KeyCode::Modifier(
            crossterm::event::ModifierKeyCode::LeftControl
        ))));
        assert!(engine.prefix_active());
    }

    #[test]
    fn test_unbound_key_after_prefix_disarms_and_falls_through() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        assert!(!engine.handle_key_event(press(KeyCode::Char('q'))));
        assert!(!engine.prefix_active());
    }

    #[test]
    fn test_digit_switches_window_by_number() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char('c')));

        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char('0')));
        assert_eq!(engine.active_window().unwrap().index, 0);
        assert_eq!(
            engine.action_history().last(),
            Some(&Action::WindowSwitchedByNumber)
        );
    }

    #[test]
    fn test_ctrl_arrow_resizes_and_rearms() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char('%')));

        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL));
        assert!(engine.action_history().contains(&Action::PaneResized));
        // still armed so the resize can repeat without another Ctrl+b
        assert!(engine.prefix_active());
    }

    #[test]
    fn test_confirm_close_pane() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char('%')));
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char('x')));
        assert_eq!(engine.mode(), Mode::Confirm);

        engine.handle_key_event(press(KeyCode::Char('y')));
        assert_eq!(engine.mode(), Mode::Normal);
        assert_eq!(engine.active_window().unwrap().panes.len(), 1);
        assert_eq!(engine.action_history().last(), Some(&Action::PaneClosed));
        assert_invariants(&engine);
    }

    #[test]
    fn test_confirm_cancelled_by_other_key() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char('&')));
        assert_eq!(engine.mode(), Mode::Confirm);

        engine.handle_key_event(press(KeyCode::Char('n')));
        assert_eq!(engine.mode(), Mode::Normal);
        assert_eq!(engine.sessions().len(), 1);
    }

    #[test]
    fn test_command_mode_split_window() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char(':')));
        assert_eq!(engine.mode(), Mode::Command);
        assert!(engine
            .action_history()
            .contains(&Action::CommandModeEntered));

        for c in "split-window -h".chars() {
            engine.handle_key_event(press(KeyCode::Char(c)));
        }
        assert_eq!(engine.state().command_input, "split-window -h");

        engine.handle_key_event(press(KeyCode::Enter));
        assert_eq!(engine.mode(), Mode::Normal);
        assert_eq!(engine.active_window().unwrap().panes.len(), 2);
        assert_invariants(&engine);
    }

    #[test]
    fn test_command_mode_unknown_notifies() {
        let mut engine = attached_engine();
        let log = super::super::tests::record_events(&mut engine);
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char(':')));
        for c in "bogus".chars() {
            engine.handle_key_event(press(KeyCode::Char(c)));
        }
        engine.handle_key_event(press(KeyCode::Enter));

        assert!(log.borrow().iter().any(|e| matches!(
            e,
            EngineEvent::Notification { message } if message == "Unknown command: bogus"
        )));
    }

    #[test]
    fn test_command_mode_escape_cancels() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char(':')));
        engine.handle_key_event(press(KeyCode::Char('x')));
        engine.handle_key_event(press(KeyCode::Esc));
        assert_eq!(engine.mode(), Mode::Normal);
        assert_eq!(engine.state().command_input, "");
    }

    #[test]
    fn test_rename_mode_seeds_current_name() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char(',')));
        assert_eq!(engine.mode(), Mode::Rename);
        assert_eq!(engine.state().rename_input, "bash");
        assert!(engine
            .action_history()
            .contains(&Action::WindowRenameStarted));

        engine.handle_key_event(ctrl('u'));
        for c in "editor".chars() {
            engine.handle_key_event(press(KeyCode::Char(c)));
        }
        engine.handle_key_event(press(KeyCode::Enter));

        assert_eq!(engine.mode(), Mode::Normal);
        assert_eq!(engine.active_window().unwrap().name, "editor");
    }

    #[test]
    fn test_rename_blank_keeps_old_name() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char(',')));
        engine.handle_key_event(ctrl('u'));
        engine.handle_key_event(press(KeyCode::Enter));
        assert_eq!(engine.active_window().unwrap().name, "bash");
    }

    #[test]
    fn test_copy_mode_roundtrip() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char('[')));
        assert_eq!(engine.mode(), Mode::Copy);

        // arbitrary keys are swallowed in copy mode
        assert!(engine.handle_key_event(press(KeyCode::Char('j'))));
        assert_eq!(engine.mode(), Mode::Copy);

        engine.handle_key_event(press(KeyCode::Char('q')));
        assert_eq!(engine.mode(), Mode::Normal);
        assert_eq!(engine.action_history().last(), Some(&Action::CopyModeExited));
    }

    #[test]
    fn test_detach_via_prefix_d() {
        let mut engine = attached_engine();
        engine.handle_key_event(ctrl('b'));
        engine.handle_key_event(press(KeyCode::Char('d')));
        assert!(!engine.is_attached());
        assert_eq!(engine.sessions().len(), 1);
    }

    #[test]
    fn test_pane_key_typing_and_submit() {
        let mut engine = attached_engine();
        let pane = engine.active_pane().unwrap().id.clone();

        for c in "pwd".chars() {
            engine.handle_pane_key(&pane, press(KeyCode::Char(c)));
        }
        assert_eq!(engine.find_pane(&pane).unwrap().current_input, "pwd");

        engine.handle_pane_key(&pane, press(KeyCode::Enter));
        let pane_ref = engine.find_pane(&pane).unwrap();
        assert!(pane_ref.current_input.is_empty());
        assert_eq!(
            pane_ref.shell_history.last().unwrap().content,
            "/home/user"
        );
    }

    #[test]
    fn test_pane_key_backspace() {
        let mut engine = attached_engine();
        let pane = engine.active_pane().unwrap().id.clone();
        engine.handle_pane_key(&pane, press(KeyCode::Char('l')));
        engine.handle_pane_key(&pane, press(KeyCode::Char('s')));
        engine.handle_pane_key(&pane, press(KeyCode::Backspace));
        assert_eq!(engine.find_pane(&pane).unwrap().current_input, "l");
    }

    #[test]
    fn test_pane_key_ctrl_c_interrupts() {
        let mut engine = attached_engine();
        let pane = engine.active_pane().unwrap().id.clone();
        for c in "sleep 100".chars() {
            engine.handle_pane_key(&pane, press(KeyCode::Char(c)));
        }
        engine.handle_pane_key(&pane, ctrl('c'));

        let pane_ref = engine.find_pane(&pane).unwrap();
        assert!(pane_ref.current_input.is_empty());
        assert_eq!(
            pane_ref.shell_history.last().unwrap().content,
            "sleep 100^C"
        );
    }

    #[test]
    fn test_pane_key_prefix_takes_priority_over_typing() {
        let mut engine = attached_engine();
        let pane = engine.active_pane().unwrap().id.clone();

        engine.handle_pane_key(&pane, ctrl('b'));
        engine.handle_pane_key(&pane, press(KeyCode::Char('%')));
        // '%' went to the binding table, not the input buffer
        assert_eq!(engine.find_pane(&pane).unwrap().current_input, "");
        assert_eq!(engine.active_window().unwrap().panes.len(), 2);
    }
}

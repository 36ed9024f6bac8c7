//! Application state on top of the engine: the shell shown before any
//! session is attached, lesson/challenge tracking, and toast notifications.

mod runtime;
mod tracker;

pub use runtime::run_tui;
pub use tracker::{Tracker, TrainerMode};

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::{EngineEvent, TmuxEngine};
use crate::models::ShellLine;

const TOAST_DURATION: Duration = Duration::from_millis(3500);
const OUTER_PROMPT: &str = "user@tmux-learn:~$ ";

pub struct App {
    pub engine: TmuxEngine,
    pub tracker: Tracker,
    outer_lines: Vec<ShellLine>,
    outer_input: String,
    toast: Option<(String, Instant)>,
    should_quit: bool,
    // listeners run under the engine's borrow, so events are queued and
    // drained once control returns to the app
    pending: Rc<RefCell<Vec<EngineEvent>>>,
}

impl App {
    pub fn new(challenge: bool) -> Self {
        let mut engine = TmuxEngine::new();
        let pending = Rc::new(RefCell::new(Vec::new()));
        let queue = pending.clone();
        engine.on(move |event| queue.borrow_mut().push(event.clone()));

        let mut tracker = Tracker::new(TrainerMode::Learn);
        if challenge {
            tracker.switch_mode(&engine);
        }

        Self {
            engine,
            tracker,
            outer_lines: vec![
                ShellLine::system("Welcome to tmux trainer, your interactive tmux tutorial!"),
                ShellLine::system("Follow the lessons in the sidebar to get started."),
                ShellLine::output(""),
            ],
            outer_input: String::new(),
            toast: None,
            should_quit: false,
            pending,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn outer_lines(&self) -> &[ShellLine] {
        &self.outer_lines
    }

    pub fn outer_input(&self) -> &str {
        &self.outer_input
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|(message, _)| message.as_str())
    }

    fn show_toast(&mut self, message: String) {
        self.toast = Some((message, Instant::now()));
    }

    /// Showing the simulated multiplexer, or still in the plain shell?
    pub fn in_tmux(&self) -> bool {
        self.engine.is_inside_tmux()
            && self.engine.is_attached()
            && self.engine.active_window().is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(2) => {
                self.tracker.switch_mode(&self.engine);
                return;
            }
            KeyCode::F(3) if self.tracker.mode() == TrainerMode::Challenge => {
                self.tracker.skip_task(&self.engine);
                return;
            }
            KeyCode::F(4) => {
                self.tracker.request_hint();
                return;
            }
            _ => {}
        }

        if self.in_tmux() {
            let was_attached = self.engine.is_attached();
            let session_name = self
                .engine
                .active_session()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "0".to_string());

            if let Some(pane_id) = self.engine.active_pane().map(|p| p.id.clone()) {
                self.engine.handle_pane_key(&pane_id, key);
            }

            // dropping out of tmux leaves a marker in the outer shell
            if was_attached && !self.engine.is_attached() && !self.engine.sessions().is_empty() {
                self.outer_lines.push(ShellLine::system(format!(
                    "[detached (from session {session_name})]"
                )));
            }
        } else {
            if self.engine.handle_key_event(key) {
                return;
            }
            self.handle_outer_key(key);
        }
    }

    fn handle_outer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.outer_input);
                self.outer_lines
                    .push(ShellLine::input(input.clone(), OUTER_PROMPT));
                self.execute_outer_command(input.trim());
            }
            KeyCode::Backspace => {
                self.outer_input.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let interrupted = format!("{}^C", self.outer_input);
                self.outer_lines
                    .push(ShellLine::input(interrupted, OUTER_PROMPT));
                self.outer_input.clear();
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.outer_lines.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.outer_input.push(c);
            }
            _ => {}
        }
    }

    /// The plain shell outside tmux understands just enough to launch and
    /// rejoin sessions.
    fn execute_outer_command(&mut self, command: &str) {
        if command.is_empty() {
            // still counts for "press Enter" steps
            self.engine.execute_command("", "");
            return;
        }
        self.engine.record_command(command);

        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts[0] == "tmux" {
            self.execute_outer_tmux(&parts[1..]);
            return;
        }

        match parts[0] {
            "help" => self.outer_lines.push(ShellLine::output(
                "Available commands:\n  tmux              Start a new tmux session\n  tmux new -s name  Start a named session\n  tmux ls           List sessions\n  tmux attach -t n  Attach to a session\n  help              Show this help\n  clear             Clear screen",
            )),
            "clear" => self.outer_lines.clear(),
            other => self
                .outer_lines
                .push(ShellLine::error(format!("{other}: command not found"))),
        }
    }

    fn execute_outer_tmux(&mut self, args: &[&str]) {
        if args.is_empty() {
            self.engine.create_session(None);
            return;
        }

        match args[0] {
            "ls" | "list-sessions" => {
                if self.engine.sessions().is_empty() {
                    self.outer_lines.push(ShellLine::error(
                        "no server running on /tmp/tmux-1000/default",
                    ));
                } else {
                    let listing: Vec<String> = self
                        .engine
                        .sessions()
                        .iter()
                        .map(|s| {
                            format!(
                                "{}: {} windows (created Mon Jan 15 10:30:00 2024)",
                                s.name,
                                s.windows.len()
                            )
                        })
                        .collect();
                    self.outer_lines
                        .push(ShellLine::output(listing.join("\n")));
                }
            }
            "new" | "new-session" => {
                let name = flag_value(args, "-s");
                self.engine.create_session(name);
            }
            "attach" | "attach-session" | "a" => {
                let target = flag_value(args, "-t");
                if let Err(err) = self.engine.attach_session(target) {
                    self.outer_lines.push(ShellLine::error(err.to_string()));
                }
            }
            other => self
                .outer_lines
                .push(ShellLine::error(format!("tmux: unknown command: {other}"))),
        }
    }

    /// Forward queued engine events to the tracker and surface any
    /// completion toasts.
    pub fn drain_events(&mut self) {
        let events: Vec<EngineEvent> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            if let Some(message) = self.tracker.observe(&self.engine, &event) {
                self.show_toast(message);
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.engine.tick(now);
        if self
            .toast
            .as_ref()
            .is_some_and(|(_, shown)| now.duration_since(*shown) >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }
}

fn flag_value<'a>(args: &[&'a str], flag: &str) -> Option<&'a str> {
    let pos = args.iter().position(|a| *a == flag)?;
    args.get(pos + 1).copied()
}

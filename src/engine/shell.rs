//! Shell-like command interpreter running against the virtual filesystem
//! and the session registry. Every failure surfaces as an error line in the
//! invoking pane's history; nothing propagates.

use thiserror::Error;

use super::{Action, EngineEvent, Orientation, TmuxEngine};
use crate::models::ShellLine;
use crate::vfs::{Vfs, VfsNode, HOME};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("ls: cannot access '{0}': No such file or directory")]
    LsNotFound(String),
    #[error("cd: {0}: No such file or directory")]
    CdNotFound(String),
    #[error("cd: {0}: Not a directory")]
    NotADirectory(String),
    #[error("cat: missing file operand")]
    CatMissingOperand,
    #[error("cat: {0}: No such file or directory")]
    CatNotFound(String),
    #[error("cat: {0}: Is a directory")]
    IsADirectory(String),
    #[error("mkdir: missing operand")]
    MkdirMissingOperand,
    #[error("mkdir: cannot create directory '{0}': File exists")]
    AlreadyExists(String),
    #[error("{0}: command not found")]
    UnknownCommand(String),
    #[error("tmux: unknown command: {0}")]
    UnknownTmuxCommand(String),
    #[error("can't find session: {0}")]
    SessionNotFound(String),
    #[error("no sessions")]
    NoSessions,
    #[error("no server running on /tmp/tmux-1000/default")]
    NoServer,
    #[error("sessions should be nested with care, unset $TMUX to force")]
    NestedSession,
}

/// Display form of a cwd: the home directory renders as `~`.
pub(crate) fn shorten_path(path: &str) -> String {
    if path == HOME {
        return "~".to_string();
    }
    match path.strip_prefix(HOME).and_then(|rest| rest.strip_prefix('/')) {
        Some(rest) => format!("~/{rest}"),
        None => path.to_string(),
    }
}

pub(crate) fn prompt_for(cwd: &str) -> String {
    format!("user@tmux-learn:{}$ ", shorten_path(cwd))
}

impl TmuxEngine {
    /// Run one line of input in a pane: echo it to history, dispatch on the
    /// first token, and finish with a single state-changed emission. `exit`
    /// returns early because the pane (and its history) may be gone.
    pub fn execute_command(&mut self, pane_id: &str, command: &str) {
        let Some(pane) = self.find_pane_mut(pane_id) else {
            if command.is_empty() {
                self.record_action(Action::EnterPressed);
            }
            return;
        };

        let prompt = prompt_for(&pane.cwd);
        pane.shell_history.push(ShellLine::input(command, prompt));

        let trimmed = command.trim().to_string();
        if trimmed.is_empty() {
            self.record_action(Action::EnterPressed);
            self.emit(EngineEvent::StateChanged);
            return;
        }

        let parts: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
        let cmd = parts[0].as_str();
        let args: Vec<&str> = parts[1..].iter().map(String::as_str).collect();

        match cmd {
            "ls" => self.cmd_ls(pane_id, &args),
            "pwd" => {
                let cwd = self.find_pane(pane_id).map(|p| p.cwd.clone()).unwrap_or_default();
                self.add_output(pane_id, &cwd);
            }
            "cd" => self.cmd_cd(pane_id, &args),
            "echo" => self.add_output(pane_id, &args.join(" ")),
            "clear" => {
                if let Some(pane) = self.find_pane_mut(pane_id) {
                    pane.shell_history.clear();
                }
            }
            "cat" => self.cmd_cat(pane_id, &args),
            "mkdir" => self.cmd_mkdir(pane_id, &args),
            "help" => self.cmd_help(pane_id),
            "tmux" => self.cmd_tmux(pane_id, &args),
            "exit" => {
                self.close_pane_by_id(pane_id);
                self.record_action(Action::PaneClosed);
                return;
            }
            "whoami" => self.add_output(pane_id, "user"),
            "hostname" => self.add_output(pane_id, "tmux-learn"),
            "date" => {
                let now = chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string();
                self.add_output(pane_id, &now);
            }
            "uname" => self.add_output(pane_id, "Linux tmux-learn 5.15.0 x86_64 GNU/Linux"),
            other => {
                self.add_error(pane_id, &ShellError::UnknownCommand(other.to_string()).to_string())
            }
        }

        self.emit(EngineEvent::StateChanged);
    }

    fn cmd_ls(&mut self, pane_id: &str, args: &[&str]) {
        let Some(cwd) = self.find_pane(pane_id).map(|p| p.cwd.clone()) else {
            return;
        };

        let flags: String = args
            .iter()
            .filter(|a| a.starts_with('-'))
            .flat_map(|a| a.chars())
            .collect();
        let path_arg = args.iter().find(|a| !a.starts_with('-')).copied();
        let target = match path_arg {
            Some(p) => Vfs::normalize(&cwd, p),
            None => cwd,
        };

        let rendered = match self.vfs().resolve(&target) {
            None => Err(ShellError::LsNotFound(
                path_arg.unwrap_or(target.as_str()).to_string(),
            )),
            Some(VfsNode::File { .. }) => Ok(path_arg
                .map(str::to_string)
                .unwrap_or_else(|| target.rsplit('/').next().unwrap_or("").to_string())),
            Some(VfsNode::Dir { children }) => {
                let show_hidden = flags.contains('a');
                let long = flags.contains('l');

                let mut entries: Vec<(String, bool, usize)> = Vec::new();
                if show_hidden {
                    entries.push((".".to_string(), true, 4096));
                    entries.push(("..".to_string(), true, 4096));
                }
                for (name, node) in children {
                    if !show_hidden && name.starts_with('.') {
                        continue;
                    }
                    entries.push((name.clone(), node.is_dir(), node.size()));
                }

                if long {
                    let lines: Vec<String> = entries
                        .iter()
                        .map(|(name, is_dir, size)| {
                            let perms = if *is_dir { "drwxr-xr-x" } else { "-rw-r--r--" };
                            let slash = if *is_dir { "/" } else { "" };
                            format!("{perms}  1 user user  {size:>5} Jan 15 10:30 {name}{slash}")
                        })
                        .collect();
                    Ok(format!("total {}\n{}", entries.len() * 4, lines.join("\n")))
                } else {
                    let names: Vec<String> = entries
                        .iter()
                        .map(|(name, is_dir, _)| {
                            if *is_dir {
                                format!("{name}/")
                            } else {
                                name.clone()
                            }
                        })
                        .collect();
                    Ok(names.join("  "))
                }
            }
        };

        match rendered {
            Ok(text) => self.add_output(pane_id, &text),
            Err(err) => self.add_error(pane_id, &err.to_string()),
        }
    }

    fn cmd_cd(&mut self, pane_id: &str, args: &[&str]) {
        let Some(cwd) = self.find_pane(pane_id).map(|p| p.cwd.clone()) else {
            return;
        };

        let target = args.first().copied().unwrap_or("~");
        let new_path = Vfs::normalize(&cwd, target);

        let result = match self.vfs().resolve(&new_path) {
            None => Err(ShellError::CdNotFound(target.to_string())),
            Some(node) if !node.is_dir() => Err(ShellError::NotADirectory(target.to_string())),
            Some(_) => Ok(()),
        };

        match result {
            Ok(()) => {
                if let Some(pane) = self.find_pane_mut(pane_id) {
                    pane.cwd = new_path;
                }
            }
            Err(err) => self.add_error(pane_id, &err.to_string()),
        }
    }

    fn cmd_cat(&mut self, pane_id: &str, args: &[&str]) {
        let Some(cwd) = self.find_pane(pane_id).map(|p| p.cwd.clone()) else {
            return;
        };

        let Some(target_arg) = args.first().copied() else {
            self.add_error(pane_id, &ShellError::CatMissingOperand.to_string());
            return;
        };

        let target = Vfs::normalize(&cwd, target_arg);
        let result = match self.vfs().resolve(&target) {
            None => Err(ShellError::CatNotFound(target_arg.to_string())),
            Some(VfsNode::Dir { .. }) => Err(ShellError::IsADirectory(target_arg.to_string())),
            Some(VfsNode::File { content }) => Ok(content.clone()),
        };

        match result {
            Ok(content) => self.add_output(pane_id, &content),
            Err(err) => self.add_error(pane_id, &err.to_string()),
        }
    }

    fn cmd_mkdir(&mut self, pane_id: &str, args: &[&str]) {
        let Some(cwd) = self.find_pane(pane_id).map(|p| p.cwd.clone()) else {
            return;
        };

        let Some(name) = args.first().copied() else {
            self.add_error(pane_id, &ShellError::MkdirMissingOperand.to_string());
            return;
        };

        if self.vfs_mut().mkdir(&cwd, name).is_err() {
            self.add_error(pane_id, &ShellError::AlreadyExists(name.to_string()).to_string());
        }
    }

    fn cmd_help(&mut self, pane_id: &str) {
        self.add_output(
            pane_id,
            "Available commands:\n  ls [path]       List directory contents\n  cd [path]       Change directory\n  pwd             Print working directory\n  cat <file>      Display file contents\n  echo <text>     Display text\n  mkdir <dir>     Create directory\n  clear           Clear screen\n  help            Show this help\n  exit            Close pane\n  tmux [cmd]      tmux commands (new, ls, attach, split-window, etc.)\n  whoami          Print current user\n  hostname        Print hostname\n  date            Print current date",
        );
    }

    /// The `tmux` command as typed inside a pane. Also reached from the
    /// pre-tmux shell through the same subcommand grammar.
    fn cmd_tmux(&mut self, pane_id: &str, args: &[&str]) {
        if args.is_empty() {
            if self.is_inside_tmux() {
                self.add_error(pane_id, &ShellError::NestedSession.to_string());
                return;
            }
            self.create_session(None);
            self.record_action(Action::SessionCreated);
            return;
        }

        match args[0] {
            "new" | "new-session" => {
                let was_inside = self.is_inside_tmux();
                self.create_session(flag_value(args, "-s"));
                if was_inside {
                    // echo feedback into the pane the command was typed in,
                    // not just the fresh session's pane
                    if let Some(name) = self.active_session().map(|s| s.name.clone()) {
                        self.add_system_message(
                            pane_id,
                            &format!("[tmux] Session \"{name}\" created"),
                        );
                    }
                }
                self.record_action(Action::SessionCreated);
            }
            "ls" | "list-sessions" => {
                if self.sessions().is_empty() {
                    self.add_error(pane_id, &ShellError::NoServer.to_string());
                } else {
                    let active_id = self.state().active_session_id.map(str::to_string);
                    let attached = self.is_attached();
                    let lines: Vec<String> = self
                        .sessions()
                        .iter()
                        .map(|s| {
                            let marker = if attached && Some(&s.id) == active_id.as_ref() {
                                " (attached)"
                            } else {
                                ""
                            };
                            format!(
                                "{}: {} windows (created Mon Jan 15 10:30:00 2024){marker}",
                                s.name,
                                s.windows.len()
                            )
                        })
                        .collect();
                    self.add_output(pane_id, &lines.join("\n"));
                }
            }
            "attach" | "attach-session" | "a" => {
                self.cmd_tmux_attach(pane_id, flag_value(args, "-t"));
            }
            "split-window" => {
                if args.contains(&"-h") {
                    self.split_pane(Orientation::Horizontal);
                } else {
                    self.split_pane(Orientation::Vertical);
                }
            }
            "kill-session" => {
                if let Some(name) = flag_value(args, "-t") {
                    self.kill_session(name);
                    self.add_system_message(pane_id, &format!("[tmux] Session \"{name}\" killed"));
                }
            }
            other => self.add_error(
                pane_id,
                &ShellError::UnknownTmuxCommand(other.to_string()).to_string(),
            ),
        }
    }

    fn cmd_tmux_attach(&mut self, pane_id: &str, target: Option<&str>) {
        if let Err(err) = self.attach_session(target) {
            self.add_error(pane_id, &err.to_string());
        }
    }

    /// Attach to a session by name, or to the most recent one when no
    /// target is given.
    pub fn attach_session(&mut self, target: Option<&str>) -> Result<(), ShellError> {
        if self.sessions.is_empty() {
            return Err(ShellError::NoSessions);
        }

        let session_id = match target {
            Some(name) => self
                .sessions
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.id.clone())
                .ok_or_else(|| ShellError::SessionNotFound(name.to_string()))?,
            None => match self.sessions.last() {
                Some(last) => last.id.clone(),
                None => return Err(ShellError::NoSessions),
            },
        };

        self.active_session_id = Some(session_id);
        self.is_attached = true;
        self.is_inside_tmux = true;
        self.restore_active_pane();

        let (name, pane_id) = match (self.active_session(), self.active_pane()) {
            (Some(session), Some(pane)) => (session.name.clone(), pane.id.clone()),
            _ => (String::new(), String::new()),
        };
        self.add_system_message(&pane_id, &format!("[tmux] Attached to session \"{name}\""));
        self.record_action(Action::SessionAttached);
        self.emit(EngineEvent::StateChanged);
        Ok(())
    }

    /// Remove every session matching `name`. If the active session dies the
    /// first survivor takes over; with none left the engine fully detaches.
    pub(crate) fn kill_session(&mut self, name: &str) {
        self.sessions.retain(|s| s.name != name);

        let active_alive = self
            .active_session_id
            .as_deref()
            .is_some_and(|id| self.sessions.iter().any(|s| s.id == id));
        if !active_alive {
            if let Some(first) = self.sessions.first() {
                self.active_session_id = Some(first.id.clone());
                self.restore_active_pane();
            } else {
                self.active_session_id = None;
                self.is_attached = false;
                self.is_inside_tmux = false;
            }
        }
    }

    /// Complete the last path segment of the pane's input buffer against the
    /// VFS: one match rewrites the buffer (directories gain a trailing
    /// slash), several matches print a listing, none is a no-op.
    pub fn tab_complete(&mut self, pane_id: &str) {
        let Some((input, cwd)) = self
            .find_pane(pane_id)
            .map(|p| (p.current_input.clone(), p.cwd.clone()))
        else {
            return;
        };

        let mut parts: Vec<String> = input.split_whitespace().map(str::to_string).collect();
        if input.ends_with(' ') || parts.is_empty() {
            parts.push(String::new());
        }
        let last = parts.last().cloned().unwrap_or_default();

        let (dir_part, prefix) = match last.rfind('/') {
            Some(pos) => (last[..=pos].to_string(), last[pos + 1..].to_string()),
            None => (String::new(), last.clone()),
        };

        let target_dir = if dir_part.is_empty() {
            cwd
        } else {
            Vfs::normalize(&cwd, &dir_part)
        };

        let Some(VfsNode::Dir { children }) = self.vfs().resolve(&target_dir) else {
            return;
        };

        let matches: Vec<(String, bool)> = children
            .iter()
            .filter(|(name, _)| name.starts_with(&prefix))
            .map(|(name, node)| (name.clone(), node.is_dir()))
            .collect();

        match matches.len() {
            0 => {}
            1 => {
                let (name, is_dir) = &matches[0];
                let suffix = if *is_dir { "/" } else { "" };
                if let Some(slot) = parts.last_mut() {
                    *slot = format!("{dir_part}{name}{suffix}");
                }
                if let Some(pane) = self.find_pane_mut(pane_id) {
                    pane.current_input = parts.join(" ");
                }
                self.emit(EngineEvent::StateChanged);
            }
            _ => {
                let names: Vec<String> = matches.iter().map(|(name, _)| name.clone()).collect();
                self.add_output(pane_id, &names.join("  "));
                self.emit(EngineEvent::StateChanged);
            }
        }
    }

    // ==================== History helpers ====================

    pub(crate) fn add_output(&mut self, pane_id: &str, content: &str) {
        self.push_line(pane_id, ShellLine::output(content));
    }

    pub(crate) fn add_error(&mut self, pane_id: &str, content: &str) {
        self.push_line(pane_id, ShellLine::error(content));
    }

    pub(crate) fn add_system_message(&mut self, pane_id: &str, content: &str) {
        self.push_line(pane_id, ShellLine::system(content));
    }

    fn push_line(&mut self, pane_id: &str, line: ShellLine) {
        let Some(pane) = self.find_pane_mut(pane_id) else {
            return;
        };
        pane.shell_history.push(line.clone());
        self.emit(EngineEvent::PaneOutput {
            pane_id: pane_id.to_string(),
            line,
        });
    }
}

/// Value following a flag, e.g. `-s name` or `-t name`.
fn flag_value<'a>(args: &[&'a str], flag: &str) -> Option<&'a str> {
    let pos = args.iter().position(|a| *a == flag)?;
    args.get(pos + 1).copied()
}

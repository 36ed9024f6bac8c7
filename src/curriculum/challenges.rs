//! Randomized practice tasks. Each task carries a predicate describing the
//! engine states it can be attempted from, so the picker never hands out a
//! task that is impossible right now (e.g. "navigate to another pane" with
//! a single pane open).

use rand::seq::SliceRandom;

use super::ValidationRule;
use crate::engine::{Action, Mode, StateView};

pub struct ChallengeTask {
    pub instruction: &'static str,
    pub hint: &'static str,
    pub validation: ValidationRule,
    pub can_attempt: fn(&StateView) -> bool,
}

fn in_tmux(s: &StateView) -> bool {
    s.is_inside_tmux && s.is_attached
}

fn not_in_tmux(s: &StateView) -> bool {
    !s.is_inside_tmux || !s.is_attached
}

fn has_sessions(s: &StateView) -> bool {
    !s.sessions.is_empty()
}

fn has_multiple_panes(s: &StateView) -> bool {
    in_tmux(s) && s.active_window().is_some_and(|w| w.panes.len() >= 2)
}

fn has_multiple_windows(s: &StateView) -> bool {
    in_tmux(s) && s.active_session().is_some_and(|ses| ses.windows.len() >= 2)
}

fn in_copy_mode(s: &StateView) -> bool {
    in_tmux(s) && s.mode == Mode::Copy
}

fn in_normal_mode(s: &StateView) -> bool {
    in_tmux(s) && s.mode == Mode::Normal
}

fn detached_with_sessions(s: &StateView) -> bool {
    not_in_tmux(s) && has_sessions(s)
}

fn normal_with_panes(s: &StateView) -> bool {
    in_normal_mode(s) && has_multiple_panes(s)
}

fn normal_with_windows(s: &StateView) -> bool {
    in_normal_mode(s) && has_multiple_windows(s)
}

pub const TASK_POOL: &[ChallengeTask] = &[
    ChallengeTask {
        instruction: "Start a tmux session",
        hint: "Type `tmux` and press Enter.",
        validation: ValidationRule::Command("tmux"),
        can_attempt: not_in_tmux,
    },
    ChallengeTask {
        instruction: "Create a named session",
        hint: "Type `tmux new -s myname` and press Enter.",
        validation: ValidationRule::Command("tmux new -s"),
        can_attempt: not_in_tmux,
    },
    ChallengeTask {
        instruction: "List all sessions",
        hint: "Type `tmux ls` and press Enter.",
        validation: ValidationRule::Command("tmux ls"),
        can_attempt: detached_with_sessions,
    },
    ChallengeTask {
        instruction: "Attach to a session",
        hint: "Type `tmux attach` or `tmux a -t name`.",
        validation: ValidationRule::Command("tmux attach"),
        can_attempt: detached_with_sessions,
    },
    ChallengeTask {
        instruction: "Split the pane vertically",
        hint: "Press Ctrl+b then %.",
        validation: ValidationRule::Action(Action::PaneSplitHorizontal),
        can_attempt: in_normal_mode,
    },
    ChallengeTask {
        instruction: "Split the pane horizontally",
        hint: "Press Ctrl+b then \".",
        validation: ValidationRule::Action(Action::PaneSplitVertical),
        can_attempt: in_normal_mode,
    },
    ChallengeTask {
        instruction: "Navigate to another pane",
        hint: "Press Ctrl+b then an arrow key.",
        validation: ValidationRule::Action(Action::PaneNavigated),
        can_attempt: normal_with_panes,
    },
    ChallengeTask {
        instruction: "Resize a pane",
        hint: "Press Ctrl+b then Ctrl+arrow.",
        validation: ValidationRule::Action(Action::PaneResized),
        can_attempt: normal_with_panes,
    },
    ChallengeTask {
        instruction: "Zoom the current pane",
        hint: "Press Ctrl+b then z.",
        validation: ValidationRule::Action(Action::PaneZoomed),
        can_attempt: in_normal_mode,
    },
    ChallengeTask {
        instruction: "Close a pane",
        hint: "Press Ctrl+b then x, confirm with y.",
        validation: ValidationRule::Action(Action::PaneClosed),
        can_attempt: normal_with_panes,
    },
    ChallengeTask {
        instruction: "Create a new window",
        hint: "Press Ctrl+b then c.",
        validation: ValidationRule::Action(Action::WindowCreated),
        can_attempt: in_normal_mode,
    },
    ChallengeTask {
        instruction: "Switch to the next window",
        hint: "Press Ctrl+b then n.",
        validation: ValidationRule::Action(Action::WindowSwitched),
        can_attempt: normal_with_windows,
    },
    ChallengeTask {
        instruction: "Switch to a window by number",
        hint: "Press Ctrl+b then 0, 1, 2, etc.",
        validation: ValidationRule::Action(Action::WindowSwitchedByNumber),
        can_attempt: normal_with_windows,
    },
    ChallengeTask {
        instruction: "Rename the current window",
        hint: "Press Ctrl+b then comma, type a name, press Enter.",
        validation: ValidationRule::Action(Action::WindowRenamed),
        can_attempt: in_normal_mode,
    },
    ChallengeTask {
        instruction: "Detach from the session",
        hint: "Press Ctrl+b then d.",
        validation: ValidationRule::Action(Action::SessionDetached),
        can_attempt: in_normal_mode,
    },
    ChallengeTask {
        instruction: "Enter copy mode",
        hint: "Press Ctrl+b then [.",
        validation: ValidationRule::Action(Action::CopyModeEntered),
        can_attempt: in_normal_mode,
    },
    ChallengeTask {
        instruction: "Exit copy mode",
        hint: "Press q or Escape.",
        validation: ValidationRule::Action(Action::CopyModeExited),
        can_attempt: in_copy_mode,
    },
    ChallengeTask {
        instruction: "Open the tmux command prompt",
        hint: "Press Ctrl+b then :.",
        validation: ValidationRule::Action(Action::CommandModeEntered),
        can_attempt: in_normal_mode,
    },
];

/// Pick a task attemptable from the current state, avoiding an immediate
/// repeat of the last one. Returns an index into [`TASK_POOL`].
pub fn pick_random_task(state: &StateView, last_index: Option<usize>) -> Option<usize> {
    let candidates: Vec<usize> = TASK_POOL
        .iter()
        .enumerate()
        .filter(|(i, task)| (task.can_attempt)(state) && Some(*i) != last_index)
        .map(|(i, _)| i)
        .collect();

    candidates.choose(&mut rand::thread_rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TmuxEngine;

    #[test]
    fn test_fresh_engine_only_offers_outer_tasks() {
        let engine = TmuxEngine::new();
        let state = engine.state();
        let available: Vec<&str> = TASK_POOL
            .iter()
            .filter(|t| (t.can_attempt)(&state))
            .map(|t| t.instruction)
            .collect();
        assert_eq!(
            available,
            vec!["Start a tmux session", "Create a named session"]
        );
    }

    #[test]
    fn test_attached_engine_offers_pane_tasks() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        let state = engine.state();

        let available: Vec<&str> = TASK_POOL
            .iter()
            .filter(|t| (t.can_attempt)(&state))
            .map(|t| t.instruction)
            .collect();
        assert!(available.contains(&"Split the pane vertically"));
        assert!(available.contains(&"Create a new window"));
        // single pane: navigation and closing are not attemptable
        assert!(!available.contains(&"Navigate to another pane"));
        assert!(!available.contains(&"Close a pane"));
        // already inside: no starting tasks
        assert!(!available.contains(&"Start a tmux session"));
    }

    #[test]
    fn test_pick_avoids_last_index() {
        let engine = TmuxEngine::new();
        let state = engine.state();
        // only indices 0 and 1 are attemptable from a fresh engine
        for _ in 0..20 {
            assert_eq!(pick_random_task(&state, Some(0)), Some(1));
            assert_eq!(pick_random_task(&state, Some(1)), Some(0));
        }
    }

    #[test]
    fn test_pick_respects_predicates() {
        let engine = TmuxEngine::new();
        let state = engine.state();
        for _ in 0..20 {
            let picked = pick_random_task(&state, None).unwrap();
            assert!(picked <= 1, "fresh engine picked task {picked}");
        }
    }
}

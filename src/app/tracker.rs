//! Progress tracking: watches the engine event feed and advances the
//! guided course or the challenge streak when a validation rule fires.

use std::collections::HashSet;

use crate::curriculum::{
    self, pick_random_task, ChallengeTask, Lesson, ValidationRule, TASK_POOL,
};
use crate::engine::{EngineEvent, TmuxEngine};
use crate::models::ShellLineKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerMode {
    Learn,
    Challenge,
}

pub struct Tracker {
    mode: TrainerMode,
    lesson_index: usize,
    completed: HashSet<&'static str>,
    hint_index: usize,
    task_index: Option<usize>,
    streak: u32,
}

impl Tracker {
    pub fn new(mode: TrainerMode) -> Self {
        Self {
            mode,
            lesson_index: 0,
            completed: HashSet::new(),
            hint_index: 0,
            task_index: None,
            streak: 0,
        }
    }

    pub fn mode(&self) -> TrainerMode {
        self.mode
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn hint_index(&self) -> usize {
        self.hint_index
    }

    pub fn request_hint(&mut self) {
        self.hint_index += 1;
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed.contains(lesson_id)
    }

    pub fn current_lesson(&self) -> Option<&'static Lesson> {
        curriculum::lesson_at(self.lesson_index)
    }

    pub fn current_task(&self) -> Option<&'static ChallengeTask> {
        self.task_index.and_then(|i| TASK_POOL.get(i))
    }

    /// Toggle learn/challenge. Entering challenge mode resets the streak and
    /// picks a first task from the current engine state.
    pub fn switch_mode(&mut self, engine: &TmuxEngine) {
        match self.mode {
            TrainerMode::Learn => {
                self.mode = TrainerMode::Challenge;
                self.streak = 0;
                self.task_index = pick_random_task(&engine.state(), None);
            }
            TrainerMode::Challenge => {
                self.mode = TrainerMode::Learn;
                self.task_index = None;
            }
        }
        self.hint_index = 0;
    }

    /// Give up on the current task: the streak resets and a different task
    /// is drawn.
    pub fn skip_task(&mut self, engine: &TmuxEngine) {
        self.streak = 0;
        self.task_index = pick_random_task(&engine.state(), self.task_index);
    }

    /// Process one engine event. Returns a toast message when a lesson or
    /// task was just completed.
    pub fn observe(&mut self, engine: &TmuxEngine, event: &EngineEvent) -> Option<String> {
        match self.mode {
            TrainerMode::Challenge => self.observe_challenge(engine, event),
            TrainerMode::Learn => self.observe_learn(engine, event),
        }
    }

    fn observe_challenge(&mut self, engine: &TmuxEngine, event: &EngineEvent) -> Option<String> {
        let Some(index) = self.task_index else {
            // nothing assigned (e.g. previous state offered no tasks)
            self.task_index = pick_random_task(&engine.state(), None);
            return None;
        };
        let task = TASK_POOL.get(index)?;

        let satisfied = match (task.validation, event) {
            (ValidationRule::Action(wanted), EngineEvent::ActionPerformed { action }) => {
                *action == wanted
            }
            (ValidationRule::Command(prefix), EngineEvent::StateChanged) => {
                command_typed(engine, prefix)
            }
            _ => false,
        };

        if satisfied {
            self.streak += 1;
            self.task_index = pick_random_task(&engine.state(), Some(index));
            Some("Done!".to_string())
        } else {
            None
        }
    }

    fn observe_learn(&mut self, engine: &TmuxEngine, event: &EngineEvent) -> Option<String> {
        // skip over anything already done (e.g. completed out of order)
        while self
            .current_lesson()
            .is_some_and(|l| self.completed.contains(l.id))
        {
            self.lesson_index += 1;
        }
        let lesson = self.current_lesson()?;

        let satisfied = match (lesson.validation, event) {
            (ValidationRule::Action(wanted), EngineEvent::ActionPerformed { action }) => {
                *action == wanted
            }
            (ValidationRule::Command(prefix), EngineEvent::StateChanged) => {
                command_typed(engine, prefix)
            }
            _ => false,
        };

        if satisfied {
            self.completed.insert(lesson.id);
            self.hint_index = 0;
            let message = lesson.congrats.to_string();
            if self.lesson_index + 1 < curriculum::total_lessons() {
                self.lesson_index += 1;
            }
            Some(message)
        } else {
            None
        }
    }

    /// Jump the course to a specific lesson (sidebar selection).
    pub fn select_lesson(&mut self, lesson_id: &str) {
        if let Some(index) = curriculum::all_lessons().position(|l| l.id == lesson_id) {
            self.lesson_index = index;
            self.hint_index = 0;
        }
    }
}

/// A command counts as typed if it appears in any pane's input history or
/// among the commands entered in the shell outside tmux.
fn command_typed(engine: &TmuxEngine, prefix: &str) -> bool {
    let in_panes = engine
        .sessions()
        .iter()
        .flat_map(|s| &s.windows)
        .flat_map(|w| &w.panes)
        .flat_map(|p| &p.shell_history)
        .any(|line| line.kind == ShellLineKind::Input && line.content.trim().contains(prefix));

    in_panes
        || engine
            .typed_commands()
            .iter()
            .any(|typed| typed.contains(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Action;

    fn drive(tracker: &mut Tracker, engine: &TmuxEngine, event: EngineEvent) -> Option<String> {
        tracker.observe(engine, &event)
    }

    #[test]
    fn test_first_lesson_completes_on_enter() {
        let engine = TmuxEngine::new();
        let mut tracker = Tracker::new(TrainerMode::Learn);
        assert_eq!(tracker.current_lesson().unwrap().id, "what-is-tmux");

        let toast = drive(
            &mut tracker,
            &engine,
            EngineEvent::ActionPerformed {
                action: Action::EnterPressed,
            },
        );
        assert!(toast.is_some());
        assert!(tracker.is_completed("what-is-tmux"));
        assert_eq!(tracker.current_lesson().unwrap().id, "first-session");
    }

    #[test]
    fn test_wrong_action_does_not_complete() {
        let engine = TmuxEngine::new();
        let mut tracker = Tracker::new(TrainerMode::Learn);
        let toast = drive(
            &mut tracker,
            &engine,
            EngineEvent::ActionPerformed {
                action: Action::PaneZoomed,
            },
        );
        assert!(toast.is_none());
        assert_eq!(tracker.current_lesson().unwrap().id, "what-is-tmux");
    }

    #[test]
    fn test_command_lesson_scans_outer_commands() {
        let mut engine = TmuxEngine::new();
        let mut tracker = Tracker::new(TrainerMode::Learn);
        tracker.select_lesson("first-session");

        engine.record_command("tmux");
        let toast = drive(&mut tracker, &engine, EngineEvent::StateChanged);
        assert!(toast.is_some());
        assert!(tracker.is_completed("first-session"));
    }

    #[test]
    fn test_command_lesson_scans_pane_history() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        let pane = engine.active_pane().unwrap().id.clone();

        let mut tracker = Tracker::new(TrainerMode::Learn);
        tracker.select_lesson("tmux-conf");

        engine.execute_command(&pane, "cat ~/.tmux.conf");
        let toast = drive(&mut tracker, &engine, EngineEvent::StateChanged);
        assert!(toast.is_some());
    }

    #[test]
    fn test_completed_lesson_is_skipped() {
        let engine = TmuxEngine::new();
        let mut tracker = Tracker::new(TrainerMode::Learn);

        drive(
            &mut tracker,
            &engine,
            EngineEvent::ActionPerformed {
                action: Action::EnterPressed,
            },
        );
        // replaying the same action must not re-complete lesson 0
        let toast = drive(
            &mut tracker,
            &engine,
            EngineEvent::ActionPerformed {
                action: Action::EnterPressed,
            },
        );
        assert!(toast.is_none());
        assert_eq!(tracker.completed_count(), 1);
    }

    #[test]
    fn test_challenge_streak_and_repick() {
        let engine = TmuxEngine::new();
        let mut tracker = Tracker::new(TrainerMode::Challenge);
        // fresh engine: only the session-starting command tasks fit
        tracker.task_index = pick_random_task(&engine.state(), None);
        let first = tracker.task_index.unwrap();

        let mut engine = engine;
        engine.record_command("tmux new -s work");
        engine.record_command("tmux");
        let toast = drive(&mut tracker, &engine, EngineEvent::StateChanged);

        assert!(toast.is_some());
        assert_eq!(tracker.streak(), 1);
        assert_ne!(tracker.task_index, Some(first));
    }

    #[test]
    fn test_skip_resets_streak() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        let mut tracker = Tracker::new(TrainerMode::Challenge);
        tracker.switch_mode(&engine); // to learn
        tracker.switch_mode(&engine); // back to challenge, picks a task
        tracker.streak = 3;

        tracker.skip_task(&engine);
        assert_eq!(tracker.streak(), 0);
        assert!(tracker.current_task().is_some());
    }

    #[test]
    fn test_mode_switch_resets_task_state() {
        let mut engine = TmuxEngine::new();
        engine.create_session(None);
        let mut tracker = Tracker::new(TrainerMode::Learn);

        tracker.switch_mode(&engine);
        assert_eq!(tracker.mode(), TrainerMode::Challenge);
        assert!(tracker.current_task().is_some());

        tracker.switch_mode(&engine);
        assert_eq!(tracker.mode(), TrainerMode::Learn);
        assert!(tracker.current_task().is_none());
    }
}

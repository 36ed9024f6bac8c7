//! The guided curriculum and the randomized challenge pool. All content is
//! static data; progress tracking lives in the app layer.

mod challenges;
mod lessons;

pub use challenges::{pick_random_task, ChallengeTask, TASK_POOL};
pub use lessons::CURRICULUM;

use crate::engine::Action;

/// How a lesson or challenge decides it has been completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// Satisfied by the engine recording this action tag.
    Action(Action),
    /// Satisfied by the user typing a command starting with this prefix,
    /// in a pane or in the outer shell.
    Command(&'static str),
}

pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub objective: &'static str,
    pub hints: &'static [&'static str],
    pub validation: ValidationRule,
    pub congrats: &'static str,
}

pub struct Chapter {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub lessons: &'static [Lesson],
}

/// Lessons in curriculum order, flattened across chapters.
pub fn all_lessons() -> impl Iterator<Item = &'static Lesson> {
    CURRICULUM.iter().flat_map(|chapter| chapter.lessons.iter())
}

pub fn total_lessons() -> usize {
    all_lessons().count()
}

pub fn lesson_at(index: usize) -> Option<&'static Lesson> {
    all_lessons().nth(index)
}

pub fn lesson_by_id(id: &str) -> Option<&'static Lesson> {
    all_lessons().find(|lesson| lesson.id == id)
}

pub fn chapter_for(lesson_id: &str) -> Option<&'static Chapter> {
    CURRICULUM
        .iter()
        .find(|chapter| chapter.lessons.iter().any(|l| l.id == lesson_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lesson_ids_are_unique() {
        let mut seen = HashSet::new();
        for lesson in all_lessons() {
            assert!(seen.insert(lesson.id), "duplicate lesson id {}", lesson.id);
        }
    }

    #[test]
    fn test_every_lesson_has_content() {
        for lesson in all_lessons() {
            assert!(!lesson.title.is_empty());
            assert!(!lesson.objective.is_empty());
            assert!(!lesson.hints.is_empty(), "lesson {} has no hints", lesson.id);
            assert!(!lesson.congrats.is_empty());
        }
    }

    #[test]
    fn test_flat_ordering_matches_chapters() {
        assert_eq!(lesson_at(0).map(|l| l.id), Some("what-is-tmux"));
        let last = total_lessons() - 1;
        assert_eq!(lesson_at(last).map(|l| l.id), Some("congratulations"));
        assert!(lesson_at(last + 1).is_none());
    }

    #[test]
    fn test_chapter_lookup() {
        let chapter = chapter_for("split-vertically").unwrap();
        assert_eq!(chapter.id, "panes");
        assert!(chapter_for("missing").is_none());
    }

    #[test]
    fn test_lesson_by_id() {
        let lesson = lesson_by_id("prefix-key").unwrap();
        assert_eq!(
            lesson.validation,
            ValidationRule::Action(Action::PrefixActivated)
        );
    }
}

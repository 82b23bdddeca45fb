//! The checklist a learner works through on one plan day.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    NewProblem,
    Revision,
    Flashcard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub task_type: TaskType,
    /// Set for problem and revision tasks.
    pub problem_id: Option<Uuid>,
    /// Set for flashcard tasks.
    pub topic: Option<String>,
    pub is_completed: bool,
}

/// Expand a plan day into tasks: new problems, then revisions, then flashcard topics.
///
/// A new-problem task is done once the problem is in `completed`. Revision
/// and flashcard tasks are done when the whole day is.
pub fn daily_tasks(
    problem_ids: &[Uuid],
    revision_problem_ids: &[Uuid],
    flashcard_topics: &[String],
    completed: &HashSet<Uuid>,
    day_completed: bool,
) -> Vec<DailyTask> {
    let new_problems = problem_ids.iter().map(|&id| DailyTask {
        task_type: TaskType::NewProblem,
        problem_id: Some(id),
        topic: None,
        is_completed: day_completed || completed.contains(&id),
    });
    let revisions = revision_problem_ids.iter().map(|&id| DailyTask {
        task_type: TaskType::Revision,
        problem_id: Some(id),
        topic: None,
        is_completed: day_completed,
    });
    let flashcards = flashcard_topics.iter().map(|topic| DailyTask {
        task_type: TaskType::Flashcard,
        problem_id: None,
        topic: Some(topic.clone()),
        is_completed: day_completed,
    });

    new_problems.chain(revisions).chain(flashcards).collect()
}

//! Revision scheduling engine for coding-interview practice.
//!
//! This crate holds the pure logic: the data model, the revision ladder,
//! progress transitions, the revision-session workflow, the 60-day plan
//! generator and its daily task lists, topic flashcards and stats
//! aggregation. It performs no I/O; every time-dependent operation takes
//! `now` (or `today`) from the caller.

pub mod catalog;
pub mod error;
pub mod flashcard;
pub mod interval;
pub mod model;
pub mod plan;
pub mod progress;
pub mod session;
pub mod stats;
pub mod tasks;

pub use catalog::{ImportBatch, ProblemInput, RowError, validate_batch};
pub use error::{SrsError, SrsResult};
pub use flashcard::{Flashcard, FlashcardInput, NewFlashcard};
pub use interval::{REVISION_LADDER, interval_days, ladder_days, next_revision_at};
pub use model::{
    Difficulty, NewProblem, Phase, PlannedDay, Problem, ProgressRecord, ProgressStatus,
    RecallDifficulty,
};
pub use plan::{PLAN_DAYS, generate_plan};
pub use progress::{Completion, seconds_to_minutes, select_due};
pub use session::{RevisionOutcome, RevisionSession, RevisionStep, SessionEvent, step_session};
pub use stats::{ProgressSample, StatsSummary, WeakTopic};
pub use tasks::{DailyTask, TaskType, daily_tasks};

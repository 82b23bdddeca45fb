use chrono::{DateTime, NaiveDate, Utc};
use drill_srs::{Phase, Problem, ProgressRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A learner. Every other per-user row cascades from this one.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A stored plan day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScheduleDay {
    pub id: Uuid,
    pub user_id: Uuid,
    /// 1..=60, unique per user
    pub day: i32,
    pub date: DateTime<Utc>,
    pub problem_ids: Vec<Uuid>,
    pub revision_problem_ids: Vec<Uuid>,
    pub flashcard_topics: Vec<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScheduleDay {
    pub const fn phase(&self) -> Phase {
        Phase::for_day(self.day)
    }
}

/// A completed problem whose revision is due, joined to its catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DueRevision {
    #[sqlx(flatten)]
    pub problem: Problem,
    #[sqlx(flatten)]
    pub progress: ProgressRecord,
}

/// A logged mistake on a problem.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mistake {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    /// Free-form category, e.g. "edge case" or "wrong pattern"
    pub mistake_type: String,
    pub description: String,
    pub solution: Option<String>,
    pub pattern_name: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub is_resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Fields for a new mistake row.
#[derive(Debug, Clone)]
pub struct NewMistake<'a> {
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub mistake_type: &'a str,
    pub description: &'a str,
    pub solution: Option<&'a str>,
    pub pattern_name: Option<&'a str>,
    pub occurred_at: DateTime<Utc>,
}

/// Completions logged on one UTC day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityDay {
    pub activity_date: NaiveDate,
    pub completions: i32,
}

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SrsError;

/// Problem difficulty as published by the problem source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "difficulty"))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SrsError;

    /// Case-insensitive, so spreadsheet exports with `easy`/`EASY` import cleanly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(SrsError::Validation(format!(
                "unknown difficulty '{other}', expected Easy, Medium or Hard"
            ))),
        }
    }
}

/// Lifecycle of a learner's work on one problem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "progress_status", rename_all = "snake_case")
)]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    RevisionNeeded,
}

/// Self-reported ease of remembering a problem during revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "recall_difficulty", rename_all = "lowercase")
)]
pub enum RecallDifficulty {
    Easy,
    Medium,
    Hard,
}

impl RecallDifficulty {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for RecallDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Ordered, never empty.
    pub topics: Vec<String>,
    /// Company or source metadata, display only.
    pub companies: Vec<String>,
    /// Algorithmic techniques the problem exercises (e.g. "Two Pointers").
    pub pattern_tags: Vec<String>,
    pub leetcode_id: Option<i32>,
    pub solution: Option<String>,
    pub hints: Vec<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    /// Unique, strictly increasing in import order. Defines catalog order.
    pub import_order: i32,
}

/// A validated catalog row, ready to be assigned an id and import order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProblem {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    pub companies: Vec<String>,
    pub pattern_tags: Vec<String>,
    pub leetcode_id: Option<i32>,
    pub solution: Option<String>,
    pub hints: Vec<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
}

/// Per (user, problem) progress and revision state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProgressRecord {
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub status: ProgressStatus,
    pub attempts: i32,
    /// Never greater than `attempts`.
    pub successful_attempts: i32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Minutes.
    pub time_spent: i32,
    pub notes: Option<String>,
    /// One-line summary of the pattern or key insight.
    pub pattern_notes: Option<String>,
    pub user_solution: Option<String>,
    pub revision_count: i32,
    pub next_revision_date: Option<DateTime<Utc>>,
    pub last_recall_difficulty: Option<RecallDifficulty>,
    /// Days, at least 1.
    pub revision_interval: i32,
}

/// One day of a generated study plan, before it is stored for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedDay {
    /// 1..=60
    pub day: i32,
    pub date: DateTime<Utc>,
    pub phase: Phase,
    pub problem_ids: Vec<Uuid>,
    pub revision_problem_ids: Vec<Uuid>,
    pub flashcard_topics: Vec<String>,
}

/// The three 20-day segments of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Foundation,
    Reinforcement,
    Mastery,
}

impl Phase {
    pub const fn for_day(day: i32) -> Self {
        match day {
            ..=20 => Self::Foundation,
            21..=40 => Self::Reinforcement,
            _ => Self::Mastery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("Extreme".parse::<Difficulty>().is_err());
        assert!("".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_phase_for_day() {
        assert_eq!(Phase::for_day(1), Phase::Foundation);
        assert_eq!(Phase::for_day(20), Phase::Foundation);
        assert_eq!(Phase::for_day(21), Phase::Reinforcement);
        assert_eq!(Phase::for_day(40), Phase::Reinforcement);
        assert_eq!(Phase::for_day(41), Phase::Mastery);
        assert_eq!(Phase::for_day(60), Phase::Mastery);
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_string(&ProgressStatus::RevisionNeeded).unwrap(),
            "\"revision_needed\""
        );
        assert_eq!(
            serde_json::to_string(&RecallDifficulty::Hard).unwrap(),
            "\"hard\""
        );
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"Medium\"");
    }
}

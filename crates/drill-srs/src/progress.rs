//! Progress transitions for a single (user, problem) record.
//!
//! Every transition takes the current time as an argument so callers own the
//! clock. Persistence is the caller's concern: load the record inside a
//! transaction, apply the transition, write it back.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{SrsError, SrsResult},
    interval::{REVISION_LADDER, interval_days, next_revision_at},
    model::{ProgressRecord, ProgressStatus, RecallDifficulty},
};

/// Input for marking a problem completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// One-line summary of the key insight. Required.
    pub summary: String,
    pub code: Option<String>,
    pub notes: Option<String>,
    pub time_spent_secs: i64,
}

/// Whole minutes for a duration in seconds, rounded half up.
pub fn seconds_to_minutes(secs: i64) -> SrsResult<i32> {
    if secs < 0 {
        return Err(SrsError::Validation(
            "time spent must not be negative".to_string(),
        ));
    }
    i32::try_from(secs / 60 + i64::from(secs % 60 >= 30))
        .map_err(|_| SrsError::Validation("time spent is too large".to_string()))
}

impl ProgressRecord {
    /// A fresh record in `not_started`.
    pub fn new(user_id: Uuid, problem_id: Uuid) -> Self {
        Self {
            user_id,
            problem_id,
            status: ProgressStatus::NotStarted,
            attempts: 0,
            successful_attempts: 0,
            last_attempt_at: None,
            completed_at: None,
            time_spent: 0,
            notes: None,
            pattern_notes: None,
            user_solution: None,
            revision_count: 0,
            next_revision_date: None,
            last_recall_difficulty: None,
            revision_interval: REVISION_LADDER[0],
        }
    }

    /// Record one attempt at solving the problem.
    pub fn record_attempt(
        &mut self,
        succeeded: bool,
        minutes: i32,
        now: DateTime<Utc>,
    ) -> SrsResult<()> {
        if minutes < 0 {
            return Err(SrsError::Validation(
                "time spent must not be negative".to_string(),
            ));
        }

        self.attempts = self.attempts.saturating_add(1);
        if succeeded {
            self.successful_attempts = self.successful_attempts.saturating_add(1);
        }
        self.last_attempt_at = Some(now);
        self.time_spent = self.time_spent.saturating_add(minutes);
        if self.status == ProgressStatus::NotStarted {
            self.status = ProgressStatus::InProgress;
        }
        Ok(())
    }

    /// Mark the problem completed and schedule its first revision one ladder
    /// step out.
    pub fn complete(&mut self, completion: &Completion, now: DateTime<Utc>) -> SrsResult<()> {
        let summary = completion.summary.trim();
        if summary.is_empty() {
            return Err(SrsError::Validation(
                "a one-line summary is required to complete a problem".to_string(),
            ));
        }
        let minutes = seconds_to_minutes(completion.time_spent_secs)?;

        self.status = ProgressStatus::Completed;
        self.completed_at = Some(now);
        self.pattern_notes = Some(summary.to_string());
        if let Some(code) = completion.code.as_deref().filter(|c| !c.trim().is_empty()) {
            self.user_solution = Some(code.to_string());
        }
        if let Some(notes) = completion.notes.as_deref() {
            self.append_notes(notes);
        }
        self.time_spent = self.time_spent.saturating_add(minutes);

        self.revision_interval = REVISION_LADDER[0];
        self.next_revision_date = Some(next_revision_at(now, self.revision_interval));
        Ok(())
    }

    /// Score a finished revision and reschedule the next one.
    ///
    /// Returns the chosen interval in days.
    pub fn complete_revision(
        &mut self,
        recall: RecallDifficulty,
        time_spent_secs: i64,
        now: DateTime<Utc>,
    ) -> SrsResult<i32> {
        let minutes = seconds_to_minutes(time_spent_secs)?;

        self.revision_count = self.revision_count.saturating_add(1);
        let days = interval_days(self.revision_count, recall);
        self.revision_interval = days;
        self.next_revision_date = Some(next_revision_at(now, days));
        self.last_recall_difficulty = Some(recall);
        self.time_spent = self.time_spent.saturating_add(minutes);
        Ok(days)
    }

    /// Make a completed problem due immediately after a logged mistake.
    ///
    /// Returns `true` when the schedule changed.
    pub fn reinforce(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != ProgressStatus::Completed {
            return false;
        }
        let pulled = match self.next_revision_date {
            Some(next) if next <= now => false,
            _ => {
                self.next_revision_date = Some(now);
                true
            }
        };
        let reset = self.revision_interval != REVISION_LADDER[0];
        self.revision_interval = REVISION_LADDER[0];
        pulled || reset
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == ProgressStatus::Completed
            && self.next_revision_date.is_some_and(|next| next <= now)
    }

    fn append_notes(&mut self, notes: &str) {
        let notes = notes.trim();
        if notes.is_empty() {
            return;
        }
        self.notes = Some(match self.notes.take() {
            Some(existing) if !existing.is_empty() => format!("{existing}\n{notes}"),
            _ => notes.to_string(),
        });
    }
}

/// Records due for revision at `now`, oldest due first.
pub fn select_due<'a, I>(records: I, now: DateTime<Utc>) -> Vec<&'a ProgressRecord>
where
    I: IntoIterator<Item = &'a ProgressRecord>,
{
    let mut due: Vec<_> = records.into_iter().filter(|r| r.is_due(now)).collect();
    due.sort_by_key(|r| r.next_revision_date);
    due
}

//! Revision session workflow.
//!
//! A session walks a learner through three steps before a revision is scored:
//! recall the problem, re-read the pattern notes, review the stored code. The
//! session is a plain value owned by the caller; only the terminal `Finish`
//! event produces something for the scheduler.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{SrsError, SrsResult},
    model::RecallDifficulty,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionStep {
    ProblemRecall,
    PatternNotes,
    CodeReview,
}

impl RevisionStep {
    const fn next(self) -> Option<Self> {
        match self {
            Self::ProblemRecall => Some(Self::PatternNotes),
            Self::PatternNotes => Some(Self::CodeReview),
            Self::CodeReview => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSession {
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub session_date: NaiveDate,
    pub step: RevisionStep,
    pub recall_difficulty: Option<RecallDifficulty>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Start,
    RateRecall { difficulty: RecallDifficulty },
    Advance,
    Finish,
}

/// Terminal result of a session, consumed by `ProgressRecord::complete_revision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionOutcome {
    pub recall: RecallDifficulty,
    pub elapsed_secs: i64,
}

impl RevisionSession {
    pub fn start(user_id: Uuid, problem_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            problem_id,
            session_date: now.date_naive(),
            step: RevisionStep::ProblemRecall,
            recall_difficulty: None,
            started_at: now,
            finished_at: None,
        }
    }

    pub const fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Apply one event to an open session.
    pub fn apply(
        &mut self,
        event: SessionEvent,
        now: DateTime<Utc>,
    ) -> SrsResult<Option<RevisionOutcome>> {
        if self.is_finished() {
            return Err(invalid("the session is already finished"));
        }

        match event {
            SessionEvent::Start => Err(invalid("the session has already started")),
            SessionEvent::RateRecall { difficulty } => {
                if self.step != RevisionStep::ProblemRecall {
                    return Err(invalid("recall can only be rated during problem_recall"));
                }
                self.recall_difficulty = Some(difficulty);
                Ok(None)
            }
            SessionEvent::Advance => {
                if self.step == RevisionStep::ProblemRecall && self.recall_difficulty.is_none() {
                    return Err(invalid("rate recall before leaving problem_recall"));
                }
                self.step = self
                    .step
                    .next()
                    .ok_or_else(|| invalid("code_review is the last step, finish the session"))?;
                Ok(None)
            }
            SessionEvent::Finish => {
                if self.step != RevisionStep::CodeReview {
                    return Err(invalid("a session can only finish from code_review"));
                }
                let recall = self
                    .recall_difficulty
                    .ok_or_else(|| invalid("recall was never rated"))?;
                self.finished_at = Some(now);
                Ok(Some(RevisionOutcome {
                    recall,
                    elapsed_secs: (now - self.started_at).num_seconds().max(0),
                }))
            }
        }
    }
}

/// Drive a caller-held session with one event.
///
/// `Start` opens a new session and must be the first event; every other event
/// needs the session returned by the previous call.
pub fn step_session(
    session: Option<RevisionSession>,
    user_id: Uuid,
    problem_id: Uuid,
    event: SessionEvent,
    now: DateTime<Utc>,
) -> SrsResult<(RevisionSession, Option<RevisionOutcome>)> {
    match (session, event) {
        (None, SessionEvent::Start) => Ok((RevisionSession::start(user_id, problem_id, now), None)),
        (None, _) => Err(invalid("no session in progress, send start first")),
        (Some(mut session), event) => {
            if session.user_id != user_id || session.problem_id != problem_id {
                return Err(invalid("the session belongs to a different user or problem"));
            }
            let outcome = session.apply(event, now)?;
            Ok((session, outcome))
        }
    }
}

fn invalid(message: &str) -> SrsError {
    SrsError::InvalidTransition(message.to_string())
}

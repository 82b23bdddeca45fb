use drill_srs::{ProgressRecord, RecallDifficulty, RevisionSession, SessionEvent};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RevisionRequest {
    pub recall_difficulty: RecallDifficulty,
    #[validate(range(min = 0, max = 86400))]
    #[serde(default)]
    pub time_spent_secs: i64,
}

/// One step of a caller-held revision session.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// Absent only for the `start` event.
    #[serde(default)]
    pub session: Option<RevisionSession>,
    pub event: SessionEvent,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: RevisionSession,
    /// The rescheduled record, present once the session finishes.
    pub progress: Option<ProgressRecord>,
}

use drill_srs::{Flashcard, RecallDifficulty};
use serde::{Deserialize, Serialize};

/// Query string of `GET /flashcards/{user_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct FlashcardQuery {
    pub topic: Option<String>,
    /// Only cards due now.
    #[serde(default)]
    pub due: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub recall_difficulty: RecallDifficulty,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub flashcard: Flashcard,
    pub interval_days: i32,
}

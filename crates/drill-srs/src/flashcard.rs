//! Topic flashcards reviewed on the same interval ladder as problems.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{SrsError, SrsResult},
    interval::{interval_days, next_revision_at},
    model::{Difficulty, RecallDifficulty},
};

/// A question/answer card owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Flashcard {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub pattern: Option<String>,
    pub difficulty: Difficulty,
    pub review_count: i32,
    /// Reviews rated easy or medium.
    pub success_count: i32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// `None` until the first review; a new card is due immediately.
    pub next_review_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// A raw card as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashcardInput {
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub pattern: Option<String>,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub pattern: Option<String>,
    pub difficulty: Difficulty,
}

impl FlashcardInput {
    pub fn validate(&self) -> SrsResult<NewFlashcard> {
        let field = |value: &str, name: &str| {
            let value = value.trim();
            if value.is_empty() {
                Err(SrsError::Validation(format!("{name} is required")))
            } else {
                Ok(value.to_string())
            }
        };

        Ok(NewFlashcard {
            topic: field(&self.topic, "topic")?,
            question: field(&self.question, "question")?,
            answer: field(&self.answer, "answer")?,
            pattern: self
                .pattern
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            difficulty: self.difficulty.parse()?,
        })
    }
}

impl Flashcard {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.next_review_date.is_none_or(|at| at <= now)
    }

    /// Score one review and schedule the next.
    ///
    /// The review count plays the role of a problem's revision count, so a
    /// card climbs the ladder the same way. Returns the interval in days.
    pub fn review(&mut self, recall: RecallDifficulty, now: DateTime<Utc>) -> SrsResult<i32> {
        if !self.is_active {
            return Err(SrsError::Validation(
                "archived flashcards cannot be reviewed".to_string(),
            ));
        }

        self.review_count = self.review_count.saturating_add(1);
        if recall != RecallDifficulty::Hard {
            self.success_count = self.success_count.saturating_add(1);
        }
        let days = interval_days(self.review_count, recall);
        self.last_reviewed_at = Some(now);
        self.next_review_date = Some(next_revision_at(now, days));
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn card() -> Flashcard {
        Flashcard {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            topic: "Graphs".to_string(),
            question: "When does BFS find shortest paths?".to_string(),
            answer: "On unweighted graphs.".to_string(),
            pattern: Some("BFS".to_string()),
            difficulty: Difficulty::Medium,
            review_count: 0,
            success_count: 0,
            last_reviewed_at: None,
            next_review_date: None,
            is_active: true,
        }
    }

    #[test]
    fn test_new_card_is_due() {
        let now = Utc::now();
        let mut c = card();
        assert!(c.is_due(now));

        c.next_review_date = Some(now + Duration::hours(1));
        assert!(!c.is_due(now));
        assert!(c.is_due(now + Duration::hours(1)));

        c.next_review_date = None;
        c.is_active = false;
        assert!(!c.is_due(now));
    }

    #[test]
    fn test_review_climbs_the_ladder() {
        let now = Utc::now();
        let mut c = card();

        assert_eq!(c.review(RecallDifficulty::Medium, now).unwrap(), 3);
        assert_eq!(c.review(RecallDifficulty::Medium, now).unwrap(), 5);
        assert_eq!(c.review(RecallDifficulty::Hard, now).unwrap(), 3);
        assert_eq!(c.review(RecallDifficulty::Easy, now).unwrap(), 30);

        assert_eq!(c.review_count, 4);
        assert_eq!(c.success_count, 3);
        assert_eq!(c.last_reviewed_at, Some(now));
        assert_eq!(c.next_review_date, Some(now + Duration::days(30)));
    }

    #[test]
    fn test_archived_card_rejects_review() {
        let mut c = card();
        c.is_active = false;
        assert!(c.review(RecallDifficulty::Easy, Utc::now()).is_err());
        assert_eq!(c.review_count, 0);
    }

    #[test]
    fn test_validate_input() {
        let input = FlashcardInput {
            topic: " Graphs ".to_string(),
            question: "Cycle detection in a directed graph?".to_string(),
            answer: "Three-colour DFS.".to_string(),
            pattern: Some("  ".to_string()),
            difficulty: "Hard".to_string(),
        };
        let card = input.validate().unwrap();
        assert_eq!(card.topic, "Graphs");
        assert_eq!(card.pattern, None);
        assert_eq!(card.difficulty, Difficulty::Hard);

        assert!(
            FlashcardInput {
                answer: String::new(),
                ..input.clone()
            }
            .validate()
            .is_err()
        );
        assert!(
            FlashcardInput {
                difficulty: "Trivial".to_string(),
                ..input
            }
            .validate()
            .is_err()
        );
    }
}

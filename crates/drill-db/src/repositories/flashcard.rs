use chrono::{DateTime, Utc};
use drill_srs::{Flashcard, NewFlashcard};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub async fn insert<'e, E>(
    executor: E,
    user_id: Uuid,
    card: &NewFlashcard,
) -> Result<Flashcard, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO flashcards (user_id, topic, question, answer, pattern, difficulty)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, topic, question, answer, pattern, difficulty, review_count,
                      success_count, last_reviewed_at, next_review_date, is_active
        "#,
    )
    .bind(user_id)
    .bind(&card.topic)
    .bind(&card.question)
    .bind(&card.answer)
    .bind(&card.pattern)
    .bind(card.difficulty)
    .fetch_one(executor)
    .await
}

/// Active cards, never-reviewed first, then soonest review.
///
/// With `due_at`, only cards whose review is at or before it.
pub async fn list<'e, E>(
    executor: E,
    user_id: Uuid,
    topic: Option<&str>,
    due_at: Option<DateTime<Utc>>,
) -> Result<Vec<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, topic, question, answer, pattern, difficulty, review_count,
                   success_count, last_reviewed_at, next_review_date, is_active
            FROM flashcards
            WHERE user_id = $1
              AND is_active
              AND ($2::text IS NULL OR topic = $2)
              AND ($3::timestamptz IS NULL OR next_review_date IS NULL OR next_review_date <= $3)
            ORDER BY next_review_date ASC NULLS FIRST, created_at, id
        "#,
    )
    .bind(user_id)
    .bind(topic)
    .bind(due_at)
    .fetch_all(executor)
    .await
}

/// Load and row-lock an active card. Use inside a transaction.
pub async fn find_for_update<'e, E>(
    executor: E,
    user_id: Uuid,
    card_id: Uuid,
) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, topic, question, answer, pattern, difficulty, review_count,
                   success_count, last_reviewed_at, next_review_date, is_active
            FROM flashcards
            WHERE user_id = $1 AND id = $2 AND is_active
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .bind(card_id)
    .fetch_optional(executor)
    .await
}

/// Write back review state.
pub async fn save_review<'e, E>(executor: E, card: &Flashcard) -> Result<Flashcard, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE flashcards
            SET review_count = $3,
                success_count = $4,
                last_reviewed_at = $5,
                next_review_date = $6
            WHERE user_id = $1 AND id = $2
            RETURNING id, user_id, topic, question, answer, pattern, difficulty, review_count,
                      success_count, last_reviewed_at, next_review_date, is_active
        "#,
    )
    .bind(card.user_id)
    .bind(card.id)
    .bind(card.review_count)
    .bind(card.success_count)
    .bind(card.last_reviewed_at)
    .bind(card.next_review_date)
    .fetch_one(executor)
    .await
}

/// Hide a card from listings and reviews. Returns whether an active card matched.
pub async fn archive<'e, E>(executor: E, user_id: Uuid, card_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE flashcards
            SET is_active = FALSE
            WHERE user_id = $1 AND id = $2 AND is_active
        "#,
    )
    .bind(user_id)
    .bind(card_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}

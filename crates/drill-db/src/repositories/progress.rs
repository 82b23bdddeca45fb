use chrono::{DateTime, Utc};
use drill_srs::{ProgressRecord, ProgressSample};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::DueRevision;

/// Insert a `not_started` record for the pair unless one exists.
pub async fn ensure<'e, E>(executor: E, user_id: Uuid, problem_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO user_progress (user_id, problem_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, problem_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(problem_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn find<'e, E>(
    executor: E,
    user_id: Uuid,
    problem_id: Uuid,
) -> Result<Option<ProgressRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, problem_id, status, attempts, successful_attempts, last_attempt_at,
                   completed_at, time_spent, notes, pattern_notes, user_solution, revision_count,
                   next_revision_date, last_recall_difficulty, revision_interval
            FROM user_progress
            WHERE user_id = $1 AND problem_id = $2
        "#,
    )
    .bind(user_id)
    .bind(problem_id)
    .fetch_optional(executor)
    .await
}

/// Load and row-lock a record for a read-modify-write. Use inside a transaction.
pub async fn find_for_update<'e, E>(
    executor: E,
    user_id: Uuid,
    problem_id: Uuid,
) -> Result<Option<ProgressRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, problem_id, status, attempts, successful_attempts, last_attempt_at,
                   completed_at, time_spent, notes, pattern_notes, user_solution, revision_count,
                   next_revision_date, last_recall_difficulty, revision_interval
            FROM user_progress
            WHERE user_id = $1 AND problem_id = $2
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .bind(problem_id)
    .fetch_optional(executor)
    .await
}

/// Write back every mutable field of a record.
pub async fn save<'e, E>(executor: E, record: &ProgressRecord) -> Result<ProgressRecord, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE user_progress
            SET status = $3,
                attempts = $4,
                successful_attempts = $5,
                last_attempt_at = $6,
                completed_at = $7,
                time_spent = $8,
                notes = $9,
                pattern_notes = $10,
                user_solution = $11,
                revision_count = $12,
                next_revision_date = $13,
                last_recall_difficulty = $14,
                revision_interval = $15,
                updated_at = NOW()
            WHERE user_id = $1 AND problem_id = $2
            RETURNING user_id, problem_id, status, attempts, successful_attempts, last_attempt_at,
                      completed_at, time_spent, notes, pattern_notes, user_solution, revision_count,
                      next_revision_date, last_recall_difficulty, revision_interval
        "#,
    )
    .bind(record.user_id)
    .bind(record.problem_id)
    .bind(record.status)
    .bind(record.attempts)
    .bind(record.successful_attempts)
    .bind(record.last_attempt_at)
    .bind(record.completed_at)
    .bind(record.time_spent)
    .bind(&record.notes)
    .bind(&record.pattern_notes)
    .bind(&record.user_solution)
    .bind(record.revision_count)
    .bind(record.next_revision_date)
    .bind(record.last_recall_difficulty)
    .bind(record.revision_interval)
    .fetch_one(executor)
    .await
}

/// A user's records, most recently attempted first.
pub async fn list<'e, E>(
    executor: E,
    user_id: Uuid,
    problem_id: Option<Uuid>,
) -> Result<Vec<ProgressRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, problem_id, status, attempts, successful_attempts, last_attempt_at,
                   completed_at, time_spent, notes, pattern_notes, user_solution, revision_count,
                   next_revision_date, last_recall_difficulty, revision_interval
            FROM user_progress
            WHERE user_id = $1 AND ($2::uuid IS NULL OR problem_id = $2)
            ORDER BY last_attempt_at DESC NULLS LAST, completed_at DESC NULLS LAST, problem_id
        "#,
    )
    .bind(user_id)
    .bind(problem_id)
    .fetch_all(executor)
    .await
}

/// Completed problems whose next revision is at or before `now`, oldest due first.
pub async fn find_due<'e, E>(
    executor: E,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Vec<DueRevision>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT p.id, p.title, p.description, p.difficulty, p.topics, p.companies,
                   p.pattern_tags, p.leetcode_id, p.solution, p.hints, p.time_complexity,
                   p.space_complexity, p.import_order,
                   up.user_id, up.problem_id, up.status, up.attempts, up.successful_attempts,
                   up.last_attempt_at, up.completed_at, up.time_spent, up.notes, up.pattern_notes,
                   up.user_solution, up.revision_count, up.next_revision_date,
                   up.last_recall_difficulty, up.revision_interval
            FROM user_progress up
            JOIN problems p ON p.id = up.problem_id
            WHERE up.user_id = $1
              AND up.status = 'completed'
              AND up.next_revision_date IS NOT NULL
              AND up.next_revision_date <= $2
            ORDER BY up.next_revision_date, p.import_order
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_all(executor)
    .await
}

/// The subset of `problem_ids` the user has completed.
pub async fn completed_among<'e, E>(
    executor: E,
    user_id: Uuid,
    problem_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT problem_id
            FROM user_progress
            WHERE user_id = $1 AND problem_id = ANY ($2) AND status = 'completed'
        "#,
    )
    .bind(user_id)
    .bind(problem_ids)
    .fetch_all(executor)
    .await
}

/// Per-record counters joined with the problem's topics, for stats.
pub async fn samples<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<ProgressSample>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT up.status, up.attempts, up.successful_attempts, p.topics
            FROM user_progress up
            JOIN problems p ON p.id = up.problem_id
            WHERE up.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

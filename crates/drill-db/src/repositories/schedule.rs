use chrono::{DateTime, Utc};
use drill_srs::PlannedDay;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::ScheduleDay;

/// Remove a user's plan. Returns the number of deleted days.
pub async fn delete_for_user<'e, E>(executor: E, user_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM schedules
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn insert_day<'e, E>(
    executor: E,
    user_id: Uuid,
    day: &PlannedDay,
) -> Result<ScheduleDay, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO schedules (user_id, day, date, problem_ids, revision_problem_ids, flashcard_topics)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, day, date, problem_ids, revision_problem_ids, flashcard_topics,
                      is_completed, completed_at
        "#,
    )
    .bind(user_id)
    .bind(day.day)
    .bind(day.date)
    .bind(&day.problem_ids)
    .bind(&day.revision_problem_ids)
    .bind(&day.flashcard_topics)
    .fetch_one(executor)
    .await
}

pub async fn list<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<ScheduleDay>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, day, date, problem_ids, revision_problem_ids, flashcard_topics,
                   is_completed, completed_at
            FROM schedules
            WHERE user_id = $1
            ORDER BY day
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn find_day<'e, E>(
    executor: E,
    user_id: Uuid,
    day: i32,
) -> Result<Option<ScheduleDay>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, day, date, problem_ids, revision_problem_ids, flashcard_topics,
                   is_completed, completed_at
            FROM schedules
            WHERE user_id = $1 AND day = $2
        "#,
    )
    .bind(user_id)
    .bind(day)
    .fetch_optional(executor)
    .await
}

/// The plan day dated within `[from, to)`.
pub async fn find_in_range<'e, E>(
    executor: E,
    user_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Option<ScheduleDay>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, day, date, problem_ids, revision_problem_ids, flashcard_topics,
                   is_completed, completed_at
            FROM schedules
            WHERE user_id = $1 AND date >= $2 AND date < $3
            ORDER BY day
            LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_optional(executor)
    .await
}

/// Mark a day completed. A day that is already completed keeps its first timestamp.
pub async fn complete_day<'e, E>(
    executor: E,
    user_id: Uuid,
    day: i32,
    now: DateTime<Utc>,
) -> Result<Option<ScheduleDay>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE schedules
            SET is_completed = TRUE,
                completed_at = COALESCE(completed_at, $3)
            WHERE user_id = $1 AND day = $2
            RETURNING id, user_id, day, date, problem_ids, revision_problem_ids, flashcard_topics,
                      is_completed, completed_at
        "#,
    )
    .bind(user_id)
    .bind(day)
    .bind(now)
    .fetch_optional(executor)
    .await
}

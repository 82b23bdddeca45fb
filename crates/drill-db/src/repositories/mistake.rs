use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Mistake, NewMistake};

pub async fn insert<'e, E>(executor: E, mistake: &NewMistake<'_>) -> Result<Mistake, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO mistakes (user_id, problem_id, mistake_type, description, solution, pattern_name, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, problem_id, mistake_type, description, solution, pattern_name,
                      occurred_at, is_resolved, resolved_at
        "#,
    )
    .bind(mistake.user_id)
    .bind(mistake.problem_id)
    .bind(mistake.mistake_type)
    .bind(mistake.description)
    .bind(mistake.solution)
    .bind(mistake.pattern_name)
    .bind(mistake.occurred_at)
    .fetch_one(executor)
    .await
}

/// A user's mistakes, newest first.
pub async fn list<'e, E>(
    executor: E,
    user_id: Uuid,
    problem_id: Option<Uuid>,
) -> Result<Vec<Mistake>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, problem_id, mistake_type, description, solution, pattern_name,
                   occurred_at, is_resolved, resolved_at
            FROM mistakes
            WHERE user_id = $1 AND ($2::uuid IS NULL OR problem_id = $2)
            ORDER BY occurred_at DESC, id
        "#,
    )
    .bind(user_id)
    .bind(problem_id)
    .fetch_all(executor)
    .await
}

/// Mark a mistake resolved. Resolving twice keeps the first timestamp.
pub async fn resolve<'e, E>(
    executor: E,
    user_id: Uuid,
    mistake_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Option<Mistake>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE mistakes
            SET is_resolved = TRUE,
                resolved_at = COALESCE(resolved_at, $3)
            WHERE user_id = $1 AND id = $2
            RETURNING id, user_id, problem_id, mistake_type, description, solution, pattern_name,
                      occurred_at, is_resolved, resolved_at
        "#,
    )
    .bind(user_id)
    .bind(mistake_id)
    .bind(now)
    .fetch_optional(executor)
    .await
}

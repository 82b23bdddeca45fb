use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::ActivityDay;

/// Count one completion (problem or revision) towards `date`.
pub async fn record_completion<'e, E>(
    executor: E,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO user_activity (user_id, activity_date, completions)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id, activity_date)
            DO UPDATE SET completions = user_activity.completions + 1
        "#,
    )
    .bind(user_id)
    .bind(date)
    .execute(executor)
    .await?;
    Ok(())
}

/// Days with at least one completion, up to and including `until`, newest first.
pub async fn active_days<'e, E>(
    executor: E,
    user_id: Uuid,
    until: NaiveDate,
) -> Result<Vec<NaiveDate>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT activity_date
            FROM user_activity
            WHERE user_id = $1 AND activity_date <= $2 AND completions > 0
            ORDER BY activity_date DESC
        "#,
    )
    .bind(user_id)
    .bind(until)
    .fetch_all(executor)
    .await
}

pub async fn list_since<'e, E>(
    executor: E,
    user_id: Uuid,
    since: NaiveDate,
) -> Result<Vec<ActivityDay>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT activity_date, completions
            FROM user_activity
            WHERE user_id = $1 AND activity_date >= $2
            ORDER BY activity_date
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(executor)
    .await
}

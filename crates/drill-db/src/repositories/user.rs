use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::User;

pub async fn create<'e, E>(executor: E, username: &str) -> Result<User, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO users (username)
            VALUES ($1)
            RETURNING id, username, created_at
        "#,
    )
    .bind(username)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, user_id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, username, created_at
            FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e, E>(executor: E, user_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
}

/// Delete a user and, through cascades, all of their progress, plans,
/// activity and mistakes. Returns `false` when no such user existed.
pub async fn delete<'e, E>(executor: E, user_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use drill_db::{models::User, repositories::user as user_repo};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use super::model::CreateUserRequest;
use crate::{ApiState, error::ApiError, extract::JsonBody, validation::validate_username};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user).delete(delete_user))
}

/// Fail with `NotFound` unless the user exists.
pub async fn require_user<'e, E>(executor: E, user_id: Uuid) -> Result<(), ApiError>
where
    E: Executor<'e, Database = Postgres>,
{
    if user_repo::exists(executor, user_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("user"))
    }
}

async fn create_user(
    State(state): State<ApiState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let username = payload.username.trim();
    validate_username(username)?;

    let user = user_repo::create(&state.pool, username)
        .await
        .map_err(|err| match ApiError::from(err) {
            ApiError::Conflict(_) => ApiError::Conflict("username is already taken".to_string()),
            other => other,
        })?;

    tracing::info!(user_id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    user_repo::find_by_id(&state.pool, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("user"))
}

/// Removes the user and, by cascade, all of their progress and plans.
async fn delete_user(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !user_repo::delete(&state.pool, user_id).await? {
        return Err(ApiError::not_found("user"));
    }

    tracing::info!(%user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

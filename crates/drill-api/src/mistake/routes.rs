use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use drill_db::{
    models::{Mistake, NewMistake},
    repositories::{mistake as mistake_repo, progress as progress_repo},
};
use uuid::Uuid;

use super::model::{MistakeRequest, MistakeResponse};
use crate::{
    ApiState, error::ApiError, extract::JsonBody, problem::require_problem,
    progress::ProblemQuery, user::require_user, validation::validate_payload,
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/mistakes/{user_id}", get(list_mistakes).post(record_mistake))
        .route(
            "/mistakes/{user_id}/{mistake_id}/resolve",
            post(resolve_mistake),
        )
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn list_mistakes(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ProblemQuery>,
) -> Result<Json<Vec<Mistake>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let mistakes = mistake_repo::list(&state.pool, user_id, query.problem_id).await?;
    Ok(Json(mistakes))
}

/// Log a mistake. A completed problem becomes due for revision right away.
async fn record_mistake(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
    JsonBody(payload): JsonBody<MistakeRequest>,
) -> Result<(StatusCode, Json<MistakeResponse>), ApiError> {
    validate_payload(&payload)?;
    let mistake_type = payload.mistake_type.trim();
    let description = payload.description.trim();
    if mistake_type.is_empty() || description.is_empty() {
        return Err(ApiError::Validation(
            "mistake_type and description must not be blank".to_string(),
        ));
    }
    let now = Utc::now();
    let problem_id = payload.problem_id;

    let mut tx = state.pool.begin().await?;
    require_user(&mut *tx, user_id).await?;
    require_problem(&mut *tx, problem_id).await?;

    let mistake = mistake_repo::insert(
        &mut *tx,
        &NewMistake {
            user_id,
            problem_id,
            mistake_type,
            description,
            solution: trimmed(payload.solution.as_deref()),
            pattern_name: trimmed(payload.pattern_name.as_deref()),
            occurred_at: now,
        },
    )
    .await?;

    let mut reinforced = false;
    if let Some(mut record) = progress_repo::find_for_update(&mut *tx, user_id, problem_id).await?
        && record.reinforce(now)
    {
        progress_repo::save(&mut *tx, &record).await?;
        reinforced = true;
    }
    tx.commit().await?;

    tracing::info!(%user_id, %problem_id, reinforced, "mistake recorded");
    Ok((
        StatusCode::CREATED,
        Json(MistakeResponse {
            mistake,
            reinforced,
        }),
    ))
}

async fn resolve_mistake(
    State(state): State<ApiState>,
    Path((user_id, mistake_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Mistake>, ApiError> {
    let mistake = mistake_repo::resolve(&state.pool, user_id, mistake_id, Utc::now())
        .await?
        .ok_or_else(|| ApiError::not_found("mistake"))?;
    Ok(Json(mistake))
}

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::Utc;
use drill_db::repositories::{activity as activity_repo, progress as progress_repo};
use drill_srs::{Completion, ProgressRecord};
use sqlx::PgConnection;
use uuid::Uuid;

use super::model::{AttemptRequest, CompleteRequest, ProblemQuery};
use crate::{
    ApiState, error::ApiError, extract::JsonBody, metrics, problem::require_problem,
    user::require_user, validation::validate_payload,
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/progress/{user_id}", get(list_progress))
        .route(
            "/progress/{user_id}/{problem_id}/attempts",
            post(record_attempt),
        )
        .route(
            "/progress/{user_id}/{problem_id}/complete",
            post(complete_problem),
        )
}

/// Row-lock the pair's record, creating a `not_started` one first if needed.
///
/// Must run inside a transaction; the lock is held until it ends.
pub async fn lock_record(
    conn: &mut PgConnection,
    user_id: Uuid,
    problem_id: Uuid,
) -> Result<ProgressRecord, ApiError> {
    require_user(&mut *conn, user_id).await?;
    require_problem(&mut *conn, problem_id).await?;
    progress_repo::ensure(&mut *conn, user_id, problem_id).await?;

    progress_repo::find_for_update(&mut *conn, user_id, problem_id)
        .await?
        .ok_or_else(|| ApiError::not_found("progress record"))
}

async fn list_progress(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ProblemQuery>,
) -> Result<Json<Vec<ProgressRecord>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let records = progress_repo::list(&state.pool, user_id, query.problem_id).await?;
    Ok(Json(records))
}

async fn record_attempt(
    State(state): State<ApiState>,
    Path((user_id, problem_id)): Path<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<AttemptRequest>,
) -> Result<Json<ProgressRecord>, ApiError> {
    validate_payload(&payload)?;
    let now = Utc::now();

    let mut tx = state.pool.begin().await?;
    let mut record = lock_record(&mut *tx, user_id, problem_id).await?;
    record.record_attempt(payload.succeeded, payload.time_spent_minutes, now)?;
    let record = progress_repo::save(&mut *tx, &record).await?;
    tx.commit().await?;

    tracing::debug!(
        %user_id,
        %problem_id,
        succeeded = payload.succeeded,
        attempts = record.attempts,
        "attempt recorded"
    );
    Ok(Json(record))
}

async fn complete_problem(
    State(state): State<ApiState>,
    Path((user_id, problem_id)): Path<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<CompleteRequest>,
) -> Result<Json<ProgressRecord>, ApiError> {
    validate_payload(&payload)?;
    let completion = Completion::from(payload);
    let now = Utc::now();

    let mut tx = state.pool.begin().await?;
    let mut record = lock_record(&mut *tx, user_id, problem_id).await?;
    record.complete(&completion, now)?;
    let record = progress_repo::save(&mut *tx, &record).await?;
    activity_repo::record_completion(&mut *tx, user_id, now.date_naive()).await?;
    tx.commit().await?;

    metrics::record_problem_completed();
    tracing::info!(
        %user_id,
        %problem_id,
        next_revision_date = ?record.next_revision_date,
        "problem completed"
    );
    Ok(Json(record))
}

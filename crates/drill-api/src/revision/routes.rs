use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use drill_db::{
    models::DueRevision,
    repositories::{activity as activity_repo, progress as progress_repo},
};
use drill_srs::{ProgressRecord, RecallDifficulty, SessionEvent, step_session};
use sqlx::PgConnection;
use uuid::Uuid;

use super::model::{RevisionRequest, SessionRequest, SessionResponse};
use crate::{
    ApiState, error::ApiError, extract::JsonBody, metrics, user::require_user,
    validation::validate_payload,
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/revisions/{user_id}/due", get(get_due))
        .route(
            "/revisions/{user_id}/{problem_id}/complete",
            post(complete_revision),
        )
        .route(
            "/revisions/{user_id}/{problem_id}/session",
            post(advance_session),
        )
}

/// Score a revision against the locked record and reschedule it.
async fn apply_revision(
    conn: &mut PgConnection,
    user_id: Uuid,
    problem_id: Uuid,
    recall: RecallDifficulty,
    time_spent_secs: i64,
    now: DateTime<Utc>,
) -> Result<ProgressRecord, ApiError> {
    let mut record = progress_repo::find_for_update(&mut *conn, user_id, problem_id)
        .await?
        .ok_or_else(|| ApiError::not_found("progress record"))?;

    let days = record.complete_revision(recall, time_spent_secs, now)?;
    let record = progress_repo::save(&mut *conn, &record).await?;
    activity_repo::record_completion(&mut *conn, user_id, now.date_naive()).await?;

    metrics::record_revision_completed(recall);
    tracing::debug!(%user_id, %problem_id, %recall, interval_days = days, "interval chosen");
    tracing::info!(
        %user_id,
        %problem_id,
        revision_count = record.revision_count,
        next_revision_date = ?record.next_revision_date,
        "revision completed"
    );
    Ok(record)
}

async fn complete_revision(
    State(state): State<ApiState>,
    Path((user_id, problem_id)): Path<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<RevisionRequest>,
) -> Result<Json<ProgressRecord>, ApiError> {
    validate_payload(&payload)?;
    let now = Utc::now();

    let mut tx = state.pool.begin().await?;
    require_user(&mut *tx, user_id).await?;
    let record = apply_revision(
        &mut *tx,
        user_id,
        problem_id,
        payload.recall_difficulty,
        payload.time_spent_secs,
        now,
    )
    .await?;
    tx.commit().await?;

    Ok(Json(record))
}

/// Apply one event to the caller's session. `finish` reschedules the problem.
async fn advance_session(
    State(state): State<ApiState>,
    Path((user_id, problem_id)): Path<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<SessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let now = Utc::now();
    let starting = matches!(payload.event, SessionEvent::Start);
    let (session, outcome) = step_session(payload.session, user_id, problem_id, payload.event, now)?;

    let mut tx = state.pool.begin().await?;
    require_user(&mut *tx, user_id).await?;
    if starting && progress_repo::find(&mut *tx, user_id, problem_id).await?.is_none() {
        return Err(ApiError::not_found("progress record"));
    }
    let progress = match outcome {
        Some(outcome) => Some(
            apply_revision(
                &mut *tx,
                user_id,
                problem_id,
                outcome.recall,
                outcome.elapsed_secs,
                now,
            )
            .await?,
        ),
        None => None,
    };
    tx.commit().await?;

    tracing::debug!(%user_id, %problem_id, step = ?session.step, "revision session advanced");
    Ok(Json(SessionResponse { session, progress }))
}

async fn get_due(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<DueRevision>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let due = progress_repo::find_due(&state.pool, user_id, Utc::now()).await?;
    Ok(Json(due))
}

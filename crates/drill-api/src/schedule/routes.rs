use std::collections::HashSet;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{Days, NaiveTime, Utc};
use drill_db::repositories::{
    problem as problem_repo, progress as progress_repo, schedule as schedule_repo,
};
use drill_srs::{DailyTask, PLAN_DAYS, daily_tasks, generate_plan};
use uuid::Uuid;

use super::model::ScheduleDayView;
use crate::{ApiState, error::ApiError, metrics, user::require_user};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/schedule/{user_id}", get(list_schedule))
        .route("/schedule/{user_id}/today", get(today_schedule))
        .route("/schedule/{user_id}/generate", post(generate_schedule))
        .route("/schedule/{user_id}/days/{day}/tasks", get(day_tasks))
        .route("/schedule/{user_id}/days/{day}/complete", post(complete_day))
}

fn check_day(day: i32) -> Result<(), ApiError> {
    if (1..=PLAN_DAYS).contains(&day) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "day must be between 1 and {PLAN_DAYS}"
        )))
    }
}

/// Replace the user's plan with a fresh 60-day plan starting today.
async fn generate_schedule(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Vec<ScheduleDayView>>), ApiError> {
    let today = Utc::now().date_naive();

    let mut tx = state.pool.begin().await?;
    require_user(&mut *tx, user_id).await?;
    let catalog = problem_repo::list_all(&mut *tx).await?;
    let plan = generate_plan(&catalog, today)?;

    let replaced = schedule_repo::delete_for_user(&mut *tx, user_id).await?;
    let mut days = Vec::with_capacity(plan.len());
    for planned in &plan {
        let stored = schedule_repo::insert_day(&mut *tx, user_id, planned).await?;
        days.push(ScheduleDayView::from(stored));
    }
    tx.commit().await?;

    metrics::record_plan_generated(days.len());
    tracing::info!(
        %user_id,
        catalog_size = catalog.len(),
        replaced,
        start = %today,
        "plan generated"
    );
    Ok((StatusCode::CREATED, Json(days)))
}

async fn list_schedule(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleDayView>>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let days = schedule_repo::list(&state.pool, user_id).await?;
    Ok(Json(days.into_iter().map(ScheduleDayView::from).collect()))
}

/// The plan day dated within today (UTC), or `null`.
async fn today_schedule(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Option<ScheduleDayView>>, ApiError> {
    require_user(&state.pool, user_id).await?;

    let today = Utc::now().date_naive();
    let from = today.and_time(NaiveTime::MIN).and_utc();
    let to = from + Days::new(1);
    let day = schedule_repo::find_in_range(&state.pool, user_id, from, to).await?;
    Ok(Json(day.map(ScheduleDayView::from)))
}

/// The day's checklist: new problems, revisions, then flashcard topics.
async fn day_tasks(
    State(state): State<ApiState>,
    Path((user_id, day)): Path<(Uuid, i32)>,
) -> Result<Json<Vec<DailyTask>>, ApiError> {
    check_day(day)?;
    require_user(&state.pool, user_id).await?;

    let stored = schedule_repo::find_day(&state.pool, user_id, day)
        .await?
        .ok_or_else(|| ApiError::not_found("schedule day"))?;
    let completed: HashSet<Uuid> =
        progress_repo::completed_among(&state.pool, user_id, &stored.problem_ids)
            .await?
            .into_iter()
            .collect();

    Ok(Json(daily_tasks(
        &stored.problem_ids,
        &stored.revision_problem_ids,
        &stored.flashcard_topics,
        &completed,
        stored.is_completed,
    )))
}

async fn complete_day(
    State(state): State<ApiState>,
    Path((user_id, day)): Path<(Uuid, i32)>,
) -> Result<Json<ScheduleDayView>, ApiError> {
    check_day(day)?;
    require_user(&state.pool, user_id).await?;

    let completed = schedule_repo::complete_day(&state.pool, user_id, day, Utc::now())
        .await?
        .ok_or_else(|| ApiError::not_found("schedule day"))?;

    tracing::info!(%user_id, day, "schedule day completed");
    Ok(Json(ScheduleDayView::from(completed)))
}

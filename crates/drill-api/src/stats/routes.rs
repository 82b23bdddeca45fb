use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{Days, Utc};
use drill_db::{
    models::ActivityDay,
    repositories::{activity as activity_repo, problem as problem_repo, progress as progress_repo},
};
use drill_srs::StatsSummary;
use serde::Serialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, user::require_user};

/// Days of activity history returned alongside the summary.
const RECENT_ACTIVITY_DAYS: u64 = 30;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub summary: StatsSummary,
    pub recent_activity: Vec<ActivityDay>,
}

pub fn routes() -> Router<ApiState> {
    Router::new().route("/stats/{user_id}", get(get_stats))
}

async fn get_stats(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StatsResponse>, ApiError> {
    require_user(&state.pool, user_id).await?;
    let today = Utc::now().date_naive();

    let total = problem_repo::count(&state.pool).await?;
    let samples = progress_repo::samples(&state.pool, user_id).await?;
    let active_days = activity_repo::active_days(&state.pool, user_id, today).await?;
    let since = today - Days::new(RECENT_ACTIVITY_DAYS - 1);
    let recent_activity = activity_repo::list_since(&state.pool, user_id, since).await?;

    Ok(Json(StatsResponse {
        summary: StatsSummary::compute(total, &samples, &active_days, today),
        recent_activity,
    }))
}

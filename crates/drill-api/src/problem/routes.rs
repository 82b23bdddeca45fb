use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use drill_db::repositories::problem::{self as problem_repo, ProblemFilter};
use drill_srs::{Difficulty, Problem, ProblemInput, validate_batch};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use super::model::{ImportRequest, ImportResponse, SearchParams};
use crate::{ApiState, error::ApiError, extract::JsonBody, metrics};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/problems", get(search_problems).post(create_problem))
        .route("/problems/import", post(import_problems))
        .route("/problems/{id}", get(get_problem).put(update_problem))
        .route("/patterns", get(list_patterns))
}

pub async fn require_problem<'e, E>(executor: E, problem_id: Uuid) -> Result<(), ApiError>
where
    E: Executor<'e, Database = Postgres>,
{
    if problem_repo::exists(executor, problem_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("problem"))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn search_problems(
    State(state): State<ApiState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Problem>>, ApiError> {
    let difficulty = non_empty(params.difficulty.as_deref())
        .map(str::parse::<Difficulty>)
        .transpose()?;
    let filter = ProblemFilter {
        query: non_empty(params.search.as_deref()),
        topic: non_empty(params.topic.as_deref()),
        difficulty,
    };

    let problems = problem_repo::search(&state.pool, filter).await?;
    Ok(Json(problems))
}

async fn get_problem(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Problem>, ApiError> {
    problem_repo::find_by_id(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("problem"))
}

/// Append one problem at the end of the catalog.
async fn create_problem(
    State(state): State<ApiState>,
    JsonBody(input): JsonBody<ProblemInput>,
) -> Result<(StatusCode, Json<Problem>), ApiError> {
    let new_problem = input.validate()?;

    let mut tx = state.pool.begin().await?;
    problem_repo::lock_catalog(&mut *tx).await?;
    let order = problem_repo::next_import_order(&mut *tx).await?;
    let problem = problem_repo::insert(&mut *tx, &new_problem, order).await?;
    tx.commit().await?;

    tracing::info!(problem_id = %problem.id, import_order = order, "problem created");
    Ok((StatusCode::CREATED, Json(problem)))
}

async fn update_problem(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    JsonBody(input): JsonBody<ProblemInput>,
) -> Result<Json<Problem>, ApiError> {
    let corrected = input.validate()?;

    let problem = problem_repo::update(&state.pool, id, &corrected)
        .await?
        .ok_or_else(|| ApiError::not_found("problem"))?;

    tracing::info!(problem_id = %id, "problem corrected");
    Ok(Json(problem))
}

/// Insert every valid row in order; invalid rows are reported, not fatal.
async fn import_problems(
    State(state): State<ApiState>,
    JsonBody(payload): JsonBody<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let batch = validate_batch(&payload.problems);
    if batch.problems.is_empty() {
        metrics::record_import(0, batch.errors.len());
        tracing::warn!(rejected = batch.errors.len(), "import had no valid rows");
        return Ok(Json(ImportResponse {
            created: 0,
            errors: batch.errors,
        }));
    }

    let mut tx = state.pool.begin().await?;
    problem_repo::lock_catalog(&mut *tx).await?;
    let first = problem_repo::next_import_order(&mut *tx).await?;
    for (order, problem) in (first..).zip(&batch.problems) {
        problem_repo::insert(&mut *tx, problem, order).await?;
    }
    tx.commit().await?;

    let created = batch.problems.len();
    metrics::record_import(created, batch.errors.len());
    if !batch.errors.is_empty() {
        tracing::warn!(rejected = batch.errors.len(), "import skipped invalid rows");
    }
    tracing::info!(created, first_import_order = first, "problems imported");

    Ok(Json(ImportResponse {
        created,
        errors: batch.errors,
    }))
}

async fn list_patterns(State(state): State<ApiState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(problem_repo::list_pattern_tags(&state.pool).await?))
}

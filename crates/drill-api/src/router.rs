use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::{
    config::Environment, error::ApiError, flashcard, mistake, problem, progress, revision,
    schedule, state::ApiState, stats, user,
};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(user::routes())
        .merge(problem::routes())
        .merge(progress::routes())
        .merge(revision::routes())
        .merge(schedule::routes())
        .merge(stats::routes())
        .merge(mistake::routes())
        .merge(flashcard::routes())
        .fallback(handler_404)
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    environment: Environment,
}

async fn health(State(state): State<ApiState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        environment: state.environment,
    })
}

async fn handler_404() -> impl IntoResponse {
    ApiError::NotFound("the requested resource was not found".to_string())
}

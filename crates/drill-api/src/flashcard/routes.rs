use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use chrono::Utc;
use drill_db::repositories::flashcard as flashcard_repo;
use drill_srs::{Flashcard, FlashcardInput};
use uuid::Uuid;

use super::model::{FlashcardQuery, ReviewRequest, ReviewResponse};
use crate::{ApiState, error::ApiError, extract::JsonBody, metrics, user::require_user};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/flashcards/{user_id}", get(list_flashcards).post(create_flashcard))
        .route("/flashcards/{user_id}/{card_id}", delete(archive_flashcard))
        .route("/flashcards/{user_id}/{card_id}/review", post(review_flashcard))
}

async fn list_flashcards(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<FlashcardQuery>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    require_user(&state.pool, user_id).await?;

    let topic = query.topic.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let due_at = query.due.then(Utc::now);
    let cards = flashcard_repo::list(&state.pool, user_id, topic, due_at).await?;
    Ok(Json(cards))
}

async fn create_flashcard(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
    JsonBody(input): JsonBody<FlashcardInput>,
) -> Result<(StatusCode, Json<Flashcard>), ApiError> {
    let card = input.validate()?;

    let mut tx = state.pool.begin().await?;
    require_user(&mut *tx, user_id).await?;
    let card = flashcard_repo::insert(&mut *tx, user_id, &card).await?;
    tx.commit().await?;

    tracing::info!(%user_id, card_id = %card.id, topic = %card.topic, "flashcard created");
    Ok((StatusCode::CREATED, Json(card)))
}

async fn review_flashcard(
    State(state): State<ApiState>,
    Path((user_id, card_id)): Path<(Uuid, Uuid)>,
    JsonBody(payload): JsonBody<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let now = Utc::now();
    let recall = payload.recall_difficulty;

    let mut tx = state.pool.begin().await?;
    let mut card = flashcard_repo::find_for_update(&mut *tx, user_id, card_id)
        .await?
        .ok_or_else(|| ApiError::not_found("flashcard"))?;
    let days = card.review(recall, now)?;
    let flashcard = flashcard_repo::save_review(&mut *tx, &card).await?;
    tx.commit().await?;

    metrics::record_flashcard_reviewed(recall);
    tracing::info!(%user_id, %card_id, %recall, interval_days = days, "flashcard reviewed");
    Ok(Json(ReviewResponse {
        flashcard,
        interval_days: days,
    }))
}

async fn archive_flashcard(
    State(state): State<ApiState>,
    Path((user_id, card_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    if flashcard_repo::archive(&state.pool, user_id, card_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("flashcard"))
    }
}

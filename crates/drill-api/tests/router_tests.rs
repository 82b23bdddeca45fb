//! Requests rejected before any query runs. These use a pool that never connects.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use drill_api::config::Environment;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::{TestClient, TestStateBuilder};

fn client() -> TestClient {
    TestClient::for_state(TestStateBuilder::new().build_lazy())
}

#[tokio::test]
async fn test_health() {
    let response = client().get("/health").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_health_reports_production() {
    let state = TestStateBuilder::new()
        .environment(Environment::Production)
        .build_lazy();
    let body: Value = TestClient::for_state(state).get("/health").await.json();
    assert_eq!(body["environment"], "production");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    client()
        .get("/nope")
        .await
        .assert_error(StatusCode::NOT_FOUND, "not_found");
}

#[tokio::test]
async fn test_invalid_username_rejected() {
    client()
        .post_json("/users", &json!({ "username": "a b" }))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");
}

#[tokio::test]
async fn test_unknown_difficulty_filter_rejected() {
    let response = client().get("/problems?difficulty=Impossible").await;
    response.assert_error(StatusCode::BAD_REQUEST, "validation_error");
    assert!(response.text().contains("unknown difficulty"));
}

#[tokio::test]
async fn test_invalid_problem_rejected() {
    client()
        .post_json(
            "/problems",
            &json!({ "title": "", "description": "x", "difficulty": "Easy", "topics": ["Arrays"] }),
        )
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");
}

#[tokio::test]
async fn test_negative_time_rejected() {
    let uri = format!("/progress/{}/{}/complete", Uuid::new_v4(), Uuid::new_v4());
    client()
        .post_json(&uri, &json!({ "summary": "two pointers", "time_spent_secs": -5 }))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");

    let uri = format!("/progress/{}/{}/attempts", Uuid::new_v4(), Uuid::new_v4());
    client()
        .post_json(&uri, &json!({ "succeeded": true, "time_spent_minutes": -1 }))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");
}

#[tokio::test]
async fn test_schedule_day_out_of_range() {
    for day in [0, 61] {
        let uri = format!("/schedule/{}/days/{day}/complete", Uuid::new_v4());
        client()
            .post(&uri)
            .await
            .assert_error(StatusCode::BAD_REQUEST, "validation_error");
    }
}

#[tokio::test]
async fn test_session_event_without_session() {
    let uri = format!("/revisions/{}/{}/session", Uuid::new_v4(), Uuid::new_v4());
    client()
        .post_json(&uri, &json!({ "event": { "type": "advance" } }))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");
}

#[tokio::test]
async fn test_malformed_user_id() {
    let response = client().get("/stats/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_import_reports_mistyped_rows_per_row() {
    let rows = json!({
        "problems": [
            { "title": "Climbing Stairs", "description": "d", "difficulty": "Easy", "topics": 42 },
            "not a row",
            { "title": "Jump Game", "description": "d", "difficulty": 2, "topics": "Greedy" },
        ]
    });
    let response = client().post_json("/problems/import", &rows).await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["created"], 0);
    let errors = body["errors"].as_array().unwrap();
    let rows: Vec<u64> = errors.iter().map(|e| e["row"].as_u64().unwrap()).collect();
    assert_eq!(rows, vec![1, 2, 3]);
    assert!(
        errors
            .iter()
            .all(|e| e["message"].as_str().unwrap().starts_with("malformed row"))
    );
}

#[tokio::test]
async fn test_malformed_json_body_is_json_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/problems/import")
        .header("content-type", "application/json")
        .body(Body::from("{\"problems\": ["))
        .unwrap();
    let response = client().request(request).await;
    response.assert_error(StatusCode::BAD_REQUEST, "validation_error");

    let response = client()
        .post_json("/problems/import", &json!({ "problems": "Arrays" }))
        .await;
    response.assert_error(StatusCode::BAD_REQUEST, "validation_error");
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("problems"));

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .body(Body::from("{\"username\": \"someone\"}"))
        .unwrap();
    client()
        .request(request)
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");
}

#[tokio::test]
async fn test_day_tasks_out_of_range() {
    let uri = format!("/schedule/{}/days/61/tasks", Uuid::new_v4());
    client()
        .get(&uri)
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");
}

#[tokio::test]
async fn test_invalid_flashcard_rejected() {
    let uri = format!("/flashcards/{}", Uuid::new_v4());
    client()
        .post_json(
            &uri,
            &json!({ "topic": "Graphs", "question": " ", "answer": "a", "difficulty": "Easy" }),
        )
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");

    let uri = format!("/flashcards/{}/{}/review", Uuid::new_v4(), Uuid::new_v4());
    client()
        .post_json(&uri, &json!({ "recall_difficulty": "trivial" }))
        .await
        .assert_error(StatusCode::BAD_REQUEST, "validation_error");
}

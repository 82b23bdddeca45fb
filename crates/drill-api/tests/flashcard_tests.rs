use axum::http::StatusCode;
use drill_srs::Flashcard;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::{TestClient, TestStateBuilder, db};

fn card(topic: &str, question: &str) -> Value {
    json!({
        "topic": topic,
        "question": question,
        "answer": "See the notes.",
        "pattern": "BFS",
        "difficulty": "Medium",
    })
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_create_list_review_and_archive() {
    let state = TestStateBuilder::new().build().await.expect("Failed to create test state");
    let client = TestClient::for_state(state.clone());
    let user_id = db::create_user(&state.pool, "cards").await.expect("Failed to create user");
    let base = format!("/flashcards/{user_id}");

    let response = client.post_json(&base, &card("Graphs", "Shortest path, unweighted?")).await;
    response.assert_status(StatusCode::CREATED);
    let graphs: Flashcard = response.json();
    assert_eq!(graphs.review_count, 0);
    assert_eq!(graphs.next_review_date, None);
    assert!(graphs.is_active);

    let trees: Flashcard = client
        .post_json(&base, &card("Trees", "Height of a balanced BST?"))
        .await
        .json();

    let only_graphs: Vec<Flashcard> = client.get(&format!("{base}?topic=Graphs")).await.json();
    assert_eq!(only_graphs.len(), 1);
    assert_eq!(only_graphs[0].id, graphs.id);

    let response = client
        .post_json(
            &format!("{base}/{}/review", graphs.id),
            &json!({ "recall_difficulty": "medium" }),
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["interval_days"], 3);
    assert_eq!(body["flashcard"]["review_count"], 1);
    assert_eq!(body["flashcard"]["success_count"], 1);

    // Never-reviewed cards sort first and are the only ones due now.
    let all: Vec<Flashcard> = client.get(&base).await.json();
    let ids: Vec<Uuid> = all.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![trees.id, graphs.id]);
    let due: Vec<Flashcard> = client.get(&format!("{base}?due=true")).await.json();
    let due_ids: Vec<Uuid> = due.iter().map(|c| c.id).collect();
    assert_eq!(due_ids, vec![trees.id]);

    client
        .delete(&format!("{base}/{}", trees.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    client
        .delete(&format!("{base}/{}", trees.id))
        .await
        .assert_error(StatusCode::NOT_FOUND, "not_found");
    client
        .post_json(
            &format!("{base}/{}/review", trees.id),
            &json!({ "recall_difficulty": "easy" }),
        )
        .await
        .assert_error(StatusCode::NOT_FOUND, "not_found");

    let remaining: Vec<Flashcard> = client.get(&base).await.json();
    assert_eq!(remaining.len(), 1);

    db::delete_user(&state.pool, user_id).await.expect("Failed to cleanup user");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (TEST_DATABASE_URL)"]
async fn test_cards_are_per_user() {
    let state = TestStateBuilder::new().build().await.expect("Failed to create test state");
    let client = TestClient::for_state(state.clone());
    let owner = db::create_user(&state.pool, "owner").await.expect("Failed to create user");
    let other = db::create_user(&state.pool, "other").await.expect("Failed to create user");

    let created: Flashcard = client
        .post_json(&format!("/flashcards/{owner}"), &card("Heaps", "Top-k in a stream?"))
        .await
        .json();

    let theirs: Vec<Flashcard> = client.get(&format!("/flashcards/{other}")).await.json();
    assert!(theirs.is_empty());
    client
        .post_json(
            &format!("/flashcards/{other}/{}/review", created.id),
            &json!({ "recall_difficulty": "hard" }),
        )
        .await
        .assert_error(StatusCode::NOT_FOUND, "not_found");

    client
        .get(&format!("/flashcards/{}", Uuid::new_v4()))
        .await
        .assert_error(StatusCode::NOT_FOUND, "not_found");

    db::delete_user(&state.pool, owner).await.expect("Failed to cleanup user");
    db::delete_user(&state.pool, other).await.expect("Failed to cleanup user");
}

//! Prometheus metrics for request traffic and revision activity.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use drill_srs::RecallDifficulty;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("uuid pattern is valid")
});
static NUMBER_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(/|$)").expect("number pattern is valid"));

/// Install the Prometheus recorder and return its render handle.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()?;

    Ok(handle)
}

pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let in_flight = gauge!("http_requests_in_flight", "method" => method.clone(), "path" => path.clone());
    in_flight.increment(1.0);
    let response = next.run(req).await;
    in_flight.decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Replace ids in a path with `:id` to keep label cardinality bounded.
fn normalize_path(path: &str) -> String {
    let without_uuids = UUID_SEGMENT.replace_all(path, ":id");
    NUMBER_SEGMENT
        .replace_all(&without_uuids, "/:id$1")
        .into_owned()
}

pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

pub fn record_problem_completed() {
    counter!("problems_completed_total").increment(1);
}

pub fn record_revision_completed(recall: RecallDifficulty) {
    counter!("revisions_completed_total", "recall" => recall.as_str()).increment(1);
}

pub fn record_flashcard_reviewed(recall: RecallDifficulty) {
    counter!("flashcards_reviewed_total", "recall" => recall.as_str()).increment(1);
}

pub fn record_plan_generated(days: usize) {
    counter!("plans_generated_total").increment(1);
    histogram!("plan_days").record(days as f64);
}

pub fn record_import(created: usize, rejected: usize) {
    counter!("problems_imported_total", "outcome" => "created").increment(created as u64);
    counter!("problems_imported_total", "outcome" => "rejected").increment(rejected as u64);
}

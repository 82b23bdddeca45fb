use anyhow::Context;
use axum::{Router, middleware, routing::get};
use drill_api::{
    ApiConfig, ApiState,
    metrics::{init_metrics, metrics_handler, track_metrics},
    middleware::{apply_security_headers, create_cors_layer, request_id_middleware},
    tracing::init_tracing,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("failed to load configuration")?;

    init_tracing(config.env)?;
    let metrics_handle = init_metrics().context("failed to install metrics recorder")?;

    let pool = drill_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("failed to connect to the database")?;
    drill_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

    let state = ApiState::new(&config, pool);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let app = drill_api::router::router()
        .merge(metrics_app)
        .with_state(state)
        .layer(create_cors_layer(config.parsed_allowed_origins()))
        .layer(trace_layer)
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn(request_id_middleware));
    let app = apply_security_headers(app, config.env);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, environment = ?config.env, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}

//! Structured logging.
//!
//! Development gets pretty, human-readable output at DEBUG. Production gets
//! flattened JSON at INFO for log aggregation. `RUST_LOG` overrides either
//! default, e.g. `RUST_LOG=debug,tower_http=trace`.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,sqlx=warn";
const PRODUCTION_FILTER: &str = "info,tower_http=info,sqlx=warn";

fn env_filter(env: Environment) -> EnvFilter {
    let default = if env.is_development() {
        DEVELOPMENT_FILTER
    } else {
        PRODUCTION_FILTER
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(env: Environment) -> anyhow::Result<()> {
    let filter = env_filter(env);

    if env.is_development() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .pretty()
                    .with_filter(filter),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_filter(filter),
            )
            .try_init()?;
    }

    tracing::info!(environment = ?env, "tracing initialized");
    Ok(())
}

pub mod config;
pub mod error;
pub mod extract;
pub mod flashcard;
pub mod metrics;
pub mod middleware;
pub mod mistake;
pub mod problem;
pub mod progress;
pub mod revision;
pub mod router;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod tracing;
pub mod user;
pub mod validation;

pub use config::ApiConfig;
pub use error::ApiError;
pub use state::ApiState;

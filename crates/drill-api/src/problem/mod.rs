mod model;
mod routes;

pub use model::{ImportRequest, ImportResponse, SearchParams};
pub use routes::{require_problem, routes};

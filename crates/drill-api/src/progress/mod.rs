mod model;
mod routes;

pub use model::{AttemptRequest, CompleteRequest, ProblemQuery};
pub use routes::{lock_record, routes};

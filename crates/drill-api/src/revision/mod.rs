mod model;
mod routes;

pub use model::{RevisionRequest, SessionRequest, SessionResponse};
pub use routes::routes;

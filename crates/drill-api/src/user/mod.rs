mod model;
mod routes;

pub use model::CreateUserRequest;
pub use routes::{require_user, routes};

mod model;
mod routes;

pub use model::{MistakeRequest, MistakeResponse};
pub use routes::routes;

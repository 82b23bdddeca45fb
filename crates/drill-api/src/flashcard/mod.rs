mod model;
mod routes;

pub use model::{FlashcardQuery, ReviewRequest, ReviewResponse};
pub use routes::routes;

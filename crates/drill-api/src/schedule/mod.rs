mod model;
mod routes;

pub use model::ScheduleDayView;
pub use routes::routes;

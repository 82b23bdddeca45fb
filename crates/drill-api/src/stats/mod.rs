mod routes;

pub use routes::{StatsResponse, routes};

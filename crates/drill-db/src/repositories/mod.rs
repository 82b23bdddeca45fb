// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod activity;
pub mod flashcard;
pub mod mistake;
pub mod problem;
pub mod progress;
pub mod schedule;
pub mod user;

use drill_db::models::Mistake;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct MistakeRequest {
    pub problem_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub mistake_type: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(length(max = 5000))]
    pub solution: Option<String>,
    #[validate(length(max = 100))]
    pub pattern_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MistakeResponse {
    pub mistake: Mistake,
    /// Whether the problem was pulled forward for revision.
    pub reinforced: bool,
}

use drill_srs::Completion;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Optional `?problem_id=` narrowing of a per-user listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProblemQuery {
    pub problem_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AttemptRequest {
    pub succeeded: bool,
    #[validate(range(min = 0, max = 1440))]
    #[serde(default)]
    pub time_spent_minutes: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompleteRequest {
    #[validate(length(max = 500))]
    pub summary: String,
    #[validate(length(max = 20000))]
    pub code: Option<String>,
    #[validate(length(max = 10000))]
    pub notes: Option<String>,
    #[validate(range(min = 0, max = 86400))]
    #[serde(default)]
    pub time_spent_secs: i64,
}

impl From<CompleteRequest> for Completion {
    fn from(req: CompleteRequest) -> Self {
        Self {
            summary: req.summary,
            code: req.code,
            notes: req.notes,
            time_spent_secs: req.time_spent_secs,
        }
    }
}

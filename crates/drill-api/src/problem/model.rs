use drill_srs::RowError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string of `GET /problems`. Empty values are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}

/// Rows stay untyped so one malformed row is reported instead of failing the body.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub problems: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub created: usize,
    pub errors: Vec<RowError>,
}

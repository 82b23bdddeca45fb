//! Catalog row validation for imports and corrective edits.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    error::{SrsError, SrsResult},
    model::{Difficulty, NewProblem},
};

/// A raw problem row as produced by an import source.
///
/// List fields also accept a single string, read as a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemInput {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    #[serde(deserialize_with = "one_or_many")]
    pub topics: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub companies: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub pattern_tags: Vec<String>,
    pub leetcode_id: Option<i32>,
    pub solution: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub hints: Vec<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
}

/// Why a row of an import batch was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based position in the submitted batch.
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    /// Valid rows, in submission order.
    pub problems: Vec<NewProblem>,
    pub errors: Vec<RowError>,
}

impl ProblemInput {
    pub fn validate(&self) -> SrsResult<NewProblem> {
        let title = required(&self.title, "title")?;
        let description = required(&self.description, "description")?;
        let difficulty: Difficulty = self.difficulty.parse()?;

        let topics = clean_list(&self.topics);
        if topics.is_empty() {
            return Err(SrsError::Validation(
                "at least one topic is required".to_string(),
            ));
        }
        if let Some(id) = self.leetcode_id
            && id <= 0
        {
            return Err(SrsError::Validation(format!(
                "leetcode_id must be positive, got {id}"
            )));
        }

        Ok(NewProblem {
            title,
            description,
            difficulty,
            topics,
            companies: clean_list(&self.companies),
            pattern_tags: clean_list(&self.pattern_tags),
            leetcode_id: self.leetcode_id,
            solution: optional(self.solution.as_deref()),
            hints: clean_list(&self.hints),
            time_complexity: optional(self.time_complexity.as_deref()),
            space_complexity: optional(self.space_complexity.as_deref()),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Parse and validate one untyped import row.
fn parse_row(row: &Value) -> SrsResult<NewProblem> {
    ProblemInput::deserialize(row)
        .map_err(|err| SrsError::Validation(format!("malformed row: {err}")))?
        .validate()
}

/// Split a batch of untyped rows into importable problems and per-row errors.
///
/// A row that does not have the shape of a [`ProblemInput`] is reported like
/// any other invalid row; it never rejects the rest of the batch.
pub fn validate_batch(rows: &[Value]) -> ImportBatch {
    let mut batch = ImportBatch::default();
    for (index, row) in rows.iter().enumerate() {
        match parse_row(row) {
            Ok(problem) => batch.problems.push(problem),
            Err(err) => batch.errors.push(RowError {
                row: index + 1,
                message: err.to_string(),
            }),
        }
    }
    batch
}

fn required(value: &str, field: &str) -> SrsResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SrsError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

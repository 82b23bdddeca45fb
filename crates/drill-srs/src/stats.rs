//! Read-side aggregation of a learner's progress.

use std::collections::{BTreeMap, HashSet};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::ProgressStatus;

/// Topics whose success ratio falls below this are reported as weak.
pub const WEAK_TOPIC_THRESHOLD: f64 = 0.70;
pub const MAX_WEAK_TOPICS: usize = 5;

/// The slice of a progress record the aggregator needs, with the problem's topics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProgressSample {
    pub status: ProgressStatus,
    pub attempts: i32,
    pub successful_attempts: i32,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakTopic {
    pub topic: String,
    pub attempts: i64,
    pub successful_attempts: i64,
    /// 0.0 ..= 1.0
    pub success_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_problems: i64,
    pub completed_problems: i64,
    /// Percentage, 0 ..= 100.
    pub accuracy: i32,
    pub weak_topics: Vec<WeakTopic>,
    pub streak: i32,
}

impl StatsSummary {
    pub fn compute(
        total_problems: i64,
        samples: &[ProgressSample],
        active_days: &[NaiveDate],
        today: NaiveDate,
    ) -> Self {
        let completed_problems = samples
            .iter()
            .filter(|s| s.status == ProgressStatus::Completed)
            .count();
        let attempts = samples.iter().map(|s| i64::from(s.attempts)).sum();
        let successful = samples.iter().map(|s| i64::from(s.successful_attempts)).sum();

        Self {
            total_problems,
            completed_problems: i64::try_from(completed_problems).unwrap_or(i64::MAX),
            accuracy: accuracy(attempts, successful),
            weak_topics: weak_topics(samples),
            streak: streak(active_days, today),
        }
    }
}

/// Rounded success percentage; 0 when nothing was attempted.
pub fn accuracy(attempts: i64, successful_attempts: i64) -> i32 {
    if attempts <= 0 {
        return 0;
    }
    let pct = (successful_attempts as f64 * 100.0 / attempts as f64).round();
    pct.clamp(0.0, 100.0) as i32
}

/// Topics with a rolled-up success ratio under the threshold, worst first.
///
/// Ties are broken by topic name so the result is stable.
pub fn weak_topics(samples: &[ProgressSample]) -> Vec<WeakTopic> {
    let mut totals: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for sample in samples {
        for topic in &sample.topics {
            let entry = totals.entry(topic.as_str()).or_default();
            entry.0 += i64::from(sample.attempts);
            entry.1 += i64::from(sample.successful_attempts);
        }
    }

    let mut weak: Vec<WeakTopic> = totals
        .into_iter()
        .filter(|&(_, (attempts, _))| attempts > 0)
        .map(|(topic, (attempts, successful))| WeakTopic {
            topic: topic.to_string(),
            attempts,
            successful_attempts: successful,
            success_ratio: successful as f64 / attempts as f64,
        })
        .filter(|t| t.success_ratio < WEAK_TOPIC_THRESHOLD)
        .collect();

    weak.sort_by(|a, b| {
        a.success_ratio
            .total_cmp(&b.success_ratio)
            .then_with(|| a.topic.cmp(&b.topic))
    });
    weak.truncate(MAX_WEAK_TOPICS);
    weak
}

/// Consecutive active days ending today, or ending yesterday when today has
/// no activity yet.
pub fn streak(active_days: &[NaiveDate], today: NaiveDate) -> i32 {
    let days: HashSet<NaiveDate> = active_days.iter().copied().collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut count = 0;
    while days.contains(&cursor) {
        count += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    count
}

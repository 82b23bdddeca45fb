//! Revision ladder and interval selection.

use chrono::{DateTime, Duration, Utc};

use crate::model::RecallDifficulty;

/// Default spaced-repetition intervals in days, indexed by revision count.
pub const REVISION_LADDER: [i32; 6] = [1, 3, 5, 7, 14, 30];

/// Ladder rung for a revision count, clamped to the last rung.
pub fn ladder_days(revision_count: i32) -> i32 {
    let last = REVISION_LADDER.len() - 1;
    let index = usize::try_from(revision_count.max(0)).map_or(last, |i| i.min(last));
    REVISION_LADDER[index]
}

/// Compute the interval in days following a revision.
///
/// # Arguments
///
/// * `revision_count` - The revision count *after* the revision being scored
/// * `recall` - How hard the learner found it to recall the problem
///
/// # Policy
///
/// * `Medium`: the ladder rung for `revision_count`
/// * `Hard`: half the ladder rung, rounded down, never below 1 day
/// * `Easy`: the next rung up the ladder (clamped at 30 days)
pub fn interval_days(revision_count: i32, recall: RecallDifficulty) -> i32 {
    match recall {
        RecallDifficulty::Medium => ladder_days(revision_count),
        RecallDifficulty::Hard => (ladder_days(revision_count) / 2).max(1),
        RecallDifficulty::Easy => ladder_days(revision_count.saturating_add(1)),
    }
}

/// The timestamp `days` calendar days after `now`.
pub fn next_revision_at(now: DateTime<Utc>, days: i32) -> DateTime<Utc> {
    now + Duration::days(i64::from(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_days() {
        assert_eq!(ladder_days(-1), 1);
        assert_eq!(ladder_days(0), 1);
        assert_eq!(ladder_days(1), 3);
        assert_eq!(ladder_days(2), 5);
        assert_eq!(ladder_days(3), 7);
        assert_eq!(ladder_days(4), 14);
        assert_eq!(ladder_days(5), 30);
        assert_eq!(ladder_days(6), 30);
        assert_eq!(ladder_days(i32::MAX), 30);
    }

    #[test]
    fn test_interval_days_medium_follows_ladder() {
        let intervals: Vec<i32> = (1..=7)
            .map(|count| interval_days(count, RecallDifficulty::Medium))
            .collect();
        assert_eq!(intervals, vec![3, 5, 7, 14, 30, 30, 30]);
    }

    #[test]
    fn test_interval_days_hard_halves() {
        assert_eq!(interval_days(1, RecallDifficulty::Hard), 1);
        assert_eq!(interval_days(2, RecallDifficulty::Hard), 2);
        assert_eq!(interval_days(3, RecallDifficulty::Hard), 3);
        assert_eq!(interval_days(4, RecallDifficulty::Hard), 7);
        assert_eq!(interval_days(5, RecallDifficulty::Hard), 15);
        assert_eq!(interval_days(0, RecallDifficulty::Hard), 1);
    }

    #[test]
    fn test_interval_days_easy_takes_next_rung() {
        assert_eq!(interval_days(1, RecallDifficulty::Easy), 5);
        assert_eq!(interval_days(3, RecallDifficulty::Easy), 14);
        assert_eq!(interval_days(4, RecallDifficulty::Easy), 30);
        assert_eq!(interval_days(5, RecallDifficulty::Easy), 30);
        assert_eq!(interval_days(i32::MAX, RecallDifficulty::Easy), 30);
    }

    #[test]
    fn test_next_revision_at() {
        let now = Utc::now();
        assert_eq!((next_revision_at(now, 7) - now).num_days(), 7);
        assert!(next_revision_at(now, 1) > now);
    }
}

//! 60-day, three-phase study plan.
//!
//! * Foundation (days 1-20): the catalog split into 20 contiguous chunks, one
//!   per day, no revisions.
//! * Reinforcement (days 21-40): a fixed set of hard or pattern-heavy problems,
//!   plus three revisions from the foundation chunk 14 days earlier.
//! * Mastery (days 41-60): a fixed 2 Easy / 4 Medium / 2 Hard mix, plus two
//!   revisions from the foundation chunk 20 days earlier and the revisions
//!   planned 14 days earlier.
//!
//! The reinforcement and mastery new-problem sets are the same every day.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::{
    error::{SrsError, SrsResult},
    model::{Difficulty, Phase, PlannedDay, Problem},
};

pub const PLAN_DAYS: i32 = 60;
pub const PHASE_DAYS: i32 = 20;
pub const FLASHCARD_TOPICS_PER_DAY: usize = 3;

const REINFORCEMENT_PROBLEMS: usize = 8;
const REINFORCEMENT_LAG: i32 = 14;
const REINFORCEMENT_REVISIONS: usize = 3;
const FOCUS_PATTERNS: [&str; 4] = ["DP", "Graph", "Tree", "Backtracking"];

const MASTERY_MIX: [(Difficulty, usize); 3] = [
    (Difficulty::Easy, 2),
    (Difficulty::Medium, 4),
    (Difficulty::Hard, 2),
];
const MASTERY_LAG: i32 = 20;
const MASTERY_REVISIONS: usize = 2;

/// Build the plan for a catalog, starting at midnight UTC of `start`.
///
/// The catalog is taken in import order regardless of the slice order.
pub fn generate_plan(catalog: &[Problem], start: NaiveDate) -> SrsResult<Vec<PlannedDay>> {
    if catalog.is_empty() {
        return Err(SrsError::EmptyCatalog);
    }

    let mut ordered: Vec<&Problem> = catalog.iter().collect();
    ordered.sort_by_key(|p| p.import_order);
    let plan = Planner::new(&ordered);
    let start = start.and_time(NaiveTime::MIN).and_utc();

    let reinforcement = plan.reinforcement_set();
    let mastery = plan.mastery_set();

    let mut days: Vec<PlannedDay> = Vec::with_capacity(PLAN_DAYS as usize);
    for day in 1..=PLAN_DAYS {
        let phase = Phase::for_day(day);
        let (problems, revisions) = match phase {
            Phase::Foundation => (plan.chunk(day).to_vec(), Vec::new()),
            Phase::Reinforcement => (
                reinforcement.clone(),
                plan.chunk_head(day - REINFORCEMENT_LAG, REINFORCEMENT_REVISIONS),
            ),
            Phase::Mastery => {
                let mut revisions = plan.chunk_head(day - MASTERY_LAG, MASTERY_REVISIONS);
                let earlier = day_index(day - REINFORCEMENT_LAG)
                    .and_then(|i| days.get(i))
                    .map(|d| d.revision_problem_ids.as_slice())
                    .unwrap_or_default();
                for id in earlier {
                    if !revisions.contains(id) {
                        revisions.push(*id);
                    }
                }
                (mastery.clone(), revisions)
            }
        };

        days.push(PlannedDay {
            day,
            date: day_date(start, day),
            phase,
            problem_ids: problems.iter().map(|p| p.id).collect(),
            revision_problem_ids: revisions,
            flashcard_topics: flashcard_topics(&problems),
        });
    }
    Ok(days)
}

/// Problems per foundation day.
pub fn chunk_size(total: usize) -> usize {
    total.div_ceil(PHASE_DAYS as usize)
}

/// First distinct topics across a day's problems, in order of appearance.
pub fn flashcard_topics(problems: &[&Problem]) -> Vec<String> {
    let mut topics: Vec<String> = Vec::with_capacity(FLASHCARD_TOPICS_PER_DAY);
    for topic in problems.iter().flat_map(|p| p.topics.iter()) {
        if topics.len() == FLASHCARD_TOPICS_PER_DAY {
            break;
        }
        if !topics.contains(topic) {
            topics.push(topic.clone());
        }
    }
    topics
}

fn day_date(start: DateTime<Utc>, day: i32) -> DateTime<Utc> {
    start + Duration::days(i64::from(day - 1))
}

fn day_index(day: i32) -> Option<usize> {
    usize::try_from(day - 1).ok()
}

fn is_focus_problem(problem: &Problem) -> bool {
    problem.difficulty == Difficulty::Hard
        || problem
            .pattern_tags
            .iter()
            .chain(problem.topics.iter())
            .any(|tag| FOCUS_PATTERNS.iter().any(|pattern| tag.contains(pattern)))
}

struct Planner<'a> {
    catalog: &'a [&'a Problem],
    chunk_size: usize,
}

impl<'a> Planner<'a> {
    fn new(catalog: &'a [&'a Problem]) -> Self {
        Self {
            catalog,
            chunk_size: chunk_size(catalog.len()),
        }
    }

    /// Foundation chunk for `day`; empty outside days 1-20 or past the catalog end.
    fn chunk(&self, day: i32) -> &'a [&'a Problem] {
        if !(1..=PHASE_DAYS).contains(&day) {
            return &[];
        }
        let Some(index) = day_index(day) else {
            return &[];
        };
        let catalog = self.catalog;
        let start = (index * self.chunk_size).min(catalog.len());
        let end = (start + self.chunk_size).min(catalog.len());
        &catalog[start..end]
    }

    fn chunk_head(&self, day: i32, count: usize) -> Vec<Uuid> {
        self.chunk(day).iter().take(count).map(|p| p.id).collect()
    }

    fn reinforcement_set(&self) -> Vec<&'a Problem> {
        self.catalog
            .iter()
            .copied()
            .filter(|p| is_focus_problem(p))
            .take(REINFORCEMENT_PROBLEMS)
            .collect()
    }

    fn mastery_set(&self) -> Vec<&'a Problem> {
        MASTERY_MIX
            .iter()
            .flat_map(|&(difficulty, count)| {
                self.catalog
                    .iter()
                    .copied()
                    .filter(move |p| p.difficulty == difficulty)
                    .take(count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn problem(n: i32, difficulty: Difficulty, topics: &[&str], patterns: &[&str]) -> Problem {
        Problem {
            id: Uuid::from_u128(n as u128),
            title: format!("p{n}"),
            description: format!("problem {n}"),
            difficulty,
            topics: topics.iter().map(|t| t.to_string()).collect(),
            companies: vec![],
            pattern_tags: patterns.iter().map(|t| t.to_string()).collect(),
            leetcode_id: Some(n),
            solution: None,
            hints: vec![],
            time_complexity: None,
            space_complexity: None,
            import_order: n,
        }
    }

    fn catalog(n: i32) -> Vec<Problem> {
        (1..=n)
            .map(|i| {
                let difficulty = match i % 3 {
                    0 => Difficulty::Hard,
                    1 => Difficulty::Easy,
                    _ => Difficulty::Medium,
                };
                problem(i, difficulty, &["Arrays", "Hashing"], &["Two Pointers"])
            })
            .collect()
    }

    fn id(n: i32) -> Uuid {
        Uuid::from_u128(n as u128)
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(generate_plan(&[], start()), Err(SrsError::EmptyCatalog));
    }

    #[test]
    fn test_chunk_size() {
        assert_eq!(chunk_size(1), 1);
        assert_eq!(chunk_size(20), 1);
        assert_eq!(chunk_size(21), 2);
        assert_eq!(chunk_size(100), 5);
        assert_eq!(chunk_size(101), 6);
    }

    #[test]
    fn test_plan_shape() {
        for n in [1, 7, 20, 33, 100, 250] {
            let plan = generate_plan(&catalog(n), start()).unwrap();
            assert_eq!(plan.len(), 60);
            let days: HashSet<i32> = plan.iter().map(|d| d.day).collect();
            assert_eq!(days, (1..=60).collect());

            let known: HashSet<Uuid> = (1..=n).map(id).collect();
            for day in &plan {
                assert!(day.problem_ids.iter().all(|p| known.contains(p)));
                assert!(day.revision_problem_ids.iter().all(|p| known.contains(p)));
                assert!(day.flashcard_topics.len() <= 3);
            }
        }
    }

    #[test]
    fn test_plan_dates_are_consecutive_utc_midnights() {
        let plan = generate_plan(&catalog(10), start()).unwrap();
        let first = start().and_time(NaiveTime::MIN).and_utc();
        assert_eq!(plan[0].date, first);
        assert_eq!(plan[59].date, first + Duration::days(59));
        assert_eq!(plan[20].phase, Phase::Reinforcement);
    }

    #[test]
    fn test_hundred_problem_scenario() {
        let plan = generate_plan(&catalog(100), start()).unwrap();

        assert_eq!(plan[0].problem_ids, (1..=5).map(id).collect::<Vec<_>>());
        assert!(plan[0].revision_problem_ids.is_empty());
        assert_eq!(plan[19].problem_ids, (96..=100).map(id).collect::<Vec<_>>());

        let day7: HashSet<Uuid> = (31..=35).map(id).collect();
        let day21 = &plan[20];
        assert_eq!(day21.day, 21);
        assert_eq!(day21.revision_problem_ids, (31..=33).map(id).collect::<Vec<_>>());
        assert!(day21.revision_problem_ids.iter().all(|p| day7.contains(p)));
    }

    #[test]
    fn test_catalog_order_follows_import_order() {
        let mut problems = catalog(40);
        problems.reverse();
        let plan = generate_plan(&problems, start()).unwrap();
        assert_eq!(plan[0].problem_ids, vec![id(1), id(2)]);
    }

    #[test]
    fn test_reinforcement_set_is_fixed() {
        let mut problems = vec![
            problem(1, Difficulty::Easy, &["Arrays"], &["Sliding Window"]),
            problem(2, Difficulty::Medium, &["Trees"], &["DFS"]),
            problem(3, Difficulty::Hard, &["Strings"], &[]),
            problem(4, Difficulty::Medium, &["Graphs"], &["Graph BFS"]),
            problem(5, Difficulty::Easy, &["Arrays"], &["1D DP"]),
            problem(6, Difficulty::Easy, &["Arrays"], &["dp lowercase"]),
        ];
        problems.extend((7..=30).map(|n| problem(n, Difficulty::Hard, &["Heap"], &[])));

        let plan = generate_plan(&problems, start()).unwrap();
        let expected: Vec<Uuid> = [2, 3, 4, 5, 7, 8, 9, 10].into_iter().map(id).collect();
        for day in &plan[20..40] {
            assert_eq!(day.problem_ids, expected);
        }
        assert_eq!(plan[20].flashcard_topics, vec!["Trees", "Strings", "Graphs"]);
    }

    #[test]
    fn test_reinforcement_revisions() {
        let plan = generate_plan(&catalog(100), start()).unwrap();
        for day in &plan[20..34] {
            let chunk = (day.day - 14 - 1) * 5;
            let expected: Vec<Uuid> = (chunk + 1..=chunk + 3).map(id).collect();
            assert_eq!(day.revision_problem_ids, expected, "day {}", day.day);
        }
        for day in &plan[34..40] {
            assert!(day.revision_problem_ids.is_empty(), "day {}", day.day);
        }
    }

    #[test]
    fn test_reinforcement_revisions_stay_within_chunk() {
        let plan = generate_plan(&catalog(30), start()).unwrap();
        assert_eq!(plan[20].revision_problem_ids, vec![id(13), id(14)]);
    }

    #[test]
    fn test_mastery_mix() {
        let plan = generate_plan(&catalog(100), start()).unwrap();
        let expected: Vec<Uuid> = [1, 4, 2, 5, 8, 11, 3, 6].into_iter().map(id).collect();
        for day in &plan[40..60] {
            assert_eq!(day.phase, Phase::Mastery);
            assert_eq!(day.problem_ids, expected);
        }
    }

    #[test]
    fn test_mastery_revisions() {
        let plan = generate_plan(&catalog(100), start()).unwrap();
        for day in &plan[40..60] {
            let earlier = &plan[(day.day - 14 - 1) as usize];
            assert_eq!(day.revision_problem_ids, earlier.revision_problem_ids);
        }
        assert_eq!(plan[40].revision_problem_ids, (61..=63).map(id).collect::<Vec<_>>());
        assert!(plan[50].revision_problem_ids.is_empty());
        assert_eq!(plan[54].revision_problem_ids, plan[40].revision_problem_ids);
    }

    #[test]
    fn test_flashcard_topics_are_distinct() {
        let a = problem(1, Difficulty::Easy, &["Arrays", "Hashing"], &[]);
        let b = problem(2, Difficulty::Easy, &["Hashing", "Sorting", "Heap"], &[]);
        assert_eq!(flashcard_topics(&[&a, &b]), vec!["Arrays", "Hashing", "Sorting"]);
        assert!(flashcard_topics(&[]).is_empty());
    }

    #[test]
    fn test_small_catalog_leaves_late_foundation_days_empty() {
        let plan = generate_plan(&catalog(5), start()).unwrap();
        assert_eq!(plan[0].problem_ids, vec![id(1)]);
        assert_eq!(plan[4].problem_ids, vec![id(5)]);
        assert!(plan[5].problem_ids.is_empty());
        assert!(plan[5].flashcard_topics.is_empty());
    }
}

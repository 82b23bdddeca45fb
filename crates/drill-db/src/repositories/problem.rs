use drill_srs::{Difficulty, NewProblem, Problem};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

/// Filters for a catalog search. All present filters must match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemFilter<'a> {
    /// Case-insensitive substring of the title.
    pub query: Option<&'a str>,
    /// Exact member of the problem's topic list.
    pub topic: Option<&'a str>,
    pub difficulty: Option<Difficulty>,
}

pub async fn search<'e, E>(
    executor: E,
    filter: ProblemFilter<'_>,
) -> Result<Vec<Problem>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, description, difficulty, topics, companies, pattern_tags,
                   leetcode_id, solution, hints, time_complexity, space_complexity, import_order
            FROM problems
            WHERE ($1::text IS NULL OR strpos(lower(title), lower($1)) > 0)
              AND ($2::text IS NULL OR $2 = ANY (topics))
              AND ($3::difficulty IS NULL OR difficulty = $3)
            ORDER BY import_order
        "#,
    )
    .bind(filter.query)
    .bind(filter.topic)
    .bind(filter.difficulty)
    .fetch_all(executor)
    .await
}

/// The whole catalog in import order.
pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Problem>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    search(executor, ProblemFilter::default()).await
}

pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Problem>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, description, difficulty, topics, companies, pattern_tags,
                   leetcode_id, solution, hints, time_complexity, space_complexity, import_order
            FROM problems
            WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(SELECT 1 FROM problems WHERE id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(executor)
    .await
}

pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*) FROM problems
        "#,
    )
    .fetch_one(executor)
    .await
}

/// Block concurrent catalog writers until the surrounding transaction ends,
/// so import orders are assigned without gaps or collisions. Reads proceed.
pub async fn lock_catalog<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            LOCK TABLE problems IN EXCLUSIVE MODE
        "#,
    )
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn next_import_order<'e, E>(executor: E) -> Result<i32, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COALESCE(MAX(import_order), 0) + 1 FROM problems
        "#,
    )
    .fetch_one(executor)
    .await
}

pub async fn insert<'e, E>(
    executor: E,
    problem: &NewProblem,
    import_order: i32,
) -> Result<Problem, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO problems (title, description, difficulty, topics, companies, pattern_tags,
                                  leetcode_id, solution, hints, time_complexity, space_complexity,
                                  import_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, title, description, difficulty, topics, companies, pattern_tags,
                      leetcode_id, solution, hints, time_complexity, space_complexity, import_order
        "#,
    )
    .bind(&problem.title)
    .bind(&problem.description)
    .bind(problem.difficulty)
    .bind(&problem.topics)
    .bind(&problem.companies)
    .bind(&problem.pattern_tags)
    .bind(problem.leetcode_id)
    .bind(&problem.solution)
    .bind(&problem.hints)
    .bind(&problem.time_complexity)
    .bind(&problem.space_complexity)
    .bind(import_order)
    .fetch_one(executor)
    .await
}

/// Corrective edit. Keeps the id and import order.
pub async fn update<'e, E>(
    executor: E,
    id: Uuid,
    problem: &NewProblem,
) -> Result<Option<Problem>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE problems
            SET title = $2,
                description = $3,
                difficulty = $4,
                topics = $5,
                companies = $6,
                pattern_tags = $7,
                leetcode_id = $8,
                solution = $9,
                hints = $10,
                time_complexity = $11,
                space_complexity = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, difficulty, topics, companies, pattern_tags,
                      leetcode_id, solution, hints, time_complexity, space_complexity, import_order
        "#,
    )
    .bind(id)
    .bind(&problem.title)
    .bind(&problem.description)
    .bind(problem.difficulty)
    .bind(&problem.topics)
    .bind(&problem.companies)
    .bind(&problem.pattern_tags)
    .bind(problem.leetcode_id)
    .bind(&problem.solution)
    .bind(&problem.hints)
    .bind(&problem.time_complexity)
    .bind(&problem.space_complexity)
    .fetch_optional(executor)
    .await
}

/// Distinct pattern tags in the order they first appear in the catalog.
pub async fn list_pattern_tags<'e, E>(executor: E) -> Result<Vec<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT tag
            FROM (
                SELECT DISTINCT ON (t.tag) t.tag, p.import_order, t.position
                FROM problems p,
                     unnest(p.pattern_tags) WITH ORDINALITY AS t(tag, position)
                ORDER BY t.tag, p.import_order, t.position
            ) first_seen
            ORDER BY import_order, position
        "#,
    )
    .fetch_all(executor)
    .await
}

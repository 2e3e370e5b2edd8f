//! Repository for competition results and the answer-event aggregates that
//! feed scoring.
//!
//! Reads come from `user_test_correct_answers`, `user_test_wrong_answers`
//! (joined to `tests` for start dates) and `users`. Writes only ever touch the
//! caller's row in `results`, created on first write.

use advent_core::error::CoreError;
use advent_core::types::{DbId, Timestamp};
use advent_core::weeks::{WeekSlot, WEEK_COUNT};
use chrono::{Duration, NaiveDate};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::answer::WrongAnswerData;
use crate::models::result::CompetitionResult;

/// Column list for the `results` table.
const COLUMNS: &str = "id, user_id, \
    week1_points, week1_place, week2_points, week2_place, week3_points, week3_place, \
    final_points, final_place, created_at, updated_at";

// `COLUMNS` names every week column by hand.
const _: () = assert!(WEEK_COUNT == 3, "add week columns to COLUMNS");

/// Provides the scoring job's view of the database.
pub struct TestResultRepo;

impl TestResultRepo {
    // -----------------------------------------------------------------------
    // Answer-event aggregates
    // -----------------------------------------------------------------------

    /// Ids of every registered user.
    pub async fn list_user_ids(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT id FROM users")
            .fetch_all(pool)
            .await
    }

    /// Total answering time of a user's correct answers submitted in
    /// `(from, to]`. Zero when nothing matches.
    pub async fn sum_answering_duration(
        pool: &PgPool,
        user_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Duration, sqlx::Error> {
        let total_ms = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(answering_duration_ms), 0)::BIGINT \
             FROM user_test_correct_answers \
             WHERE user_id = $1 AND answering_time > $2 AND answering_time <= $3",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;
        Ok(Duration::milliseconds(total_ms))
    }

    /// Start dates (UTC calendar days) of the tests a user answered correctly.
    ///
    /// The test must start in `[from, to)` and the answer must be submitted in
    /// `(from, to]`. One entry per answer, so repeated days are kept.
    pub async fn list_correct_answer_dates(
        pool: &PgPool,
        user_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT (t.start_date AT TIME ZONE 'UTC')::date \
             FROM user_test_correct_answers a \
             JOIN tests t ON t.id = a.test_id \
             WHERE a.user_id = $1 \
               AND t.start_date >= $2 AND t.start_date < $3 \
               AND a.answering_time > $2 AND a.answering_time <= $3",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }

    /// Wrong answers submitted in `[from, to]`, counted per start day of the
    /// answered test. Tests that were never started are left out.
    pub async fn count_wrong_answers_per_day(
        pool: &PgPool,
        user_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<WrongAnswerData>, sqlx::Error> {
        sqlx::query_as::<_, WrongAnswerData>(
            "SELECT (t.start_date AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS count \
             FROM user_test_wrong_answers w \
             JOIN tests t ON t.id = w.test_id \
             WHERE w.user_id = $1 AND w.time >= $2 AND w.time <= $3 \
               AND t.start_date IS NOT NULL \
             GROUP BY day",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }

    /// Number of wrong answers a user submitted to one test.
    pub async fn count_wrong_answers(
        pool: &PgPool,
        user_id: &str,
        test_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_test_wrong_answers \
             WHERE user_id = $1 AND test_id = $2",
        )
        .bind(user_id)
        .bind(test_id)
        .fetch_one(pool)
        .await
    }

    /// When the user submitted the correct answer to a test.
    ///
    /// `(user_id, test_id)` is unique in `user_test_correct_answers`, so at
    /// most one row matches. Returns `CoreError::NotFound` when the user has
    /// not answered the test correctly.
    pub async fn correct_answer_time(
        pool: &PgPool,
        user_id: &str,
        test_id: DbId,
    ) -> Result<Timestamp, StoreError> {
        sqlx::query_scalar::<_, Timestamp>(
            "SELECT answering_time FROM user_test_correct_answers \
             WHERE user_id = $1 AND test_id = $2",
        )
        .bind(user_id)
        .bind(test_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "correct answer",
                id: format!("{user_id}/{test_id}"),
            }
            .into()
        })
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// Every results row, in no particular order.
    pub async fn list_final_results(pool: &PgPool) -> Result<Vec<CompetitionResult>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM results");
        sqlx::query_as::<_, CompetitionResult>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<CompetitionResult>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM results WHERE user_id = $1");
        sqlx::query_as::<_, CompetitionResult>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert the user's final place.
    pub async fn set_final_place(
        pool: &PgPool,
        user_id: &str,
        place: i32,
    ) -> Result<CompetitionResult, sqlx::Error> {
        tracing::debug!(user_id, place, "Saving final place");
        Self::upsert_column(pool, user_id, "final_place", place).await
    }

    /// Upsert the user's final points.
    pub async fn set_final_points(
        pool: &PgPool,
        user_id: &str,
        points: i32,
    ) -> Result<CompetitionResult, sqlx::Error> {
        tracing::debug!(user_id, points, "Saving final points");
        Self::upsert_column(pool, user_id, "final_points", points).await
    }

    /// Upsert the user's place for `week`.
    ///
    /// An unsupported week fails with `CoreError::Validation` before anything
    /// is written. Database failures are logged and returned.
    pub async fn set_weekly_place(
        pool: &PgPool,
        user_id: &str,
        week: i32,
        place: i32,
    ) -> Result<CompetitionResult, StoreError> {
        let slot = WeekSlot::new(week)?;
        Self::upsert_weekly(pool, user_id, slot, slot.place_column(), place).await
    }

    /// Upsert the user's points for `week`. Same failure contract as
    /// [`Self::set_weekly_place`].
    pub async fn set_weekly_points(
        pool: &PgPool,
        user_id: &str,
        week: i32,
        points: i32,
    ) -> Result<CompetitionResult, StoreError> {
        let slot = WeekSlot::new(week)?;
        Self::upsert_weekly(pool, user_id, slot, slot.points_column(), points).await
    }

    async fn upsert_weekly(
        pool: &PgPool,
        user_id: &str,
        slot: WeekSlot,
        column: &'static str,
        value: i32,
    ) -> Result<CompetitionResult, StoreError> {
        tracing::debug!(user_id, week = slot.number(), column, value, "Saving weekly result");

        Self::upsert_column(pool, user_id, column, value)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id,
                    week = slot.number(),
                    column,
                    error = %e,
                    "Failed to save weekly result"
                );
                StoreError::Database(e)
            })
    }

    /// Insert a row for the user if none exists, otherwise overwrite one
    /// column. `column` must come from a fixed set of names, never from input.
    async fn upsert_column(
        pool: &PgPool,
        user_id: &str,
        column: &'static str,
        value: i32,
    ) -> Result<CompetitionResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO results (user_id, {column}) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) \
             DO UPDATE SET {column} = EXCLUDED.{column}, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompetitionResult>(&query)
            .bind(user_id)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}

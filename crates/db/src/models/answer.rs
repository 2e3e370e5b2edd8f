//! Answer event models.
//!
//! Maps to `user_test_correct_answers` and `user_test_wrong_answers`. Both
//! relations are append-only facts written by the answering flow.

use advent_core::types::{DbId, Timestamp, UserId};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `user_test_correct_answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CorrectAnswer {
    pub id: DbId,
    pub user_id: UserId,
    pub test_id: DbId,
    pub answering_time: Timestamp,
    /// Elapsed milliseconds between the test start and the submission.
    pub answering_duration_ms: i64,
}

/// A row from the `user_test_wrong_answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WrongAnswer {
    pub id: DbId,
    pub user_id: UserId,
    pub test_id: DbId,
    pub time: Timestamp,
    pub answer: Option<String>,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Number of wrong answers a user submitted to tests starting on `day`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct WrongAnswerData {
    pub day: NaiveDate,
    pub count: i64,
}

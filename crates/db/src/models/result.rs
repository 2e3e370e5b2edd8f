//! Competition result models.
//!
//! Maps to the `results` table: one row per user holding the final standing
//! and one place/points pair per scored week.

use advent_core::types::{DbId, Timestamp, UserId};
use advent_core::weeks::{WeekSlot, WEEK_COUNT};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `results` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CompetitionResult {
    pub id: DbId,
    pub user_id: UserId,
    pub week1_points: Option<i32>,
    pub week1_place: Option<i32>,
    pub week2_points: Option<i32>,
    pub week2_place: Option<i32>,
    pub week3_points: Option<i32>,
    pub week3_place: Option<i32>,
    pub final_points: Option<i32>,
    pub final_place: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Place and points recorded for a single week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeekScore {
    pub place: Option<i32>,
    pub points: Option<i32>,
}

// The `week` match and the struct fields above list every week by hand.
const _: () = assert!(WEEK_COUNT == 3, "add week fields to CompetitionResult");

impl CompetitionResult {
    pub fn week(&self, slot: WeekSlot) -> WeekScore {
        let (place, points) = match slot.number() {
            1 => (self.week1_place, self.week1_points),
            2 => (self.week2_place, self.week2_points),
            3 => (self.week3_place, self.week3_points),
            n => unreachable!("WeekSlot {n} has no column pair"),
        };
        WeekScore { place, points }
    }

    /// All weeks in order, paired with their slot.
    pub fn weeks(&self) -> impl Iterator<Item = (WeekSlot, WeekScore)> + '_ {
        WeekSlot::all().map(|slot| (slot, self.week(slot)))
    }

    /// Sum of every recorded weekly score; unset weeks count as zero.
    pub fn weekly_points_total(&self) -> i32 {
        self.weeks().filter_map(|(_, score)| score.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CompetitionResult {
        CompetitionResult {
            id: 1,
            user_id: "alice".into(),
            week1_points: None,
            week1_place: None,
            week2_points: None,
            week2_place: None,
            week3_points: None,
            week3_place: None,
            final_points: None,
            final_place: None,
            created_at: Timestamp::default(),
            updated_at: Timestamp::default(),
        }
    }

    fn slot(n: i32) -> WeekSlot {
        WeekSlot::new(n).unwrap()
    }

    #[test]
    fn unset_row_has_no_week_scores() {
        assert!(row().weeks().all(|(_, score)| score == WeekScore::default()));
    }

    #[test]
    fn each_slot_reads_its_own_fields() {
        let result = CompetitionResult {
            week1_points: Some(10),
            week1_place: Some(1),
            week2_points: Some(20),
            week2_place: Some(2),
            week3_points: Some(30),
            week3_place: Some(3),
            ..row()
        };
        for s in WeekSlot::all() {
            assert_eq!(
                result.week(s),
                WeekScore {
                    place: Some(s.number()),
                    points: Some(s.number() * 10),
                }
            );
        }
        assert_eq!(result.weeks().count(), WEEK_COUNT);
    }

    #[test]
    fn week_reads_only_its_week() {
        let result = CompetitionResult {
            week2_points: Some(40),
            week2_place: Some(3),
            ..row()
        };
        assert_eq!(result.week(slot(1)), WeekScore::default());
        assert_eq!(
            result.week(slot(2)),
            WeekScore {
                place: Some(3),
                points: Some(40),
            }
        );
        assert_eq!(result.week(slot(3)), WeekScore::default());
    }

    #[test]
    fn weekly_total_skips_unset_weeks() {
        let result = CompetitionResult {
            week1_points: Some(12),
            week3_points: Some(30),
            ..row()
        };
        assert_eq!(result.weekly_points_total(), 42);
    }
}

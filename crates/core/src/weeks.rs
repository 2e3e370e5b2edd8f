//! Competition week slots.
//!
//! The `results` table stores one place column and one points column per
//! scored week. This module is the single source of truth for which weeks
//! exist and which columns back them; the migration in
//! `db/migrations` must declare exactly these columns.

use serde::Serialize;

use crate::error::CoreError;

/// Number of scored weeks in the calendar.
pub const WEEK_COUNT: usize = 3;

/// Column names backing one week slot in the `results` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekColumns {
    pub place: &'static str,
    pub points: &'static str,
}

/// Week number `n` lives at index `n - 1`.
pub const WEEK_COLUMNS: [WeekColumns; WEEK_COUNT] = [
    WeekColumns {
        place: "week1_place",
        points: "week1_points",
    },
    WeekColumns {
        place: "week2_place",
        points: "week2_points",
    },
    WeekColumns {
        place: "week3_place",
        points: "week3_points",
    },
];

/// A week number known to be in `1..=WEEK_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WeekSlot(u8);

impl WeekSlot {
    /// Validate a caller-supplied week number.
    pub fn new(week: i32) -> Result<Self, CoreError> {
        if week >= 1 && (week as usize) <= WEEK_COUNT {
            Ok(Self(week as u8))
        } else {
            Err(CoreError::Validation(format!(
                "Week {week} is outside the supported range 1..={WEEK_COUNT}"
            )))
        }
    }

    /// Every supported slot, in week order.
    pub fn all() -> impl Iterator<Item = WeekSlot> {
        (1..=WEEK_COUNT as u8).map(WeekSlot)
    }

    pub fn number(self) -> i32 {
        i32::from(self.0)
    }

    /// Zero-based position of this week in [`WEEK_COLUMNS`].
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    pub fn columns(self) -> WeekColumns {
        WEEK_COLUMNS[self.index()]
    }

    pub fn place_column(self) -> &'static str {
        self.columns().place
    }

    pub fn points_column(self) -> &'static str {
        self.columns().points
    }
}

impl std::fmt::Display for WeekSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "week {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn accepts_every_supported_week() {
        for week in 1..=WEEK_COUNT as i32 {
            let slot = WeekSlot::new(week).unwrap();
            assert_eq!(slot.number(), week);
        }
    }

    #[test]
    fn rejects_zero_negative_and_past_end() {
        for week in [0, -1, WEEK_COUNT as i32 + 1, i32::MAX, i32::MIN] {
            let err = WeekSlot::new(week).unwrap_err();
            assert!(
                matches!(err, CoreError::Validation(_)),
                "week {week} should be a validation error, got {err:?}"
            );
        }
    }

    #[test]
    fn columns_follow_week_number() {
        let slot = WeekSlot::new(2).unwrap();
        assert_eq!(slot.place_column(), "week2_place");
        assert_eq!(slot.points_column(), "week2_points");
    }

    #[test]
    fn column_names_are_unique() {
        let mut seen = HashSet::new();
        for cols in WEEK_COLUMNS {
            assert!(seen.insert(cols.place), "duplicate column {}", cols.place);
            assert!(seen.insert(cols.points), "duplicate column {}", cols.points);
        }
        assert_eq!(seen.len(), WEEK_COUNT * 2);
    }

    #[test]
    fn all_yields_slots_in_order() {
        let numbers: Vec<i32> = WeekSlot::all().map(WeekSlot::number).collect();
        assert_eq!(numbers, (1..=WEEK_COUNT as i32).collect::<Vec<_>>());
    }

    #[test]
    fn display_names_the_week() {
        assert_eq!(WeekSlot::new(1).unwrap().to_string(), "week 1");
    }
}

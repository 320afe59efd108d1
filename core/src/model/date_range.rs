use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveDate};
use std::fmt;

use crate::model::usage::UsageTable;

/// Inclusive `[start, end]` date range. `start > end` is allowed and matches nothing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Min and max of the date column, or `None` if the column is absent or there are no rows.
    pub fn observed(table: &UsageTable) -> Option<DateRange> {
        let mut dates = table.records().iter().filter_map(|r| r.date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));
        Some(DateRange::new(min, max))
    }

    /// Pulls both ends inside `bounds`.
    pub fn clamp_to(&self, bounds: &DateRange) -> DateRange {
        let clamp = |d: NaiveDate| d.max(bounds.start).min(bounds.end);
        DateRange::new(clamp(self.start), clamp(self.end))
    }

    /// Moves the start by `days`, staying within `bounds` and not past `end`.
    pub fn shift_start(&self, days: i64, bounds: &DateRange) -> DateRange {
        let moved = self.start + Duration::days(days);
        let start = moved.max(bounds.start).min(self.end.min(bounds.end));
        DateRange::new(start, self.end)
    }

    /// Moves the end by `days`, staying within `bounds` and not before `start`.
    pub fn shift_end(&self, days: i64, bounds: &DateRange) -> DateRange {
        let moved = self.end + Duration::days(days);
        let end = moved.min(bounds.end).max(self.start.max(bounds.start));
        DateRange::new(self.start, end)
    }

    /// Number of calendar days covered; zero when `start > end`.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

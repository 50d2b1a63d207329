//! Day headers for the displayed week.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::instant::serde_local;
use crate::week::{WeekBounds, WeekConfig, is_weekend, week_bounds};

/// One column header of the week grid.
///
/// Exactly one of `is_past`, `is_today` and `is_future` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekDay {
    /// Midnight of this day.
    #[serde(with = "serde_local")]
    pub date: NaiveDateTime,
    pub is_past: bool,
    pub is_today: bool,
    pub is_future: bool,
    pub is_weekend: bool,
}

impl WeekDay {
    fn classify(day: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date: day.and_time(NaiveTime::MIN),
            is_past: day < today,
            is_today: day == today,
            is_future: day > today,
            is_weekend: is_weekend(day),
        }
    }

    /// The calendar date of this column.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// Builds the seven headers for the week containing `reference`, classified
/// against the current local date.
pub fn build_week_header(reference: NaiveDateTime, config: &WeekConfig) -> Vec<WeekDay> {
    let today = Local::now().date_naive();
    build_week_header_at(reference, today, config)
}

/// Builds the seven headers, classified against an explicit `today`.
pub fn build_week_header_at(
    reference: NaiveDateTime,
    today: NaiveDate,
    config: &WeekConfig,
) -> Vec<WeekDay> {
    header_for_bounds(&week_bounds(reference, config), today)
}

pub(crate) fn header_for_bounds(bounds: &WeekBounds, today: NaiveDate) -> Vec<WeekDay> {
    bounds
        .days()
        .map(|day| WeekDay::classify(day, today))
        .collect()
}

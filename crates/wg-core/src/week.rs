//! Day and week boundary arithmetic.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::instant::{end_of_day, serde_local, start_of_day};

/// Number of columns in the week grid.
pub const DAYS_PER_WEEK: usize = 7;

/// Configuration shared by the header and layout builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekConfig {
    /// The weekday shown in the first column.
    /// Default: Sunday.
    pub week_start: Weekday,
}

impl Default for WeekConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
        }
    }
}

/// Inclusive bounds of a displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekBounds {
    /// Midnight of the first day.
    #[serde(with = "serde_local")]
    pub start: NaiveDateTime,

    /// 23:59:59.999 of the seventh day.
    #[serde(with = "serde_local")]
    pub end: NaiveDateTime,
}

impl WeekBounds {
    /// The first date of the week.
    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// The seven dates of the week, in column order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let first = self.first_day();
        (0..DAYS_PER_WEEK as i64).map(move |i| first + Duration::days(i))
    }

    /// Whole days from the first day of the week to the instant's day.
    ///
    /// Negative before the week, 7 or more after it.
    pub fn day_index(&self, instant: NaiveDateTime) -> i64 {
        (instant.date() - self.first_day()).num_days()
    }

    /// Whether `[lower, upper]` touches the week, inclusive on both ends.
    pub fn intersects(&self, lower: NaiveDateTime, upper: NaiveDateTime) -> bool {
        lower <= self.end && upper >= self.start
    }
}

/// Days from `week_start` back to `weekday`, in `0..7`.
fn days_from_week_start(weekday: Weekday, week_start: Weekday) -> i64 {
    let day_idx = i64::from(weekday.num_days_from_monday());
    let start_idx = i64::from(week_start.num_days_from_monday());
    (7 + day_idx - start_idx) % 7
}

/// Computes the bounds of the week containing `reference`, or `None` when
/// that week runs past the range `NaiveDate` can represent.
pub fn checked_week_bounds(reference: NaiveDateTime, config: &WeekConfig) -> Option<WeekBounds> {
    let back = days_from_week_start(reference.weekday(), config.week_start);
    let start = start_of_day(reference).checked_sub_signed(Duration::days(back))?;
    let last = start.checked_add_signed(Duration::days(DAYS_PER_WEEK as i64 - 1))?;
    Some(WeekBounds {
        start,
        end: end_of_day(last),
    })
}

/// Computes the bounds of the week containing `reference`.
///
/// The week starts at the most recent `config.week_start` on or before the
/// reference day; the reference's time of day is irrelevant.
///
/// Within a week of the calendar limits the week cannot be represented, and
/// the first or last seven representable days are used instead.
pub fn week_bounds(reference: NaiveDateTime, config: &WeekConfig) -> WeekBounds {
    checked_week_bounds(reference, config).unwrap_or_else(|| {
        tracing::warn!(%reference, "week out of representable range, clamping");
        let first = if reference.year() < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX - Duration::days(DAYS_PER_WEEK as i64 - 1)
        };
        let start = first.and_time(NaiveTime::MIN);
        WeekBounds {
            start,
            end: end_of_day(start + Duration::days(DAYS_PER_WEEK as i64 - 1)),
        }
    })
}

/// Saturday and Sunday are weekend days regardless of `week_start`.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

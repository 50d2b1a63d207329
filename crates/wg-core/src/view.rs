//! Header and rows of one displayed week, computed together.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::event::{CalendarEvent, Schedulable};
use crate::header::{WeekDay, header_for_bounds};
use crate::layout::{WeekRow, layout_for_bounds};
use crate::week::{WeekBounds, WeekConfig, week_bounds};

/// Everything a renderer needs for one week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekView<'a, E = CalendarEvent> {
    pub bounds: WeekBounds,
    pub days: Vec<WeekDay>,
    pub rows: Vec<WeekRow<'a, E>>,
}

/// Builds the view for the week containing `reference`, using the current
/// local date for day classification.
pub fn build_week_view<'a, E: Schedulable>(
    reference: NaiveDateTime,
    events: &'a [E],
    config: &WeekConfig,
) -> WeekView<'a, E> {
    let today = Local::now().date_naive();
    build_week_view_at(reference, today, events, config)
}

/// Builds the view with an explicit `today`.
pub fn build_week_view_at<'a, E: Schedulable>(
    reference: NaiveDateTime,
    today: NaiveDate,
    events: &'a [E],
    config: &WeekConfig,
) -> WeekView<'a, E> {
    let bounds = week_bounds(reference, config);
    WeekView {
        bounds,
        days: header_for_bounds(&bounds, today),
        rows: layout_for_bounds(&bounds, events),
    }
}

//! Week layout: filtering, geometry and row packing.
//!
//! # Algorithm Summary
//!
//! 1. Drop events whose interval misses the displayed week
//! 2. Clamp the rest to the week and compute offset, span and overflow flags
//! 3. Stable-sort by unclamped start (ties keep input order)
//! 4. Place each event in the first row where its day range is free,
//!    appending a new row when none is
//!
//! First-fit over start-sorted intervals never uses more rows than the
//! largest number of events sharing a single day, so the packing is minimal.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::event::{CalendarEvent, Schedulable};
use crate::week::{WeekBounds, WeekConfig, week_bounds};

/// An event placed on the week grid.
///
/// Borrows the caller's event so geometry can be traced back to its source.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PositionedEvent<'a, E = CalendarEvent> {
    pub event: &'a E,
    /// Column of the clamped start, in `0..7`.
    pub offset: usize,
    /// Columns covered after clamping, in `1..=7`.
    pub span: usize,
    /// The event starts before the displayed week.
    pub extends_left: bool,
    /// The event ends after the displayed week.
    pub extends_right: bool,
}

impl<E> Clone for PositionedEvent<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for PositionedEvent<'_, E> {}

impl<E> PositionedEvent<'_, E> {
    /// Column of the last covered day.
    pub const fn last_column(&self) -> usize {
        self.offset + self.span - 1
    }

    /// Whether the two events share at least one column.
    pub const fn overlaps(&self, other: &Self) -> bool {
        !(self.last_column() < other.offset || other.last_column() < self.offset)
    }
}

/// A horizontal track of events whose columns never overlap.
///
/// Events are kept in placement order, not column order.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WeekRow<'a, E = CalendarEvent> {
    pub events: Vec<PositionedEvent<'a, E>>,
}

impl<E> Clone for WeekRow<'_, E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<'a, E> WeekRow<'a, E> {
    const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Number of events in the row.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PositionedEvent<'a, E>> {
        self.events.iter()
    }

    /// Whether `candidate` fits without overlapping any placed event.
    fn admits(&self, candidate: &PositionedEvent<'a, E>) -> bool {
        self.events.iter().all(|placed| !placed.overlaps(candidate))
    }
}

impl<'r, 'a, E> IntoIterator for &'r WeekRow<'a, E> {
    type Item = &'r PositionedEvent<'a, E>;
    type IntoIter = std::slice::Iter<'r, PositionedEvent<'a, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Lays out `events` for the week containing `reference`.
///
/// Events outside the week produce no output. An event whose end precedes its
/// start is treated as covering the same interval with the endpoints swapped.
/// The empty collection yields no rows.
pub fn build_week_layout<'a, E: Schedulable>(
    reference: NaiveDateTime,
    events: &'a [E],
    config: &WeekConfig,
) -> Vec<WeekRow<'a, E>> {
    layout_for_bounds(&week_bounds(reference, config), events)
}

pub(crate) fn layout_for_bounds<'a, E: Schedulable>(
    bounds: &WeekBounds,
    events: &'a [E],
) -> Vec<WeekRow<'a, E>> {
    let mut placed: Vec<(NaiveDateTime, PositionedEvent<'a, E>)> = events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| {
            let positioned = position(bounds, event);
            if positioned.is_none() {
                tracing::trace!(index, "event outside displayed week");
            }
            positioned
        })
        .collect();

    // `sort_by_key` is stable, so same-instant events keep input order.
    placed.sort_by_key(|(start, _)| *start);

    let rows = pack_rows(placed.into_iter().map(|(_, positioned)| positioned));

    tracing::debug!(
        week_start = %bounds.start,
        events = events.len(),
        retained = rows.iter().map(WeekRow::len).sum::<usize>(),
        rows = rows.len(),
        "computed week layout"
    );

    rows
}

/// Computes the geometry of one event, or `None` if it misses the week.
///
/// Returns the unclamped start alongside for sorting.
fn position<'a, E: Schedulable>(
    bounds: &WeekBounds,
    event: &'a E,
) -> Option<(NaiveDateTime, PositionedEvent<'a, E>)> {
    if event.is_inverted() {
        tracing::debug!(
            start = %event.start(),
            end = %event.effective_end(),
            "normalizing inverted event interval"
        );
    }
    let (lower, upper) = event.interval();
    if !bounds.intersects(lower, upper) {
        return None;
    }

    let clamped_start = lower.max(bounds.start);
    let clamped_end = upper.min(bounds.end);
    let first = bounds.day_index(clamped_start);
    let last = bounds.day_index(clamped_end);

    // Clamping keeps both indices in 0..7 with first <= last.
    let offset = usize::try_from(first).ok()?;
    let span = usize::try_from(last - first + 1).ok()?;

    Some((
        lower,
        PositionedEvent {
            event,
            offset,
            span,
            extends_left: lower < bounds.start,
            extends_right: upper > bounds.end,
        },
    ))
}

/// First-fit row assignment in the given order.
fn pack_rows<'a, E>(ordered: impl IntoIterator<Item = PositionedEvent<'a, E>>) -> Vec<WeekRow<'a, E>> {
    let mut rows: Vec<WeekRow<'a, E>> = Vec::new();

    for positioned in ordered {
        match rows.iter_mut().find(|row| row.admits(&positioned)) {
            Some(row) => row.events.push(positioned),
            None => {
                let mut row = WeekRow::new();
                row.events.push(positioned);
                rows.push(row);
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, NaiveDate, NaiveTime};
    use proptest::prelude::*;

    use crate::instant::end_of_day;
    use crate::week::DAYS_PER_WEEK;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .expect("valid test date")
            .and_time(NaiveTime::MIN)
    }

    fn event(start: NaiveDateTime, end: Option<NaiveDateTime>) -> CalendarEvent {
        CalendarEvent::new(start, end)
    }

    /// Reference date inside the week Sun 2016-06-26 .. Sat 2016-07-02.
    fn reference() -> NaiveDateTime {
        date(2016, 6, 27)
    }

    fn layout(events: &[CalendarEvent]) -> Vec<WeekRow<'_>> {
        build_week_layout(reference(), events, &WeekConfig::default())
    }

    fn single_row(
        event: &CalendarEvent,
        offset: usize,
        span: usize,
        extends_left: bool,
        extends_right: bool,
    ) -> Vec<WeekRow<'_>> {
        vec![WeekRow {
            events: vec![PositionedEvent {
                event,
                offset,
                span,
                extends_left,
                extends_right,
            }],
        }]
    }

    #[test]
    fn event_within_week() {
        let events = vec![event(date(2016, 6, 27), Some(date(2016, 6, 29)))];
        assert_eq!(layout(&events), single_row(&events[0], 1, 3, false, false));
    }

    #[test]
    fn event_starting_before_week() {
        let events = vec![event(date(2016, 6, 24), Some(date(2016, 6, 29)))];
        assert_eq!(layout(&events), single_row(&events[0], 0, 4, true, false));
    }

    #[test]
    fn event_ending_after_week() {
        let events = vec![event(date(2016, 6, 27), Some(date(2016, 7, 10)))];
        assert_eq!(layout(&events), single_row(&events[0], 1, 6, false, true));
    }

    #[test]
    fn event_spanning_whole_week() {
        let events = vec![event(date(2016, 6, 24), Some(date(2016, 7, 10)))];
        assert_eq!(layout(&events), single_row(&events[0], 0, 7, true, true));
    }

    #[test]
    fn excludes_inverted_event_before_week() {
        let events = vec![event(date(2016, 6, 24), Some(date(2016, 5, 25)))];
        assert!(layout(&events).is_empty());
    }

    #[test]
    fn excludes_endless_event_before_week() {
        let events = vec![event(date(2016, 6, 24), None)];
        assert!(layout(&events).is_empty());
    }

    #[test]
    fn excludes_events_after_week() {
        let events = vec![
            event(date(2016, 7, 3), None),
            event(date(2016, 7, 4), Some(date(2016, 7, 8))),
        ];
        assert!(layout(&events).is_empty());
    }

    #[test]
    fn includes_event_starting_at_week_start() {
        let events = vec![event(date(2016, 6, 26), Some(date(2016, 8, 1)))];
        let rows = layout(&events);
        assert!(std::ptr::eq(rows[0].events[0].event, &events[0]));
        assert!(!rows[0].events[0].extends_left);
    }

    #[test]
    fn includes_event_ending_at_week_end() {
        let week_end = end_of_day(date(2016, 7, 2));
        let events = vec![event(date(2016, 4, 1), Some(week_end))];
        let rows = layout(&events);
        assert!(std::ptr::eq(rows[0].events[0].event, &events[0]));
        assert_eq!(rows[0].events[0].offset, 0);
        assert_eq!(rows[0].events[0].span, 7);
        assert!(!rows[0].events[0].extends_right);
    }

    #[test]
    fn inverted_event_inside_week_is_swapped() {
        let events = vec![event(date(2016, 6, 30), Some(date(2016, 6, 27)))];
        assert_eq!(layout(&events), single_row(&events[0], 1, 4, false, false));
    }

    #[test]
    fn inverted_event_is_sorted_by_lower_endpoint() {
        let events = vec![
            event(date(2016, 6, 28), Some(date(2016, 6, 29))),
            event(date(2016, 6, 29), Some(date(2016, 6, 27))),
        ];
        let rows = layout(&events);
        assert_eq!(rows.len(), 2);
        assert!(std::ptr::eq(rows[0].events[0].event, &events[1]));
        assert!(std::ptr::eq(rows[1].events[0].event, &events[0]));
    }

    #[test]
    fn empty_collection_yields_no_rows() {
        assert!(layout(&[]).is_empty());
    }

    #[test]
    fn disjoint_events_share_a_row_in_start_order() {
        let events = vec![
            event(date(2016, 6, 30), Some(date(2016, 7, 1))),
            event(date(2016, 6, 26), Some(date(2016, 6, 27))),
        ];
        let rows = layout(&events);
        assert_eq!(rows.len(), 1);
        assert!(std::ptr::eq(rows[0].events[0].event, &events[1]));
        assert!(std::ptr::eq(rows[0].events[1].event, &events[0]));
    }

    #[test]
    fn same_day_events_never_share_a_row() {
        // Adjacent-day ranges are disjoint; same-day ranges are not.
        let events = vec![
            event(date(2016, 6, 27) + Duration::hours(9), None),
            event(date(2016, 6, 27) + Duration::hours(17), None),
            event(date(2016, 6, 28), None),
        ];
        let rows = layout(&events);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 1);
        assert!(std::ptr::eq(rows[1].events[0].event, &events[1]));
    }

    #[test]
    fn first_fit_packs_reference_scenario() {
        let week_start = date(2016, 6, 26);
        let week_end = end_of_day(date(2016, 7, 2));
        let at = |days: i64, minutes: i64| week_start + Duration::days(days) + Duration::minutes(minutes);

        let mut events = vec![
            event(at(4, 0), Some(at(5, 0))),  // 0
            event(at(4, 1), Some(at(5, 0))),  // 1
            event(at(4, 2), Some(at(5, 0))),  // 2
            event(at(6, 0), Some(at(7, 0))),  // 3
            event(at(6, 1), Some(at(7, 0))),  // 4
            event(at(6, 2), Some(at(7, 0))),  // 5
            event(at(6, 3), Some(at(7, 0))),  // 6
            event(at(0, 0), Some(at(5, 0))),  // 7
            event(at(0, 1), Some(at(5, 0))),  // 8
            event(at(-3, 0), Some(week_end + Duration::days(3))), // 9
            event(at(1, 0), Some(at(3, 0))),  // 10
            event(at(1, 0), Some(at(2, 0))),  // 11
        ];
        for day in 0..7 {
            for minute in 0..5 {
                events.push(
                    event(at(day, minute), None)
                        .with_title(format!("Event column {day} count {minute}")),
                );
            }
        }

        let rows = layout(&events);
        let indices: Vec<Vec<usize>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|p| {
                        events
                            .iter()
                            .position(|e| std::ptr::eq(e, p.event))
                            .expect("positioned event comes from input")
                    })
                    .collect()
            })
            .collect();

        assert_eq!(
            indices,
            vec![
                vec![9],
                vec![7, 3],
                vec![12, 10, 0, 42],
                vec![8, 4],
                vec![13, 11, 27, 32, 37, 43],
                vec![14, 17, 22, 28, 1, 5],
                vec![15, 18, 23, 29, 33, 38, 44],
                vec![16, 19, 24, 30, 2, 6],
                vec![20, 25, 31, 34, 39, 45],
                vec![21, 26, 35, 40, 46],
                vec![36, 41],
            ]
        );
    }

    #[test]
    fn works_with_borrowed_caller_types() {
        struct Shift {
            from: NaiveDateTime,
            to: NaiveDateTime,
        }

        impl Schedulable for Shift {
            fn start(&self) -> NaiveDateTime {
                self.from
            }

            fn end(&self) -> Option<NaiveDateTime> {
                Some(self.to)
            }
        }

        let shifts = [
            Shift {
                from: date(2016, 6, 27) + Duration::hours(22),
                to: date(2016, 6, 28) + Duration::hours(6),
            },
            Shift {
                from: date(2016, 6, 28) + Duration::hours(22),
                to: date(2016, 6, 29) + Duration::hours(6),
            },
        ];

        let rows = build_week_layout(reference(), &shifts, &WeekConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].events[0].offset, rows[0].events[0].span), (1, 2));
        assert_eq!((rows[1].events[0].offset, rows[1].events[0].span), (2, 2));
    }

    #[test]
    fn positioned_event_serializes_with_event() {
        let events = vec![event(date(2016, 6, 27), Some(date(2016, 6, 29))).with_title("Trip")];
        let rows = layout(&events);
        let json = serde_json::to_value(&rows).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "events": [{
                    "event": {
                        "start": "2016-06-27T00:00:00",
                        "end": "2016-06-29T00:00:00",
                        "title": "Trip",
                        "color": {"primary": "", "secondary": ""}
                    },
                    "offset": 1,
                    "span": 3,
                    "extends_left": false,
                    "extends_right": false
                }]
            }])
        );
    }

    /// Largest number of events covering any single column.
    fn max_column_load(rows: &[WeekRow<'_>]) -> usize {
        let mut load = [0usize; DAYS_PER_WEEK];
        for positioned in rows.iter().flat_map(WeekRow::iter) {
            for column in positioned.offset..=positioned.last_column() {
                load[column] += 1;
            }
        }
        load.into_iter().max().unwrap_or(0)
    }

    fn arb_event() -> impl Strategy<Value = CalendarEvent> {
        // Minutes relative to 2016-06-19, i.e. one week either side of the
        // displayed week.
        (0i64..21 * 24 * 60, prop::option::of(-3i64 * 24 * 60..10 * 24 * 60)).prop_map(
            |(start, length)| {
                let origin = date(2016, 6, 19);
                let start = origin + Duration::minutes(start);
                CalendarEvent::new(start, length.map(|l| start + Duration::minutes(l)))
            },
        )
    }

    proptest! {
        #[test]
        fn geometry_stays_on_grid(events in prop::collection::vec(arb_event(), 0..40)) {
            let bounds = week_bounds(reference(), &WeekConfig::default());
            let rows = layout(&events);

            for positioned in rows.iter().flat_map(WeekRow::iter) {
                let (lower, upper) = positioned.event.interval();
                prop_assert!(positioned.span >= 1);
                prop_assert!(positioned.offset + positioned.span <= DAYS_PER_WEEK);
                prop_assert_eq!(positioned.extends_left, lower < bounds.start);
                prop_assert_eq!(positioned.extends_right, upper > bounds.end);
            }
        }

        #[test]
        fn retains_exactly_intersecting_events(events in prop::collection::vec(arb_event(), 0..40)) {
            let bounds = week_bounds(reference(), &WeekConfig::default());
            let rows = layout(&events);

            let placed: usize = rows.iter().map(WeekRow::len).sum();
            let expected = events
                .iter()
                .filter(|e| {
                    let (lower, upper) = e.interval();
                    bounds.intersects(lower, upper)
                })
                .count();
            prop_assert_eq!(placed, expected);
            prop_assert!(rows.iter().all(|row| !row.is_empty()));
        }

        #[test]
        fn rows_are_disjoint_and_minimal(events in prop::collection::vec(arb_event(), 0..40)) {
            let rows = layout(&events);

            for row in &rows {
                for (i, a) in row.iter().enumerate() {
                    for b in row.events.iter().skip(i + 1) {
                        prop_assert!(!a.overlaps(b));
                    }
                }
            }
            prop_assert_eq!(rows.len(), max_column_load(&rows));
        }
    }
}

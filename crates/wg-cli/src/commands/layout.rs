//! Layout command: a week's events packed into rows.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use wg_core::{
    CalendarEvent, DAYS_PER_WEEK, PositionedEvent, WeekConfig, WeekRow, build_week_layout,
    week_bounds,
};

use super::header::write_title;

/// Draws an event's columns: `.` free, `=` covered, `<`/`>` where the event
/// continues past the week.
pub fn event_bar<E>(positioned: &PositionedEvent<'_, E>) -> String {
    (0..DAYS_PER_WEEK)
        .map(|column| {
            if column < positioned.offset || column > positioned.last_column() {
                '.'
            } else if column == positioned.offset && positioned.extends_left {
                '<'
            } else if column == positioned.last_column() && positioned.extends_right {
                '>'
            } else {
                '='
            }
        })
        .collect()
}

/// Writes each row as a `Row N` heading followed by one bar line per event.
pub fn write_rows<W: Write>(writer: &mut W, rows: &[WeekRow<'_>]) -> Result<()> {
    if rows.is_empty() {
        writeln!(writer, "No events this week.")?;
        return Ok(());
    }

    for (index, row) in rows.iter().enumerate() {
        writeln!(writer, "Row {}", index + 1)?;
        for positioned in row {
            let title = if positioned.event.title.is_empty() {
                "(untitled)"
            } else {
                positioned.event.title.as_str()
            };
            writeln!(writer, "{}  {title}", event_bar(positioned))?;
        }
    }
    Ok(())
}

pub fn run<W: Write>(
    writer: &mut W,
    reference: NaiveDateTime,
    events: &[CalendarEvent],
    config: &WeekConfig,
    json: bool,
) -> Result<()> {
    let rows = build_week_layout(reference, events, config);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    write_title(writer, week_bounds(reference, config).first_day())?;
    write_rows(writer, &rows)
}

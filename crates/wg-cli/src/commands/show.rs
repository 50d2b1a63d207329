//! Show command: headers and rows of one week.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use wg_core::{CalendarEvent, WeekConfig, build_week_view_at};

use super::header::{write_days, write_title};
use super::layout::write_rows;

pub fn run<W: Write>(
    writer: &mut W,
    reference: NaiveDateTime,
    today: NaiveDate,
    events: &[CalendarEvent],
    config: &WeekConfig,
    json: bool,
) -> Result<()> {
    let view = build_week_view_at(reference, today, events, config);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&view)?)?;
        return Ok(());
    }

    write_title(writer, view.bounds.first_day())?;
    write_days(writer, &view.days)?;
    writeln!(writer)?;
    write_rows(writer, &view.rows)
}

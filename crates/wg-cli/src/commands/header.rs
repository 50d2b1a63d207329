//! Header command: the seven day columns of a week.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use wg_core::{WeekConfig, WeekDay, build_week_header_at};

/// Writes the "Week of ..." title line.
pub fn write_title<W: Write>(writer: &mut W, first_day: NaiveDate) -> Result<()> {
    writeln!(writer, "Week of {}", first_day.format("%b %-d, %Y"))?;
    Ok(())
}

/// Writes one line per day: weekday, date, relation to today, weekend marker.
pub fn write_days<W: Write>(writer: &mut W, days: &[WeekDay]) -> Result<()> {
    for day in days {
        let relation = if day.is_past {
            "past"
        } else if day.is_today {
            "today"
        } else {
            "future"
        };
        let mut line = format!("{}  {relation}", day.day().format("%a %Y-%m-%d"));
        if day.is_weekend {
            line.push_str("  weekend");
        }
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

pub fn run<W: Write>(
    writer: &mut W,
    reference: NaiveDateTime,
    today: NaiveDate,
    config: &WeekConfig,
    json: bool,
) -> Result<()> {
    let days = build_week_header_at(reference, today, config);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&days)?)?;
        return Ok(());
    }

    if let Some(first) = days.first() {
        write_title(writer, first.day())?;
    }
    write_days(writer, &days)
}

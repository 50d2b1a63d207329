//! Shared utilities for CLI commands.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use wg_core::{CalendarEvent, DAYS_PER_WEEK, parse_local_instant};

/// Pre-compiled regex for relative date parsing: "2 weeks ago", "in 3 days".
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:in\s+(?P<ahead>\d+)\s+(?P<ahead_unit>day|week)s?|(?P<back>\d+)\s+(?P<back_unit>day|week)s?\s+ago)$")
        .expect("relative date pattern is valid")
});

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: i64 = 1000 * 365;

/// Parse a date argument relative to `now`.
///
/// Supports:
/// - `today` / `now`
/// - Anything `parse_local_instant` accepts: "2016-06-28", "2016-06-28T09:30", RFC 3339
/// - Relative: "3 days ago", "1 week ago", "in 2 weeks"
pub fn parse_when(s: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("today") || s.eq_ignore_ascii_case("now") {
        return Ok(now);
    }

    if let Some(caps) = RELATIVE_DATE_RE.captures(&s.to_ascii_lowercase()) {
        let (count, unit, sign) = match (caps.name("ahead"), caps.name("back")) {
            (Some(n), _) => (n.as_str().to_string(), caps["ahead_unit"].to_string(), 1),
            (None, Some(n)) => (n.as_str().to_string(), caps["back_unit"].to_string(), -1),
            (None, None) => anyhow::bail!("Invalid date: {s}"),
        };

        let n: i64 = count
            .parse()
            .context("failed to parse number in relative date")?;
        let days_per_unit = if unit == "week" { 7 } else { 1 };
        if n > MAX_RELATIVE_DAYS / days_per_unit {
            anyhow::bail!("Relative date too far away: {n} {unit}s");
        }

        // Safe to create Duration now that we've validated the range
        return Ok(now + Duration::days(sign * n * days_per_unit));
    }

    let instant = parse_local_instant(s).with_context(|| {
        format!("Invalid date: {s}. Use YYYY-MM-DD, 'today', or relative (e.g., '1 week ago')")
    })?;

    // Any week start must leave the whole week representable.
    let week = Duration::days(DAYS_PER_WEEK as i64);
    if instant.checked_sub_signed(week).is_none() || instant.checked_add_signed(week).is_none() {
        anyhow::bail!("Date out of range: {s}");
    }
    Ok(instant)
}

/// Resolve an optional date argument, defaulting to `now`.
pub fn reference_or_now(arg: Option<&str>, now: NaiveDateTime) -> Result<NaiveDateTime> {
    arg.map_or(Ok(now), |s| parse_when(s, now))
}

/// Resolve the `--today` argument to a calendar date.
pub fn today_or_now(arg: Option<&str>, now: NaiveDateTime) -> Result<NaiveDate> {
    reference_or_now(arg, now).map(|instant| instant.date())
}

/// Load events from a JSON file, or stdin when the path is `-`.
pub fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read events from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read events from {}", path.display()))?
    };

    let events: Vec<CalendarEvent> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse events from {}", path.display()))?;
    tracing::debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}

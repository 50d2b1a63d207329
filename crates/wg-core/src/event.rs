//! Calendar events as supplied by the caller.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::instant::{serde_local, serde_local_opt};

/// Primary/secondary style tokens for an event.
///
/// Tokens are opaque to the layout; empty strings are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventColor {
    pub primary: String,
    pub secondary: String,
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// When the event starts.
    #[serde(with = "serde_local")]
    pub start: NaiveDateTime,

    /// When the event ends. An event without an end lasts zero time.
    ///
    /// May precede `start`; see [`Schedulable::interval`].
    #[serde(default, with = "serde_local_opt", skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Style tokens.
    #[serde(default)]
    pub color: EventColor,

    /// Whether the event covers whole days.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub all_day: bool,
}

impl CalendarEvent {
    /// Creates an event with empty title and colors.
    pub fn new(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        Self {
            start,
            end,
            title: String::new(),
            color: EventColor::default(),
            all_day: false,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Anything that occupies a span of time on the week grid.
///
/// Lets the layout work with caller-owned event types (e.g. rows from a
/// store, or test fixtures) without converting them to [`CalendarEvent`].
pub trait Schedulable {
    /// When the item starts.
    fn start(&self) -> NaiveDateTime;

    /// When the item ends, if it has an end.
    fn end(&self) -> Option<NaiveDateTime>;

    /// The end used for layout: `end` if present, else `start`.
    fn effective_end(&self) -> NaiveDateTime {
        self.end().unwrap_or_else(|| self.start())
    }

    /// Whether the end precedes the start.
    fn is_inverted(&self) -> bool {
        self.effective_end() < self.start()
    }

    /// The covered interval as `(lower, upper)`, endpoints swapped when
    /// inverted.
    fn interval(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.start();
        let end = self.effective_end();
        if end < start { (end, start) } else { (start, end) }
    }
}

impl Schedulable for CalendarEvent {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }
}

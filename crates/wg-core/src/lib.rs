//! Core layout logic for the week-grid calendar.
//!
//! This crate contains the fundamental types and logic for:
//! - Week boundaries: first/last instant of the displayed week
//! - Day headers: the seven columns with past/today/future/weekend flags
//! - Event layout: clamping events to the week and packing them into rows

pub mod event;
mod header;
pub mod instant;
mod layout;
mod view;
pub mod week;

pub use event::{CalendarEvent, EventColor, Schedulable};
pub use header::{WeekDay, build_week_header, build_week_header_at};
pub use instant::{InstantParseError, format_local_instant, parse_local_instant};
pub use layout::{PositionedEvent, WeekRow, build_week_layout};
pub use view::{WeekView, build_week_view, build_week_view_at};
pub use week::{DAYS_PER_WEEK, WeekBounds, WeekConfig, checked_week_bounds, week_bounds};

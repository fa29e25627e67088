//! Week planning.
//!
//! Work weeks are seven days long and start on a configurable weekday. A new
//! week is seeded from the worker's weekly template with planned shifts that
//! carry no timestamps yet.

mod week_builder;
mod week_window;

pub use week_builder::{build_week, planned_hours, suggested_times};
pub use week_window::{WeekWindow, week_window};

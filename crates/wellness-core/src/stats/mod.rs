//! Read-side analytics over persisted daily records.

mod weekly;

pub use weekly::{ChartBar, WeeklyChart};

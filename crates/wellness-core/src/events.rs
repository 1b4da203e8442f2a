use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracker::StepSource;

/// Every observable state change in the tracker produces an Event.
/// The CLI prints them; a GUI layer would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A single step was counted from an incremental source.
    StepRecorded {
        source: StepSource,
        count: u32,
        at: DateTime<Utc>,
    },
    /// The cumulative counter replaced the running count.
    CountReplaced {
        source: StepSource,
        previous: u32,
        count: u32,
        at: DateTime<Utc>,
    },
    /// The smoothed acceleration signal crossed the shake threshold.
    ShakeDetected {
        smoothed_delta: f32,
        at: DateTime<Utc>,
    },
    /// A quick mood entry was stored in response to a shake.
    QuickMoodLogged {
        entry_id: String,
        at: DateTime<Utc>,
    },
    /// The daily step goal was crossed (emitted on the transition only).
    GoalReached {
        count: u32,
        goal: u32,
        at: DateTime<Utc>,
    },
    /// The calendar date changed between updates; the session re-keyed.
    DayRolledOver {
        previous_date: String,
        date: String,
        at: DateTime<Utc>,
    },
}

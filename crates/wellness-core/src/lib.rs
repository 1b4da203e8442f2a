//! # WellnessHub Core Library
//!
//! Core logic for the WellnessHub personal wellness tracker. All operations
//! are available via a standalone CLI binary; any GUI layer is a thin shell
//! over this library.
//!
//! ## Architecture
//!
//! - **Tracker**: accelerometer step detection, ranked-source aggregation,
//!   and the per-session state that persists daily counts
//! - **Storage**: a SQLite-backed key-value preferences store holding daily
//!   step records and JSON record lists, plus TOML configuration
//! - **Stats**: read-side weekly chart over persisted daily counts
//! - **Reminder**: hydration reminder worker behind scheduler/notifier traits
//!
//! ## Key Components
//!
//! - [`TrackerSession`]: session lifecycle and persistence glue
//! - [`StepDetector`] / [`StepAggregator`]: sample classification and count
//!   reconciliation
//! - [`Preferences`]: key-value record storage
//! - [`Config`]: application configuration
//! - [`WeeklyChart`]: 7-day progress view

pub mod error;
pub mod events;
pub mod records;
pub mod reminder;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use error::{ConfigError, CoreError, ScheduleError, StorageError, ValidationError};
pub use events::Event;
pub use records::{Habit, HabitCompletion, HydrationReminder, MoodEntry, WellnessStats};
pub use reminder::{
    run_reminder_worker, schedule_hydration_reminder, Notifier, PeriodicWork, ReminderParams,
    ReminderWindow, WorkOutcome, WorkScheduler,
};
pub use stats::{ChartBar, WeeklyChart};
pub use storage::{Config, Preferences};
pub use tracker::{
    DetectorConfig, GoalProgress, MotionSample, StepAggregator, StepDetector, StepSource,
    TrackerSession, EARTH_GRAVITY,
};

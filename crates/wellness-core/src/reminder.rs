//! Hydration reminder worker and scheduler seam.
//!
//! The worker mirrors the original periodic job: it reads only its input
//! parameters and the current time, notifies when inside the daily window,
//! and reports success or retry. The external periodic scheduler and the
//! notification sink are traits so the logic runs without a platform.

use chrono::NaiveTime;
use tracing::{debug, warn};

use crate::error::ScheduleError;
use crate::records::HydrationReminder;

/// Input parameters for one worker invocation.
#[derive(Debug, Clone)]
pub struct ReminderParams {
    pub message: String,
    /// `HH:MM`, start of the daily window.
    pub start_time: String,
    /// `HH:MM`, end of the daily window.
    pub end_time: String,
}

impl From<&HydrationReminder> for ReminderParams {
    fn from(reminder: &HydrationReminder) -> Self {
        Self {
            message: reminder.message.clone(),
            start_time: reminder.start_time.clone(),
            end_time: reminder.end_time.clone(),
        }
    }
}

/// Worker result, consumed by the scheduler's own retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutcome {
    Success,
    Retry,
}

/// A periodic work definition handed to the external scheduler.
#[derive(Debug, Clone)]
pub struct PeriodicWork {
    pub work_id: String,
    pub interval_minutes: u32,
    pub params: ReminderParams,
}

/// Notification sink. The platform integration implements this; tests use a
/// recording stub.
pub trait Notifier {
    /// Deliver one notification.
    ///
    /// # Errors
    /// Returns an error string when delivery fails; the worker maps it to
    /// [`WorkOutcome::Retry`].
    fn notify(&self, message: &str) -> Result<(), String>;
}

/// External periodic-work scheduler.
pub trait WorkScheduler {
    /// Register (or replace) a periodic job.
    ///
    /// # Errors
    /// Returns an error when the scheduler rejects the definition. Callers
    /// log it and surface a transient message; they never retry themselves.
    fn schedule_periodic(&self, work: &PeriodicWork) -> Result<(), ScheduleError>;

    /// Cancel a previously registered job. Unknown ids are a no-op.
    fn cancel(&self, work_id: &str) -> Result<(), ScheduleError>;
}

/// One invocation of the hydration reminder worker.
///
/// Outside the daily window the invocation is a successful skip. A notifier
/// failure asks the scheduler to retry.
pub fn run_reminder_worker(
    params: &ReminderParams,
    now: NaiveTime,
    notifier: &dyn Notifier,
) -> WorkOutcome {
    let window = match ReminderWindow::parse(&params.start_time, &params.end_time) {
        Ok(window) => window,
        Err(e) => {
            warn!(error = %e, "reminder window unparseable, skipping invocation");
            return WorkOutcome::Success;
        }
    };

    if !window.contains(now) {
        debug!(now = %now.format("%H:%M"), "outside reminder window, skipping notification");
        return WorkOutcome::Success;
    }

    match notifier.notify(&params.message) {
        Ok(()) => {
            debug!(message = %params.message, "hydration notification sent");
            WorkOutcome::Success
        }
        Err(e) => {
            warn!(error = %e, "notification delivery failed");
            WorkOutcome::Retry
        }
    }
}

/// Register the hydration reminder with the external scheduler.
///
/// # Errors
/// Propagates the scheduler's rejection after logging it; the caller shows a
/// transient message and moves on.
pub fn schedule_hydration_reminder(
    scheduler: &dyn WorkScheduler,
    reminder: &HydrationReminder,
) -> Result<(), ScheduleError> {
    let work = PeriodicWork {
        work_id: format!("hydration:{}", reminder.id),
        interval_minutes: reminder.interval_minutes,
        params: ReminderParams::from(reminder),
    };
    if let Err(e) = scheduler.schedule_periodic(&work) {
        warn!(work_id = %work.work_id, error = %e, "failed to schedule hydration reminder");
        return Err(e);
    }
    Ok(())
}

/// A daily `HH:MM` window, inclusive at both ends. A window whose start is
/// after its end wraps past midnight (22:00 -> 08:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl ReminderWindow {
    /// Parse a window from `HH:MM` bounds.
    ///
    /// # Errors
    /// Returns an error when either bound is not `HH:MM`.
    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleError> {
        Ok(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }
}

fn parse_hhmm(value: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ScheduleError::InvalidTime {
        value: value.to_string(),
    })
}

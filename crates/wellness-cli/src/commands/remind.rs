use clap::Subcommand;
use uuid::Uuid;

use wellness_core::reminder::{self, Notifier, PeriodicWork, ReminderParams, WorkScheduler};
use wellness_core::{HydrationReminder, Preferences, ScheduleError, WorkOutcome};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Save and register the hydration reminder
    Set {
        #[arg(long, default_value_t = 60)]
        interval: u32,
        #[arg(long, default_value = "08:00")]
        start: String,
        #[arg(long, default_value = "22:00")]
        end: String,
        #[arg(long, default_value = "Time to hydrate! 💧")]
        message: String,
    },
    /// Show the saved reminder
    Status,
    /// Disable the reminder
    Disable,
    /// Run one worker invocation now (prints the notification)
    Fire,
}

/// Stand-in for the platform's periodic-work scheduler: registration is
/// logged, execution is left to the host environment (cron, systemd timer).
struct LoggingScheduler;

impl WorkScheduler for LoggingScheduler {
    fn schedule_periodic(&self, work: &PeriodicWork) -> Result<(), ScheduleError> {
        tracing::info!(
            work_id = %work.work_id,
            interval_minutes = work.interval_minutes,
            "periodic work registered"
        );
        Ok(())
    }

    fn cancel(&self, work_id: &str) -> Result<(), ScheduleError> {
        tracing::info!(work_id, "periodic work cancelled");
        Ok(())
    }
}

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) -> Result<(), String> {
        println!("🔔 {message}");
        Ok(())
    }
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::open()?;

    match action {
        RemindAction::Set { interval, start, end, message } => {
            if interval == 0 {
                return Err("interval must be at least 1 minute".into());
            }
            // Validate the window up front so a bad HH:MM fails here, not in
            // the worker.
            reminder::ReminderWindow::parse(&start, &end)?;
            let reminder = HydrationReminder {
                id: Uuid::new_v4().to_string(),
                interval_minutes: interval,
                is_enabled: true,
                start_time: start,
                end_time: end,
                message,
            };
            prefs.save_hydration_reminder(&reminder)?;
            // Scheduling failure is transient, not fatal: the reminder stays
            // saved and can be re-registered.
            match reminder::schedule_hydration_reminder(&LoggingScheduler, &reminder) {
                Ok(()) => println!(
                    "Reminder set: every {} min, {}-{}",
                    reminder.interval_minutes, reminder.start_time, reminder.end_time
                ),
                Err(e) => println!("Reminder saved but scheduling failed: {e}"),
            }
        }
        RemindAction::Status => match prefs.hydration_reminder()? {
            Some(reminder) => println!("{}", serde_json::to_string_pretty(&reminder)?),
            None => println!("No reminder configured"),
        },
        RemindAction::Disable => {
            if let Some(mut reminder) = prefs.hydration_reminder()? {
                reminder.is_enabled = false;
                prefs.save_hydration_reminder(&reminder)?;
                LoggingScheduler.cancel(&format!("hydration:{}", reminder.id))?;
                println!("Reminder disabled");
            } else {
                println!("No reminder configured");
            }
        }
        RemindAction::Fire => {
            let Some(reminder) = prefs.hydration_reminder()? else {
                return Err("no reminder configured".into());
            };
            if !reminder.is_enabled {
                return Err("reminder is disabled".into());
            }
            let now = chrono::Local::now().time();
            let outcome =
                reminder::run_reminder_worker(&ReminderParams::from(&reminder), now, &StdoutNotifier);
            if outcome == WorkOutcome::Retry {
                println!("Delivery failed; scheduler would retry");
            }
        }
    }
    Ok(())
}

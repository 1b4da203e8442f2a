//! Tracking session: detector + aggregator + persistence glue.
//!
//! A `TrackerSession` exists while the tracking surface is active. It owns
//! all mutable step state for the session, persists today's count after every
//! update, and emits [`Event`]s for the caller to surface. Handlers take the
//! current date key explicitly so tests can drive rollover deterministically.

use chrono::Utc;
use tracing::debug;

use crate::error::CoreError;
use crate::events::Event;
use crate::records::MoodEntry;
use crate::storage::Preferences;

use super::aggregator::{StepAggregator, StepUpdate};
use super::detector::{DetectorConfig, MotionSample, StepDetector};
use super::StepSource;

/// Rolling steps-per-minute window. The window restarts (and the count
/// clears) 60 seconds after it opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinuteWindow {
    window_start_ms: u64,
    steps_in_window: u32,
}

impl MinuteWindow {
    const WINDOW_MS: u64 = 60_000;

    fn roll(&mut self, now_ms: u64) {
        if self.window_start_ms == 0 {
            self.window_start_ms = now_ms;
        }
        if now_ms.saturating_sub(self.window_start_ms) >= Self::WINDOW_MS {
            self.window_start_ms = now_ms;
            self.steps_in_window = 0;
        }
    }

    fn record_step(&mut self, now_ms: u64) {
        self.roll(now_ms);
        self.steps_in_window += 1;
    }

    /// Steps counted in the current minute window.
    pub fn steps_per_minute(&self) -> u32 {
        self.steps_in_window
    }
}

/// Session-scoped step tracking state.
pub struct TrackerSession {
    detector: StepDetector,
    aggregator: StepAggregator,
    minute_window: MinuteWindow,
    date: String,
    goal_was_reached: bool,
}

impl TrackerSession {
    /// Start a session for `today`, resuming today's persisted count.
    pub fn start(prefs: &Preferences, goal: u32, today: &str) -> Result<Self, CoreError> {
        let count = prefs.steps_for_date(today)?;
        let aggregator = StepAggregator::with_count(goal, count);
        let goal_was_reached = aggregator.progress().goal_reached;
        Ok(Self {
            detector: StepDetector::new(DetectorConfig::default()),
            aggregator,
            minute_window: MinuteWindow::default(),
            date: today.to_string(),
            goal_was_reached,
        })
    }

    pub fn count(&self) -> u32 {
        self.aggregator.count()
    }

    pub fn progress(&self) -> super::GoalProgress {
        self.aggregator.progress()
    }

    pub fn steps_per_minute(&self) -> u32 {
        self.minute_window.steps_per_minute()
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Feed one raw accelerometer sample.
    ///
    /// A classified step advances the count; a shake stores a quick mood
    /// entry. Today's count is persisted after any change.
    pub fn handle_accel_sample(
        &mut self,
        prefs: &Preferences,
        today: &str,
        sample: &MotionSample,
    ) -> Result<Vec<Event>, CoreError> {
        let mut events = self.roll_date_if_needed(prefs, today)?;
        let outcome = self.detector.process(sample);

        if outcome.step {
            let update = self.aggregator.record_step(StepSource::Heuristic);
            self.apply_update(prefs, update, StepSource::Heuristic, sample.timestamp_ms, &mut events)?;
        }

        if outcome.shake {
            let entry = MoodEntry::quick_shake();
            let entry_id = entry.id.clone();
            prefs.add_mood_entry(entry)?;
            debug!(smoothed_delta = outcome.smoothed_delta, "shake gesture logged quick mood");
            events.push(Event::ShakeDetected {
                smoothed_delta: outcome.smoothed_delta,
                at: Utc::now(),
            });
            events.push(Event::QuickMoodLogged { entry_id, at: Utc::now() });
        }

        Ok(events)
    }

    /// One discrete hardware step-detector event.
    pub fn handle_detector_event(
        &mut self,
        prefs: &Preferences,
        today: &str,
        timestamp_ms: u64,
    ) -> Result<Vec<Event>, CoreError> {
        let mut events = self.roll_date_if_needed(prefs, today)?;
        let update = self.aggregator.record_step(StepSource::Detector);
        self.apply_update(prefs, update, StepSource::Detector, timestamp_ms, &mut events)?;
        Ok(events)
    }

    /// One cumulative counter reading (total steps since device boot).
    pub fn handle_counter_reading(
        &mut self,
        prefs: &Preferences,
        today: &str,
        timestamp_ms: u64,
        total_since_boot: u32,
    ) -> Result<Vec<Event>, CoreError> {
        let mut events = self.roll_date_if_needed(prefs, today)?;
        let update = self.aggregator.record_counter_reading(total_since_boot);
        self.apply_update(prefs, update, StepSource::Counter, timestamp_ms, &mut events)?;
        Ok(events)
    }

    fn apply_update(
        &mut self,
        prefs: &Preferences,
        update: StepUpdate,
        source: StepSource,
        timestamp_ms: u64,
        events: &mut Vec<Event>,
    ) -> Result<(), CoreError> {
        match update {
            StepUpdate::Incremented { count } => {
                self.minute_window.record_step(timestamp_ms);
                events.push(Event::StepRecorded { source, count, at: Utc::now() });
            }
            StepUpdate::Replaced { previous, count } => {
                events.push(Event::CountReplaced { source, previous, count, at: Utc::now() });
            }
            StepUpdate::Unchanged => return Ok(()),
        }

        prefs.set_steps_for_date(&self.date, self.aggregator.count())?;

        let progress = self.aggregator.progress();
        if progress.goal_reached && !self.goal_was_reached {
            events.push(Event::GoalReached {
                count: progress.count,
                goal: progress.goal,
                at: Utc::now(),
            });
        }
        self.goal_was_reached = progress.goal_reached;
        Ok(())
    }

    /// Re-key the session when the calendar date changed between updates.
    /// The new date has no record yet, so the count restarts at zero and the
    /// cumulative baseline is re-captured.
    fn roll_date_if_needed(
        &mut self,
        prefs: &Preferences,
        today: &str,
    ) -> Result<Vec<Event>, CoreError> {
        if self.date == today {
            return Ok(Vec::new());
        }
        let previous_date = std::mem::replace(&mut self.date, today.to_string());
        self.aggregator.reset_for_new_day();
        self.detector.reset();
        self.minute_window = MinuteWindow::default();
        self.goal_was_reached = false;
        let count = prefs.steps_for_date(today)?;
        if count != 0 {
            // A record already exists for the new date (another session wrote
            // it); resume from it rather than clobbering with zero.
            self.aggregator = StepAggregator::with_count(self.aggregator.goal(), count);
        }
        debug!(%previous_date, date = %today, "session re-keyed to new date");
        Ok(vec![Event::DayRolledOver {
            previous_date,
            date: today.to_string(),
            at: Utc::now(),
        }])
    }
}

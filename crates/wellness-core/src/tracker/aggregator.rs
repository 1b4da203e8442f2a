//! Step count aggregation across sensor sources.
//!
//! Three sources can report steps: the accelerometer heuristic, the hardware
//! step detector, and the hardware cumulative counter. Blending all three
//! double counts, so the aggregator ranks them and only the highest-ranked
//! source seen this session drives the count:
//!
//! `Counter > Detector > Heuristic`
//!
//! Incremental sources add one step per event. The cumulative counter is
//! baselined at its first reading and REPLACES the count with the
//! session-relative delta on every later reading.

use serde::{Deserialize, Serialize};

/// Where a step update came from, in ascending order of authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepSource {
    /// Accelerometer threshold heuristic.
    Heuristic,
    /// Hardware step-detector events.
    Detector,
    /// Hardware cumulative step counter (steps since boot).
    Counter,
}

/// Result of applying one source update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepUpdate {
    /// The count advanced by one.
    Incremented { count: u32 },
    /// The cumulative counter replaced the count.
    Replaced { previous: u32, count: u32 },
    /// The update was ignored (outranked source, or no change).
    Unchanged,
}

/// Progress toward the daily goal, recomputed after every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub count: u32,
    pub goal: u32,
    /// Integer percentage, 0 when count is 0, unbounded above 100.
    pub percentage: u32,
    /// Steps left, never negative.
    pub remaining: u32,
    pub goal_reached: bool,
}

impl GoalProgress {
    pub fn compute(count: u32, goal: u32) -> Self {
        let percentage = if count > 0 && goal > 0 {
            count.saturating_mul(100) / goal
        } else {
            0
        };
        Self {
            count,
            goal,
            percentage,
            remaining: goal.saturating_sub(count),
            goal_reached: count >= goal,
        }
    }
}

/// Session step counter with ranked sources.
#[derive(Debug, Clone)]
pub struct StepAggregator {
    count: u32,
    goal: u32,
    /// Highest-ranked source that has reported this session.
    active_source: Option<StepSource>,
    /// First cumulative reading, captured once per session.
    counter_baseline: Option<u32>,
}

impl StepAggregator {
    pub fn new(goal: u32) -> Self {
        Self {
            count: 0,
            goal,
            active_source: None,
            counter_baseline: None,
        }
    }

    /// Resume a session from a persisted daily count.
    pub fn with_count(goal: u32, count: u32) -> Self {
        Self {
            count,
            goal,
            active_source: None,
            counter_baseline: None,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn active_source(&self) -> Option<StepSource> {
        self.active_source
    }

    pub fn progress(&self) -> GoalProgress {
        GoalProgress::compute(self.count, self.goal)
    }

    /// One step from an incremental source (heuristic or detector).
    ///
    /// Ignored when a higher-ranked source is already driving the count.
    pub fn record_step(&mut self, source: StepSource) -> StepUpdate {
        debug_assert!(source != StepSource::Counter, "counter uses record_counter_reading");
        if self.outranked(source) {
            return StepUpdate::Unchanged;
        }
        self.promote(source);
        self.count = self.count.saturating_add(1);
        StepUpdate::Incremented { count: self.count }
    }

    /// A cumulative counter reading (total steps since device boot).
    ///
    /// The first reading only captures the baseline. Later readings replace
    /// the count with `reading - baseline`, clamped at zero. A reading that
    /// reconciles to the current count is a silent no-op.
    pub fn record_counter_reading(&mut self, reading: u32) -> StepUpdate {
        self.promote(StepSource::Counter);
        let baseline = *self.counter_baseline.get_or_insert(reading);
        let reconciled = reading.saturating_sub(baseline);
        if reconciled == self.count {
            return StepUpdate::Unchanged;
        }
        let previous = self.count;
        self.count = reconciled;
        StepUpdate::Replaced { previous, count: self.count }
    }

    /// Drop session-local source state for a fresh day: count back to zero,
    /// baseline re-captured at the next cumulative reading.
    pub fn reset_for_new_day(&mut self) {
        self.count = 0;
        self.counter_baseline = None;
    }

    fn outranked(&self, source: StepSource) -> bool {
        self.active_source.is_some_and(|active| active > source)
    }

    fn promote(&mut self, source: StepSource) {
        if self.active_source.map_or(true, |active| source > active) {
            self.active_source = Some(source);
        }
    }
}

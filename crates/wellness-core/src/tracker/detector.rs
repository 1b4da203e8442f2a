//! Accelerometer step detection.
//!
//! The detector consumes raw tri-axis samples and classifies each one as a
//! step or non-step event using a magnitude threshold, an exponentially
//! smoothed magnitude delta, and a minimum inter-step interval. The same
//! smoothed signal carries a side channel: a large spike flags a shake
//! (the quick-mood gesture), independent of step classification.
//!
//! The smoothing update is `smoothed = smoothed * 0.9 + delta` with no
//! normalization term. That asymmetry is intentional and load-bearing: the
//! shake threshold of 12 assumes the unnormalized signal.

use serde::{Deserialize, Serialize};

/// Standard gravity in m/s².
pub const EARTH_GRAVITY: f32 = 9.80665;

/// One accelerometer reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Epoch milliseconds at the time of the reading.
    pub timestamp_ms: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MotionSample {
    pub fn new(timestamp_ms: u64, x: f32, y: f32, z: f32) -> Self {
        Self { timestamp_ms, x, y, z }
    }

    /// Euclidean norm of the three axes.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Thresholds for step and shake classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Magnitude must exceed gravity by this much to count as a step (m/s²).
    pub step_accel_over_gravity: f32,
    /// Minimum absolute smoothed delta for a step.
    pub step_delta_threshold: f32,
    /// Minimum time between steps in milliseconds (prevents double-counting).
    pub min_step_interval_ms: u64,
    /// Decay factor of the smoothed delta signal per sample.
    pub smoothing_decay: f32,
    /// Smoothed delta above this flags a shake.
    pub shake_threshold: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            step_accel_over_gravity: 1.5,
            step_delta_threshold: 0.5,
            min_step_interval_ms: 200,
            smoothing_decay: 0.9,
            shake_threshold: 12.0,
        }
    }
}

/// What one sample produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOutcome {
    pub step: bool,
    pub shake: bool,
    pub magnitude: f32,
    pub delta: f32,
    pub smoothed_delta: f32,
}

/// Per-session step detector state.
///
/// Owned by the session controller and fed one sample at a time; no hidden
/// statics, so tests can drive it with synthetic sequences.
#[derive(Debug, Clone)]
pub struct StepDetector {
    config: DetectorConfig,
    previous_magnitude: f32,
    smoothed_delta: f32,
    last_step_ms: u64,
}

impl StepDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            previous_magnitude: 0.0,
            smoothed_delta: 0.0,
            last_step_ms: 0,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Current value of the smoothed delta signal.
    pub fn smoothed_delta(&self) -> f32 {
        self.smoothed_delta
    }

    /// Process one sample and classify it.
    pub fn process(&mut self, sample: &MotionSample) -> SampleOutcome {
        let magnitude = sample.magnitude();
        let delta = magnitude - self.previous_magnitude;
        self.previous_magnitude = magnitude;
        self.smoothed_delta = self.smoothed_delta * self.config.smoothing_decay + delta;

        let step = self.classify_step(magnitude, sample.timestamp_ms);
        if step {
            self.last_step_ms = sample.timestamp_ms;
        }

        let shake = self.smoothed_delta > self.config.shake_threshold;

        SampleOutcome {
            step,
            shake,
            magnitude,
            delta,
            smoothed_delta: self.smoothed_delta,
        }
    }

    fn classify_step(&self, magnitude: f32, now_ms: u64) -> bool {
        let since_last = now_ms.saturating_sub(self.last_step_ms);
        magnitude > EARTH_GRAVITY + self.config.step_accel_over_gravity
            && self.smoothed_delta.abs() > self.config.step_delta_threshold
            && since_last > self.config.min_step_interval_ms
    }

    /// Reset all signal state (session end).
    pub fn reset(&mut self) {
        self.previous_magnitude = 0.0;
        self.smoothed_delta = 0.0;
        self.last_step_ms = 0;
    }
}

impl Default for StepDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector_with_signal(smoothed_delta: f32, last_step_ms: u64) -> StepDetector {
        StepDetector {
            config: DetectorConfig::default(),
            previous_magnitude: 0.0,
            smoothed_delta,
            last_step_ms,
        }
    }

    #[test]
    fn magnitude_is_euclidean_norm() {
        let s = MotionSample::new(0, 3.0, 4.0, 0.0);
        assert!((s.magnitude() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn step_classified_above_thresholds_with_interval() {
        // magnitude 12.0 > 9.80665 + 1.5, |0.6| > 0.5, 300ms > 200ms
        let det = detector_with_signal(0.6, 1000);
        assert!(det.classify_step(12.0, 1300));
    }

    #[test]
    fn interval_guard_rejects_close_steps() {
        let det = detector_with_signal(0.6, 1000);
        assert!(!det.classify_step(12.0, 1150));
    }

    #[test]
    fn weak_magnitude_is_not_a_step() {
        let det = detector_with_signal(0.6, 0);
        // just under the gravity + 1.5 threshold
        assert!(!det.classify_step(11.0, 1000));
    }

    #[test]
    fn flat_signal_is_not_a_step() {
        let det = detector_with_signal(0.3, 0);
        assert!(!det.classify_step(12.0, 1000));
    }

    #[test]
    fn smoothing_decays_and_accumulates() {
        let mut det = StepDetector::default();
        // A stationary device reading pure gravity on one axis: first sample
        // produces a full-magnitude delta, later samples decay it.
        det.process(&MotionSample::new(0, 0.0, 0.0, EARTH_GRAVITY));
        let first = det.smoothed_delta();
        assert!((first - EARTH_GRAVITY).abs() < 1e-3);
        det.process(&MotionSample::new(50, 0.0, 0.0, EARTH_GRAVITY));
        // delta is now 0, signal decays by 0.9
        assert!((det.smoothed_delta() - first * 0.9).abs() < 1e-3);
    }

    #[test]
    fn shake_flagged_on_large_spike() {
        let mut det = StepDetector::default();
        det.process(&MotionSample::new(0, 0.0, 0.0, 0.0));
        // A violent spike: magnitude jumps from 0 to ~25, delta 25 > 12.
        let out = det.process(&MotionSample::new(50, 15.0, 15.0, 10.0));
        assert!(out.shake);
    }

    #[test]
    fn gentle_walk_does_not_shake() {
        let mut det = StepDetector::default();
        det.process(&MotionSample::new(0, 0.0, 0.0, EARTH_GRAVITY));
        let out = det.process(&MotionSample::new(300, 0.5, 0.5, EARTH_GRAVITY + 2.0));
        assert!(!out.shake);
    }

    #[test]
    fn walking_burst_counts_spaced_steps_only() {
        let mut det = StepDetector::default();
        let mut steps = 0;
        // Impacts every 100ms; only every other one clears the 200ms guard.
        for i in 0..10u64 {
            let mag = if i % 2 == 0 { 13.0 } else { 9.0 };
            let t = 1000 + i * 100;
            let out = det.process(&MotionSample::new(t, 0.0, 0.0, mag));
            if out.step {
                steps += 1;
            }
        }
        assert!(steps >= 2, "expected spaced steps, got {steps}");
        assert!(steps <= 5, "interval guard failed, got {steps}");
    }
}

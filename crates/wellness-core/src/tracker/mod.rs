//! Step & progress tracking.
//!
//! Three cooperating pieces, all owned by the session and free of hidden
//! statics:
//!
//! - [`StepDetector`]: classifies raw accelerometer samples as steps (and
//!   flags the shake gesture).
//! - [`StepAggregator`]: reconciles the ranked sensor sources into one daily
//!   count and derives goal progress.
//! - [`TrackerSession`]: lifecycle + persistence glue; persists today's count
//!   after every update and emits events.

mod aggregator;
mod detector;
mod session;

pub use aggregator::{GoalProgress, StepAggregator, StepSource, StepUpdate};
pub use detector::{DetectorConfig, MotionSample, SampleOutcome, StepDetector, EARTH_GRAVITY};
pub use session::{MinuteWindow, TrackerSession};

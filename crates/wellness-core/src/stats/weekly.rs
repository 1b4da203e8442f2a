//! Weekly step chart.
//!
//! Pure read-side: for the 7 calendar dates ending on a given day, fetch each
//! day's persisted count and normalize bar heights against the week's
//! maximum. No state, no side effects, recomputed on every call.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::Preferences;

/// One bar of the weekly chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartBar {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Short weekday label (Mon..Sun).
    pub day_label: String,
    pub steps: u32,
    /// 0.0..=1.0, relative to the week's maximum.
    pub height_fraction: f32,
}

/// Ordered bars for the 7 dates ending on `end_date` (oldest first).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyChart {
    pub bars: Vec<ChartBar>,
}

impl WeeklyChart {
    /// Build the chart for the week ending on `end_date`.
    ///
    /// # Errors
    /// Returns an error if a daily record cannot be read.
    pub fn build(prefs: &Preferences, end_date: NaiveDate) -> Result<Self, StorageError> {
        let mut days = Vec::with_capacity(7);
        for offset in (0..7).rev() {
            let date = end_date - Duration::days(offset);
            let key = date.format("%Y-%m-%d").to_string();
            let steps = prefs.steps_for_date(&key)?;
            days.push((date, key, steps));
        }

        let max_steps = days.iter().map(|(_, _, s)| *s).max().unwrap_or(0).max(1);

        let bars = days
            .into_iter()
            .map(|(date, key, steps)| ChartBar {
                date: key,
                day_label: day_label(date),
                steps,
                height_fraction: (steps as f32 / max_steps as f32).min(1.0),
            })
            .collect();

        Ok(Self { bars })
    }

    /// The week's maximum daily count.
    pub fn max_steps(&self) -> u32 {
        self.bars.iter().map(|b| b.steps).max().unwrap_or(0)
    }
}

fn day_label(date: NaiveDate) -> String {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_week_renders_flat_bars() {
        let prefs = Preferences::open_memory().unwrap();
        let chart = WeeklyChart::build(&prefs, date("2026-08-27")).unwrap();
        assert_eq!(chart.bars.len(), 7);
        assert!(chart.bars.iter().all(|b| b.steps == 0));
        // max clamps to 1, so fractions are 0 rather than NaN
        assert!(chart.bars.iter().all(|b| b.height_fraction == 0.0));
    }

    #[test]
    fn bars_are_ordered_oldest_first_ending_today() {
        let prefs = Preferences::open_memory().unwrap();
        let chart = WeeklyChart::build(&prefs, date("2026-08-27")).unwrap();
        assert_eq!(chart.bars[0].date, "2026-08-21");
        assert_eq!(chart.bars[6].date, "2026-08-27");
        // 2026-08-27 is a Thursday
        assert_eq!(chart.bars[6].day_label, "Thu");
    }

    #[test]
    fn heights_normalize_against_week_max() {
        let prefs = Preferences::open_memory().unwrap();
        prefs.set_steps_for_date("2026-08-25", 4000).unwrap();
        prefs.set_steps_for_date("2026-08-26", 8000).unwrap();
        prefs.set_steps_for_date("2026-08-27", 2000).unwrap();
        let chart = WeeklyChart::build(&prefs, date("2026-08-27")).unwrap();
        assert_eq!(chart.max_steps(), 8000);
        let by_date = |d: &str| chart.bars.iter().find(|b| b.date == d).unwrap();
        assert!((by_date("2026-08-25").height_fraction - 0.5).abs() < 1e-6);
        assert!((by_date("2026-08-26").height_fraction - 1.0).abs() < 1e-6);
        assert!((by_date("2026-08-27").height_fraction - 0.25).abs() < 1e-6);
    }
}

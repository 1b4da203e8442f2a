//! Flat wellness records persisted as JSON lists in the preferences store.
//!
//! All records are small value types with list-replace-on-edit semantics:
//! edits rewrite the whole stored list, keyed lookups are linear scans.
//! Date keys are `YYYY-MM-DD`, times of day are `HH:MM`.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One mood journal entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: String,
    pub emoji: String,
    #[serde(default)]
    pub note: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, `HH:MM`.
    pub time: String,
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl MoodEntry {
    /// Build an entry stamped with the current local date and time.
    pub fn now(emoji: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            emoji: emoji.into(),
            note: note.into(),
            date: today_key(),
            time: current_time_key(),
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }

    /// The entry emitted by the shake-to-log gesture.
    pub fn quick_shake() -> Self {
        Self::now("🙂", "Quick shake mood")
    }
}

/// A tracked habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target_count: u32,
    pub unit: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at_ms: i64,
}

impl Habit {
    pub fn new(name: impl Into<String>, target_count: u32, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            target_count,
            unit: unit.into(),
            is_active: true,
            created_at_ms: Utc::now().timestamp_millis(),
        }
    }
}

/// Completion progress for one habit on one date. Upserted by (habit_id, date).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitCompletion {
    pub habit_id: String,
    pub date: String,
    pub completed_count: u32,
    #[serde(default)]
    pub timestamp_ms: i64,
}

/// Hydration reminder settings. A single record, replaced on save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydrationReminder {
    pub id: String,
    pub interval_minutes: u32,
    pub is_enabled: bool,
    /// `HH:MM`, start of the daily reminder window.
    pub start_time: String,
    /// `HH:MM`, end of the daily reminder window.
    pub end_time: String,
    #[serde(default = "default_reminder_message")]
    pub message: String,
}

/// Daily wellness roll-up. Upserted by date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellnessStats {
    pub date: String,
    pub habits_completed: u32,
    pub total_habits: u32,
    /// 1-5 scale.
    pub mood_score: u8,
    pub water_intake_ml: u32,
    #[serde(default)]
    pub steps: u32,
}

fn default_true() -> bool {
    true
}

fn default_reminder_message() -> String {
    "Time to hydrate! 💧".to_string()
}

/// Today's date key in the local timezone, `YYYY-MM-DD`.
pub fn today_key() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The current local time of day, `HH:MM`.
pub fn current_time_key() -> String {
    Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_entry_now_stamps_date_and_time() {
        let entry = MoodEntry::now("😀", "");
        assert_eq!(entry.date.len(), 10);
        assert_eq!(entry.time.len(), 5);
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn quick_shake_entry_has_fixed_note() {
        let entry = MoodEntry::quick_shake();
        assert_eq!(entry.note, "Quick shake mood");
    }

    #[test]
    fn habit_defaults_active() {
        let habit = Habit::new("Stretch", 3, "times");
        assert!(habit.is_active);
        assert_eq!(habit.target_count, 3);
    }

    #[test]
    fn hydration_reminder_message_defaults_on_missing_field() {
        let json = r#"{"id":"r1","interval_minutes":60,"is_enabled":true,
                       "start_time":"08:00","end_time":"22:00"}"#;
        let r: HydrationReminder = serde_json::from_str(json).unwrap();
        assert_eq!(r.message, "Time to hydrate! 💧");
    }
}

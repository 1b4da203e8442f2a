//! Key-value preferences store.
//!
//! The Rust stand-in for a platform preference store: a single SQLite `kv`
//! table holding primitives and JSON-serialized record lists under string
//! keys. Record areas keep the original key names (`habits`, `mood_entries`,
//! `daily_steps:<YYYY-MM-DD>`, ...), so the layout reads like the data it
//! replaces.
//!
//! Malformed or missing JSON for any record list reads as an empty list.
//! That is deliberate silent recovery, logged at debug only.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StorageError;
use crate::records::{
    today_key, Habit, HabitCompletion, HydrationReminder, MoodEntry, WellnessStats,
};

use super::data_dir;

const KEY_HABITS: &str = "habits";
const KEY_HABIT_COMPLETIONS: &str = "habit_completions";
const KEY_MOOD_ENTRIES: &str = "mood_entries";
const KEY_HYDRATION_REMINDER: &str = "hydration_reminder";
const KEY_WELLNESS_STATS: &str = "wellness_stats";
const KEY_USER_NAME: &str = "user_name";
const KEY_DAILY_WATER_GOAL: &str = "daily_goal";
const KEY_DAILY_STEPS: &str = "daily_steps";
const KEY_WATER_CONSUMED: &str = "water_consumed";
const KEY_WATER_LAST_RESET: &str = "water_last_reset_date";

/// String-keyed preference store backed by SQLite.
pub struct Preferences {
    conn: Connection,
}

impl Preferences {
    /// Open the store at `~/.config/wellnesshub/wellnesshub.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?
            .join("wellnesshub.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let prefs = Self { conn };
        prefs.migrate()?;
        Ok(prefs)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let prefs = Self { conn };
        prefs.migrate()?;
        Ok(prefs)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // ── Primitive accessors ──────────────────────────────────────────

    pub fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn put_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, StorageError> {
        Ok(self.get_string(key)?.and_then(|v| v.parse().ok()))
    }

    pub fn put_i64(&self, key: &str, value: i64) -> Result<(), StorageError> {
        self.put_string(key, &value.to_string())
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, StorageError> {
        Ok(self.get_string(key)?.and_then(|v| v.parse().ok()))
    }

    pub fn put_f64(&self, key: &str, value: f64) -> Result<(), StorageError> {
        self.put_string(key, &value.to_string())
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── JSON record lists ────────────────────────────────────────────

    fn get_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let Some(json) = self.get_string(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&json) {
            Ok(list) => Ok(list),
            Err(e) => {
                debug!(key, error = %e, "malformed record list, reading as empty");
                Ok(Vec::new())
            }
        }
    }

    fn put_list<T: Serialize>(&self, key: &str, list: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(list)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.put_string(key, &json)
    }

    // ── Daily step records ───────────────────────────────────────────

    /// Step count for a date; a date never written reads 0.
    pub fn steps_for_date(&self, date: &str) -> Result<u32, StorageError> {
        let key = format!("{KEY_DAILY_STEPS}:{date}");
        Ok(self
            .get_i64(&key)?
            .map(|v| v.max(0) as u32)
            .unwrap_or(0))
    }

    pub fn set_steps_for_date(&self, date: &str, steps: u32) -> Result<(), StorageError> {
        let key = format!("{KEY_DAILY_STEPS}:{date}");
        self.put_i64(&key, i64::from(steps))
    }

    // ── Habits ───────────────────────────────────────────────────────

    pub fn habits(&self) -> Result<Vec<Habit>, StorageError> {
        self.get_list(KEY_HABITS)
    }

    pub fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        self.put_list(KEY_HABITS, habits)
    }

    pub fn add_habit(&self, habit: Habit) -> Result<(), StorageError> {
        let mut habits = self.habits()?;
        habits.push(habit);
        self.save_habits(&habits)
    }

    /// Replace the habit with the same id; a missing id is a no-op.
    pub fn update_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let mut habits = self.habits()?;
        if let Some(existing) = habits.iter_mut().find(|h| h.id == habit.id) {
            *existing = habit.clone();
            self.save_habits(&habits)?;
        }
        Ok(())
    }

    pub fn delete_habit(&self, habit_id: &str) -> Result<(), StorageError> {
        let mut habits = self.habits()?;
        habits.retain(|h| h.id != habit_id);
        self.save_habits(&habits)
    }

    // ── Habit completions ────────────────────────────────────────────

    pub fn habit_completions(&self) -> Result<Vec<HabitCompletion>, StorageError> {
        self.get_list(KEY_HABIT_COMPLETIONS)
    }

    /// Upsert keyed by (habit_id, date).
    pub fn save_habit_completion(&self, completion: HabitCompletion) -> Result<(), StorageError> {
        let mut completions = self.habit_completions()?;
        let existing = completions
            .iter_mut()
            .find(|c| c.habit_id == completion.habit_id && c.date == completion.date);
        match existing {
            Some(c) => *c = completion,
            None => completions.push(completion),
        }
        self.put_list(KEY_HABIT_COMPLETIONS, &completions)
    }

    pub fn habit_completions_for_date(
        &self,
        date: &str,
    ) -> Result<Vec<HabitCompletion>, StorageError> {
        let mut completions = self.habit_completions()?;
        completions.retain(|c| c.date == date);
        Ok(completions)
    }

    // ── Mood journal ─────────────────────────────────────────────────

    pub fn mood_entries(&self) -> Result<Vec<MoodEntry>, StorageError> {
        self.get_list(KEY_MOOD_ENTRIES)
    }

    pub fn add_mood_entry(&self, entry: MoodEntry) -> Result<(), StorageError> {
        let mut entries = self.mood_entries()?;
        entries.push(entry);
        self.put_list(KEY_MOOD_ENTRIES, &entries)
    }

    pub fn mood_entries_for_date(&self, date: &str) -> Result<Vec<MoodEntry>, StorageError> {
        let mut entries = self.mood_entries()?;
        entries.retain(|e| e.date == date);
        Ok(entries)
    }

    // ── Hydration reminder ───────────────────────────────────────────

    pub fn hydration_reminder(&self) -> Result<Option<HydrationReminder>, StorageError> {
        let Some(json) = self.get_string(KEY_HYDRATION_REMINDER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(reminder) => Ok(Some(reminder)),
            Err(e) => {
                debug!(error = %e, "malformed hydration reminder, reading as unset");
                Ok(None)
            }
        }
    }

    pub fn save_hydration_reminder(
        &self,
        reminder: &HydrationReminder,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(reminder)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.put_string(KEY_HYDRATION_REMINDER, &json)
    }

    // ── Wellness stats ───────────────────────────────────────────────

    pub fn wellness_stats(&self) -> Result<Vec<WellnessStats>, StorageError> {
        self.get_list(KEY_WELLNESS_STATS)
    }

    /// Upsert keyed by date.
    pub fn save_wellness_stats(&self, stats: WellnessStats) -> Result<(), StorageError> {
        let mut all = self.wellness_stats()?;
        match all.iter_mut().find(|s| s.date == stats.date) {
            Some(s) => *s = stats,
            None => all.push(stats),
        }
        self.put_list(KEY_WELLNESS_STATS, &all)
    }

    pub fn wellness_stats_for_date(
        &self,
        date: &str,
    ) -> Result<Option<WellnessStats>, StorageError> {
        Ok(self.wellness_stats()?.into_iter().find(|s| s.date == date))
    }

    // ── User profile ─────────────────────────────────────────────────

    pub fn user_name(&self) -> Result<String, StorageError> {
        Ok(self.get_string(KEY_USER_NAME)?.unwrap_or_else(|| "User".to_string()))
    }

    pub fn set_user_name(&self, name: &str) -> Result<(), StorageError> {
        self.put_string(KEY_USER_NAME, name)
    }

    /// Daily water goal in glasses, default 8.
    pub fn daily_water_goal(&self) -> Result<u32, StorageError> {
        Ok(self
            .get_i64(KEY_DAILY_WATER_GOAL)?
            .map(|v| v.max(0) as u32)
            .unwrap_or(8))
    }

    pub fn set_daily_water_goal(&self, goal: u32) -> Result<(), StorageError> {
        self.put_i64(KEY_DAILY_WATER_GOAL, i64::from(goal))
    }

    // ── Water tracking ───────────────────────────────────────────────

    /// Milliliters consumed today. Resets implicitly when the stored
    /// last-reset date is not today.
    pub fn water_consumed(&self) -> Result<f64, StorageError> {
        self.reset_water_if_stale(&today_key())?;
        Ok(self.get_f64(KEY_WATER_CONSUMED)?.unwrap_or(0.0))
    }

    pub fn set_water_consumed(&self, amount_ml: f64) -> Result<(), StorageError> {
        self.put_f64(KEY_WATER_CONSUMED, amount_ml.max(0.0))?;
        self.put_string(KEY_WATER_LAST_RESET, &today_key())
    }

    pub fn add_water(&self, amount_ml: f64) -> Result<f64, StorageError> {
        let total = self.water_consumed()? + amount_ml.max(0.0);
        self.set_water_consumed(total)?;
        Ok(total)
    }

    pub fn reset_water_consumed(&self) -> Result<(), StorageError> {
        self.remove(KEY_WATER_CONSUMED)?;
        self.put_string(KEY_WATER_LAST_RESET, &today_key())
    }

    fn reset_water_if_stale(&self, today: &str) -> Result<(), StorageError> {
        let last_reset = self.get_string(KEY_WATER_LAST_RESET)?;
        if last_reset.as_deref() != Some(today) {
            self.remove(KEY_WATER_CONSUMED)?;
            self.put_string(KEY_WATER_LAST_RESET, today)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> Preferences {
        Preferences::open_memory().unwrap()
    }

    #[test]
    fn unwritten_date_reads_zero_steps() {
        assert_eq!(prefs().steps_for_date("2026-01-01").unwrap(), 0);
    }

    #[test]
    fn steps_round_trip_per_date() {
        let p = prefs();
        p.set_steps_for_date("2026-08-26", 3500).unwrap();
        p.set_steps_for_date("2026-08-27", 120).unwrap();
        assert_eq!(p.steps_for_date("2026-08-26").unwrap(), 3500);
        assert_eq!(p.steps_for_date("2026-08-27").unwrap(), 120);
        // Overwrite for the same date replaces.
        p.set_steps_for_date("2026-08-27", 121).unwrap();
        assert_eq!(p.steps_for_date("2026-08-27").unwrap(), 121);
    }

    #[test]
    fn malformed_list_reads_empty() {
        let p = prefs();
        p.put_string("habits", "not json {").unwrap();
        assert!(p.habits().unwrap().is_empty());
    }

    #[test]
    fn habit_update_replaces_by_id() {
        let p = prefs();
        let mut habit = Habit::new("Walk", 1, "times");
        p.add_habit(habit.clone()).unwrap();
        habit.target_count = 2;
        p.update_habit(&habit).unwrap();
        let habits = p.habits().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].target_count, 2);
    }

    #[test]
    fn habit_delete_removes_by_id() {
        let p = prefs();
        let habit = Habit::new("Walk", 1, "times");
        let id = habit.id.clone();
        p.add_habit(habit).unwrap();
        p.add_habit(Habit::new("Read", 1, "pages")).unwrap();
        p.delete_habit(&id).unwrap();
        let habits = p.habits().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "Read");
    }

    #[test]
    fn completion_upserts_by_habit_and_date() {
        let p = prefs();
        p.save_habit_completion(HabitCompletion {
            habit_id: "h1".into(),
            date: "2026-08-27".into(),
            completed_count: 1,
            timestamp_ms: 0,
        })
        .unwrap();
        p.save_habit_completion(HabitCompletion {
            habit_id: "h1".into(),
            date: "2026-08-27".into(),
            completed_count: 2,
            timestamp_ms: 1,
        })
        .unwrap();
        let completions = p.habit_completions_for_date("2026-08-27").unwrap();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].completed_count, 2);
    }

    #[test]
    fn mood_entries_filter_by_date() {
        let p = prefs();
        let mut a = MoodEntry::now("😀", "");
        a.date = "2026-08-26".into();
        let mut b = MoodEntry::now("😴", "");
        b.date = "2026-08-27".into();
        p.add_mood_entry(a).unwrap();
        p.add_mood_entry(b).unwrap();
        let entries = p.mood_entries_for_date("2026-08-27").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].emoji, "😴");
    }

    #[test]
    fn wellness_stats_upsert_by_date() {
        let p = prefs();
        let stats = WellnessStats {
            date: "2026-08-27".into(),
            habits_completed: 1,
            total_habits: 3,
            mood_score: 4,
            water_intake_ml: 500,
            steps: 2000,
        };
        p.save_wellness_stats(stats.clone()).unwrap();
        p.save_wellness_stats(WellnessStats { steps: 2500, ..stats }).unwrap();
        let all = p.wellness_stats().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].steps, 2500);
    }

    #[test]
    fn user_name_defaults() {
        let p = prefs();
        assert_eq!(p.user_name().unwrap(), "User");
        p.set_user_name("Ada").unwrap();
        assert_eq!(p.user_name().unwrap(), "Ada");
    }

    #[test]
    fn water_accumulates_and_resets() {
        let p = prefs();
        assert_eq!(p.water_consumed().unwrap(), 0.0);
        p.add_water(250.0).unwrap();
        let total = p.add_water(250.0).unwrap();
        assert!((total - 500.0).abs() < f64::EPSILON);
        p.reset_water_consumed().unwrap();
        assert_eq!(p.water_consumed().unwrap(), 0.0);
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellnesshub.db");
        {
            let p = Preferences::open_at(&path).unwrap();
            p.set_steps_for_date("2026-08-27", 6400).unwrap();
            p.set_user_name("Ada").unwrap();
        }
        let p = Preferences::open_at(&path).unwrap();
        assert_eq!(p.steps_for_date("2026-08-27").unwrap(), 6400);
        assert_eq!(p.user_name().unwrap(), "Ada");
    }

    #[test]
    fn water_resets_on_new_day() {
        let p = prefs();
        p.add_water(400.0).unwrap();
        // Simulate yesterday's reset marker.
        p.put_string("water_last_reset_date", "2020-01-01").unwrap();
        assert_eq!(p.water_consumed().unwrap(), 0.0);
    }
}

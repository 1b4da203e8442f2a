use chrono::Utc;
use clap::Subcommand;

use wellness_core::records::today_key;
use wellness_core::{Habit, HabitCompletion, Preferences};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        name: String,
        #[arg(long, default_value_t = 1)]
        target: u32,
        #[arg(long, default_value = "times")]
        unit: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List habits with today's completion counts
    List,
    /// Record progress on a habit for today
    Done {
        habit_id: String,
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Delete a habit
    Delete { habit_id: String },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::open()?;

    match action {
        HabitAction::Add { name, target, unit, description } => {
            if name.trim().is_empty() {
                return Err("habit name must not be empty".into());
            }
            let mut habit = Habit::new(name, target, unit);
            habit.description = description;
            prefs.add_habit(habit.clone())?;
            println!("Habit created: {} ({})", habit.name, habit.id);
        }
        HabitAction::List => {
            let habits = prefs.habits()?;
            let completions = prefs.habit_completions_for_date(&today_key())?;
            for habit in &habits {
                let done = completions
                    .iter()
                    .find(|c| c.habit_id == habit.id)
                    .map(|c| c.completed_count)
                    .unwrap_or(0);
                println!(
                    "{}  {}  {}/{} {}  {}",
                    habit.id,
                    habit.name,
                    done,
                    habit.target_count,
                    habit.unit,
                    if habit.is_active { "" } else { "(inactive)" }
                );
            }
        }
        HabitAction::Done { habit_id, count } => {
            let today = today_key();
            let previous = prefs
                .habit_completions_for_date(&today)?
                .into_iter()
                .find(|c| c.habit_id == habit_id)
                .map(|c| c.completed_count)
                .unwrap_or(0);
            let completion = HabitCompletion {
                habit_id,
                date: today,
                completed_count: previous + count,
                timestamp_ms: Utc::now().timestamp_millis(),
            };
            let total = completion.completed_count;
            prefs.save_habit_completion(completion)?;
            println!("Progress: {total} today");
        }
        HabitAction::Delete { habit_id } => {
            prefs.delete_habit(&habit_id)?;
            println!("Habit deleted");
        }
    }
    Ok(())
}

use clap::Subcommand;

use wellness_core::{MoodEntry, Preferences};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Add a mood entry
    Add {
        emoji: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// List mood entries
    List {
        /// Restrict to one date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: MoodAction) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::open()?;

    match action {
        MoodAction::Add { emoji, note } => {
            if emoji.trim().is_empty() {
                return Err("emoji must not be empty".into());
            }
            let entry = MoodEntry::now(emoji, note);
            prefs.add_mood_entry(entry.clone())?;
            println!("Mood logged: {} {} {}", entry.date, entry.time, entry.emoji);
        }
        MoodAction::List { date } => {
            let entries = match date {
                Some(date) => prefs.mood_entries_for_date(&date)?,
                None => prefs.mood_entries()?,
            };
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

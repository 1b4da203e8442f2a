use clap::Subcommand;

use wellness_core::{Preferences, storage::Config};

#[derive(Subcommand)]
pub enum WaterAction {
    /// Log water intake in milliliters
    Log { amount_ml: f64 },
    /// Today's intake against the daily goal
    Status,
    /// Reset today's intake
    Reset,
}

const GLASS_ML: f64 = 250.0;

pub fn run(action: WaterAction) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::open()?;

    match action {
        WaterAction::Log { amount_ml } => {
            if amount_ml <= 0.0 {
                return Err("amount must be positive".into());
            }
            let total = prefs.add_water(amount_ml)?;
            println!("Logged {amount_ml} ml, {total} ml today");
        }
        WaterAction::Status => {
            let config = Config::load()?;
            let consumed = prefs.water_consumed()?;
            let goal_ml = f64::from(config.hydration.daily_goal_glasses) * GLASS_ML;
            println!(
                "{} ml of {} ml ({:.0}%)",
                consumed,
                goal_ml,
                (consumed / goal_ml * 100.0).min(999.0)
            );
        }
        WaterAction::Reset => {
            prefs.reset_water_consumed()?;
            println!("Water intake reset");
        }
    }
    Ok(())
}

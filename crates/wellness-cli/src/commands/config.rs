use clap::Subcommand;

use wellness_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Set the daily step goal
    SetGoal { steps: u32 },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetGoal { steps } => {
            let mut config = Config::load()?;
            config.steps.daily_goal = steps;
            config.validate()?;
            config.save()?;
            println!("Daily step goal set to {steps}");
        }
    }
    Ok(())
}

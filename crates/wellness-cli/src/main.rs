use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wellness-cli", version, about = "WellnessHub CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step tracking and progress
    Steps {
        #[command(subcommand)]
        action: commands::steps::StepsAction,
    },
    /// Mood journal
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Water intake logging
    Water {
        #[command(subcommand)]
        action: commands::water::WaterAction,
    },
    /// Hydration reminder management
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Steps { action } => commands::steps::run(action),
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Water { action } => commands::water::run(action),
        Commands::Remind { action } => commands::remind::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

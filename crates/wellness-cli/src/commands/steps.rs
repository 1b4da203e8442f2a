use clap::Subcommand;
use std::path::{Path, PathBuf};

use wellness_core::records::today_key;
use wellness_core::storage::Config;
use wellness_core::{GoalProgress, MotionSample, Preferences, TrackerSession, WeeklyChart};

#[derive(Subcommand)]
pub enum StepsAction {
    /// Today's progress toward the daily goal
    Today,
    /// 7-day step chart
    Week,
    /// Feed a CSV of accelerometer samples (timestamp_ms,x,y,z) through a session
    Simulate { path: PathBuf },
}

pub fn run(action: StepsAction) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::open()?;
    let config = Config::load()?;

    match action {
        StepsAction::Today => {
            let today = today_key();
            let count = prefs.steps_for_date(&today)?;
            let progress = GoalProgress::compute(count, config.steps.daily_goal);
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        StepsAction::Week => {
            let end = chrono::Local::now().date_naive();
            let chart = WeeklyChart::build(&prefs, end)?;
            render_chart(&chart);
        }
        StepsAction::Simulate { path } => {
            let today = today_key();
            let samples = read_samples(&path)?;
            let mut session = TrackerSession::start(&prefs, config.steps.daily_goal, &today)?;
            let mut events = Vec::new();
            for sample in &samples {
                events.extend(session.handle_accel_sample(&prefs, &today, sample)?);
            }
            println!("processed {} samples, {} events", samples.len(), events.len());
            println!("{}", serde_json::to_string_pretty(&session.progress())?);
        }
    }
    Ok(())
}

fn read_samples(path: &Path) -> Result<Vec<MotionSample>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let mut samples = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(format!("line {}: expected timestamp_ms,x,y,z", i + 1).into());
        }
        samples.push(MotionSample::new(
            fields[0].parse()?,
            fields[1].parse()?,
            fields[2].parse()?,
            fields[3].parse()?,
        ));
    }
    Ok(samples)
}

const CHART_WIDTH: usize = 30;

fn render_chart(chart: &WeeklyChart) {
    for bar in &chart.bars {
        let filled = (bar.height_fraction * CHART_WIDTH as f32).round() as usize;
        println!(
            "{} {} {:>6}  {}",
            bar.date,
            bar.day_label,
            bar.steps,
            "█".repeat(filled)
        );
    }
}

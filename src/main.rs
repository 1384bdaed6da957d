/// Main entry point for the wellness tracker CLI
///
/// This file sets up logging, parses command line arguments, opens the
/// database and runs one command against it.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use wellness_tracker::commands::{self, HydrationAction};
use wellness_tracker::{Notification, Notifier, ReminderError, TokioReminderScheduler, WellnessTracker};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|mut p| {
            p.push(".wellness_tracker");
            p
        }),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push("wellness_tracker");
            p
        }),
        // 3. User's config directory
        dirs::config_dir().map(|mut p| {
            p.push("wellness_tracker");
            p
        }),
        // 4. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(".wellness_tracker");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("wellness.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("wellness_tracker");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("wellness.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the wellness tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print responses as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage habits and log progress
    #[command(subcommand)]
    Habit(HabitCommand),

    /// Keep a mood journal
    #[command(subcommand)]
    Mood(MoodCommand),

    /// Count glasses of water
    #[command(subcommand)]
    Water(WaterCommand),

    /// Today's completion rate, the last 7 days and per-habit rates
    Progress {
        /// Also show streaks
        #[arg(long)]
        streaks: bool,
    },

    /// Average mood per day
    Trend,

    /// Finish onboarding (omit the name to skip)
    Onboard { name: Option<String> },

    /// Show onboarding to the user again
    RestartOnboarding,

    /// Show the user profile and reminder settings
    Profile,

    /// Configure or run water reminders
    #[command(subcommand)]
    Reminders(ReminderCommand),

    /// Erase all data
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum HabitCommand {
    /// Create a habit from a category (water, exercise, sleep, meditation,
    /// reading, walking, journaling, learning, other)
    Add {
        category: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        target: Option<u32>,
        #[arg(long)]
        unit: Option<String>,
    },
    Edit {
        habit_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        target: Option<u32>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        habit_id: String,
    },
    List {
        #[arg(long)]
        all: bool,
    },
    /// Add progress (default 1 unit) or set the day's count
    Log {
        habit_id: String,
        #[arg(long)]
        amount: Option<u32>,
        #[arg(long, conflicts_with = "amount")]
        set: Option<u32>,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark the habit done (or not done with --undo) for the day
    Check {
        habit_id: String,
        #[arg(long)]
        undo: bool,
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove the day's record entirely
    Clear {
        habit_id: String,
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum MoodCommand {
    /// Log a mood: 😢 😔 😐 😊 😄 🤩
    Log {
        emoji: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    Edit {
        entry_id: String,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    Delete {
        entry_id: String,
    },
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
enum WaterCommand {
    Drink,
    Undo,
    Reset,
    Status,
    Target { glasses: u32 },
}

#[derive(Subcommand, Debug)]
enum ReminderCommand {
    /// Change reminder settings
    Set {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Stay in the foreground delivering reminders until Ctrl-C
    Run,
}

/// Prints reminders to stdout
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), ReminderError> {
        println!("{}\n{}", notification.title, notification.body);
        Ok(())
    }
}

/// Anything a command returns: printable as its message or as JSON
trait Report: Serialize {
    fn message(&self) -> &str;
}

macro_rules! impl_report {
    ($($ty:ty),* $(,)?) => {
        $(impl Report for $ty {
            fn message(&self) -> &str {
                &self.message
            }
        })*
    };
}

impl_report!(
    commands::CreateHabitResponse,
    commands::UpdateHabitResponse,
    commands::DeleteHabitResponse,
    commands::ListHabitsResponse,
    commands::LogHabitResponse,
    commands::LogMoodResponse,
    commands::MoodChangeResponse,
    commands::ListMoodsResponse,
    commands::HydrationResponse,
    commands::ProgressResponse,
    commands::MoodTrendResponse,
    commands::ProfileResponse,
    commands::ReminderResponse,
    commands::ResetResponse,
);

fn print_report(report: &impl Report, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.message());
    }
    Ok(())
}

fn run_habit(tracker: &WellnessTracker, command: HabitCommand, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let repo = tracker.repository();
    match command {
        HabitCommand::Add { category, name, description, target, unit } => {
            let params = commands::CreateHabitParams { category, name, description, target_count: target, unit };
            print_report(&commands::create_habit(repo, params)?, json)?;
        }
        HabitCommand::Edit { habit_id, name, description, target, unit, active } => {
            let params = commands::UpdateHabitParams {
                habit_id,
                name,
                description,
                target_count: target,
                unit,
                is_active: active,
            };
            print_report(&commands::update_habit(repo, params)?, json)?;
        }
        HabitCommand::Delete { habit_id } => {
            print_report(&commands::delete_habit(repo, commands::DeleteHabitParams { habit_id })?, json)?;
        }
        HabitCommand::List { all } => {
            let params = commands::ListHabitsParams { include_inactive: all };
            print_report(&commands::list_habits(repo, params)?, json)?;
        }
        HabitCommand::Log { habit_id, amount, set, date } => {
            let params = commands::LogHabitParams { habit_id, amount, set_count: set, date };
            print_report(&commands::log_habit(repo, params)?, json)?;
        }
        HabitCommand::Check { habit_id, undo, date } => {
            let params = commands::CheckHabitParams { habit_id, completed: !undo, date };
            print_report(&commands::check_habit(repo, params)?, json)?;
        }
        HabitCommand::Clear { habit_id, date } => {
            let params = commands::ClearHabitDayParams { habit_id, date };
            print_report(&commands::clear_habit_day(repo, params)?, json)?;
        }
    }
    Ok(())
}

fn run_mood(tracker: &WellnessTracker, command: MoodCommand, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let repo = tracker.repository();
    match command {
        MoodCommand::Log { emoji, note } => {
            print_report(&commands::log_mood(repo, commands::LogMoodParams { emoji, note })?, json)?;
        }
        MoodCommand::Edit { entry_id, emoji, note } => {
            let params = commands::EditMoodParams { entry_id, emoji, note };
            print_report(&commands::edit_mood(repo, params)?, json)?;
        }
        MoodCommand::Delete { entry_id } => {
            print_report(&commands::delete_mood(repo, commands::DeleteMoodParams { entry_id })?, json)?;
        }
        MoodCommand::List { limit } => {
            print_report(&commands::list_moods(repo, commands::ListMoodsParams { limit })?, json)?;
        }
    }
    Ok(())
}

async fn run_reminders(
    tracker: &WellnessTracker,
    command: ReminderCommand,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ReminderCommand::Set { enabled, interval } => {
            // One-shot process: the scheduler only exists to satisfy the
            // policy and is dropped (cancelled) on exit.
            let policy = tracker.reminder_policy(
                Arc::new(TokioReminderScheduler::current()?),
                Arc::new(ConsoleNotifier),
            );
            let params = commands::ReminderParams { enabled, interval_minutes: interval };
            print_report(&commands::configure_reminders(&policy, params)?, json)?;
        }
        ReminderCommand::Run => {
            tracker.run_reminders(Arc::new(ConsoleNotifier)).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("wellness_tracker={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    // Determine database path
    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let tracker = WellnessTracker::open(db_path)?;
    let repo = tracker.repository();
    let json = args.json;

    match args.command {
        Command::Habit(command) => run_habit(&tracker, command, json)?,
        Command::Mood(command) => run_mood(&tracker, command, json)?,
        Command::Water(command) => {
            let response = match command {
                WaterCommand::Drink => commands::hydration(repo, commands::HydrationParams { action: HydrationAction::Drink })?,
                WaterCommand::Undo => commands::hydration(repo, commands::HydrationParams { action: HydrationAction::Undo })?,
                WaterCommand::Reset => commands::hydration(repo, commands::HydrationParams { action: HydrationAction::Reset })?,
                WaterCommand::Status => commands::hydration(repo, commands::HydrationParams { action: HydrationAction::Status })?,
                WaterCommand::Target { glasses } => {
                    commands::set_hydration_target(repo, commands::HydrationTargetParams { target_glasses: glasses })?
                }
            };
            print_report(&response, json)?;
        }
        Command::Progress { streaks } => {
            let params = commands::ProgressParams { include_streaks: streaks };
            print_report(&commands::progress_report(repo, params)?, json)?;
        }
        Command::Trend => print_report(&commands::mood_trend_report(repo)?, json)?,
        Command::Onboard { name } => {
            let params = commands::OnboardingParams { user_name: name };
            print_report(&commands::complete_onboarding(repo, params)?, json)?;
        }
        Command::RestartOnboarding => print_report(&commands::restart_onboarding(repo)?, json)?,
        Command::Profile => print_report(&commands::show_profile(repo)?, json)?,
        Command::Reminders(command) => run_reminders(&tracker, command, json).await?,
        Command::Reset { yes } => {
            print_report(&commands::reset_all(repo, commands::ResetParams { confirm: yes })?, json)?;
        }
    }

    Ok(())
}

//! fitlog - workout and nutrition log with training analytics

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;

use fitlog::analytics::{AnalyticsService, Timeframe, parse_max_reps};
use fitlog::config::AnalyticsConfig;
use fitlog::db::{Database, Storage};
use fitlog::models::{DEFAULT_MEAL_CATEGORIES, Exercise, FoodEntry, WeightEntry, WorkoutDay};
use fitlog::tui::{App, DashboardData};

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(author, version, about = "Workout and nutrition log with training analytics")]
struct Cli {
    /// SQLite database path
    #[arg(long, env = "FITLOG_DB", default_value = "fitlog.db", global = true)]
    db: String,

    #[command(flatten)]
    analytics: AnalyticsConfig,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Log an exercise into a day's workout
    LogWorkout {
        /// Exercise name (e.g., "Bench Press")
        exercise: String,

        /// Performed sets/reps, "3x8" or "10*9*8"
        #[arg(short, long)]
        actual: String,

        /// Weight used
        #[arg(short, long)]
        weight: String,

        /// Planned sets/reps
        #[arg(short, long)]
        target: Option<String>,

        /// Workout name used when the day has no workout yet
        #[arg(short, long, default_value = "Workout")]
        name: String,

        /// Day to log (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Mark a day as a rest day
    Rest {
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Log a food entry
    LogFood {
        /// Food name
        name: String,

        #[arg(short, long)]
        calories: f64,

        #[arg(short, long)]
        protein: Option<f64>,

        #[arg(long)]
        carbs: Option<f64>,

        #[arg(short, long)]
        fat: Option<f64>,

        /// Meal category (Breakfast, Lunch, Dinner, Snacks or a custom one)
        #[arg(short, long, default_value = "Snacks")]
        meal: String,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Log body weight
    LogWeight {
        weight: f64,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show nutrition and volume charts
    Charts {
        #[arg(short, long, value_enum, default_value = "week")]
        timeframe: Timeframe,
    },

    /// Show current streaks
    Streak,

    /// List personal records
    Prs {
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Check whether a set would be a new personal record
    CheckPr {
        exercise: String,
        weight: f64,
        /// Reps, or sets/reps notation like "3x5"
        reps: String,
    },

    /// Show body-weight progression
    Weight,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let storage = Storage::new(Database::open(&cli.db)?);
    let service = AnalyticsService::new(storage.clone(), cli.analytics);
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Tui) | None => {
            let data = DashboardData::load(&service, today).await;
            let mut app = App::new(data);
            app.run()?;
        }

        Some(Commands::LogWorkout { exercise, actual, weight, target, name, date }) => {
            let date = date.unwrap_or(today);
            let mut workout = storage
                .load_workout_log(date)?
                .filter(|w| !w.is_rest)
                .unwrap_or_else(|| WorkoutDay::new(&name));

            let mut entry = Exercise::new(&exercise, &actual, &weight);
            entry.target = target.unwrap_or_else(|| actual.clone());
            workout.exercises.push(entry);
            storage.save_workout_log(date, &workout)?;
            info!(%date, %exercise, "logged exercise");
            println!("Logged: {} - {} @ {} ({})", exercise, actual, weight, date);
        }

        Some(Commands::Rest { date }) => {
            let date = date.unwrap_or(today);
            storage.save_workout_log(date, &WorkoutDay::rest("Rest"))?;
            println!("Rest day: {}", date);
        }

        Some(Commands::LogFood { name, calories, protein, carbs, fat, meal, date }) => {
            let date = date.unwrap_or(today);
            if !DEFAULT_MEAL_CATEGORIES.contains(&meal.as_str()) {
                storage.add_meal_category(&meal)?;
            }
            let entry = FoodEntry::new(&name, calories).with_macros(protein, carbs, fat);
            storage.add_food_entry(date, &meal, entry)?;
            println!("Logged: {} - {:.0} kcal ({}, {})", name, calories, meal, date);
        }

        Some(Commands::LogWeight { weight, date }) => {
            let date = date.unwrap_or(today);
            storage.add_weight_entry(WeightEntry::new(date, weight))?;
            println!("Weight: {:.1} ({})", weight, date);
        }

        Some(Commands::Charts { timeframe }) => {
            let charts = service.analytics_charts(timeframe, today).await;

            println!("Analytics - {}", timeframe.label());
            println!("{:-<60}", "");
            for p in &charts.aggregated {
                println!(
                    "{:12} | {:>6.0} kcal | P {:>4.0} C {:>4.0} F {:>4.0} | vol {:>8.0} | workouts {}",
                    p.label, p.calories, p.protein, p.carbs, p.fat, p.volume, p.days_with_workout
                );
            }
            let s = &charts.summary;
            println!("{:-<60}", "");
            println!("Avg calories: {:.0} over {} days with food", s.avg_calories, s.days_with_food);
            println!("Avg macros: P {:.0} / C {:.0} / F {:.0}", s.avg_protein, s.avg_carbs, s.avg_fat);
            println!("Workouts: {} of {} days", s.days_with_workout, s.total_days);
            println!("Total volume: {:.0}", s.total_volume);
        }

        Some(Commands::Streak) => {
            let streaks = service.dashboard_streaks(today).await;
            println!("Activity streak: {} days", streaks.activity);
            println!("Workout streak:  {} days", streaks.workout);
            println!("Food streak:     {} days", streaks.food);
        }

        Some(Commands::Prs { limit }) => {
            let prs = service.personal_records(today).await;
            println!("Personal records:");
            println!("{:-<60}", "");
            for r in prs.sorted().into_iter().take(limit) {
                println!(
                    "{:24} | 1RM {:>6.0} | {} x {} | {}",
                    r.exercise_name,
                    r.one_rep_max,
                    r.weight,
                    r.reps,
                    r.date.format("%Y-%m-%d")
                );
            }
        }

        Some(Commands::CheckPr { exercise, weight, reps }) => {
            let reps = match reps.parse::<u32>() {
                Ok(n) => n,
                Err(_) => parse_max_reps(&reps).reps,
            };
            if reps == 0 || weight <= 0.0 {
                bail!("need positive weight and reps");
            }
            if service.check_if_pr(&exercise, weight, reps, today).await {
                println!("New PR: {} {} x {}", exercise, weight, reps);
            } else {
                println!("Not a PR: {} {} x {}", exercise, weight, reps);
            }
        }

        Some(Commands::Weight) => {
            let progression = service.weight_progression().await;
            if progression.is_empty() {
                println!("No weight entries");
                return Ok(());
            }

            for e in &progression.entries {
                println!("{} | {:.1}", e.date.format("%Y-%m-%d"), e.weight);
            }
            println!("{:-<40}", "");
            if let Some(change) = progression.change {
                println!("Change: {:+.1}", change);
            }
            if let Some(trend) = &progression.trend {
                println!("Trend: {:+.2} per week (R2 {:.2})", trend.per_week, trend.r2_score);
            }
        }
    }

    Ok(())
}

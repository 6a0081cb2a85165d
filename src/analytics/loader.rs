//! Parallel per-date reads of the daily logs
//!
//! Each date is an independent key, so reads fan out as blocking tasks and
//! are joined in whatever order they finish. A failed read is logged and the
//! day is treated as empty.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task::{self, JoinSet};
use tracing::{debug, error, warn};

use super::series::DayRecord;
use crate::db::Storage;
use crate::models::{DEFAULT_MEAL_CATEGORIES, DailyFoodLog, WorkoutDay};

/// Workout logs for `dates`, in the same order
pub async fn load_workouts(storage: &Storage, dates: &[NaiveDate]) -> Vec<Option<WorkoutDay>> {
    let mut tasks = JoinSet::new();
    for (idx, &date) in dates.iter().enumerate() {
        let storage = storage.clone();
        tasks.spawn_blocking(move || (idx, date, storage.load_workout_log(date)));
    }

    let mut workouts = vec![None; dates.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, _, Ok(workout))) => workouts[idx] = workout,
            Ok((_, date, Err(e))) => warn!(%date, error = %e, "failed to load workout log"),
            Err(e) => error!(error = %e, "workout log read task failed"),
        }
    }
    workouts
}

/// Meal categories shared by every food log in a batch
async fn load_meal_categories(storage: &Storage) -> Arc<Vec<String>> {
    let storage = storage.clone();
    let categories = match task::spawn_blocking(move || storage.meal_categories()).await {
        Ok(Ok(categories)) => categories,
        Ok(Err(e)) => {
            warn!(error = %e, "failed to load meal categories");
            DEFAULT_MEAL_CATEGORIES.iter().map(|c| c.to_string()).collect()
        }
        Err(e) => {
            error!(error = %e, "meal category read task failed");
            DEFAULT_MEAL_CATEGORIES.iter().map(|c| c.to_string()).collect()
        }
    };
    Arc::new(categories)
}

/// Food logs for `dates`, in the same order
pub async fn load_food_logs(storage: &Storage, dates: &[NaiveDate]) -> Vec<DailyFoodLog> {
    if dates.is_empty() {
        return Vec::new();
    }
    let categories = load_meal_categories(storage).await;

    let mut tasks = JoinSet::new();
    for (idx, &date) in dates.iter().enumerate() {
        let storage = storage.clone();
        let categories = Arc::clone(&categories);
        tasks.spawn_blocking(move || (idx, date, storage.load_food_log_with(date, &categories)));
    }

    let mut logs = vec![DailyFoodLog::empty(); dates.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, _, Ok(log))) => logs[idx] = log,
            Ok((_, date, Err(e))) => warn!(%date, error = %e, "failed to load food log"),
            Err(e) => error!(error = %e, "food log read task failed"),
        }
    }
    logs
}

/// Both logs for every date, chronological as given
pub async fn load_days(storage: &Storage, dates: &[NaiveDate]) -> Vec<DayRecord> {
    let (workouts, foods) = tokio::join!(load_workouts(storage, dates), load_food_logs(storage, dates));
    debug!(days = dates.len(), "loaded daily logs");

    dates
        .iter()
        .zip(workouts)
        .zip(foods)
        .map(|((&date, workout), food)| DayRecord { date, workout, food })
        .collect()
}

//! Analytics entry points used by the front-ends
//!
//! Every call recomputes from storage. Nothing here returns an error: failed
//! reads are logged and show up as missing data.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};

use super::aggregate::{AggregatedDataPoint, Timeframe, aggregate};
use super::loader::{load_days, load_workouts};
use super::records::PersonalRecords;
use super::series::{AnalyticsSummary, CompletionRule, DailyDataPoint, build_daily_series, date_range, summarize};
use super::streak::{calculate_streak, calculate_streak_by};
use super::weight::WeightProgression;
use crate::config::AnalyticsConfig;
use crate::db::Storage;

/// Everything a chart screen needs for one timeframe
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(skip)]
    pub timeframe: Timeframe,
    pub daily: Vec<DailyDataPoint>,
    pub aggregated: Vec<AggregatedDataPoint>,
    pub summary: AnalyticsSummary,
}

/// Streaks shown on the dashboard, all counted up to yesterday
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStreaks {
    /// Workout or food logged
    pub activity: u32,
    pub workout: u32,
    pub food: u32,
}

#[derive(Clone)]
pub struct AnalyticsService {
    storage: Storage,
    config: AnalyticsConfig,
}

impl AnalyticsService {
    pub fn new(storage: Storage, config: AnalyticsConfig) -> Self {
        Self { storage, config }
    }

    /// Daily series, chart points and summary for a timeframe ending today
    pub async fn analytics_charts(&self, timeframe: Timeframe, today: NaiveDate) -> ChartData {
        let dates = date_range(today, timeframe.days());
        let records = load_days(&self.storage, &dates).await;
        let daily = build_daily_series(&records, CompletionRule::ActiveDay);
        let aggregated = aggregate(&daily, timeframe.bucket_days());
        let summary = summarize(&daily);

        ChartData {
            timeframe,
            daily,
            aggregated,
            summary,
        }
    }

    pub async fn dashboard_streaks(&self, today: NaiveDate) -> DashboardStreaks {
        let dates = date_range(today, self.config.streak_window_days);
        let records = load_days(&self.storage, &dates).await;
        let daily = build_daily_series(&records, CompletionRule::Logged);

        DashboardStreaks {
            activity: calculate_streak(&daily, false),
            workout: calculate_streak_by(&daily, false, |p| p.has_workout),
            food: calculate_streak_by(&daily, false, |p| p.has_food),
        }
    }

    /// Best lift per exercise over the configured lookback
    pub async fn personal_records(&self, today: NaiveDate) -> PersonalRecords {
        let dates = date_range(today, self.config.pr_lookback_days);
        let workouts = load_workouts(&self.storage, &dates).await;

        let prs = PersonalRecords::from_workouts(
            dates
                .iter()
                .zip(workouts.iter())
                .filter_map(|(&date, w)| w.as_ref().map(|w| (date, w))),
        );
        info!(exercises = prs.len(), days = dates.len(), "computed personal records");
        prs
    }

    pub async fn check_if_pr(&self, exercise_name: &str, weight: f64, reps: u32, today: NaiveDate) -> bool {
        self.personal_records(today)
            .await
            .check_if_pr(exercise_name, weight, reps)
    }

    pub async fn weight_progression(&self) -> WeightProgression {
        let storage = self.storage.clone();
        let count = self.config.weight_entries;
        let entries = match tokio::task::spawn_blocking(move || storage.get_recent_weight_entries(count)).await {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => {
                error!(error = %e, "failed to load weight entries");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "weight entry read task failed");
                Vec::new()
            }
        };
        WeightProgression::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, KeyValueStore, MemoryStore};
    use crate::models::{Exercise, FoodEntry, WeightEntry, WorkoutDay};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn service(storage: Storage) -> AnalyticsService {
        AnalyticsService::new(storage, AnalyticsConfig::default())
    }

    fn workout(name: &str, actual: &str, weight: &str) -> WorkoutDay {
        let mut w = WorkoutDay::new("Day");
        w.exercises.push(Exercise::new(name, actual, weight));
        w
    }

    #[tokio::test]
    async fn test_week_chart_average_calories() {
        let storage = Storage::new(MemoryStore::new());
        let start = today() - Duration::days(6);
        for (i, calories) in [1400.0, 1600.0, 1500.0, 0.0, 0.0, 1800.0, 1700.0].into_iter().enumerate() {
            if calories > 0.0 {
                storage
                    .add_food_entry(start + Duration::days(i as i64), "Lunch", FoodEntry::new("meal", calories))
                    .unwrap();
            }
        }

        let charts = service(storage).analytics_charts(Timeframe::Week, today()).await;
        assert_eq!(charts.daily.len(), 7);
        assert_eq!(charts.aggregated.len(), 7);
        assert_eq!(charts.summary.days_with_food, 5);
        assert_eq!(charts.summary.avg_calories, 1600.0);
    }

    #[tokio::test]
    async fn test_charts_ignore_rest_days() {
        let storage = Storage::new(MemoryStore::new());
        storage.save_workout_log(today(), &WorkoutDay::rest("Rest")).unwrap();
        storage
            .save_workout_log(today() - Duration::days(1), &workout("Squat", "5x5", "100"))
            .unwrap();

        let charts = service(storage).analytics_charts(Timeframe::Week, today()).await;
        assert_eq!(charts.summary.days_with_workout, 1);
        assert_eq!(charts.summary.total_volume, 2500.0);
    }

    #[tokio::test]
    async fn test_streaks_exclude_today_and_count_rest() {
        let storage = Storage::new(MemoryStore::new());
        // today has food but is not counted
        storage.add_food_entry(today(), "Lunch", FoodEntry::new("meal", 500.0)).unwrap();
        storage
            .save_workout_log(today() - Duration::days(1), &WorkoutDay::rest("Rest"))
            .unwrap();
        storage
            .save_workout_log(today() - Duration::days(2), &workout("Squat", "5x5", "100"))
            .unwrap();
        storage
            .add_food_entry(today() - Duration::days(2), "Lunch", FoodEntry::new("meal", 500.0))
            .unwrap();
        storage
            .add_food_entry(today() - Duration::days(3), "Lunch", FoodEntry::new("meal", 500.0))
            .unwrap();

        let streaks = service(storage).dashboard_streaks(today()).await;
        assert_eq!(streaks, DashboardStreaks { activity: 3, workout: 2, food: 0 });
    }

    #[tokio::test]
    async fn test_personal_records_end_to_end() {
        let storage = Storage::new(Database::open_in_memory().unwrap());
        storage
            .save_workout_log(today() - Duration::days(2), &workout("Bench Press", "3x8", "135"))
            .unwrap();
        storage
            .save_workout_log(today() - Duration::days(1), &workout("Bench  press", "1x5", "145"))
            .unwrap();
        // Outside the lookback window
        storage
            .save_workout_log(today() - Duration::days(400), &workout("Bench Press", "1x1", "300"))
            .unwrap();

        let svc = service(storage);
        let prs = svc.personal_records(today()).await;
        let bench = prs.get("bench press").unwrap();
        assert_eq!(bench.one_rep_max, 171.0);
        assert_eq!(bench.date, today() - Duration::days(2));

        assert!(svc.check_if_pr("Bench Press", 175.0, 1, today()).await);
        assert!(!svc.check_if_pr("Bench Press", 145.0, 5, today()).await);
        assert!(svc.check_if_pr("Deadlift", 100.0, 5, today()).await);
    }

    #[tokio::test]
    async fn test_unreadable_log_reads_as_no_data() {
        let store = MemoryStore::new();
        store.set("@foodlog_2026-03-09", "garbage").unwrap();
        let charts = service(Storage::new(store)).analytics_charts(Timeframe::Week, today()).await;
        assert_eq!(charts.summary.days_with_food, 0);
        assert_eq!(charts.daily.len(), 7);
    }

    #[tokio::test]
    async fn test_weight_progression() {
        let storage = Storage::new(MemoryStore::new());
        for (i, w) in [82.0, 81.6, 81.0, 80.7].into_iter().enumerate() {
            storage
                .add_weight_entry(WeightEntry::new(today() - Duration::days(21 - 7 * i as i64), w))
                .unwrap();
        }
        let progression = service(storage).weight_progression().await;
        assert_eq!(progression.start_weight, Some(82.0));
        assert_eq!(progression.current_weight, Some(80.7));
        assert!(progression.trend.is_some_and(|t| t.per_week < 0.0));
    }
}

//! Analytics module - training and nutrition statistics
//!
//! Features:
//! - Set/rep notation parsing, volume and one-rep max estimates
//! - Per-day series with weekly/monthly aggregation
//! - Activity streaks
//! - Personal records
//! - Body-weight trend using linear regression (linfa)

pub mod aggregate;
pub mod calculations;
pub mod loader;
pub mod notation;
pub mod records;
pub mod series;
pub mod service;
pub mod streak;
pub mod weight;

pub use aggregate::{AggregatedDataPoint, Timeframe, aggregate};
pub use calculations::{
    NutritionTotals, calculate_exercise_volume, calculate_nutrition_totals, calculate_one_rep_max,
    calculate_workout_volume, is_active_day_complete, is_logged_complete,
};
pub use notation::{SetsReps, parse_exercise_format, parse_max_reps};
pub use records::{PersonalRecord, PersonalRecords, normalize_exercise_name};
pub use series::{AnalyticsSummary, CompletionRule, DailyDataPoint, DayRecord, build_daily_series};
pub use service::{AnalyticsService, ChartData, DashboardStreaks};
pub use streak::{calculate_streak, calculate_streak_by};
pub use weight::{WeightProgression, WeightTrend};

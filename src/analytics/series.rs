//! Per-day analytics series

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::calculations::{
    calculate_nutrition_totals, calculate_workout_volume, is_active_day_complete, is_logged_complete,
};
use crate::config::MAX_WINDOW_DAYS;
use crate::models::{DailyFoodLog, WorkoutDay};

/// Raw logs for one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub workout: Option<WorkoutDay>,
    pub food: DailyFoodLog,
}

impl DayRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            workout: None,
            food: DailyFoodLog::empty(),
        }
    }
}

/// Which definition of "workout completed" a consumer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionRule {
    /// Rest days count (streaks)
    Logged,
    /// Rest days never count (charts)
    ActiveDay,
}

impl CompletionRule {
    pub fn is_complete(self, workout: &WorkoutDay) -> bool {
        match self {
            CompletionRule::Logged => is_logged_complete(workout),
            CompletionRule::ActiveDay => is_active_day_complete(workout),
        }
    }
}

/// Normalized metrics for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDataPoint {
    pub date: NaiveDate,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub has_workout: bool,
    pub has_food: bool,
    pub volume: f64,
}

/// `days` consecutive dates ending with `today`, oldest first.
///
/// At most [`MAX_WINDOW_DAYS`] dates are produced, and dates before the
/// calendar's lower bound are dropped.
pub fn date_range(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    let days = days.min(MAX_WINDOW_DAYS);
    (0..i64::from(days))
        .rev()
        .filter_map(|offset| today.checked_sub_signed(Duration::days(offset)))
        .collect()
}

pub fn build_daily_point(
    date: NaiveDate,
    workout: Option<&WorkoutDay>,
    food: &DailyFoodLog,
    rule: CompletionRule,
) -> DailyDataPoint {
    let has_workout = workout.is_some_and(|w| rule.is_complete(w));
    let has_food = food.has_food();
    // Partial workouts still show their volume
    let volume = workout.map(calculate_workout_volume).unwrap_or(0.0);

    let totals = if has_food {
        calculate_nutrition_totals(food)
    } else {
        Default::default()
    };

    DailyDataPoint {
        date,
        calories: totals.calories,
        protein: totals.protein,
        carbs: totals.carbs,
        fat: totals.fat,
        has_workout,
        has_food,
        volume,
    }
}

pub fn build_daily_series(records: &[DayRecord], rule: CompletionRule) -> Vec<DailyDataPoint> {
    records
        .iter()
        .map(|r| build_daily_point(r.date, r.workout.as_ref(), &r.food, rule))
        .collect()
}

/// Headline numbers for a range of days
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    /// Averages are over days with food, rounded
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
    pub days_with_food: usize,
    pub days_with_workout: usize,
    pub total_volume: f64,
    pub total_days: usize,
}

pub fn summarize(points: &[DailyDataPoint]) -> AnalyticsSummary {
    let food_days: Vec<_> = points.iter().filter(|p| p.has_food).collect();
    let days_with_food = food_days.len();

    let avg = |f: fn(&DailyDataPoint) -> f64| -> f64 {
        if days_with_food == 0 {
            0.0
        } else {
            (food_days.iter().map(|&p| f(p)).sum::<f64>() / days_with_food as f64).round()
        }
    };

    AnalyticsSummary {
        avg_calories: avg(|p| p.calories),
        avg_protein: avg(|p| p.protein),
        avg_carbs: avg(|p| p.carbs),
        avg_fat: avg(|p| p.fat),
        days_with_food,
        days_with_workout: points.iter().filter(|p| p.has_workout).count(),
        total_volume: points.iter().map(|p| p.volume).sum(),
        total_days: points.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, FoodEntry};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn food(calories: &[f64]) -> DailyFoodLog {
        let mut log = DailyFoodLog::empty();
        for &c in calories {
            log.add_entry("Lunch", FoodEntry::new("meal", c).with_macros(Some(10.0), Some(20.0), Some(5.0)));
        }
        log
    }

    #[test]
    fn test_date_range() {
        let range = date_range(date("2026-03-02"), 3);
        assert_eq!(range, vec![date("2026-02-28"), date("2026-03-01"), date("2026-03-02")]);
        assert!(date_range(date("2026-03-02"), 0).is_empty());
    }

    #[test]
    fn test_date_range_huge_window_is_capped() {
        let range = date_range(date("2026-03-10"), u32::MAX);
        assert_eq!(range.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(range.last(), Some(&date("2026-03-10")));
        assert!(range.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_date_range_stops_at_calendar_start() {
        let today = NaiveDate::MIN + Duration::days(5);
        let range = date_range(today, 10);
        assert_eq!(range.len(), 6);
        assert_eq!(range[0], NaiveDate::MIN);
        assert_eq!(range[5], today);
    }

    #[test]
    fn test_point_without_logs() {
        let p = build_daily_point(date("2026-03-02"), None, &DailyFoodLog::empty(), CompletionRule::Logged);
        assert!(!p.has_workout);
        assert!(!p.has_food);
        assert_eq!(p.calories, 0.0);
        assert_eq!(p.volume, 0.0);
    }

    #[test]
    fn test_point_with_food() {
        let p = build_daily_point(date("2026-03-02"), None, &food(&[500.0, 700.0]), CompletionRule::ActiveDay);
        assert!(p.has_food);
        assert_eq!(p.calories, 1200.0);
        assert_eq!(p.protein, 20.0);
        assert_eq!(p.carbs, 40.0);
        assert_eq!(p.fat, 10.0);
    }

    #[test]
    fn test_rest_day_depends_on_rule() {
        let rest = WorkoutDay::rest("Rest");
        let empty = DailyFoodLog::empty();
        assert!(build_daily_point(date("2026-03-02"), Some(&rest), &empty, CompletionRule::Logged).has_workout);
        assert!(!build_daily_point(date("2026-03-02"), Some(&rest), &empty, CompletionRule::ActiveDay).has_workout);
    }

    #[test]
    fn test_partial_workout_keeps_volume() {
        let mut w = WorkoutDay::new("Push");
        w.exercises.push(Exercise::new("Bench Press", "3x8", "135"));
        w.exercises.push(Exercise::new("Dips", "", ""));
        let p = build_daily_point(date("2026-03-02"), Some(&w), &DailyFoodLog::empty(), CompletionRule::ActiveDay);
        assert!(!p.has_workout);
        assert_eq!(p.volume, 3240.0);
    }

    #[test]
    fn test_build_series_keeps_order() {
        let records = vec![DayRecord::empty(date("2026-03-01")), DayRecord::empty(date("2026-03-02"))];
        let series = build_daily_series(&records, CompletionRule::Logged);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, date("2026-03-01"));
        assert_eq!(series[1].date, date("2026-03-02"));
    }

    #[test]
    fn test_summary_averages_over_food_days() {
        // 1400/1600/1500/0/0/1800/1700 over a week
        let start = date("2026-03-01");
        let records: Vec<DayRecord> = [1400.0, 1600.0, 1500.0, 0.0, 0.0, 1800.0, 1700.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| DayRecord {
                date: start + Duration::days(i as i64),
                workout: None,
                food: if c > 0.0 { food(&[c]) } else { DailyFoodLog::empty() },
            })
            .collect();
        let summary = summarize(&build_daily_series(&records, CompletionRule::ActiveDay));
        assert_eq!(summary.days_with_food, 5);
        assert_eq!(summary.avg_calories, 1600.0);
        assert_eq!(summary.avg_protein, 10.0);
        assert_eq!(summary.total_days, 7);
    }

    #[test]
    fn test_summary_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary, AnalyticsSummary::default());
    }
}

//! Weekly/monthly bucketing of a daily series

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use super::series::DailyDataPoint;

/// Buckets of at least this many days are labelled by month name
const MONTHLY_BUCKET_DAYS: usize = 28;

/// Fewer aggregated points than this falls back to the daily series
const MIN_AGGREGATED_POINTS: usize = 2;

/// Chart time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Timeframe {
    Week,
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    pub fn all() -> &'static [Timeframe] {
        &[Timeframe::Week, Timeframe::Month, Timeframe::Quarter, Timeframe::Year]
    }

    pub fn days(self) -> u32 {
        match self {
            Timeframe::Week => 7,
            Timeframe::Month => 30,
            Timeframe::Quarter => 90,
            Timeframe::Year => 365,
        }
    }

    pub fn bucket_days(self) -> usize {
        match self {
            Timeframe::Week | Timeframe::Month => 1,
            Timeframe::Quarter => 7,
            Timeframe::Year => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Week => "7 days",
            Timeframe::Month => "30 days",
            Timeframe::Quarter => "3 months",
            Timeframe::Year => "1 year",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Timeframe::Week => Timeframe::Month,
            Timeframe::Month => Timeframe::Quarter,
            Timeframe::Quarter => Timeframe::Year,
            Timeframe::Year => Timeframe::Week,
        }
    }
}

/// One chart point covering a day, week or month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedDataPoint {
    /// First day of the period
    pub date: NaiveDate,
    pub label: String,
    /// Nutrition fields are averages over days with food
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    /// Total over the whole period
    pub volume: f64,
    pub days_with_workout: usize,
    pub days_with_food: usize,
}

fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn month_label(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

fn daily_point(p: &DailyDataPoint) -> AggregatedDataPoint {
    AggregatedDataPoint {
        date: p.date,
        label: short_label(p.date),
        calories: p.calories,
        protein: p.protein,
        carbs: p.carbs,
        fat: p.fat,
        volume: p.volume,
        days_with_workout: usize::from(p.has_workout),
        days_with_food: usize::from(p.has_food),
    }
}

fn bucket_point(chunk: &[DailyDataPoint], bucket_days: usize) -> Option<AggregatedDataPoint> {
    let first = chunk.first()?;
    let food_days: Vec<_> = chunk.iter().filter(|p| p.has_food).collect();
    if food_days.is_empty() {
        return None;
    }

    let n = food_days.len() as f64;
    let avg = |f: fn(&DailyDataPoint) -> f64| (food_days.iter().map(|&p| f(p)).sum::<f64>() / n).round();

    let label = if bucket_days >= MONTHLY_BUCKET_DAYS {
        month_label(first.date)
    } else {
        short_label(first.date)
    };

    Some(AggregatedDataPoint {
        date: first.date,
        label,
        calories: avg(|p| p.calories),
        protein: avg(|p| p.protein),
        carbs: avg(|p| p.carbs),
        fat: avg(|p| p.fat),
        volume: chunk.iter().map(|p| p.volume).sum(),
        days_with_workout: chunk.iter().filter(|p| p.has_workout).count(),
        days_with_food: food_days.len(),
    })
}

/// Bucket a chronological daily series into periods of `bucket_days`.
///
/// A bucket size of 0 or 1 maps every day one-to-one. Otherwise buckets
/// without any food are skipped, and if fewer than two buckets survive the
/// result is the per-day series restricted to days with food.
pub fn aggregate(points: &[DailyDataPoint], bucket_days: usize) -> Vec<AggregatedDataPoint> {
    if bucket_days <= 1 {
        return points.iter().map(daily_point).collect();
    }

    let aggregated: Vec<_> = points
        .chunks(bucket_days)
        .filter_map(|chunk| bucket_point(chunk, bucket_days))
        .collect();

    if aggregated.len() >= MIN_AGGREGATED_POINTS {
        return aggregated;
    }

    points.iter().filter(|p| p.has_food).map(daily_point).collect()
}

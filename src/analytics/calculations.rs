//! Volume, one-rep max and nutrition totals

use serde::Serialize;

use super::notation::{parse_exercise_format, parse_weight};
use crate::models::{DailyFoodLog, WorkoutDay};

/// sets × reps × weight, using the averaged-reps parse
pub fn calculate_exercise_volume(actual: &str, weight: &str) -> f64 {
    let parsed = parse_exercise_format(actual);
    f64::from(parsed.sets) * f64::from(parsed.reps) * parse_weight(weight)
}

/// Sum of every exercise's volume. Unfinished exercises still count when parseable.
pub fn calculate_workout_volume(workout: &WorkoutDay) -> f64 {
    workout
        .exercises
        .iter()
        .map(|ex| calculate_exercise_volume(&ex.actual, &ex.weight))
        .sum()
}

/// Epley estimate; a single rep is its own max
pub fn calculate_one_rep_max(weight: f64, reps: u32) -> f64 {
    if reps == 1 {
        weight
    } else {
        (weight * (1.0 + f64::from(reps) / 30.0)).round()
    }
}

/// Calories and macros for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

pub fn calculate_nutrition_totals(log: &DailyFoodLog) -> NutritionTotals {
    log.entries().fold(NutritionTotals::default(), |acc, entry| NutritionTotals {
        calories: acc.calories + entry.calories,
        protein: acc.protein + entry.protein.unwrap_or(0.0),
        carbs: acc.carbs + entry.carbs.unwrap_or(0.0),
        fat: acc.fat + entry.fat.unwrap_or(0.0),
    })
}

fn all_exercises_completed(workout: &WorkoutDay) -> bool {
    !workout.exercises.is_empty() && workout.exercises.iter().all(|ex| ex.is_completed())
}

/// Completion as the streak counters see it: a logged rest day counts
pub fn is_logged_complete(workout: &WorkoutDay) -> bool {
    workout.is_rest || all_exercises_completed(workout)
}

/// Completion as the charts see it: only a trained day counts
pub fn is_active_day_complete(workout: &WorkoutDay) -> bool {
    !workout.is_rest && all_exercises_completed(workout)
}

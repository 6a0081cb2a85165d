//! Personal records by estimated one-rep max

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::calculations::calculate_one_rep_max;
use super::notation::{parse_max_reps, parse_weight};
use crate::models::WorkoutDay;

/// Best lift seen for one exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    /// Normalized (lowercase, single-spaced) name
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
    pub one_rep_max: f64,
}

/// Trim, lowercase and collapse whitespace
pub fn normalize_exercise_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Best record per normalized exercise name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalRecords {
    records: HashMap<String, PersonalRecord>,
}

impl PersonalRecords {
    /// Scan workouts in chronological order. On equal 1RM the earlier record stays.
    pub fn from_workouts<'a>(workouts: impl IntoIterator<Item = (NaiveDate, &'a WorkoutDay)>) -> Self {
        let mut prs = Self::default();
        for (date, workout) in workouts {
            prs.observe_workout(date, workout);
        }
        prs
    }

    pub fn observe_workout(&mut self, date: NaiveDate, workout: &WorkoutDay) {
        if workout.is_rest {
            return;
        }

        for exercise in workout.exercises.iter().filter(|ex| ex.is_completed()) {
            let reps = parse_max_reps(&exercise.actual).reps;
            let weight = parse_weight(&exercise.weight);
            if reps == 0 || weight <= 0.0 {
                continue;
            }

            self.observe(PersonalRecord {
                exercise_name: normalize_exercise_name(&exercise.name),
                weight,
                reps,
                date,
                one_rep_max: calculate_one_rep_max(weight, reps),
            });
        }
    }

    fn observe(&mut self, record: PersonalRecord) {
        match self.records.get(&record.exercise_name) {
            Some(best) if best.one_rep_max >= record.one_rep_max => {}
            _ => {
                self.records.insert(record.exercise_name.clone(), record);
            }
        }
    }

    pub fn get(&self, exercise_name: &str) -> Option<&PersonalRecord> {
        self.records.get(&normalize_exercise_name(exercise_name))
    }

    /// A first attempt always counts; otherwise the new 1RM must beat the stored one
    pub fn check_if_pr(&self, exercise_name: &str, weight: f64, reps: u32) -> bool {
        match self.get(exercise_name) {
            None => true,
            Some(best) => calculate_one_rep_max(weight, reps) > best.one_rep_max,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by 1RM, strongest first, then by name
    pub fn sorted(&self) -> Vec<&PersonalRecord> {
        let mut list: Vec<_> = self.records.values().collect();
        list.sort_by(|a, b| {
            b.one_rep_max
                .total_cmp(&a.one_rep_max)
                .then_with(|| a.exercise_name.cmp(&b.exercise_name))
        });
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn workout(exercises: &[(&str, &str, &str)]) -> WorkoutDay {
        let mut w = WorkoutDay::new("Day");
        for (name, actual, weight) in exercises {
            w.exercises.push(Exercise::new(name, actual, weight));
        }
        w
    }

    #[test]
    fn test_normalize_exercise_name() {
        assert_eq!(normalize_exercise_name("  Bench   Press "), "bench press");
        assert_eq!(normalize_exercise_name("SQUAT"), "squat");
    }

    #[test]
    fn test_higher_rep_set_can_win() {
        let day1 = workout(&[("Bench Press", "3x8", "135")]);
        let day2 = workout(&[("bench press", "1x5", "145")]);
        let prs = PersonalRecords::from_workouts([(date("2026-03-01"), &day1), (date("2026-03-02"), &day2)]);

        let pr = prs.get("Bench Press").unwrap();
        assert_eq!(pr.one_rep_max, 171.0);
        assert_eq!(pr.date, date("2026-03-01"));
        assert_eq!(pr.weight, 135.0);
        assert_eq!(pr.reps, 8);
        assert_eq!(prs.len(), 1);
    }

    #[test]
    fn test_only_best_survives() {
        let day1 = workout(&[("Squat", "5x5", "200")]);
        let day2 = workout(&[("Squat", "5x5", "230")]);
        let day3 = workout(&[("Squat", "3x3", "205")]);
        let prs = PersonalRecords::from_workouts([
            (date("2026-03-01"), &day1),
            (date("2026-03-03"), &day2),
            (date("2026-03-05"), &day3),
        ]);
        let pr = prs.get("squat").unwrap();
        assert_eq!(pr.date, date("2026-03-03"));
        // 230 * (1 + 5/30) = 268.3
        assert_eq!(pr.one_rep_max, 268.0);
    }

    #[test]
    fn test_sequence_uses_max_reps() {
        let day = workout(&[("Pull-up", "6*10*8", "20")]);
        let prs = PersonalRecords::from_workouts([(date("2026-03-01"), &day)]);
        assert_eq!(prs.get("pull-up").unwrap().reps, 10);
    }

    #[test]
    fn test_skips_incomplete_rest_and_zero() {
        let rest = WorkoutDay::rest("Rest");
        let day = workout(&[
            ("Deadlift", "", "315"),
            ("Row", "3x10", ""),
            ("Plank", "3x1", "0"),
            ("Curl", "notes only", "30"),
        ]);
        let prs = PersonalRecords::from_workouts([(date("2026-03-01"), &rest), (date("2026-03-02"), &day)]);
        assert!(prs.is_empty());
    }

    #[test]
    fn test_equal_one_rep_max_keeps_first() {
        let day1 = workout(&[("Press", "1x1", "100")]);
        let day2 = workout(&[("Press", "1x1", "100")]);
        let prs = PersonalRecords::from_workouts([(date("2026-03-01"), &day1), (date("2026-03-02"), &day2)]);
        assert_eq!(prs.get("press").unwrap().date, date("2026-03-01"));
    }

    #[test]
    fn test_check_if_pr() {
        let day = workout(&[("Bench Press", "3x8", "135")]);
        let prs = PersonalRecords::from_workouts([(date("2026-03-01"), &day)]);

        assert!(prs.check_if_pr("Overhead Press", 10.0, 1));
        assert!(!prs.check_if_pr("bench press", 145.0, 5));
        assert!(!prs.check_if_pr("Bench Press", 171.0, 1));
        assert!(prs.check_if_pr("Bench  Press", 172.0, 1));
    }

    #[test]
    fn test_sorted() {
        let day = workout(&[("Bench", "1x1", "100"), ("Squat", "1x1", "150"), ("Curl", "1x1", "100")]);
        let prs = PersonalRecords::from_workouts([(date("2026-03-01"), &day)]);
        let names: Vec<_> = prs.sorted().iter().map(|r| r.exercise_name.as_str()).collect();
        assert_eq!(names, vec!["squat", "bench", "curl"]);
    }
}

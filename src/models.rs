//! Logged records - workouts, food and body weight

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Meal categories every food log carries
pub const DEFAULT_MEAL_CATEGORIES: &[&str] = &["Breakfast", "Lunch", "Dinner", "Snacks"];

/// Timestamp-based id (epoch milliseconds)
pub fn generate_id() -> f64 {
    Utc::now().timestamp_millis() as f64
}

/// Timestamp-based id with a random fractional part, for ids created in a burst
pub fn generate_unique_id() -> f64 {
    generate_id() + rand::thread_rng().gen_range(0.0..1.0)
}

/// One exercise inside a workout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    pub id: f64,
    pub name: String,
    /// Legacy planned sets, superseded by `target`
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_count")]
    pub sets: Option<u32>,
    /// Legacy planned reps, superseded by `target`
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_count")]
    pub reps: Option<u32>,
    pub weight: String,
    /// Planned notation, e.g. "3x8"
    pub target: String,
    /// Performed notation, e.g. "3x8" or "10*9*8"
    pub actual: String,
}

/// Legacy counts were written as numbers or as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyCount {
    Int(u64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn whole_count(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX))
        .then_some(value as u32)
}

/// `3`, `3.0` and `"3"` all read as 3. Anything else reads as absent.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let count = match Option::<LegacyCount>::deserialize(deserializer)? {
        Some(LegacyCount::Int(n)) => u32::try_from(n).ok(),
        Some(LegacyCount::Float(f)) => whole_count(f),
        Some(LegacyCount::Text(s)) => {
            let s = s.trim();
            s.parse::<u32>().ok().or_else(|| s.parse::<f64>().ok().and_then(whole_count))
        }
        Some(LegacyCount::Other(_)) | None => None,
    };
    Ok(count)
}

impl Exercise {
    pub fn new(name: &str, actual: &str, weight: &str) -> Self {
        Self {
            id: generate_unique_id(),
            name: name.to_string(),
            actual: actual.to_string(),
            weight: weight.to_string(),
            ..Default::default()
        }
    }

    /// Done only when both the performed notation and the weight were filled in
    pub fn is_completed(&self) -> bool {
        !self.actual.trim().is_empty() && !self.weight.trim().is_empty()
    }

    /// Fill `target`/`actual` from legacy `sets`/`reps`. Returns true if anything changed.
    pub fn migrate_legacy(&mut self) -> bool {
        let (Some(sets), Some(reps)) = (self.sets, self.reps) else {
            return false;
        };

        let notation = format!("{}x{}", sets, reps);
        let mut changed = false;
        if self.target.trim().is_empty() {
            self.target = notation.clone();
            changed = true;
        }
        if self.actual.trim().is_empty() {
            self.actual = notation;
            changed = true;
        }
        changed
    }
}

/// A day's workout log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutDay {
    pub id: f64,
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub is_rest: bool,
}

impl WorkoutDay {
    pub fn new(name: &str) -> Self {
        Self {
            id: generate_id(),
            name: name.to_string(),
            exercises: Vec::new(),
            is_rest: false,
        }
    }

    /// Rest days never carry exercises
    pub fn rest(name: &str) -> Self {
        Self {
            is_rest: true,
            ..Self::new(name)
        }
    }

    /// Migrate every legacy exercise. Returns true if any exercise changed.
    pub fn migrate_legacy(&mut self) -> bool {
        self.exercises
            .iter_mut()
            .fold(false, |changed, ex| ex.migrate_legacy() || changed)
    }
}

/// One food item eaten
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    #[serde(default)]
    pub id: f64,
    pub name: String,
    /// ISO-8601 time the entry was logged
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed: Option<bool>,
}

impl FoodEntry {
    pub fn new(name: &str, calories: f64) -> Self {
        Self {
            id: generate_unique_id(),
            name: name.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            calories,
            ..Default::default()
        }
    }

    pub fn with_macros(mut self, protein: Option<f64>, carbs: Option<f64>, fat: Option<f64>) -> Self {
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }
}

/// Food eaten on one day, grouped by meal category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyFoodLog {
    pub meals: BTreeMap<String, Vec<FoodEntry>>,
}

impl DailyFoodLog {
    /// Empty log with every default meal present
    pub fn empty() -> Self {
        let mut log = Self::default();
        log.normalize(DEFAULT_MEAL_CATEGORIES.iter().copied());
        log
    }

    /// Make sure every given category has an entry list
    pub fn normalize<'a>(&mut self, categories: impl IntoIterator<Item = &'a str>) {
        for category in categories {
            self.meals.entry(category.to_string()).or_default();
        }
    }

    pub fn add_entry(&mut self, meal: &str, entry: FoodEntry) {
        self.meals.entry(meal.to_string()).or_default().push(entry);
    }

    pub fn has_food(&self) -> bool {
        self.meals.values().any(|entries| !entries.is_empty())
    }

    pub fn entries(&self) -> impl Iterator<Item = &FoodEntry> {
        self.meals.values().flatten()
    }
}

/// Body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    #[serde(default)]
    pub id: f64,
    pub date: NaiveDate,
    pub weight: f64,
}

impl WeightEntry {
    pub fn new(date: NaiveDate, weight: f64) -> Self {
        Self {
            id: generate_unique_id(),
            date,
            weight,
        }
    }
}

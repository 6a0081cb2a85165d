//! Typed access to the daily logs

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::KeyValueStore;
use crate::models::{DEFAULT_MEAL_CATEGORIES, DailyFoodLog, FoodEntry, WeightEntry, WorkoutDay};

pub const WORKOUT_LOG_PREFIX: &str = "@workoutlog_";
pub const FOOD_LOG_PREFIX: &str = "@foodlog_";
pub const WEIGHT_ENTRIES_KEY: &str = "@weight_entries";
pub const MEAL_CATEGORIES_KEY: &str = "@meal_categories";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn workout_log_key(date: NaiveDate) -> String {
    format!("{}{}", WORKOUT_LOG_PREFIX, date.format(DATE_FORMAT))
}

pub fn food_log_key(date: NaiveDate) -> String {
    format!("{}{}", FOOD_LOG_PREFIX, date.format(DATE_FORMAT))
}

/// Which per-day log a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Workout,
    Food,
}

impl LogKind {
    fn prefix(self) -> &'static str {
        match self {
            LogKind::Workout => WORKOUT_LOG_PREFIX,
            LogKind::Food => FOOD_LOG_PREFIX,
        }
    }
}

/// Handle to the persisted logs. Cheap to clone; all clones share the backend.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).with_context(|| format!("corrupt record at {}", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Workout logged for `date`, with legacy exercises migrated
    pub fn load_workout_log(&self, date: NaiveDate) -> Result<Option<WorkoutDay>> {
        let key = workout_log_key(date);
        let mut workout: Option<WorkoutDay> = self.read(&key)?;
        if let Some(w) = workout.as_mut()
            && w.migrate_legacy()
        {
            debug!(%key, "migrated legacy exercise notation");
        }
        Ok(workout)
    }

    pub fn save_workout_log(&self, date: NaiveDate, workout: &WorkoutDay) -> Result<()> {
        self.write(&workout_log_key(date), workout)
    }

    pub fn delete_workout_log(&self, date: NaiveDate) -> Result<()> {
        self.store.remove(&workout_log_key(date))
    }

    /// Food log for `date`, always containing every known meal category
    pub fn load_food_log(&self, date: NaiveDate) -> Result<DailyFoodLog> {
        let categories = self.meal_categories()?;
        self.load_food_log_with(date, &categories)
    }

    /// Food log for `date` normalized against already loaded `categories`
    pub fn load_food_log_with(&self, date: NaiveDate, categories: &[String]) -> Result<DailyFoodLog> {
        let mut log: DailyFoodLog = self.read(&food_log_key(date))?.unwrap_or_default();
        log.normalize(categories.iter().map(String::as_str));
        Ok(log)
    }

    pub fn save_food_log(&self, date: NaiveDate, log: &DailyFoodLog) -> Result<()> {
        self.write(&food_log_key(date), log)
    }

    pub fn add_food_entry(&self, date: NaiveDate, meal: &str, entry: FoodEntry) -> Result<DailyFoodLog> {
        let mut log = self.load_food_log(date)?;
        log.add_entry(meal, entry);
        self.save_food_log(date, &log)?;
        Ok(log)
    }

    /// Default meal categories followed by user-added ones
    pub fn meal_categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = DEFAULT_MEAL_CATEGORIES.iter().map(|c| c.to_string()).collect();
        let custom: Vec<String> = self.read(MEAL_CATEGORIES_KEY)?.unwrap_or_default();
        for category in custom {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Ok(categories)
    }

    pub fn add_meal_category(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() || DEFAULT_MEAL_CATEGORIES.contains(&name) {
            return Ok(());
        }
        let mut custom: Vec<String> = self.read(MEAL_CATEGORIES_KEY)?.unwrap_or_default();
        if !custom.iter().any(|c| c == name) {
            custom.push(name.to_string());
            self.write(MEAL_CATEGORIES_KEY, &custom)?;
        }
        Ok(())
    }

    fn weight_entries(&self) -> Result<Vec<WeightEntry>> {
        Ok(self.read(WEIGHT_ENTRIES_KEY)?.unwrap_or_default())
    }

    /// Most recent `count` body-weight entries, newest first
    pub fn get_recent_weight_entries(&self, count: usize) -> Result<Vec<WeightEntry>> {
        let mut entries = self.weight_entries()?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries.truncate(count);
        Ok(entries)
    }

    /// Store a weight entry, replacing any entry for the same date
    pub fn add_weight_entry(&self, entry: WeightEntry) -> Result<()> {
        let mut entries = self.weight_entries()?;
        entries.retain(|e| e.date != entry.date);
        entries.push(entry);
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        self.write(WEIGHT_ENTRIES_KEY, &entries)
    }

    /// Dates that have a stored log of the given kind, oldest first
    pub fn logged_dates(&self, kind: LogKind) -> Result<Vec<NaiveDate>> {
        let prefix = kind.prefix();
        let dates = self
            .store
            .keys_with_prefix(prefix)?
            .iter()
            .filter_map(|key| NaiveDate::parse_from_str(&key[prefix.len()..], DATE_FORMAT).ok())
            .collect();
        Ok(dates)
    }
}

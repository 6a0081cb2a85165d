//! Body-weight progression with a linear trend (linfa)

use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::models::WeightEntry;

/// Minimum entries required to fit a trend
const MIN_DATA_POINTS: usize = 3;

/// Least-squares fit of weight over days
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTrend {
    pub per_day: f64,
    pub per_week: f64,
    pub r2_score: f64,
    pub data_points: usize,
}

impl WeightTrend {
    fn fit(entries: &[WeightEntry]) -> Option<Self> {
        if entries.len() < MIN_DATA_POINTS {
            return None;
        }

        let first_date = entries.iter().map(|e| e.date).min()?;
        let x_data: Vec<f64> = entries
            .iter()
            .map(|e| (e.date - first_date).num_days() as f64)
            .collect();
        let y_data: Vec<f64> = entries.iter().map(|e| e.weight).collect();

        let n_samples = x_data.len();
        let records = Array2::from_shape_vec((n_samples, 1), x_data).ok()?;
        let targets = Array1::from_vec(y_data);
        let dataset = Dataset::new(records, targets);

        let model = LinearRegression::default().fit(&dataset).ok()?;
        let slope = model.params()[0];
        if !slope.is_finite() {
            return None;
        }

        let predictions = model.predict(&dataset);
        let r2_score = predictions.r2(&dataset).unwrap_or(0.0);

        Some(Self {
            per_day: slope,
            per_week: slope * 7.0,
            r2_score: if r2_score.is_finite() { r2_score } else { 0.0 },
            data_points: n_samples,
        })
    }
}

/// Recent body-weight history, oldest entry first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightProgression {
    pub entries: Vec<WeightEntry>,
    pub start_weight: Option<f64>,
    pub current_weight: Option<f64>,
    /// current - start
    pub change: Option<f64>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub trend: Option<WeightTrend>,
}

impl WeightProgression {
    /// Build from entries in any order
    pub fn from_entries(mut entries: Vec<WeightEntry>) -> Self {
        entries.sort_by(|a, b| a.date.cmp(&b.date));

        let start_weight = entries.first().map(|e| e.weight);
        let current_weight = entries.last().map(|e| e.weight);
        let change = start_weight.zip(current_weight).map(|(s, c)| c - s);
        let min_weight = entries.iter().map(|e| e.weight).reduce(f64::min);
        let max_weight = entries.iter().map(|e| e.weight).reduce(f64::max);
        let trend = WeightTrend::fit(&entries);

        Self {
            entries,
            start_weight,
            current_weight,
            change,
            min_weight,
            max_weight,
            trend,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

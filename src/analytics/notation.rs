//! Set/rep notation parsing
//!
//! Two notations are understood:
//! - `SxR` ("3x8"): S sets of R reps
//! - `R*R*R` ("10*9*8"): one number per set
//!
//! Volume uses the rounded average of a `*` sequence, personal records use
//! its maximum. The two parsers are kept separate on purpose.

use std::sync::LazyLock;

use regex::Regex;

static SETS_X_REPS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d+)x(\d+)").ok());

static REP_SEQUENCE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+(?:\*\d+)+").ok());

static LEADING_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").ok());

/// Parsed sets and reps. `{0, 0}` means nothing usable was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetsReps {
    pub sets: u32,
    pub reps: u32,
}

impl SetsReps {
    pub fn is_empty(&self) -> bool {
        self.sets == 0 && self.reps == 0
    }
}

fn sets_x_reps(actual: &str) -> Option<SetsReps> {
    let caps = SETS_X_REPS.as_ref()?.captures(actual)?;
    Some(SetsReps {
        sets: caps[1].parse().ok()?,
        reps: caps[2].parse().ok()?,
    })
}

fn rep_sequence(actual: &str) -> Option<Vec<u32>> {
    let found = REP_SEQUENCE.as_ref()?.find(actual)?;
    found
        .as_str()
        .split('*')
        .map(|n| n.parse().ok())
        .collect()
}

/// Parse performed notation for volume: `*` sequences yield the rounded average reps
pub fn parse_exercise_format(actual: &str) -> SetsReps {
    if let Some(parsed) = sets_x_reps(actual) {
        return parsed;
    }

    match rep_sequence(actual) {
        Some(reps) if !reps.is_empty() => {
            let total: u64 = reps.iter().map(|&r| u64::from(r)).sum();
            let avg = total as f64 / reps.len() as f64;
            SetsReps {
                sets: reps.len() as u32,
                reps: avg.round() as u32,
            }
        }
        _ => SetsReps::default(),
    }
}

/// Parse performed notation for personal records: `*` sequences yield the best set
pub fn parse_max_reps(actual: &str) -> SetsReps {
    if let Some(parsed) = sets_x_reps(actual) {
        return parsed;
    }

    match rep_sequence(actual) {
        Some(reps) if !reps.is_empty() => SetsReps {
            sets: reps.len() as u32,
            reps: reps.iter().copied().max().unwrap_or(0),
        },
        _ => SetsReps::default(),
    }
}

/// Leading numeric value of a free-text weight ("135", "62.5kg"). Blank or non-numeric is 0.
pub fn parse_weight(weight: &str) -> f64 {
    let trimmed = weight.trim_start();
    LEADING_NUMBER
        .as_ref()
        .and_then(|re| re.find(trimmed))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_x_reps() {
        assert_eq!(parse_exercise_format("3x8"), SetsReps { sets: 3, reps: 8 });
        assert_eq!(parse_exercise_format("5x5"), SetsReps { sets: 5, reps: 5 });
        assert_eq!(parse_exercise_format("12x1"), SetsReps { sets: 12, reps: 1 });
    }

    #[test]
    fn test_sets_x_reps_inside_text() {
        assert_eq!(parse_exercise_format("did 4x10 @ rpe 8"), SetsReps { sets: 4, reps: 10 });
    }

    #[test]
    fn test_sequence_uses_rounded_average() {
        assert_eq!(parse_exercise_format("10*10*10"), SetsReps { sets: 3, reps: 10 });
        // (10 + 9 + 8 + 8) / 4 = 8.75
        assert_eq!(parse_exercise_format("10*9*8*8"), SetsReps { sets: 4, reps: 9 });
        // (10 + 9) / 2 = 9.5 rounds up
        assert_eq!(parse_exercise_format("10*9"), SetsReps { sets: 2, reps: 10 });
    }

    #[test]
    fn test_max_reps_variant() {
        assert_eq!(parse_max_reps("3x8"), SetsReps { sets: 3, reps: 8 });
        assert_eq!(parse_max_reps("6*10*8"), SetsReps { sets: 3, reps: 10 });
        assert_eq!(parse_exercise_format("6*10*8"), SetsReps { sets: 3, reps: 8 });
    }

    #[test]
    fn test_no_match() {
        assert!(parse_exercise_format("").is_empty());
        assert!(parse_exercise_format("felt good").is_empty());
        assert!(parse_exercise_format("12").is_empty());
        assert!(parse_max_reps("abc").is_empty());
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("135"), 135.0);
        assert_eq!(parse_weight(" 62.5kg"), 62.5);
        assert_eq!(parse_weight(""), 0.0);
        assert_eq!(parse_weight("bodyweight"), 0.0);
        assert_eq!(parse_weight(".5"), 0.5);
    }
}

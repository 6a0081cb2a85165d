//! Consecutive-day streaks

use super::series::DailyDataPoint;

/// Days in a row with a workout or any food logged.
///
/// The series is chronological and ends at today. With `include_today` false
/// the count starts from yesterday, since today is still in progress.
pub fn calculate_streak(points: &[DailyDataPoint], include_today: bool) -> u32 {
    calculate_streak_by(points, include_today, |p| p.has_workout || p.has_food)
}

/// Same walk as [`calculate_streak`] with a custom qualifying test
pub fn calculate_streak_by<F>(points: &[DailyDataPoint], include_today: bool, qualifies: F) -> u32
where
    F: Fn(&DailyDataPoint) -> bool,
{
    let end = if include_today {
        points.len()
    } else {
        points.len().saturating_sub(1)
    };

    points[..end]
        .iter()
        .rev()
        .take_while(|p| qualifies(*p))
        .count() as u32
}

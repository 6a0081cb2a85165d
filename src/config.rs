//! Analytics settings

use clap::Args;

pub const DEFAULT_PR_LOOKBACK_DAYS: u32 = 365;
pub const DEFAULT_STREAK_WINDOW_DAYS: u32 = 365;
pub const DEFAULT_WEIGHT_ENTRIES: usize = 30;

/// Longest day window any analytics query loads (about ten years)
pub const MAX_WINDOW_DAYS: u32 = 3650;

#[derive(Debug, Clone, Args)]
pub struct AnalyticsConfig {
    /// Days of history scanned for personal records
    #[arg(
        long,
        env = "FITLOG_PR_DAYS",
        default_value_t = DEFAULT_PR_LOOKBACK_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS))
    )]
    pub pr_lookback_days: u32,

    /// Days loaded when counting streaks (longest countable streak)
    #[arg(
        long,
        env = "FITLOG_STREAK_DAYS",
        default_value_t = DEFAULT_STREAK_WINDOW_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS))
    )]
    pub streak_window_days: u32,

    /// Body-weight entries used for progression
    #[arg(long, env = "FITLOG_WEIGHT_ENTRIES", default_value_t = DEFAULT_WEIGHT_ENTRIES)]
    pub weight_entries: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            pr_lookback_days: DEFAULT_PR_LOOKBACK_DAYS,
            streak_window_days: DEFAULT_STREAK_WINDOW_DAYS,
            weight_entries: DEFAULT_WEIGHT_ENTRIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        analytics: AnalyticsConfig,
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["fitlog"]).unwrap();
        assert_eq!(cli.analytics.pr_lookback_days, DEFAULT_PR_LOOKBACK_DAYS);
        assert_eq!(cli.analytics.streak_window_days, DEFAULT_STREAK_WINDOW_DAYS);
    }

    #[test]
    fn test_window_within_range() {
        let cli = Cli::try_parse_from(["fitlog", "--pr-lookback-days", "3650", "--streak-window-days", "30"]).unwrap();
        assert_eq!(cli.analytics.pr_lookback_days, 3650);
        assert_eq!(cli.analytics.streak_window_days, 30);
    }

    #[test]
    fn test_window_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["fitlog", "--pr-lookback-days", "100000000"]).is_err());
        assert!(Cli::try_parse_from(["fitlog", "--streak-window-days", "3651"]).is_err());
        assert!(Cli::try_parse_from(["fitlog", "--streak-window-days", "0"]).is_err());
    }
}

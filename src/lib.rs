//! fitlog - workout and nutrition log with training analytics

pub mod analytics;
pub mod config;
pub mod db;
pub mod models;
pub mod tui;

pub use analytics::AnalyticsService;
pub use config::AnalyticsConfig;
pub use db::{Database, Storage};

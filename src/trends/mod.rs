// Trends — score history across analysis runs and change alerts.
//
// Both submodules work on `ScoreSnapshot`s, the compact per-run record the
// history store keeps, so they never need a full report.

pub mod alerts;
pub mod history;

pub use alerts::{detect_alerts, Alert, AlertKind, AlertSeverity, AlertThresholds};
pub use history::{
    category_trends, summarize_trend, CategoryTrend, ScoreSnapshot, TrendDirection, TrendSummary,
    DEFAULT_STABLE_BAND,
};

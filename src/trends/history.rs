// Score history — snapshots and trend summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReport;
use crate::triggers::{TriggerCategory, TriggerStatus};

/// Overall change (points) inside which a trend counts as stable.
pub const DEFAULT_STABLE_BAND: f64 = 3.0;

/// The part of a report that trend tracking needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub page_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub overall_score: f64,
    pub category_scores: BTreeMap<TriggerCategory, f64>,
    /// Status per trigger id. Fallback evaluations are left out: their
    /// placeholder status says nothing about the page.
    pub trigger_statuses: BTreeMap<String, TriggerStatus>,
}

impl ScoreSnapshot {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            page_id: report.page_id.clone(),
            analyzed_at: report.analyzed_at,
            overall_score: report.overall_score,
            category_scores: report
                .category_scores
                .iter()
                .map(|c| (c.category, c.score))
                .collect(),
            trigger_statuses: report
                .evaluations
                .iter()
                .filter(|e| !e.is_fallback())
                .map(|e| (e.trigger_id.clone(), e.status))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn from_change(change: f64, stable_band: f64) -> Self {
        match change {
            c if c > stable_band => TrendDirection::Improving,
            c if c < -stable_band => TrendDirection::Declining,
            _ => TrendDirection::Stable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "IMPROVING",
            TrendDirection::Stable => "STABLE",
            TrendDirection::Declining => "DECLINING",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSummary {
    pub runs: usize,
    pub first_at: DateTime<Utc>,
    pub latest_at: DateTime<Utc>,
    pub first: f64,
    pub latest: f64,
    pub change: f64,
    pub average: f64,
    pub best: f64,
    pub worst: f64,
    /// Least-squares slope of the overall score, in points per run
    pub slope: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTrend {
    pub category: TriggerCategory,
    pub first: f64,
    pub latest: f64,
    pub change: f64,
}

fn chronological(history: &[ScoreSnapshot]) -> Vec<&ScoreSnapshot> {
    let mut sorted: Vec<&ScoreSnapshot> = history.iter().collect();
    sorted.sort_by_key(|s| s.analyzed_at);
    sorted
}

/// Least-squares slope of `values` against their index.
fn slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;
    let (mut num, mut den) = (0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Summarize the overall score across runs. Needs at least two snapshots.
/// Input order doesn't matter; snapshots are sorted by `analyzed_at`.
pub fn summarize_trend(history: &[ScoreSnapshot], stable_band: f64) -> Option<TrendSummary> {
    if history.len() < 2 {
        return None;
    }
    let sorted = chronological(history);
    let scores: Vec<f64> = sorted.iter().map(|s| s.overall_score).collect();
    let first = sorted.first()?;
    let latest = sorted.last()?;
    let change = latest.overall_score - first.overall_score;

    Some(TrendSummary {
        runs: scores.len(),
        first_at: first.analyzed_at,
        latest_at: latest.analyzed_at,
        first: first.overall_score,
        latest: latest.overall_score,
        change,
        average: scores.iter().sum::<f64>() / scores.len() as f64,
        best: scores.iter().copied().fold(f64::MIN, f64::max),
        worst: scores.iter().copied().fold(f64::MAX, f64::min),
        slope: slope(&scores),
        direction: TrendDirection::from_change(change, stable_band),
    })
}

/// Change per category between the oldest and newest snapshot. Categories
/// missing from either end are skipped.
pub fn category_trends(history: &[ScoreSnapshot]) -> Vec<CategoryTrend> {
    let sorted = chronological(history);
    let (Some(first), Some(latest)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    if sorted.len() < 2 {
        return Vec::new();
    }
    TriggerCategory::ALL
        .iter()
        .filter_map(|category| {
            let before = *first.category_scores.get(category)?;
            let after = *latest.category_scores.get(category)?;
            Some(CategoryTrend {
                category: *category,
                first: before,
                latest: after,
                change: after - before,
            })
        })
        .collect()
}

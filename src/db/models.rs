// Row types returned by the history store.
//
// Full reports and alerts round-trip through their domain types
// (`AnalysisReport`, `Alert`); these structs cover the summary rows that
// only exist as query results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::triggers::TriggerStatus;

/// One tracked page with its most recent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_id: String,
    pub page_name: String,
    pub runs: u32,
    pub latest_score: f64,
    pub latest_status: TriggerStatus,
    pub last_analyzed_at: DateTime<Utc>,
}

/// Headline figures of one stored run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: i64,
    pub page_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub overall_score: f64,
    pub overall_status: TriggerStatus,
    pub posts_analyzed: u32,
    pub fallback_count: u32,
}

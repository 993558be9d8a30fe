// Database trait — async interface over the history store.
//
// Methods mirror the free functions in queries.rs, so callers hold an
// `Arc<dyn Database>` and never touch rusqlite directly.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{AnalysisSummary, PageRecord};
use crate::analysis::AnalysisReport;
use crate::trends::{Alert, ScoreSnapshot};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Analyses ---

    /// Store a report with its trigger rows and return the analysis id.
    async fn save_analysis(&self, report: &AnalysisReport) -> Result<i64>;

    /// The most recent full report for a page.
    async fn get_latest_report(&self, page_id: &str) -> Result<Option<AnalysisReport>>;

    /// Up to `limit` most recent snapshots of a page, oldest first.
    async fn get_history(&self, page_id: &str, limit: u32) -> Result<Vec<ScoreSnapshot>>;

    /// Headline rows for a page's most recent runs, newest first.
    async fn get_run_summaries(&self, page_id: &str, limit: u32) -> Result<Vec<AnalysisSummary>>;

    /// Every tracked page with its latest score.
    async fn list_pages(&self) -> Result<Vec<PageRecord>>;

    /// Stored runs, for one page or all pages.
    async fn count_analyses(&self, page_id: Option<&str>) -> Result<i64>;

    // --- Alerts ---

    async fn save_alerts(&self, alerts: &[Alert]) -> Result<usize>;

    /// Most recent alerts, newest first.
    async fn get_recent_alerts(&self, page_id: Option<&str>, limit: u32) -> Result<Vec<Alert>>;
}

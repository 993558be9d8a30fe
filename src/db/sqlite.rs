// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// Connection is !Sync, so it sits behind a tokio Mutex. Each method locks,
// does its synchronous rusqlite work, and returns; the guard is never held
// across an .await.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{AnalysisSummary, PageRecord};
use super::queries;
use super::traits::Database;
use crate::analysis::AnalysisReport;
use crate::trends::{Alert, ScoreSnapshot};

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn save_analysis(&self, report: &AnalysisReport) -> Result<i64> {
        let mut conn = self.conn.lock().await;
        queries::save_analysis(&mut conn, report)
    }

    async fn get_latest_report(&self, page_id: &str) -> Result<Option<AnalysisReport>> {
        let conn = self.conn.lock().await;
        queries::get_latest_report(&conn, page_id)
    }

    async fn get_history(&self, page_id: &str, limit: u32) -> Result<Vec<ScoreSnapshot>> {
        let conn = self.conn.lock().await;
        queries::get_history(&conn, page_id, limit)
    }

    async fn get_run_summaries(&self, page_id: &str, limit: u32) -> Result<Vec<AnalysisSummary>> {
        let conn = self.conn.lock().await;
        queries::get_run_summaries(&conn, page_id, limit)
    }

    async fn list_pages(&self) -> Result<Vec<PageRecord>> {
        let conn = self.conn.lock().await;
        queries::list_pages(&conn)
    }

    async fn count_analyses(&self, page_id: Option<&str>) -> Result<i64> {
        let conn = self.conn.lock().await;
        queries::count_analyses(&conn, page_id)
    }

    async fn save_alerts(&self, alerts: &[Alert]) -> Result<usize> {
        let mut conn = self.conn.lock().await;
        queries::save_alerts(&mut conn, alerts)
    }

    async fn get_recent_alerts(&self, page_id: Option<&str>, limit: u32) -> Result<Vec<Alert>> {
        let conn = self.conn.lock().await;
        queries::get_recent_alerts(&conn, page_id, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::db::schema::create_tables;
    use crate::metrics::PageMetrics;
    use chrono::{TimeZone, Utc};

    fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db();
        assert_eq!(db.table_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_trait_report_roundtrip() {
        let db = test_db();
        let metrics: PageMetrics =
            serde_json::from_str(r#"{"page_id": "7", "name": "Bakery"}"#).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let report = analyze(&metrics, at).unwrap();

        db.save_analysis(&report).await.unwrap();
        let loaded = db.get_latest_report("7").await.unwrap().unwrap();
        assert_eq!(loaded.evaluations, report.evaluations);
        assert_eq!(loaded.analyzed_at, at);
        assert_eq!(db.count_analyses(None).await.unwrap(), 1);

        let pages = db.list_pages().await.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_name, "Bakery");
    }

    #[tokio::test]
    async fn test_trait_empty_store() {
        let db = test_db();
        assert!(db.get_latest_report("missing").await.unwrap().is_none());
        assert!(db.get_history("missing", 5).await.unwrap().is_empty());
        assert!(db.get_recent_alerts(None, 5).await.unwrap().is_empty());
        assert!(db.list_pages().await.unwrap().is_empty());
    }
}

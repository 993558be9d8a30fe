// One tracked run: analyze, compare against the previous run, persist.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::analysis::{analyze, AnalysisReport};
use crate::db::Database;
use crate::metrics::PageMetrics;
use crate::trends::{detect_alerts, Alert, AlertThresholds, ScoreSnapshot};

#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub analysis_id: i64,
    pub report: AnalysisReport,
    /// Changes since the previous stored run (empty on the first run)
    pub alerts: Vec<Alert>,
}

pub async fn process_metrics(
    db: &dyn Database,
    metrics: &PageMetrics,
    thresholds: &AlertThresholds,
    now: DateTime<Utc>,
) -> Result<ProcessOutcome> {
    let report = analyze(metrics, now)?;

    let previous = db
        .get_history(&report.page_id, 1)
        .await
        .context("Failed to load previous run")?;
    let current = ScoreSnapshot::from_report(&report);
    let alerts = match previous.last() {
        Some(prev) => detect_alerts(prev, &current, thresholds, now),
        None => Vec::new(),
    };

    let analysis_id = db.save_analysis(&report).await?;
    if !alerts.is_empty() {
        db.save_alerts(&alerts).await?;
    }

    info!(
        page_id = report.page_id.as_str(),
        score = report.overall_score,
        alerts = alerts.len(),
        "Analysis stored"
    );

    Ok(ProcessOutcome {
        analysis_id,
        report,
        alerts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::db::SqliteDatabase;
    use chrono::{Duration, TimeZone};
    use rusqlite::Connection;

    fn db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    fn page(profile: bool) -> PageMetrics {
        let json = if profile {
            r#"{"page_id": "9", "name": "Gym", "profile": {
                "about": "Open 24/7", "website": "https://gym.example", "phone": "555",
                "location": "2 High St", "category": "Gym", "has_cover_photo": true,
                "has_profile_picture": true, "cta_button": "BOOK_NOW", "username": "gym"}}"#
        } else {
            r#"{"page_id": "9", "name": "Gym", "profile": {}}"#
        };
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_first_run_has_no_alerts() {
        let db = db();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let outcome = process_metrics(&db, &page(false), &AlertThresholds::default(), now)
            .await
            .unwrap();
        assert!(outcome.alerts.is_empty());
        assert_eq!(db.count_analyses(Some("9")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_second_run_raises_trigger_alerts() {
        let db = db();
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let thresholds = AlertThresholds::default();
        process_metrics(&db, &page(false), &thresholds, t0).await.unwrap();
        let outcome = process_metrics(&db, &page(true), &thresholds, t0 + Duration::days(7))
            .await
            .unwrap();

        // An empty profile -> a complete one improves all three page triggers
        let improved: Vec<&str> = outcome
            .alerts
            .iter()
            .filter(|a| a.kind == crate::trends::AlertKind::TriggerImproved)
            .map(|a| a.subject.as_str())
            .collect();
        assert_eq!(improved, vec!["PAGE_001", "PAGE_002", "PAGE_003"]);

        let stored = db.get_recent_alerts(Some("9"), 50).await.unwrap();
        assert_eq!(stored.len(), outcome.alerts.len());
        assert_eq!(db.get_history("9", 10).await.unwrap().len(), 2);
    }
}

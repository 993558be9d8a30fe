// Database queries — every SQL statement lives here.
//
// The rest of the crate goes through the `Database` trait; these free
// functions take a Connection directly so they can be tested in isolation.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{AnalysisSummary, PageRecord};
use crate::analysis::AnalysisReport;
use crate::trends::{Alert, AlertKind, AlertSeverity, ScoreSnapshot};
use crate::triggers::{TriggerCategory, TriggerStatus};

/// Timestamps are stored as fixed-width RFC 3339 UTC so they sort as text.
fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn parse_time(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, format!("bad timestamp {s}: {e}")))
}

fn parse_status(idx: usize, s: &str) -> rusqlite::Result<TriggerStatus> {
    TriggerStatus::parse(s).ok_or_else(|| conversion_error(idx, format!("unknown status {s}")))
}

// --- Analyses ---

/// Store one report and its per-trigger rows. Returns the analysis id.
pub fn save_analysis(conn: &mut Connection, report: &AnalysisReport) -> Result<i64> {
    let categories: BTreeMap<TriggerCategory, f64> = report
        .category_scores
        .iter()
        .map(|c| (c.category, c.score))
        .collect();
    let categories_json = serde_json::to_string(&categories)?;
    let report_json = serde_json::to_string(report)?;

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO analyses
            (page_id, page_name, industry, analyzed_at, overall_score, overall_status,
             posts_analyzed, category_scores, report_json, fallback_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            report.page_id,
            report.page_name,
            report.industry,
            format_time(&report.analyzed_at),
            report.overall_score,
            report.overall_status.as_str(),
            report.posts_analyzed as i64,
            categories_json,
            report_json,
            report.fallback_count() as i64,
        ],
    )?;
    let analysis_id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare(
            "INSERT INTO trigger_results
                (analysis_id, trigger_id, category, category_key, score, status, fallback_reason)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for evaluation in &report.evaluations {
            stmt.execute(params![
                analysis_id,
                evaluation.trigger_id,
                evaluation.category.as_str(),
                evaluation.category_key,
                evaluation.score,
                evaluation.status.as_str(),
                evaluation.details.as_ref().map(|d| d.reason.as_str()),
            ])?;
        }
    }

    tx.commit()?;
    Ok(analysis_id)
}

/// The most recent full report for a page.
pub fn get_latest_report(conn: &Connection, page_id: &str) -> Result<Option<AnalysisReport>> {
    let json: Option<String> = conn
        .query_row(
            "SELECT report_json FROM analyses
             WHERE page_id = ?1
             ORDER BY analyzed_at DESC, id DESC
             LIMIT 1",
            params![page_id],
            |row| row.get(0),
        )
        .optional()?;

    match json {
        Some(json) => {
            let report = serde_json::from_str(&json)
                .with_context(|| format!("Stored report for {page_id} is not valid"))?;
            Ok(Some(report))
        }
        None => Ok(None),
    }
}

/// Up to `limit` most recent snapshots for a page, oldest first.
pub fn get_history(conn: &Connection, page_id: &str, limit: u32) -> Result<Vec<ScoreSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, analyzed_at, overall_score, category_scores FROM analyses
         WHERE page_id = ?1
         ORDER BY analyzed_at DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![page_id, limit], |row| {
        let analyzed_at: String = row.get(1)?;
        Ok((
            row.get::<_, i64>(0)?,
            parse_time(1, &analyzed_at)?,
            row.get::<_, f64>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut runs = Vec::new();
    for row in rows {
        runs.push(row?);
    }

    let mut status_stmt = conn.prepare(
        "SELECT trigger_id, status FROM trigger_results
         WHERE analysis_id = ?1 AND fallback_reason IS NULL",
    )?;

    let mut snapshots = Vec::with_capacity(runs.len());
    for (analysis_id, analyzed_at, overall_score, categories_json) in runs {
        let category_scores: BTreeMap<TriggerCategory, f64> =
            serde_json::from_str(&categories_json)
                .with_context(|| format!("Bad category scores on analysis {analysis_id}"))?;

        let statuses = status_stmt.query_map(params![analysis_id], |row| {
            let status: String = row.get(1)?;
            Ok((row.get::<_, String>(0)?, parse_status(1, &status)?))
        })?;
        let mut trigger_statuses = BTreeMap::new();
        for status in statuses {
            let (trigger_id, status) = status?;
            trigger_statuses.insert(trigger_id, status);
        }

        snapshots.push(ScoreSnapshot {
            page_id: page_id.to_string(),
            analyzed_at,
            overall_score,
            category_scores,
            trigger_statuses,
        });
    }

    snapshots.reverse();
    Ok(snapshots)
}

/// Headline rows for the most recent runs of a page, newest first.
pub fn get_run_summaries(
    conn: &Connection,
    page_id: &str,
    limit: u32,
) -> Result<Vec<AnalysisSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, page_id, analyzed_at, overall_score, overall_status,
                posts_analyzed, fallback_count
         FROM analyses
         WHERE page_id = ?1
         ORDER BY analyzed_at DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![page_id, limit], |row| {
        let analyzed_at: String = row.get(2)?;
        let status: String = row.get(4)?;
        Ok(AnalysisSummary {
            id: row.get(0)?,
            page_id: row.get(1)?,
            analyzed_at: parse_time(2, &analyzed_at)?,
            overall_score: row.get(3)?,
            overall_status: parse_status(4, &status)?,
            posts_analyzed: row.get(5)?,
            fallback_count: row.get(6)?,
        })
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries.push(row?);
    }
    Ok(summaries)
}

/// Every tracked page with its latest run, best score first.
pub fn list_pages(conn: &Connection) -> Result<Vec<PageRecord>> {
    let mut stmt = conn.prepare(
        "SELECT a.page_id, a.page_name, a.overall_score, a.overall_status, a.analyzed_at,
                (SELECT COUNT(*) FROM analyses b WHERE b.page_id = a.page_id)
         FROM analyses a
         WHERE a.id = (
             SELECT c.id FROM analyses c
             WHERE c.page_id = a.page_id
             ORDER BY c.analyzed_at DESC, c.id DESC
             LIMIT 1
         )
         ORDER BY a.overall_score DESC, a.page_id",
    )?;
    let rows = stmt.query_map([], |row| {
        let status: String = row.get(3)?;
        let analyzed_at: String = row.get(4)?;
        Ok(PageRecord {
            page_id: row.get(0)?,
            page_name: row.get(1)?,
            latest_score: row.get(2)?,
            latest_status: parse_status(3, &status)?,
            last_analyzed_at: parse_time(4, &analyzed_at)?,
            runs: row.get(5)?,
        })
    })?;

    let mut pages = Vec::new();
    for row in rows {
        pages.push(row?);
    }
    Ok(pages)
}

/// Number of stored runs, for one page or all of them.
pub fn count_analyses(conn: &Connection, page_id: Option<&str>) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM analyses WHERE (?1 IS NULL OR page_id = ?1)",
        params![page_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

// --- Alerts ---

pub fn save_alerts(conn: &mut Connection, alerts: &[Alert]) -> Result<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO alerts
                (page_id, kind, severity, subject, previous_value, current_value,
                 message, detected_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for alert in alerts {
            stmt.execute(params![
                alert.page_id,
                alert.kind.as_str(),
                alert.severity.as_str(),
                alert.subject,
                alert.previous,
                alert.current,
                alert.message,
                format_time(&alert.detected_at),
            ])?;
        }
    }
    tx.commit()?;
    Ok(alerts.len())
}

/// Most recent alerts, newest first, optionally for one page.
pub fn get_recent_alerts(
    conn: &Connection,
    page_id: Option<&str>,
    limit: u32,
) -> Result<Vec<Alert>> {
    let mut stmt = conn.prepare(
        "SELECT page_id, kind, severity, subject, previous_value, current_value,
                message, detected_at
         FROM alerts
         WHERE (?1 IS NULL OR page_id = ?1)
         ORDER BY detected_at DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![page_id, limit], |row| {
        let kind: String = row.get(1)?;
        let severity: String = row.get(2)?;
        let detected_at: String = row.get(7)?;
        Ok(Alert {
            page_id: row.get(0)?,
            kind: AlertKind::parse(&kind)
                .ok_or_else(|| conversion_error(1, format!("unknown alert kind {kind}")))?,
            severity: AlertSeverity::parse(&severity)
                .ok_or_else(|| conversion_error(2, format!("unknown severity {severity}")))?,
            subject: row.get(3)?,
            previous: row.get(4)?,
            current: row.get(5)?,
            message: row.get(6)?,
            detected_at: parse_time(7, &detected_at)?,
        })
    })?;

    let mut alerts = Vec::new();
    for row in rows {
        alerts.push(row?);
    }
    Ok(alerts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::scoring::CategoryScore;
    use crate::triggers::{
        create_fallback_evaluation, FallbackReason, TriggerEvaluation,
    };
    use chrono::{Duration, TimeZone};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn at(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::days(day)
    }

    fn evaluation(id: &str, score: f64) -> TriggerEvaluation {
        TriggerEvaluation {
            trigger_id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: TriggerCategory::Basic,
            score,
            status: TriggerStatus::from_score(score),
            category_key: Some("GOOD".to_string()),
            recommendation: Some("Keep going".to_string()),
            details: None,
        }
    }

    fn report(page_id: &str, day: i64, overall: f64) -> AnalysisReport {
        AnalysisReport {
            page_id: page_id.to_string(),
            page_name: format!("Page {page_id}"),
            industry: "default".to_string(),
            benchmark_name: "All industries".to_string(),
            analyzed_at: at(day),
            period_days: 90,
            posts_analyzed: 12,
            overall_score: overall,
            overall_status: TriggerStatus::from_score(overall),
            category_scores: vec![CategoryScore {
                category: TriggerCategory::Basic,
                score: overall,
                status: TriggerStatus::from_score(overall),
                weight: 0.35,
                trigger_count: 2,
                fallback_count: 1,
            }],
            evaluations: vec![
                evaluation("BASIC_001", overall),
                create_fallback_evaluation(
                    "BASIC_002",
                    "Interaction mix",
                    "",
                    TriggerCategory::Basic,
                    FallbackReason::InsufficientData,
                    "Not enough data",
                ),
            ],
        }
    }

    #[test]
    fn test_latest_report_round_trip() {
        let mut conn = setup();
        assert!(get_latest_report(&conn, "1").unwrap().is_none());
        save_analysis(&mut conn, &report("1", 0, 55.0)).unwrap();
        save_analysis(&mut conn, &report("1", 3, 72.5)).unwrap();

        let latest = get_latest_report(&conn, "1").unwrap().unwrap();
        assert_eq!(latest.overall_score, 72.5);
        assert_eq!(latest.analyzed_at, at(3));
        assert_eq!(latest.evaluations.len(), 2);
        assert!(latest.evaluations[1].is_fallback());
    }

    #[test]
    fn test_history_is_chronological_and_skips_fallbacks() {
        let mut conn = setup();
        // Inserted out of order
        save_analysis(&mut conn, &report("1", 5, 80.0)).unwrap();
        save_analysis(&mut conn, &report("1", 0, 40.0)).unwrap();
        save_analysis(&mut conn, &report("1", 2, 60.0)).unwrap();
        save_analysis(&mut conn, &report("2", 1, 10.0)).unwrap();

        let history = get_history(&conn, "1", 10).unwrap();
        let scores: Vec<f64> = history.iter().map(|s| s.overall_score).collect();
        assert_eq!(scores, vec![40.0, 60.0, 80.0]);
        assert_eq!(history[0].trigger_statuses.len(), 1);
        assert_eq!(history[0].category_scores[&TriggerCategory::Basic], 40.0);

        // The limit keeps the newest runs
        let recent = get_history(&conn, "1", 2).unwrap();
        let scores: Vec<f64> = recent.iter().map(|s| s.overall_score).collect();
        assert_eq!(scores, vec![60.0, 80.0]);
    }

    #[test]
    fn test_history_matches_snapshot_from_report() {
        let mut conn = setup();
        let r = report("1", 0, 66.0);
        save_analysis(&mut conn, &r).unwrap();
        let history = get_history(&conn, "1", 1).unwrap();
        assert_eq!(history[0], ScoreSnapshot::from_report(&r));
    }

    #[test]
    fn test_list_pages_and_counts() {
        let mut conn = setup();
        save_analysis(&mut conn, &report("1", 0, 50.0)).unwrap();
        save_analysis(&mut conn, &report("1", 1, 90.0)).unwrap();
        save_analysis(&mut conn, &report("2", 0, 70.0)).unwrap();

        let pages = list_pages(&conn).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_id, "1");
        assert_eq!(pages[0].runs, 2);
        assert_eq!(pages[0].latest_score, 90.0);
        assert_eq!(pages[0].latest_status, TriggerStatus::Excellent);
        assert_eq!(pages[1].runs, 1);

        assert_eq!(count_analyses(&conn, None).unwrap(), 3);
        assert_eq!(count_analyses(&conn, Some("2")).unwrap(), 1);
        assert_eq!(count_analyses(&conn, Some("3")).unwrap(), 0);
    }

    #[test]
    fn test_run_summaries() {
        let mut conn = setup();
        save_analysis(&mut conn, &report("1", 0, 50.0)).unwrap();
        save_analysis(&mut conn, &report("1", 1, 75.0)).unwrap();
        let runs = get_run_summaries(&conn, "1", 5).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].overall_score, 75.0);
        assert_eq!(runs[0].fallback_count, 1);
        assert_eq!(runs[0].posts_analyzed, 12);
    }

    #[test]
    fn test_alerts_round_trip() {
        let mut conn = setup();
        let alert = |page: &str, day: i64, severity| Alert {
            page_id: page.to_string(),
            kind: AlertKind::OverallScoreChange,
            severity,
            subject: "OVERALL".to_string(),
            previous: "70.0".to_string(),
            current: "55.0".to_string(),
            message: "Overall score dropped 15.0 points (70.0 -> 55.0)".to_string(),
            detected_at: at(day),
        };
        let saved = save_alerts(
            &mut conn,
            &[
                alert("1", 0, AlertSeverity::Warning),
                alert("1", 2, AlertSeverity::Critical),
                alert("2", 1, AlertSeverity::Info),
            ],
        )
        .unwrap();
        assert_eq!(saved, 3);

        let all = get_recent_alerts(&conn, None, 10).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].severity, AlertSeverity::Critical);
        assert_eq!(all[0].detected_at, at(2));

        let page_two = get_recent_alerts(&conn, Some("2"), 10).unwrap();
        assert_eq!(page_two.len(), 1);
        assert_eq!(page_two[0].severity, AlertSeverity::Info);

        assert_eq!(get_recent_alerts(&conn, None, 1).unwrap().len(), 1);
    }
}

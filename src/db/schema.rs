// Database schema — table creation and migrations.
//
// A `schema_version` table tracks which migrations have run; each migration
// is a closure executing its SQL once.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet. Safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per analysis run; the full report is kept as JSON
        CREATE TABLE IF NOT EXISTS analyses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_id TEXT NOT NULL,
            page_name TEXT NOT NULL,
            industry TEXT NOT NULL,
            analyzed_at TEXT NOT NULL,          -- RFC 3339, UTC
            overall_score REAL NOT NULL,        -- 0.0 to 100.0
            overall_status TEXT NOT NULL,
            posts_analyzed INTEGER NOT NULL DEFAULT 0,
            category_scores TEXT NOT NULL,      -- JSON object, category -> score
            report_json TEXT NOT NULL
        );

        -- One row per evaluated trigger per run
        CREATE TABLE IF NOT EXISTS trigger_results (
            analysis_id INTEGER NOT NULL REFERENCES analyses(id) ON DELETE CASCADE,
            trigger_id TEXT NOT NULL,
            category TEXT NOT NULL,
            category_key TEXT,
            score REAL NOT NULL,
            status TEXT NOT NULL,
            fallback_reason TEXT,               -- NULL for real evaluations
            PRIMARY KEY (analysis_id, trigger_id)
        );

        CREATE TABLE IF NOT EXISTS alerts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            severity TEXT NOT NULL,
            subject TEXT NOT NULL,
            previous_value TEXT NOT NULL,
            current_value TEXT NOT NULL,
            message TEXT NOT NULL,
            detected_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_analyses_page
            ON analyses(page_id, analyzed_at);

        CREATE INDEX IF NOT EXISTS idx_alerts_page
            ON alerts(page_id, detected_at);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: count of fallback evaluations per run, so history
    // listings can flag runs on thin data without decoding the report.
    run_migration(conn, 2, |c| {
        c.execute_batch(
            "ALTER TABLE analyses ADD COLUMN fallback_count INTEGER NOT NULL DEFAULT 0;",
        )
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

/// Count the user tables in the database (shown by `pagegrade init`).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // schema_version, analyses, trigger_results, alerts
        assert_eq!(table_count(&conn).unwrap(), 4);
    }

    #[test]
    fn test_migrations_recorded_once() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let versions: Vec<i64> = conn
            .prepare("SELECT version FROM schema_version ORDER BY version")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(versions, vec![1, 2]);
    }

    #[test]
    fn test_migration_v2_adds_fallback_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn.execute(
            "INSERT INTO analyses (page_id, page_name, industry, analyzed_at, overall_score,
                                   overall_status, category_scores, report_json, fallback_count)
             VALUES ('1', 'Cafe', 'default', '2024-01-01T00:00:00Z', 50.0, 'NEEDS_IMPROVEMENT',
                     '{}', '{}', 3)",
            [],
        )
        .unwrap();
        let count: i64 = conn
            .query_row("SELECT fallback_count FROM analyses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }
}

// System status display — DB stats, tracked pages, recent alerts.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;
use crate::output::terminal;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_display_path: &str) -> Result<()> {
    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let analyses = db.count_analyses(None).await?;
    println!("Analyses stored: {analyses}");

    let pages = db.list_pages().await?;
    terminal::display_pages(&pages);
    if pages.is_empty() {
        println!("  Run `pagegrade analyze <snapshot.json | page id>` to add one");
    }

    let alerts = db.get_recent_alerts(None, 5).await?;
    if alerts.is_empty() {
        println!("Recent alerts: none");
    } else {
        println!("Recent alerts: {} most recent:", alerts.len());
        for alert in &alerts {
            println!(
                "  [{}] {} ({})",
                alert.severity,
                alert.message,
                alert.detected_at.format("%Y-%m-%d")
            );
        }
    }

    Ok(())
}

/// Whether the database file exists yet.
pub fn is_initialized(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

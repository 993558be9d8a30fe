// Markdown report generation for `pagegrade report`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::AnalysisReport;
use crate::trends::TrendSummary;
use crate::triggers::TriggerCategory;

/// How many recommendations the report lists up front.
const TOP_RECOMMENDATIONS: usize = 5;

/// Render a report (plus an optional trend) as Markdown.
pub fn render_report(report: &AnalysisReport, trend: Option<&TrendSummary>) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# Page audit: {}", report.page_name);
    let _ = writeln!(md);
    let _ = writeln!(
        md,
        "Analyzed {} against the *{}* benchmark, covering {} posts over {} days.",
        report.analyzed_at.format("%Y-%m-%d %H:%M UTC"),
        report.benchmark_name,
        report.posts_analyzed,
        report.period_days
    );
    let _ = writeln!(md);
    let _ = writeln!(
        md,
        "**Overall score: {:.1}/100 ({})**",
        report.overall_score,
        report.overall_status.label()
    );

    if let Some(trend) = trend {
        let _ = writeln!(md);
        let _ = writeln!(
            md,
            "Trend over {} runs: {} ({:+.1} points since {}).",
            trend.runs,
            trend.direction.as_str().to_lowercase(),
            trend.change,
            trend.first_at.format("%Y-%m-%d")
        );
    }

    let _ = writeln!(md);
    let _ = writeln!(md, "## Scores by category");
    let _ = writeln!(md);
    let _ = writeln!(md, "| Category | Weight | Score | Status |");
    let _ = writeln!(md, "|---|---:|---:|---|");
    for category in &report.category_scores {
        let _ = writeln!(
            md,
            "| {} | {:.0}% | {:.1} | {} |",
            category.category.label(),
            category.weight * 100.0,
            category.score,
            category.status.label()
        );
    }

    let ranked = report.ranked_recommendations(TOP_RECOMMENDATIONS);
    let _ = writeln!(md);
    let _ = writeln!(md, "## Top recommendations");
    let _ = writeln!(md);
    if ranked.is_empty() {
        let _ = writeln!(md, "Every measurable check is excellent.");
    }
    for (i, evaluation) in ranked.iter().enumerate() {
        let _ = writeln!(
            md,
            "{}. **{}** ({:.0}, {}): {}",
            i + 1,
            evaluation.name,
            evaluation.score,
            evaluation.status.label(),
            evaluation.recommendation.as_deref().unwrap_or("")
        );
    }

    let _ = writeln!(md);
    let _ = writeln!(md, "## All checks");
    for category in TriggerCategory::ALL {
        let members: Vec<_> = report
            .evaluations
            .iter()
            .filter(|e| e.category == category)
            .collect();
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(md);
        let _ = writeln!(md, "### {}", category.label());
        let _ = writeln!(md);
        let _ = writeln!(md, "| Check | Result | Score | Status |");
        let _ = writeln!(md, "|---|---|---:|---|");
        for evaluation in members {
            let result = match &evaluation.details {
                Some(details) => format!("_{}_", details.context),
                None => evaluation.category_key.clone().unwrap_or_default(),
            };
            let _ = writeln!(
                md,
                "| {} | {} | {:.0} | {} |",
                evaluation.name,
                result,
                evaluation.score,
                evaluation.status.label()
            );
        }
    }

    md
}

/// Write the Markdown report to `output_path`, creating parent directories.
pub fn generate_report(
    report: &AnalysisReport,
    trend: Option<&TrendSummary>,
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create report directory {}", parent.display())
            })?;
        }
    }
    std::fs::write(output_path, render_report(report, trend))
        .with_context(|| format!("Failed to write report to {}", output_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::metrics::PageMetrics;
    use chrono::Utc;

    fn report() -> AnalysisReport {
        let metrics: PageMetrics =
            serde_json::from_str(r#"{"page_id": "1", "name": "Corner Cafe", "profile": {}}"#)
                .unwrap();
        analyze(&metrics, Utc::now()).unwrap()
    }

    #[test]
    fn test_render_report_sections() {
        let md = render_report(&report(), None);
        assert!(md.starts_with("# Page audit: Corner Cafe"));
        assert!(md.contains("## Scores by category"));
        assert!(md.contains("### Page settings"));
        assert!(md.contains("| Profile completeness | INCOMPLETE |"));
        // Fallbacks show their context instead of a key
        assert!(md.contains("_Not enough data"));
    }

    #[test]
    fn test_generate_report_creates_directories() {
        let dir = std::env::temp_dir().join(format!("pagegrade-md-{}", std::process::id()));
        let path = dir.join("nested").join("report.md");
        generate_report(&report(), None, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Corner Cafe"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

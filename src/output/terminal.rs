// Colored terminal output for reports, trends, alerts and comparisons.
//
// main.rs and status.rs delegate here for everything printed to stdout.

use colored::Colorize;

use crate::analysis::AnalysisReport;
use crate::compare::CompetitorComparison;
use crate::db::models::{AnalysisSummary, PageRecord};
use crate::trends::{Alert, AlertSeverity, CategoryTrend, TrendDirection, TrendSummary};
use crate::triggers::debug::{render_trace, TriggerTrace};
use crate::triggers::{TriggerDefinition, TriggerEvaluation, TriggerStatus};

/// Display a full analysis report.
pub fn display_report(report: &AnalysisReport, recommendation_limit: usize) {
    println!(
        "\n{}",
        format!("=== {} ({}) ===", report.page_name, report.page_id).bold()
    );
    println!(
        "  Benchmark: {}  |  Window: {} days  |  Posts: {}",
        report.benchmark_name, report.period_days, report.posts_analyzed
    );
    println!(
        "\n  Overall score: {}  {}",
        format!("{:.1}/100", report.overall_score).bold(),
        colorize_status(report.overall_status)
    );
    println!();

    for category in &report.category_scores {
        let note = if category.fallback_count > 0 {
            format!("({} of {} without data)", category.fallback_count, category.trigger_count)
                .dimmed()
                .to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<20} {} {:>5.1}  {:<18} {}",
            category.category.label(),
            super::score_bar(category.score, 20),
            category.score,
            colorize_status(category.status),
            note
        );
    }

    let fallbacks = report.fallback_count();
    if fallbacks > 0 {
        println!(
            "\n  {} {} of {} checks had too little data and scored a neutral 50",
            "~".yellow(),
            fallbacks,
            report.evaluations.len()
        );
    }

    display_recommendations(&report.ranked_recommendations(recommendation_limit));
}

/// Display ranked recommendations, worst first.
pub fn display_recommendations(ranked: &[&TriggerEvaluation]) {
    if ranked.is_empty() {
        println!("\n  {}", "No recommendations: every measurable check is excellent.".green());
        return;
    }

    println!("\n{}", format!("=== Top {} recommendations ===", ranked.len()).bold());
    for (i, evaluation) in ranked.iter().enumerate() {
        println!(
            "\n  {:>2}. {} {} [{}]",
            i + 1,
            evaluation.name.bold(),
            format!("{:.0}", evaluation.score).dimmed(),
            colorize_status(evaluation.status)
        );
        if let Some(text) = &evaluation.recommendation {
            println!("      {}", text);
        }
    }
    println!();
}

/// Display per-trigger traces (the `--explain` view).
pub fn display_traces(traces: &[TriggerTrace]) {
    println!("\n{}", "=== Trigger traces ===".bold());
    for trace in traces {
        let rendered = render_trace(trace);
        let text = if trace.reason.is_some() {
            rendered.dimmed().to_string()
        } else {
            rendered
        };
        println!("{text}");
    }
}

/// Display stored runs and the trend across them.
pub fn display_history(
    page_id: &str,
    runs: &[AnalysisSummary],
    trend: Option<&TrendSummary>,
    categories: &[CategoryTrend],
) {
    if runs.is_empty() {
        println!("No stored analyses for page {page_id}. Run `pagegrade analyze` first.");
        return;
    }

    println!("\n{}", format!("=== History for {page_id} ({} runs) ===", runs.len()).bold());
    println!(
        "  {:<20} {:>6}  {:<18} {:>5}  {:>9}",
        "Analyzed".dimmed(),
        "Score".dimmed(),
        "Status".dimmed(),
        "Posts".dimmed(),
        "No data".dimmed(),
    );
    for run in runs {
        println!(
            "  {:<20} {:>6.1}  {:<18} {:>5}  {:>9}",
            run.analyzed_at.format("%Y-%m-%d %H:%M"),
            run.overall_score,
            colorize_status(run.overall_status),
            run.posts_analyzed,
            run.fallback_count
        );
    }

    let Some(trend) = trend else {
        println!("\n  Trend needs at least two runs.");
        return;
    };
    println!(
        "\n  Trend: {}  {:+.1} points ({:.1} -> {:.1}), {:+.2} per run",
        colorize_direction(trend.direction),
        trend.change,
        trend.first,
        trend.latest,
        trend.slope
    );
    println!(
        "  Average {:.1}  |  best {:.1}  |  worst {:.1}",
        trend.average, trend.best, trend.worst
    );
    for category in categories {
        let change = format!("{:+.1}", category.change);
        let change = if category.change < 0.0 {
            change.red()
        } else if category.change > 0.0 {
            change.green()
        } else {
            change.normal()
        };
        println!(
            "    {:<20} {:>5.1} -> {:>5.1}  {}",
            category.category.label(),
            category.first,
            category.latest,
            change
        );
    }
}

/// Display alerts, newest first.
pub fn display_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No alerts recorded.");
        return;
    }

    println!("\n{}", format!("=== Alerts ({}) ===", alerts.len()).bold());
    for alert in alerts {
        println!(
            "  {} {:<8} {:<12} {}",
            alert.detected_at.format("%Y-%m-%d"),
            colorize_severity(alert.severity),
            alert.page_id,
            alert.message
        );
    }
    println!();
}

/// Display a competitor comparison.
pub fn display_comparison(comparison: &CompetitorComparison) {
    let total = comparison.competitors.len() + 1;
    println!(
        "\n{}",
        format!(
            "=== {} vs. {} competitors ===",
            comparison.own.page_name,
            comparison.competitors.len()
        )
        .bold()
    );
    println!(
        "  Rank {}/{} with {:.1}/100",
        comparison.own_rank.to_string().bold(),
        total,
        comparison.own.overall_score
    );
    for page in &comparison.competitors {
        println!(
            "    {:<30} {:>5.1}  {}",
            super::truncate_chars(&page.page_name, 28),
            page.overall_score,
            colorize_status(page.overall_status)
        );
    }

    println!("\n  {:<20} {:>6} {:>8} {:>7}", "", "Own".dimmed(), "Others".dimmed(), "Gap".dimmed());
    for gap in &comparison.category_gaps {
        let delta = format!("{:+.1}", gap.gap);
        let delta = if comparison.weaknesses.contains(&gap.category) {
            delta.red()
        } else if comparison.strengths.contains(&gap.category) {
            delta.green()
        } else {
            delta.normal()
        };
        println!(
            "  {:<20} {:>6.1} {:>8.1} {:>7}",
            gap.category.label(),
            gap.own_score,
            gap.competitor_avg,
            delta
        );
    }

    if !comparison.trigger_gaps.is_empty() {
        println!("\n  {}", "Where competitors pull ahead:".bold());
        for gap in &comparison.trigger_gaps {
            println!(
                "    {} {:.0} vs {:.0}  {}",
                gap.name,
                gap.own_score,
                gap.competitor_avg,
                gap.recommendation.as_deref().unwrap_or("").dimmed()
            );
        }
    }
    println!();
}

/// Display the trigger catalog.
pub fn display_catalog<'a>(definitions: impl Iterator<Item = &'a TriggerDefinition>) {
    println!("\n{}", "=== Trigger catalog ===".bold());
    let mut current = None;
    for definition in definitions {
        if current != Some(definition.category) {
            current = Some(definition.category);
            println!(
                "\n  {} (weight {:.0}%)",
                definition.category.label().bold(),
                definition.category.weight() * 100.0
            );
        }
        println!(
            "    {:<10} {:<32} {}",
            definition.id,
            definition.name,
            format!("needs {}", definition.requirement).dimmed()
        );
    }
    println!();
}

/// Display tracked pages with their latest scores.
pub fn display_pages(pages: &[PageRecord]) {
    if pages.is_empty() {
        println!("Tracked pages: none yet");
        return;
    }
    println!("Tracked pages: {}", pages.len());
    for page in pages {
        println!(
            "  {:<30} {:>5.1}  {:<18} {} runs, last {}",
            super::truncate_chars(&page.page_name, 28),
            page.latest_score,
            colorize_status(page.latest_status),
            page.runs,
            page.last_analyzed_at.format("%Y-%m-%d")
        );
    }
}

/// Colorize a status band.
pub fn colorize_status(status: TriggerStatus) -> colored::ColoredString {
    let label = status.label();
    match status {
        TriggerStatus::Excellent => label.green().bold(),
        TriggerStatus::Good => label.green(),
        TriggerStatus::NeedsImprovement => label.yellow(),
        TriggerStatus::Critical => label.red().bold(),
    }
}

fn colorize_severity(severity: AlertSeverity) -> colored::ColoredString {
    let label = severity.as_str();
    match severity {
        AlertSeverity::Critical => label.red().bold(),
        AlertSeverity::Warning => label.yellow(),
        AlertSeverity::Info => label.cyan(),
    }
}

fn colorize_direction(direction: TrendDirection) -> colored::ColoredString {
    let label = direction.as_str();
    match direction {
        TrendDirection::Improving => label.green(),
        TrendDirection::Stable => label.normal(),
        TrendDirection::Declining => label.red(),
    }
}

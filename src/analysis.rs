// One analysis run: metrics snapshot in, scored report out.
//
// Pure: no I/O, no clock. The caller supplies `analyzed_at` so the same
// snapshot always produces the same report.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::benchmarks::find_benchmark;
use crate::metrics::summary::PageSummary;
use crate::metrics::PageMetrics;
use crate::scoring::{category_scores, overall_score, CategoryScore};
use crate::triggers::catalog::{self, CATALOG};
use crate::triggers::debug::{trace, TriggerTrace};
use crate::triggers::{TriggerCategory, TriggerEvaluation, TriggerInput, TriggerStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub page_id: String,
    pub page_name: String,
    /// Benchmark code actually used (after fallback to default)
    pub industry: String,
    pub benchmark_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub period_days: u32,
    pub posts_analyzed: usize,
    pub overall_score: f64,
    pub overall_status: TriggerStatus,
    pub category_scores: Vec<CategoryScore>,
    pub evaluations: Vec<TriggerEvaluation>,
}

impl AnalysisReport {
    /// Actionable evaluations, worst first. Fallbacks and EXCELLENT results
    /// are skipped; ties go to the heavier category, then the trigger id.
    pub fn ranked_recommendations(&self, limit: usize) -> Vec<&TriggerEvaluation> {
        let mut ranked: Vec<&TriggerEvaluation> = self
            .evaluations
            .iter()
            .filter(|e| !e.is_fallback() && e.status != TriggerStatus::Excellent)
            .collect();
        ranked.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| b.category.weight().total_cmp(&a.category.weight()))
                .then_with(|| a.trigger_id.cmp(&b.trigger_id))
        });
        ranked.truncate(limit);
        ranked
    }

    pub fn category_score(&self, category: TriggerCategory) -> Option<&CategoryScore> {
        self.category_scores.iter().find(|c| c.category == category)
    }

    pub fn evaluation(&self, trigger_id: &str) -> Option<&TriggerEvaluation> {
        self.evaluations.iter().find(|e| e.trigger_id == trigger_id)
    }

    pub fn fallback_count(&self) -> usize {
        self.evaluations.iter().filter(|e| e.is_fallback()).count()
    }
}

/// Evaluate the whole catalog against one snapshot.
pub fn analyze(metrics: &PageMetrics, analyzed_at: DateTime<Utc>) -> Result<AnalysisReport> {
    let summary = PageSummary::from_metrics(metrics);
    let benchmark = find_benchmark(metrics.industry.as_deref());
    let input = TriggerInput {
        summary: &summary,
        benchmark,
    };

    let evaluations = catalog::evaluate_all(&input)?;
    let categories = category_scores(&evaluations);
    let overall = overall_score(&categories);

    Ok(AnalysisReport {
        page_id: metrics.page_id.clone(),
        page_name: metrics.name.clone(),
        industry: benchmark.code.to_string(),
        benchmark_name: benchmark.name.to_string(),
        analyzed_at,
        period_days: metrics.period_days,
        posts_analyzed: summary.total_posts,
        overall_score: overall,
        overall_status: TriggerStatus::from_score(overall),
        category_scores: categories,
        evaluations,
    })
}

/// Per-trigger traces for the `--explain` view.
pub fn explain(metrics: &PageMetrics) -> Result<Vec<TriggerTrace>> {
    let summary = PageSummary::from_metrics(metrics);
    let benchmark = find_benchmark(metrics.industry.as_deref());
    let input = TriggerInput {
        summary: &summary,
        benchmark,
    };
    CATALOG.iter().map(|t| trace(*t, &input)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_page() -> PageMetrics {
        serde_json::from_str(r#"{"page_id": "1", "name": "Empty", "industry": "RETAIL"}"#).unwrap()
    }

    #[test]
    fn test_empty_page_falls_back_except_frequency() {
        let report = analyze(&empty_page(), Utc::now()).unwrap();
        assert_eq!(report.evaluations.len(), 27);
        // Posting nothing for 90 days is a measurable result, not missing data
        assert_eq!(report.fallback_count(), 26);
        let ranked = report.ranked_recommendations(10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].trigger_id, "TIME_001");
        assert_eq!(ranked[0].category_key.as_deref(), Some("TOO_LOW"));

        // Timing is (25 + 50 + 50) / 3, everything else 50
        let timing = report.category_score(TriggerCategory::Timing).unwrap();
        assert!((timing.score - 125.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.overall_status, TriggerStatus::NeedsImprovement);
        assert_eq!(report.industry, "retail");
    }

    #[test]
    fn test_unknown_industry_uses_default() {
        let mut metrics = empty_page();
        metrics.industry = Some("underwater-basket-weaving".to_string());
        let report = analyze(&metrics, Utc::now()).unwrap();
        assert_eq!(report.industry, "default");
    }

    #[test]
    fn test_explain_covers_catalog() {
        let traces = explain(&empty_page()).unwrap();
        assert_eq!(traces.len(), CATALOG.len());
        assert_eq!(traces.iter().filter(|t| t.reason.is_some()).count(), 26);
    }
}

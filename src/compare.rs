// Competitor comparison — how one page's report stacks up against others.

use serde::Serialize;

use crate::analysis::AnalysisReport;
use crate::triggers::{TriggerCategory, TriggerStatus};

/// A category gap at least this large (points) is a strength or weakness.
pub const CATEGORY_GAP_POINTS: f64 = 10.0;

/// Competitors must beat own score on a trigger by this much to report it.
pub const TRIGGER_GAP_POINTS: f64 = 20.0;

#[derive(Debug, Clone, Serialize)]
pub struct PageScore {
    pub page_id: String,
    pub page_name: String,
    pub overall_score: f64,
    pub overall_status: TriggerStatus,
}

impl PageScore {
    fn from_report(report: &AnalysisReport) -> Self {
        Self {
            page_id: report.page_id.clone(),
            page_name: report.page_name.clone(),
            overall_score: report.overall_score,
            overall_status: report.overall_status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGap {
    pub category: TriggerCategory,
    pub own_score: f64,
    pub competitor_avg: f64,
    /// own - competitor average; positive means ahead
    pub gap: f64,
}

/// A trigger where competitors clearly do better.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerGap {
    pub trigger_id: String,
    pub name: String,
    pub own_score: f64,
    pub competitor_avg: f64,
    pub gap: f64,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitorComparison {
    pub own: PageScore,
    pub competitors: Vec<PageScore>,
    /// 1-based position among own + competitors; ties resolve in own favour
    pub own_rank: usize,
    pub category_gaps: Vec<CategoryGap>,
    pub strengths: Vec<TriggerCategory>,
    pub weaknesses: Vec<TriggerCategory>,
    /// Sorted by gap, largest deficit first
    pub trigger_gaps: Vec<TriggerGap>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn compare(own: &AnalysisReport, competitors: &[AnalysisReport]) -> CompetitorComparison {
    let own_rank = 1 + competitors
        .iter()
        .filter(|c| c.overall_score > own.overall_score)
        .count();

    let mut category_gaps = Vec::new();
    for own_cat in &own.category_scores {
        let theirs: Vec<f64> = competitors
            .iter()
            .filter_map(|c| c.category_score(own_cat.category).map(|s| s.score))
            .collect();
        if let Some(avg) = mean(&theirs) {
            category_gaps.push(CategoryGap {
                category: own_cat.category,
                own_score: own_cat.score,
                competitor_avg: avg,
                gap: own_cat.score - avg,
            });
        }
    }

    let strengths = category_gaps
        .iter()
        .filter(|g| g.gap >= CATEGORY_GAP_POINTS)
        .map(|g| g.category)
        .collect();
    let weaknesses = category_gaps
        .iter()
        .filter(|g| g.gap <= -CATEGORY_GAP_POINTS)
        .map(|g| g.category)
        .collect();

    // Fallback placeholders say nothing about either page, so they are
    // left out on both sides.
    let mut trigger_gaps = Vec::new();
    for own_eval in own.evaluations.iter().filter(|e| !e.is_fallback()) {
        let theirs: Vec<f64> = competitors
            .iter()
            .filter_map(|c| c.evaluation(&own_eval.trigger_id))
            .filter(|e| !e.is_fallback())
            .map(|e| e.score)
            .collect();
        let Some(avg) = mean(&theirs) else {
            continue;
        };
        if avg - own_eval.score >= TRIGGER_GAP_POINTS {
            trigger_gaps.push(TriggerGap {
                trigger_id: own_eval.trigger_id.clone(),
                name: own_eval.name.clone(),
                own_score: own_eval.score,
                competitor_avg: avg,
                gap: own_eval.score - avg,
                recommendation: own_eval.recommendation.clone(),
            });
        }
    }
    trigger_gaps.sort_by(|a, b| {
        a.gap
            .total_cmp(&b.gap)
            .then_with(|| a.trigger_id.cmp(&b.trigger_id))
    });

    CompetitorComparison {
        own: PageScore::from_report(own),
        competitors: competitors.iter().map(PageScore::from_report).collect(),
        own_rank,
        category_gaps,
        strengths,
        weaknesses,
        trigger_gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triggers::{create_fallback_evaluation, FallbackReason, TriggerEvaluation};
    use chrono::Utc;

    fn eval(id: &str, category: TriggerCategory, score: f64) -> TriggerEvaluation {
        TriggerEvaluation {
            trigger_id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category,
            score,
            status: TriggerStatus::from_score(score),
            category_key: Some("X".to_string()),
            recommendation: Some(format!("fix {id}")),
            details: None,
        }
    }

    fn report(id: &str, overall: f64, evaluations: Vec<TriggerEvaluation>) -> AnalysisReport {
        let category_scores = crate::scoring::category_scores(&evaluations);
        AnalysisReport {
            page_id: id.to_string(),
            page_name: id.to_string(),
            industry: "default".to_string(),
            benchmark_name: "All industries".to_string(),
            analyzed_at: Utc::now(),
            period_days: 90,
            posts_analyzed: 20,
            overall_score: overall,
            overall_status: TriggerStatus::from_score(overall),
            category_scores,
            evaluations,
        }
    }

    #[test]
    fn test_rank_ties_favour_own() {
        let own = report("own", 70.0, vec![]);
        let comps = vec![report("a", 80.0, vec![]), report("b", 70.0, vec![])];
        assert_eq!(compare(&own, &comps).own_rank, 2);
        assert_eq!(compare(&own, &[]).own_rank, 1);
    }

    #[test]
    fn test_strengths_and_weaknesses() {
        let own = report(
            "own",
            60.0,
            vec![
                eval("BASIC_001", TriggerCategory::Basic, 90.0),
                eval("CONT_001", TriggerCategory::Content, 40.0),
                eval("TECH_001", TriggerCategory::Technical, 60.0),
            ],
        );
        let comp = report(
            "comp",
            60.0,
            vec![
                eval("BASIC_001", TriggerCategory::Basic, 70.0),
                eval("CONT_001", TriggerCategory::Content, 65.0),
                eval("TECH_001", TriggerCategory::Technical, 55.0),
            ],
        );
        let cmp = compare(&own, &[comp]);
        assert_eq!(cmp.strengths, vec![TriggerCategory::Basic]);
        assert_eq!(cmp.weaknesses, vec![TriggerCategory::Content]);
        assert_eq!(cmp.trigger_gaps.len(), 1);
        assert_eq!(cmp.trigger_gaps[0].trigger_id, "CONT_001");
        assert!((cmp.trigger_gaps[0].gap + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_fallbacks_excluded_from_trigger_gaps() {
        let own = report(
            "own",
            50.0,
            vec![create_fallback_evaluation(
                "CONT_002",
                "Top post",
                "",
                TriggerCategory::Content,
                FallbackReason::InsufficientData,
                "",
            )],
        );
        let comp = report("comp", 90.0, vec![eval("CONT_002", TriggerCategory::Content, 95.0)]);
        assert!(compare(&own, &[comp]).trigger_gaps.is_empty());
    }

    #[test]
    fn test_category_gap_needs_competitor_data() {
        let own = report("own", 50.0, vec![eval("PAGE_001", TriggerCategory::PageSettings, 30.0)]);
        let comp = report("comp", 50.0, vec![]);
        let cmp = compare(&own, &[comp]);
        assert!(cmp.category_gaps.is_empty());
        assert!(cmp.strengths.is_empty() && cmp.weaknesses.is_empty());
    }
}

// Score aggregation — per-category means and the weighted overall score.
//
// Within a category every trigger counts equally, fallbacks included at
// their neutral 50. Across categories the fixed weights apply, renormalized
// over the categories that actually have evaluations so a missing category
// doesn't drag the score toward zero.

use serde::{Deserialize, Serialize};

use crate::triggers::{TriggerCategory, TriggerEvaluation, TriggerStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: TriggerCategory,
    pub score: f64,
    pub status: TriggerStatus,
    pub weight: f64,
    pub trigger_count: usize,
    /// How many of the triggers fell back to the neutral placeholder
    pub fallback_count: usize,
}

/// Mean score per category, in `TriggerCategory::ALL` order. Categories
/// without evaluations are omitted.
pub fn category_scores(evaluations: &[TriggerEvaluation]) -> Vec<CategoryScore> {
    TriggerCategory::ALL
        .iter()
        .filter_map(|&category| {
            let members: Vec<&TriggerEvaluation> = evaluations
                .iter()
                .filter(|e| e.category == category)
                .collect();
            if members.is_empty() {
                return None;
            }
            let score = members.iter().map(|e| e.score).sum::<f64>() / members.len() as f64;
            Some(CategoryScore {
                category,
                score,
                status: TriggerStatus::from_score(score),
                weight: category.weight(),
                trigger_count: members.len(),
                fallback_count: members.iter().filter(|e| e.is_fallback()).count(),
            })
        })
        .collect()
}

/// Weighted overall score, clamped to 0-100. Returns 0.0 when there is
/// nothing to aggregate.
pub fn overall_score(category_scores: &[CategoryScore]) -> f64 {
    let total_weight: f64 = category_scores.iter().map(|c| c.category.weight()).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = category_scores
        .iter()
        .map(|c| c.score * c.category.weight())
        .sum();
    (weighted / total_weight).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triggers::{create_fallback_evaluation, FallbackReason};

    fn eval(id: &str, category: TriggerCategory, score: f64) -> TriggerEvaluation {
        TriggerEvaluation {
            trigger_id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category,
            score,
            status: TriggerStatus::from_score(score),
            category_key: None,
            recommendation: None,
            details: None,
        }
    }

    #[test]
    fn test_category_mean_includes_fallbacks() {
        let evals = vec![
            eval("A", TriggerCategory::Basic, 90.0),
            create_fallback_evaluation(
                "B",
                "B",
                "",
                TriggerCategory::Basic,
                FallbackReason::InsufficientData,
                "",
            ),
        ];
        let scores = category_scores(&evals);
        assert_eq!(scores.len(), 1);
        assert!((scores[0].score - 70.0).abs() < 1e-9);
        assert_eq!(scores[0].status, TriggerStatus::Good);
        assert_eq!(scores[0].fallback_count, 1);
    }

    #[test]
    fn test_all_categories_weighted() {
        let evals: Vec<_> = TriggerCategory::ALL
            .iter()
            .map(|&c| eval(c.as_str(), c, if c == TriggerCategory::Basic { 100.0 } else { 0.0 }))
            .collect();
        let overall = overall_score(&category_scores(&evals));
        assert!((overall - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_categories_are_renormalized() {
        let evals = vec![
            eval("A", TriggerCategory::Basic, 80.0),
            eval("B", TriggerCategory::Content, 60.0),
        ];
        // (80 * 0.35 + 60 * 0.30) / 0.65
        let expected = (80.0 * 0.35 + 60.0 * 0.30) / 0.65;
        assert!((overall_score(&category_scores(&evals)) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(overall_score(&[]), 0.0);
        assert!(category_scores(&[]).is_empty());
    }

    #[test]
    fn test_categories_keep_fixed_order() {
        let evals = vec![
            eval("P", TriggerCategory::PageSettings, 50.0),
            eval("A", TriggerCategory::Basic, 50.0),
        ];
        let order: Vec<_> = category_scores(&evals).iter().map(|c| c.category).collect();
        assert_eq!(order, vec![TriggerCategory::Basic, TriggerCategory::PageSettings]);
    }
}

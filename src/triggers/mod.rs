// Trigger catalog — independent heuristic rules scored against page metrics.
//
// Each trigger is a small decision table:
//   - dimension labels with documented thresholds,
//   - a minimum-sample guard that short-circuits to a reserved key,
//   - a fixed order for composing labels into a category key,
//   - a key -> (score, recommendation) table.
//
// Classifiers are pure functions of their numeric inputs. Evaluation never
// fails for data reasons: too-small samples and missing metrics both become
// a neutral fallback result. The only error is a category key with no table
// entry, which is a defect in the catalog itself.

pub mod basic;
pub mod catalog;
pub mod content;
pub mod debug;
pub mod page_settings;
pub mod sharing;
pub mod status;
pub mod technical;
pub mod timing;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::IndustryBenchmark;
use crate::metrics::summary::PageSummary;

pub use status::{TriggerCategory, TriggerStatus};

/// Reserved key: the sample is too small to trust the ratio.
pub const INSUFFICIENT: &str = "INSUFFICIENT";

/// Reserved key: the data source didn't provide the metric at all.
pub const UNAVAILABLE: &str = "UNAVAILABLE";

/// Neutral score assigned to every fallback evaluation.
pub const FALLBACK_SCORE: f64 = 50.0;

/// Why a trigger could not be fully evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FallbackReason {
    InsufficientData,
    MetricUnavailable,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::InsufficientData => "INSUFFICIENT_DATA",
            FallbackReason::MetricUnavailable => "METRIC_UNAVAILABLE",
        }
    }

    /// The reserved category key that produces this reason.
    pub fn category_key(&self) -> &'static str {
        match self {
            FallbackReason::InsufficientData => INSUFFICIENT,
            FallbackReason::MetricUnavailable => UNAVAILABLE,
        }
    }

    fn from_category_key(key: &str) -> Option<Self> {
        match key {
            INSUFFICIENT => Some(FallbackReason::InsufficientData),
            UNAVAILABLE => Some(FallbackReason::MetricUnavailable),
            _ => None,
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDetails {
    pub reason: FallbackReason,
    pub context: String,
}

/// The outcome of one trigger for one analysis run. Built once, never mutated
/// afterwards (only serialized and stored).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvaluation {
    pub trigger_id: String,
    pub name: String,
    pub description: String,
    pub category: TriggerCategory,
    pub score: f64,
    pub status: TriggerStatus,
    #[serde(default)]
    pub category_key: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EvaluationDetails>,
}

impl TriggerEvaluation {
    pub fn is_fallback(&self) -> bool {
        self.details.is_some()
    }
}

/// Build the standard neutral result for a trigger that couldn't be computed.
///
/// Always score 50 / NEEDS_IMPROVEMENT, whatever the trigger or reason.
pub fn create_fallback_evaluation(
    trigger_id: &str,
    name: &str,
    description: &str,
    category: TriggerCategory,
    reason: FallbackReason,
    context: impl Into<String>,
) -> TriggerEvaluation {
    TriggerEvaluation {
        trigger_id: trigger_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        score: FALLBACK_SCORE,
        status: TriggerStatus::NeedsImprovement,
        category_key: None,
        recommendation: None,
        details: Some(EvaluationDetails {
            reason,
            context: context.into(),
        }),
    }
}

/// One row of a trigger's decision table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    pub key: &'static str,
    pub score: f64,
    /// May contain `{name}` placeholders filled from `Trigger::template_vars`.
    pub recommendation: &'static str,
}

/// Static description of a trigger.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TriggerDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub category: TriggerCategory,
    /// Short explanation shown above the recommendation
    pub intro: &'static str,
    /// What the rule needs to be evaluated, e.g. "at least 40 reactions"
    pub requirement: &'static str,
    pub outcomes: &'static [Outcome],
}

impl TriggerDefinition {
    pub fn outcome(&self, key: &str) -> Option<&'static Outcome> {
        self.outcomes.iter().find(|o| o.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.outcomes.iter().map(|o| o.key)
    }
}

/// Everything a classifier may read for one run.
#[derive(Debug, Clone, Copy)]
pub struct TriggerInput<'a> {
    pub summary: &'a PageSummary,
    pub benchmark: &'a IndustryBenchmark,
}

/// A debug value shown in `--explain` traces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInput {
    pub name: &'static str,
    pub value: String,
}

impl DebugInput {
    pub fn new(name: &'static str, value: impl std::fmt::Display) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }

    /// Format a float with two decimals.
    pub fn num(name: &'static str, value: f64) -> Self {
        Self::new(name, format!("{value:.2}"))
    }

    pub fn opt(name: &'static str, value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::num(name, v),
            None => Self::new(name, "n/a"),
        }
    }
}

pub trait Trigger: Sync {
    fn definition(&self) -> &'static TriggerDefinition;

    /// Resolve the category key for this run's inputs.
    fn category_key(&self, input: &TriggerInput<'_>) -> String;

    /// The raw values the classifier looked at.
    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput>;

    /// Values substituted into `{placeholders}` in recommendation text.
    fn template_vars(&self, _input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Evaluate one trigger.
pub fn evaluate(trigger: &dyn Trigger, input: &TriggerInput<'_>) -> Result<TriggerEvaluation> {
    let def = trigger.definition();
    let key = trigger.category_key(input);
    let outcome = def.outcome(&key).ok_or_else(|| {
        anyhow::anyhow!(
            "Trigger {} produced category key {key} with no recommendation entry",
            def.id
        )
    })?;
    let recommendation = render_template(outcome.recommendation, &trigger.template_vars(input));

    let mut evaluation = match FallbackReason::from_category_key(&key) {
        Some(reason) => {
            let context = match reason {
                FallbackReason::InsufficientData => {
                    format!("Not enough data: needs {}", def.requirement)
                }
                FallbackReason::MetricUnavailable => {
                    format!("Metric not provided by the data source: {}", def.requirement)
                }
            };
            debug!(trigger = def.id, reason = reason.as_str(), "Trigger fell back");
            create_fallback_evaluation(def.id, def.name, def.intro, def.category, reason, context)
        }
        None => TriggerEvaluation {
            trigger_id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.intro.to_string(),
            category: def.category,
            score: outcome.score,
            status: TriggerStatus::from_score(outcome.score),
            category_key: None,
            recommendation: None,
            details: None,
        },
    };

    evaluation.category_key = Some(key);
    evaluation.recommendation = Some(recommendation);
    Ok(evaluation)
}

/// Replace `{name}` placeholders with their values. Unknown placeholders are
/// left as-is.
pub fn render_template(template: &str, vars: &[(&'static str, String)]) -> String {
    let mut text = template.to_string();
    for (name, value) in vars {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}

/// Join dimension labels into a category key in their declared order.
pub fn compose_key(labels: &[&str]) -> String {
    labels.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_always_neutral() {
        for reason in [FallbackReason::InsufficientData, FallbackReason::MetricUnavailable] {
            for category in TriggerCategory::ALL {
                let eval =
                    create_fallback_evaluation("X_001", "Name", "Desc", category, reason, "ctx");
                assert_eq!(eval.score, 50.0);
                assert_eq!(eval.status, TriggerStatus::NeedsImprovement);
                let details = eval.details.unwrap();
                assert_eq!(details.reason, reason);
                assert_eq!(details.context, "ctx");
            }
        }
    }

    #[test]
    fn test_render_template() {
        let vars = vec![("industry", "Retail".to_string()), ("n", "3".to_string())];
        assert_eq!(
            render_template("Compared to {industry}: {n} posts, {unknown}", &vars),
            "Compared to Retail: 3 posts, {unknown}"
        );
    }

    #[test]
    fn test_compose_key_keeps_declared_order() {
        assert_eq!(compose_key(&["LOW", "HIGH"]), "LOW_HIGH");
        assert_eq!(compose_key(&["HIGH", "LOW"]), "HIGH_LOW");
        assert_eq!(compose_key(&["EXCELLENT"]), "EXCELLENT");
    }

    #[test]
    fn test_fallback_reason_keys() {
        assert_eq!(FallbackReason::InsufficientData.category_key(), INSUFFICIENT);
        assert_eq!(FallbackReason::MetricUnavailable.category_key(), UNAVAILABLE);
        assert_eq!(FallbackReason::from_category_key("HIGH"), None);
    }

    #[test]
    fn test_details_omitted_when_evaluated() {
        let eval = TriggerEvaluation {
            trigger_id: "X".to_string(),
            name: "n".to_string(),
            description: "d".to_string(),
            category: TriggerCategory::Basic,
            score: 90.0,
            status: TriggerStatus::Excellent,
            category_key: Some("GOOD".to_string()),
            recommendation: Some("r".to_string()),
            details: None,
        };
        let json = serde_json::to_value(&eval).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["status"], "EXCELLENT");
    }
}

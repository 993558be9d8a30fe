// Evaluation traces for `pagegrade analyze --explain`.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use super::{
    evaluate, DebugInput, FallbackReason, Trigger, TriggerCategory, TriggerInput, TriggerStatus,
};

/// What one trigger looked at and what it decided.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerTrace {
    pub trigger_id: String,
    pub name: String,
    pub category: TriggerCategory,
    pub inputs: Vec<DebugInput>,
    pub category_key: String,
    pub score: f64,
    pub status: TriggerStatus,
    pub reason: Option<FallbackReason>,
}

pub fn trace(trigger: &dyn Trigger, input: &TriggerInput<'_>) -> Result<TriggerTrace> {
    let evaluation = evaluate(trigger, input)?;
    Ok(TriggerTrace {
        trigger_id: evaluation.trigger_id,
        name: evaluation.name,
        category: evaluation.category,
        inputs: trigger.inputs(input),
        category_key: evaluation.category_key.unwrap_or_default(),
        score: evaluation.score,
        status: evaluation.status,
        reason: evaluation.details.map(|d| d.reason),
    })
}

/// Plain-text rendering, one block per trigger.
pub fn render_trace(trace: &TriggerTrace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} [{}]", trace.trigger_id, trace.name, trace.category);
    for input in &trace.inputs {
        let _ = writeln!(out, "    {:<28} {}", input.name, input.value);
    }
    let _ = write!(
        out,
        "    => {} score {:.0} {}",
        trace.category_key, trace.score, trace.status
    );
    if let Some(reason) = trace.reason {
        let _ = write!(out, " ({reason})");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::find_benchmark;
    use crate::metrics::summary::PageSummary;
    use crate::triggers::basic::ReactionSentiment;

    #[test]
    fn test_trace_of_insufficient_sample() {
        let summary = PageSummary {
            total_reactions: 12,
            likes_pct: 95.0,
            ..Default::default()
        };
        let input = TriggerInput {
            summary: &summary,
            benchmark: find_benchmark(None),
        };
        let trace = trace(&ReactionSentiment, &input).unwrap();
        assert_eq!(trace.category_key, "INSUFFICIENT");
        assert_eq!(trace.reason, Some(FallbackReason::InsufficientData));
        assert_eq!(trace.inputs[0].value, "12");

        let text = render_trace(&trace);
        assert!(text.starts_with("BASIC_003 Reaction sentiment [BASIC]"));
        assert!(text.contains("likes_pct"));
        assert!(text.ends_with("(INSUFFICIENT_DATA)"));
    }
}

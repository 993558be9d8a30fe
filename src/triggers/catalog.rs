// The full trigger catalog and its build-time invariants.

use std::collections::HashSet;

use anyhow::{bail, Result};

use super::{
    basic, content, evaluate, page_settings, sharing, technical, timing, Trigger,
    TriggerDefinition, TriggerEvaluation, TriggerInput, FALLBACK_SCORE, INSUFFICIENT, UNAVAILABLE,
};

/// Every trigger, in report order.
pub static CATALOG: &[&dyn Trigger] = &[
    &basic::EngagementRate,
    &basic::InteractionMix,
    &basic::ReactionSentiment,
    &basic::EngagementTrend,
    &basic::ConversationDepth,
    &basic::FanGrowthRate,
    &content::ContentMixFit,
    &content::TopPost,
    &content::VideoShare,
    &content::LinkShareTrigger,
    &content::FormatFitTrigger,
    &content::PromotedRatio,
    &technical::ImageResolutionTrigger,
    &technical::ImageAspectTrigger,
    &technical::TextLengthTrigger,
    &technical::ParagraphStructure,
    &technical::ListUsageTrigger,
    &technical::EmojiLevelTrigger,
    &technical::HashtagTrigger,
    &timing::PostingFrequency,
    &timing::PostingConsistency,
    &timing::WeekendPresenceTrigger,
    &sharing::ShareRateTrigger,
    &sharing::LinkClickThrough,
    &page_settings::ProfileCompleteness,
    &page_settings::CtaButton,
    &page_settings::Username,
];

/// Evaluate every trigger in catalog order.
pub fn evaluate_all(input: &TriggerInput<'_>) -> Result<Vec<TriggerEvaluation>> {
    CATALOG.iter().map(|t| evaluate(*t, input)).collect()
}

/// Look up a trigger by id (case-insensitive).
pub fn find(id: &str) -> Option<&'static dyn Trigger> {
    CATALOG
        .iter()
        .copied()
        .find(|t| t.definition().id.eq_ignore_ascii_case(id))
}

pub fn definitions() -> impl Iterator<Item = &'static TriggerDefinition> {
    CATALOG.iter().map(|t| t.definition())
}

/// Check the invariants every decision table must hold. Run at startup so a
/// broken table fails before any page is analyzed.
pub fn validate_catalog() -> Result<()> {
    let mut ids = HashSet::new();
    for def in definitions() {
        if !ids.insert(def.id) {
            bail!("Duplicate trigger id {}", def.id);
        }
        if def.outcomes.is_empty() {
            bail!("Trigger {} has no outcomes", def.id);
        }

        let mut keys = HashSet::new();
        for outcome in def.outcomes {
            if !keys.insert(outcome.key) {
                bail!("Trigger {} declares key {} twice", def.id, outcome.key);
            }
            if outcome.recommendation.trim().is_empty() {
                bail!("Trigger {} key {} has an empty recommendation", def.id, outcome.key);
            }
            if !(0.0..=100.0).contains(&outcome.score) {
                bail!(
                    "Trigger {} key {} has score {} outside 0-100",
                    def.id,
                    outcome.key,
                    outcome.score
                );
            }
            let reserved = outcome.key == INSUFFICIENT || outcome.key == UNAVAILABLE;
            if reserved && outcome.score != FALLBACK_SCORE {
                bail!(
                    "Trigger {} fallback key {} must score {FALLBACK_SCORE}",
                    def.id,
                    outcome.key
                );
            }
        }

        if !keys.contains(INSUFFICIENT) && !keys.contains(UNAVAILABLE) {
            bail!("Trigger {} has no fallback key", def.id);
        }
        if def.requirement.trim().is_empty() || def.intro.trim().is_empty() {
            bail!("Trigger {} is missing its intro or requirement text", def.id);
        }
    }
    Ok(())
}

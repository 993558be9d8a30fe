// SHARING triggers — reach beyond the page's own fans.

use super::basic::MIN_INTERACTIONS;
use super::{
    DebugInput, Outcome, Trigger, TriggerCategory, TriggerDefinition, TriggerInput, INSUFFICIENT,
    UNAVAILABLE,
};

pub const MIN_LINK_POSTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareRate {
    Above,
    At,
    Below,
}

impl ShareRate {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r >= 1.2 => ShareRate::Above,
            r if r >= 0.8 => ShareRate::At,
            _ => ShareRate::Below,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShareRate::Above => "ABOVE",
            ShareRate::At => "AT",
            ShareRate::Below => "BELOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickThrough {
    High,
    Medium,
    Low,
}

impl ClickThrough {
    pub fn from_ctr(ctr: f64) -> Self {
        match ctr {
            c if c >= 2.0 => ClickThrough::High,
            c if c >= 0.5 => ClickThrough::Medium,
            _ => ClickThrough::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClickThrough::High => "HIGH",
            ClickThrough::Medium => "MEDIUM",
            ClickThrough::Low => "LOW",
        }
    }
}

/// SHARE_001: share of interactions that are shares, relative to the industry.
pub fn share_rate_key(total_interactions: u64, share_pct: f64, benchmark_share_pct: f64) -> String {
    if total_interactions < MIN_INTERACTIONS {
        return INSUFFICIENT.to_string();
    }
    let ratio = if benchmark_share_pct > 0.0 {
        share_pct / benchmark_share_pct
    } else {
        0.0
    };
    ShareRate::from_ratio(ratio).as_str().to_string()
}

/// SHARE_002: click-through rate of link posts, in percent.
pub fn link_ctr_key(link_posts: usize, ctr: Option<f64>) -> String {
    if link_posts < MIN_LINK_POSTS {
        return INSUFFICIENT.to_string();
    }
    match ctr {
        Some(ctr) => ClickThrough::from_ctr(ctr).as_str().to_string(),
        None => UNAVAILABLE.to_string(),
    }
}

pub static SHARE_RATE: TriggerDefinition = TriggerDefinition {
    id: "SHARE_001",
    name: "Share rate vs. industry",
    category: TriggerCategory::Sharing,
    intro: "Shares put your posts in front of people who don't follow you yet.",
    requirement: "at least 40 interactions",
    outcomes: &[
        Outcome {
            key: "ABOVE",
            score: 92.0,
            recommendation: "Shares make up {share_pct}% of your interactions, above the {industry} average of {benchmark_pct}%. Your content spreads on its own.",
        },
        Outcome {
            key: "AT",
            score: 72.0,
            recommendation: "Shares make up {share_pct}% of your interactions, close to the {industry} average of {benchmark_pct}%. Useful tips and local news tend to get shared more.",
        },
        Outcome {
            key: "BELOW",
            score: 40.0,
            recommendation: "Shares make up only {share_pct}% of your interactions against a {industry} average of {benchmark_pct}%. Post content people want to pass on: offers, guides, behind-the-scenes stories.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Not enough interactions yet to judge how often your posts are shared.",
        },
    ],
};

pub static LINK_CTR: TriggerDefinition = TriggerDefinition {
    id: "SHARE_002",
    name: "Link click-through",
    category: TriggerCategory::Sharing,
    intro: "How often people who see your link posts click through.",
    requirement: "at least 3 link posts with click insights",
    outcomes: &[
        Outcome {
            key: "HIGH",
            score: 92.0,
            recommendation: "{ctr}% of people who see your link posts click them. Your link previews and teasers work.",
        },
        Outcome {
            key: "MEDIUM",
            score: 70.0,
            recommendation: "{ctr}% of people who see your link posts click them. Sharpen the text above the link to give people a reason to click.",
        },
        Outcome {
            key: "LOW",
            score: 40.0,
            recommendation: "Only {ctr}% of people who see your link posts click them. Use clear headlines, strong images and say what the reader gets.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Post at least 3 links so click-through can be measured.",
        },
        Outcome {
            key: UNAVAILABLE,
            score: 50.0,
            recommendation: "Click data isn't available. Grant the insights permission to measure link performance.",
        },
    ],
};

pub struct ShareRateTrigger;

impl Trigger for ShareRateTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &SHARE_RATE
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        share_rate_key(
            input.summary.total_interactions,
            input.summary.share_pct,
            input.benchmark.share_pct,
        )
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_interactions", input.summary.total_interactions),
            DebugInput::num("share_pct", input.summary.share_pct),
            DebugInput::num("benchmark_share_pct", input.benchmark.share_pct),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![
            ("share_pct", format!("{:.1}", input.summary.share_pct)),
            ("benchmark_pct", format!("{:.0}", input.benchmark.share_pct)),
            ("industry", input.benchmark.name.to_string()),
        ]
    }
}

pub struct LinkClickThrough;

impl Trigger for LinkClickThrough {
    fn definition(&self) -> &'static TriggerDefinition {
        &LINK_CTR
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        link_ctr_key(input.summary.link_posts, input.summary.link_ctr)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("link_posts", input.summary.link_posts),
            DebugInput::opt("link_ctr", input.summary.link_ctr),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("ctr", format!("{:.2}", input.summary.link_ctr.unwrap_or(0.0)))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_rate() {
        assert_eq!(share_rate_key(39, 20.0, 8.0), INSUFFICIENT);
        assert_eq!(share_rate_key(40, 12.0, 10.0), "ABOVE");
        assert_eq!(share_rate_key(40, 10.0, 10.0), "AT");
        assert_eq!(share_rate_key(40, 7.9, 10.0), "BELOW");
    }

    #[test]
    fn test_link_ctr_guards() {
        assert_eq!(link_ctr_key(2, Some(5.0)), INSUFFICIENT);
        assert_eq!(link_ctr_key(2, None), INSUFFICIENT);
        assert_eq!(link_ctr_key(3, None), UNAVAILABLE);
    }

    #[test]
    fn test_link_ctr_bands() {
        assert_eq!(link_ctr_key(3, Some(2.0)), "HIGH");
        assert_eq!(link_ctr_key(3, Some(0.5)), "MEDIUM");
        assert_eq!(link_ctr_key(3, Some(0.49)), "LOW");
    }
}

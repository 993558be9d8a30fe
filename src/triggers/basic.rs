// BASIC triggers — engagement fundamentals.

use super::{
    compose_key, DebugInput, Outcome, Trigger, TriggerCategory, TriggerDefinition, TriggerInput,
    INSUFFICIENT, UNAVAILABLE,
};

/// Posts needed before per-post averages mean anything.
pub const MIN_POSTS: usize = 10;
/// Interactions needed before the comment/share split is trusted.
pub const MIN_INTERACTIONS: u64 = 40;
/// Reactions needed before the reaction split is trusted.
pub const MIN_REACTIONS: u64 = 40;
/// Conversation depth only needs a handful of posts.
pub const MIN_POSTS_FOR_COMMENTS: usize = 5;

// --- Dimensions ---

/// Engagement rate relative to the industry average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementLevel {
    Excellent,
    Good,
    Average,
    Low,
}

impl EngagementLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r >= 1.5 => EngagementLevel::Excellent,
            r if r >= 1.0 => EngagementLevel::Good,
            r if r >= 0.5 => EngagementLevel::Average,
            _ => EngagementLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementLevel::Excellent => "EXCELLENT",
            EngagementLevel::Good => "GOOD",
            EngagementLevel::Average => "AVERAGE",
            EngagementLevel::Low => "LOW",
        }
    }
}

/// Where a share sits against its benchmark. Equal counts as ABOVE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relative {
    Above,
    Below,
}

impl Relative {
    pub fn compare(value: f64, benchmark: f64) -> Self {
        if value >= benchmark {
            Relative::Above
        } else {
            Relative::Below
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relative::Above => "ABOVE",
            Relative::Below => "BELOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    /// "Like" share of reactions: >=90 HIGH, >=60 MEDIUM.
    pub fn from_likes_pct(pct: f64) -> Self {
        match pct {
            p if p >= 90.0 => Level::High,
            p if p >= 60.0 => Level::Medium,
            _ => Level::Low,
        }
    }

    /// "Angry" share of reactions: <=5 LOW, <=15 MEDIUM.
    pub fn from_angry_pct(pct: f64) -> Self {
        match pct {
            p if p <= 5.0 => Level::Low,
            p if p <= 15.0 => Level::Medium,
            _ => Level::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "HIGH",
            Level::Medium => "MEDIUM",
            Level::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Growing,
    Stable,
    Declining,
}

impl Trend {
    pub fn from_change_pct(change: f64) -> Self {
        match change {
            c if c >= 10.0 => Trend::Growing,
            c if c > -10.0 => Trend::Stable,
            _ => Trend::Declining,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Growing => "GROWING",
            Trend::Stable => "STABLE",
            Trend::Declining => "DECLINING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentDepth {
    High,
    Medium,
    Low,
    Silent,
}

impl CommentDepth {
    pub fn from_avg_comments(avg: f64) -> Self {
        match avg {
            a if a >= 10.0 => CommentDepth::High,
            a if a >= 3.0 => CommentDepth::Medium,
            a if a >= 1.0 => CommentDepth::Low,
            _ => CommentDepth::Silent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentDepth::High => "HIGH",
            CommentDepth::Medium => "MEDIUM",
            CommentDepth::Low => "LOW",
            CommentDepth::Silent => "NONE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthLevel {
    Strong,
    Moderate,
    Flat,
    Declining,
}

impl GrowthLevel {
    pub fn from_growth_pct(pct: f64) -> Self {
        match pct {
            p if p >= 5.0 => GrowthLevel::Strong,
            p if p >= 1.0 => GrowthLevel::Moderate,
            p if p >= 0.0 => GrowthLevel::Flat,
            _ => GrowthLevel::Declining,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthLevel::Strong => "STRONG",
            GrowthLevel::Moderate => "MODERATE",
            GrowthLevel::Flat => "FLAT",
            GrowthLevel::Declining => "DECLINING",
        }
    }
}

// --- Classifiers ---

/// BASIC_001: engagement rate divided by the industry average.
pub fn engagement_rate_key(
    total_posts: usize,
    engagement_rate: Option<f64>,
    benchmark_rate: f64,
) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    let Some(rate) = engagement_rate else {
        return UNAVAILABLE.to_string();
    };
    let ratio = if benchmark_rate > 0.0 {
        rate / benchmark_rate
    } else {
        0.0
    };
    EngagementLevel::from_ratio(ratio).as_str().to_string()
}

/// BASIC_002: `{comments}_{shares}` against the benchmark split.
pub fn interaction_mix_key(
    total_interactions: u64,
    comment_pct: f64,
    share_pct: f64,
    benchmark_comment_pct: f64,
    benchmark_share_pct: f64,
) -> String {
    if total_interactions < MIN_INTERACTIONS {
        return INSUFFICIENT.to_string();
    }
    compose_key(&[
        Relative::compare(comment_pct, benchmark_comment_pct).as_str(),
        Relative::compare(share_pct, benchmark_share_pct).as_str(),
    ])
}

/// BASIC_003: `{likes}_{angry}`.
pub fn reaction_sentiment_key(total_reactions: u64, likes_pct: f64, angry_pct: f64) -> String {
    if total_reactions < MIN_REACTIONS {
        return INSUFFICIENT.to_string();
    }
    compose_key(&[
        Level::from_likes_pct(likes_pct).as_str(),
        Level::from_angry_pct(angry_pct).as_str(),
    ])
}

/// BASIC_004: change between the earlier and later half of the window.
pub fn engagement_trend_key(total_posts: usize, change_pct: Option<f64>) -> String {
    match change_pct {
        Some(change) if total_posts >= MIN_POSTS => {
            Trend::from_change_pct(change).as_str().to_string()
        }
        _ => INSUFFICIENT.to_string(),
    }
}

/// BASIC_005: average comments per post.
pub fn conversation_depth_key(total_posts: usize, avg_comments: f64) -> String {
    if total_posts < MIN_POSTS_FOR_COMMENTS {
        return INSUFFICIENT.to_string();
    }
    CommentDepth::from_avg_comments(avg_comments)
        .as_str()
        .to_string()
}

/// BASIC_006: fan growth over the window, in percent.
pub fn fan_growth_key(growth_pct: Option<f64>) -> String {
    match growth_pct {
        Some(pct) => GrowthLevel::from_growth_pct(pct).as_str().to_string(),
        None => UNAVAILABLE.to_string(),
    }
}

// --- Definitions ---

pub static ENGAGEMENT_RATE: TriggerDefinition = TriggerDefinition {
    id: "BASIC_001",
    name: "Engagement rate vs. industry",
    category: TriggerCategory::Basic,
    intro: "How many people interact with each post, relative to your audience size and to pages in your industry.",
    requirement: "at least 10 posts and a known fan count",
    outcomes: &[
        Outcome {
            key: "EXCELLENT",
            score: 95.0,
            recommendation: "Your engagement rate of {rate}% is well above the {industry} average of {benchmark_rate}%. Keep doing what works and study your top posts to repeat them.",
        },
        Outcome {
            key: "GOOD",
            score: 80.0,
            recommendation: "Your engagement rate of {rate}% beats the {industry} average of {benchmark_rate}%. Ask questions and reply to comments to push it further.",
        },
        Outcome {
            key: "AVERAGE",
            score: 55.0,
            recommendation: "Your engagement rate of {rate}% trails the {industry} average of {benchmark_rate}%. Post more of the formats your audience reacts to and drop the ones they ignore.",
        },
        Outcome {
            key: "LOW",
            score: 25.0,
            recommendation: "Your engagement rate of {rate}% is far below the {industry} average of {benchmark_rate}%. Your content isn't reaching or resonating with your fans. Rethink topics and formats before posting more.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so your engagement rate can be measured.",
        },
        Outcome {
            key: UNAVAILABLE,
            score: 50.0,
            recommendation: "Your fan count isn't available, so the engagement rate can't be computed. Check the page permissions granted to the app.",
        },
    ],
};

pub static INTERACTION_MIX: TriggerDefinition = TriggerDefinition {
    id: "BASIC_002",
    name: "Interaction mix",
    category: TriggerCategory::Basic,
    intro: "Comments and shares signal stronger interest than reactions. This compares their share of your interactions with your industry.",
    requirement: "at least 40 interactions",
    outcomes: &[
        Outcome {
            key: "ABOVE_ABOVE",
            score: 90.0,
            recommendation: "People both discuss and share your posts more than is typical in {industry}. Your content sparks conversation and travels.",
        },
        Outcome {
            key: "ABOVE_BELOW",
            score: 72.0,
            recommendation: "Your posts get people talking but are rarely shared. Add useful or surprising content people want to pass on.",
        },
        Outcome {
            key: "BELOW_ABOVE",
            score: 65.0,
            recommendation: "Your posts get shared but draw few comments. End posts with a question or invite opinions to start conversations.",
        },
        Outcome {
            key: "BELOW_BELOW",
            score: 35.0,
            recommendation: "Most interactions are passive reactions. Give people a reason to comment and share: questions, polls, tips worth passing on.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Not enough interactions yet to judge how people engage with your posts.",
        },
    ],
};

pub static REACTION_SENTIMENT: TriggerDefinition = TriggerDefinition {
    id: "BASIC_003",
    name: "Reaction sentiment",
    category: TriggerCategory::Basic,
    intro: "The mix of reaction types shows how your audience feels about your content.",
    requirement: "at least 40 reactions",
    outcomes: &[
        Outcome {
            key: "HIGH_LOW",
            score: 95.0,
            recommendation: "Reactions are overwhelmingly positive. Your audience likes what you publish.",
        },
        Outcome {
            key: "HIGH_MEDIUM",
            score: 75.0,
            recommendation: "Reactions are mostly likes, but some posts draw anger. Find out which ones and whether the tone missed the mark.",
        },
        Outcome {
            key: "HIGH_HIGH",
            score: 50.0,
            recommendation: "Many likes, but also a high share of angry reactions. Part of your audience is unhappy. Review the posts that triggered it and respond to concerns.",
        },
        Outcome {
            key: "MEDIUM_LOW",
            score: 80.0,
            recommendation: "Your audience uses a wide range of positive reactions. Emotional content is landing well.",
        },
        Outcome {
            key: "MEDIUM_MEDIUM",
            score: 60.0,
            recommendation: "Reactions are mixed and include some anger. Check recent controversial posts and adjust the tone.",
        },
        Outcome {
            key: "MEDIUM_HIGH",
            score: 35.0,
            recommendation: "A large share of reactions are angry. Identify the cause quickly and address it openly.",
        },
        Outcome {
            key: "LOW_LOW",
            score: 70.0,
            recommendation: "Few plain likes but little anger. Your audience reacts with stronger emotions, which is fine as long as it stays positive.",
        },
        Outcome {
            key: "LOW_MEDIUM",
            score: 50.0,
            recommendation: "Reactions lean away from likes and some are angry. Look at which topics provoke negative responses.",
        },
        Outcome {
            key: "LOW_HIGH",
            score: 20.0,
            recommendation: "Anger dominates your reactions. Your content or your brand is drawing criticism. Address it before posting more of the same.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Not enough reactions yet to judge audience sentiment.",
        },
    ],
};

pub static ENGAGEMENT_TREND: TriggerDefinition = TriggerDefinition {
    id: "BASIC_004",
    name: "Engagement trend",
    category: TriggerCategory::Basic,
    intro: "Compares average interactions in the later half of the period with the earlier half.",
    requirement: "at least 10 posts with engagement in the earlier half of the period",
    outcomes: &[
        Outcome {
            key: "GROWING",
            score: 90.0,
            recommendation: "Engagement grew {magnitude}% over the period. Whatever you changed recently is working.",
        },
        Outcome {
            key: "STABLE",
            score: 70.0,
            recommendation: "Engagement is steady ({change}%). Try a new format or topic to break out of the plateau.",
        },
        Outcome {
            key: "DECLINING",
            score: 30.0,
            recommendation: "Engagement dropped {magnitude}% over the period. Compare recent posts with older ones that did well and return to what worked.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Not enough posts to detect an engagement trend.",
        },
    ],
};

pub static CONVERSATION_DEPTH: TriggerDefinition = TriggerDefinition {
    id: "BASIC_005",
    name: "Conversation depth",
    category: TriggerCategory::Basic,
    intro: "Average comments per post show whether your page starts conversations.",
    requirement: "at least 5 posts",
    outcomes: &[
        Outcome {
            key: "HIGH",
            score: 95.0,
            recommendation: "Your posts average {avg_comments} comments. Keep replying so the conversations continue.",
        },
        Outcome {
            key: "MEDIUM",
            score: 75.0,
            recommendation: "Your posts average {avg_comments} comments. Reply to every comment and ask follow-up questions to deepen threads.",
        },
        Outcome {
            key: "LOW",
            score: 50.0,
            recommendation: "Your posts average only {avg_comments} comments. Ask direct questions and invite opinions.",
        },
        Outcome {
            key: "NONE",
            score: 20.0,
            recommendation: "Your posts get almost no comments. Write posts that invite a response, and answer anyone who does comment.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish a few more posts so comment activity can be measured.",
        },
    ],
};

pub static FAN_GROWTH: TriggerDefinition = TriggerDefinition {
    id: "BASIC_006",
    name: "Fan growth",
    category: TriggerCategory::Basic,
    intro: "Change in the number of fans over the analysis period.",
    requirement: "fan counts at the start and end of the period",
    outcomes: &[
        Outcome {
            key: "STRONG",
            score: 95.0,
            recommendation: "Your audience grew {growth}% this period. Welcome new fans with content that shows what your page is about.",
        },
        Outcome {
            key: "MODERATE",
            score: 78.0,
            recommendation: "Your audience grew {growth}%. Encourage existing fans to share posts to reach more people.",
        },
        Outcome {
            key: "FLAT",
            score: 55.0,
            recommendation: "Your fan count barely moved ({growth}%). Promote the page on your website, in store and in other channels.",
        },
        Outcome {
            key: "DECLINING",
            score: 25.0,
            recommendation: "You lost fans this period ({growth}%). Check whether posting frequency or content changed recently.",
        },
        Outcome {
            key: UNAVAILABLE,
            score: 50.0,
            recommendation: "Fan growth data isn't available. Grant the insights permission to track audience growth.",
        },
    ],
};

// --- Triggers ---

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}

pub struct EngagementRate;

impl Trigger for EngagementRate {
    fn definition(&self) -> &'static TriggerDefinition {
        &ENGAGEMENT_RATE
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        engagement_rate_key(
            input.summary.total_posts,
            input.summary.engagement_rate,
            input.benchmark.avg_engagement_rate,
        )
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::opt("engagement_rate", input.summary.engagement_rate),
            DebugInput::num("benchmark_rate", input.benchmark.avg_engagement_rate),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![
            ("rate", format!("{:.2}", input.summary.engagement_rate.unwrap_or(0.0))),
            ("benchmark_rate", format!("{:.2}", input.benchmark.avg_engagement_rate)),
            ("industry", input.benchmark.name.to_string()),
        ]
    }
}

pub struct InteractionMix;

impl Trigger for InteractionMix {
    fn definition(&self) -> &'static TriggerDefinition {
        &INTERACTION_MIX
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        interaction_mix_key(
            input.summary.total_interactions,
            input.summary.comment_pct,
            input.summary.share_pct,
            input.benchmark.comment_pct,
            input.benchmark.share_pct,
        )
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_interactions", input.summary.total_interactions),
            DebugInput::num("comment_pct", input.summary.comment_pct),
            DebugInput::num("share_pct", input.summary.share_pct),
            DebugInput::num("benchmark_comment_pct", input.benchmark.comment_pct),
            DebugInput::num("benchmark_share_pct", input.benchmark.share_pct),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("industry", input.benchmark.name.to_string())]
    }
}

pub struct ReactionSentiment;

impl Trigger for ReactionSentiment {
    fn definition(&self) -> &'static TriggerDefinition {
        &REACTION_SENTIMENT
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        reaction_sentiment_key(
            input.summary.total_reactions,
            input.summary.likes_pct,
            input.summary.angry_pct,
        )
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_reactions", input.summary.total_reactions),
            DebugInput::num("likes_pct", input.summary.likes_pct),
            DebugInput::num("angry_pct", input.summary.angry_pct),
        ]
    }
}

pub struct EngagementTrend;

impl Trigger for EngagementTrend {
    fn definition(&self) -> &'static TriggerDefinition {
        &ENGAGEMENT_TREND
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        engagement_trend_key(input.summary.total_posts, input.summary.engagement_change_pct)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::opt("engagement_change_pct", input.summary.engagement_change_pct),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        let change = input.summary.engagement_change_pct;
        vec![
            ("change", fmt_pct(change)),
            ("magnitude", fmt_pct(change.map(f64::abs))),
        ]
    }
}

pub struct ConversationDepth;

impl Trigger for ConversationDepth {
    fn definition(&self) -> &'static TriggerDefinition {
        &CONVERSATION_DEPTH
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        conversation_depth_key(input.summary.total_posts, input.summary.avg_comments)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("avg_comments", input.summary.avg_comments),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("avg_comments", format!("{:.1}", input.summary.avg_comments))]
    }
}

pub struct FanGrowthRate;

impl Trigger for FanGrowthRate {
    fn definition(&self) -> &'static TriggerDefinition {
        &FAN_GROWTH
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        fan_growth_key(input.summary.fan_growth_pct)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![DebugInput::opt("fan_growth_pct", input.summary.fan_growth_pct)]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("growth", fmt_pct(input.summary.fan_growth_pct))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_sentiment_examples() {
        assert_eq!(reaction_sentiment_key(100, 95.0, 20.0), "HIGH_HIGH");
        assert_eq!(reaction_sentiment_key(30, 95.0, 20.0), "INSUFFICIENT");
    }

    #[test]
    fn test_reaction_sentiment_boundaries_are_inclusive() {
        assert_eq!(reaction_sentiment_key(40, 90.0, 5.0), "HIGH_LOW");
        assert_eq!(reaction_sentiment_key(40, 89.9, 5.1), "MEDIUM_MEDIUM");
        assert_eq!(reaction_sentiment_key(40, 60.0, 15.0), "MEDIUM_MEDIUM");
        assert_eq!(reaction_sentiment_key(40, 59.9, 15.1), "LOW_HIGH");
    }

    #[test]
    fn test_dimension_order_is_likes_then_angry() {
        // Low likes with high anger must not come out as HIGH_LOW
        assert_eq!(reaction_sentiment_key(500, 10.0, 80.0), "LOW_HIGH");
    }

    #[test]
    fn test_engagement_rate_guards() {
        assert_eq!(engagement_rate_key(9, Some(1.0), 0.15), INSUFFICIENT);
        assert_eq!(engagement_rate_key(10, None, 0.15), UNAVAILABLE);
        // sample guard takes precedence over availability
        assert_eq!(engagement_rate_key(3, None, 0.15), INSUFFICIENT);
    }

    #[test]
    fn test_engagement_rate_ratio_bands() {
        assert_eq!(engagement_rate_key(10, Some(0.40), 0.20), "EXCELLENT");
        assert_eq!(engagement_rate_key(10, Some(0.20), 0.20), "GOOD");
        assert_eq!(engagement_rate_key(10, Some(0.10), 0.20), "AVERAGE");
        assert_eq!(engagement_rate_key(10, Some(0.05), 0.20), "LOW");
    }

    #[test]
    fn test_interaction_mix() {
        assert_eq!(interaction_mix_key(39, 50.0, 50.0, 10.0, 10.0), INSUFFICIENT);
        assert_eq!(interaction_mix_key(40, 12.0, 8.0, 12.0, 8.0), "ABOVE_ABOVE");
        assert_eq!(interaction_mix_key(40, 20.0, 2.0, 12.0, 8.0), "ABOVE_BELOW");
        assert_eq!(interaction_mix_key(40, 2.0, 20.0, 12.0, 8.0), "BELOW_ABOVE");
    }

    #[test]
    fn test_engagement_trend() {
        assert_eq!(engagement_trend_key(10, Some(10.0)), "GROWING");
        assert_eq!(engagement_trend_key(10, Some(-9.9)), "STABLE");
        assert_eq!(engagement_trend_key(10, Some(-10.0)), "DECLINING");
        assert_eq!(engagement_trend_key(10, None), INSUFFICIENT);
        assert_eq!(engagement_trend_key(9, Some(50.0)), INSUFFICIENT);
    }

    #[test]
    fn test_conversation_depth() {
        assert_eq!(conversation_depth_key(4, 20.0), INSUFFICIENT);
        assert_eq!(conversation_depth_key(5, 10.0), "HIGH");
        assert_eq!(conversation_depth_key(5, 3.0), "MEDIUM");
        assert_eq!(conversation_depth_key(5, 1.0), "LOW");
        assert_eq!(conversation_depth_key(5, 0.5), "NONE");
    }

    #[test]
    fn test_fan_growth() {
        assert_eq!(fan_growth_key(None), UNAVAILABLE);
        assert_eq!(fan_growth_key(Some(5.0)), "STRONG");
        assert_eq!(fan_growth_key(Some(1.0)), "MODERATE");
        assert_eq!(fan_growth_key(Some(0.0)), "FLAT");
        assert_eq!(fan_growth_key(Some(-0.1)), "DECLINING");
    }

    #[test]
    fn test_declining_trend_reports_unsigned_drop() {
        use crate::benchmarks::find_benchmark;
        use crate::metrics::summary::PageSummary;
        use crate::triggers::evaluate;

        let summary = PageSummary {
            total_posts: 20,
            engagement_change_pct: Some(-25.0),
            ..Default::default()
        };
        let input = TriggerInput {
            summary: &summary,
            benchmark: find_benchmark(None),
        };
        let eval = evaluate(&EngagementTrend, &input).unwrap();
        assert_eq!(eval.category_key.as_deref(), Some("DECLINING"));
        let text = eval.recommendation.unwrap();
        assert!(text.starts_with("Engagement dropped 25.0% over the period."), "{text}");
    }
}

// CONTENT triggers — what gets posted and how it performs.

use super::{
    DebugInput, Outcome, Trigger, TriggerCategory, TriggerDefinition, TriggerInput, INSUFFICIENT,
    UNAVAILABLE,
};
use crate::benchmarks::ContentMix;
use crate::metrics::summary::KindMix;
use crate::metrics::PostKind;

pub const MIN_POSTS: usize = 10;

// --- Dimensions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixBalance {
    Balanced,
    Skewed,
    Unbalanced,
}

impl MixBalance {
    pub fn from_deviation(deviation: f64) -> Self {
        match deviation {
            d if d <= 15.0 => MixBalance::Balanced,
            d if d <= 35.0 => MixBalance::Skewed,
            _ => MixBalance::Unbalanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MixBalance::Balanced => "BALANCED",
            MixBalance::Skewed => "SKEWED",
            MixBalance::Unbalanced => "UNBALANCED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopPostLevel {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl TopPostLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r >= 3.0 => TopPostLevel::Excellent,
            r if r >= 2.0 => TopPostLevel::Good,
            r if r >= 1.5 => TopPostLevel::Moderate,
            _ => TopPostLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopPostLevel::Excellent => "EXCELLENT",
            TopPostLevel::Good => "GOOD",
            TopPostLevel::Moderate => "MODERATE",
            TopPostLevel::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoUsage {
    Absent,
    Low,
    Medium,
    High,
}

impl VideoUsage {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p <= 0.0 => VideoUsage::Absent,
            p if p < 10.0 => VideoUsage::Low,
            p if p < 30.0 => VideoUsage::Medium,
            _ => VideoUsage::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoUsage::Absent => "NONE",
            VideoUsage::Low => "LOW",
            VideoUsage::Medium => "MEDIUM",
            VideoUsage::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShare {
    Low,
    Medium,
    High,
}

impl LinkShare {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p <= 20.0 => LinkShare::Low,
            p if p <= 50.0 => LinkShare::Medium,
            _ => LinkShare::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkShare::Low => "LOW",
            LinkShare::Medium => "MEDIUM",
            LinkShare::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFit {
    Aligned,
    Misaligned,
}

impl FormatFit {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatFit::Aligned => "ALIGNED",
            FormatFit::Misaligned => "MISALIGNED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    Absent,
    Balanced,
    Heavy,
}

impl Promotion {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p <= 0.0 => Promotion::Absent,
            p if p <= 30.0 => Promotion::Balanced,
            _ => Promotion::Heavy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Promotion::Absent => "NONE",
            Promotion::Balanced => "BALANCED",
            Promotion::Heavy => "HEAVY",
        }
    }
}

// --- Classifiers ---

/// Total variation distance between the actual and ideal mix, in percentage
/// points (0 = identical, 100 = disjoint).
pub fn mix_deviation(actual: &KindMix, ideal: &ContentMix) -> f64 {
    let diffs = [
        actual.photo - ideal.photo,
        actual.video - ideal.video,
        actual.link - ideal.link,
        actual.status - ideal.status,
    ];
    diffs.iter().map(|d| d.abs()).sum::<f64>() / 2.0
}

/// CONT_001
pub fn content_mix_key(total_posts: usize, deviation: f64) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    MixBalance::from_deviation(deviation).as_str().to_string()
}

/// CONT_002: best post's interactions over the average.
pub fn top_post_key(total_posts: usize, top_to_avg_ratio: f64) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    TopPostLevel::from_ratio(top_to_avg_ratio).as_str().to_string()
}

/// CONT_003
pub fn video_share_key(total_posts: usize, video_pct: f64) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    VideoUsage::from_pct(video_pct).as_str().to_string()
}

/// CONT_004
pub fn link_share_key(total_posts: usize, link_pct: f64) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    LinkShare::from_pct(link_pct).as_str().to_string()
}

/// CONT_005: is the best performing format also the one posted most?
pub fn format_fit_key(
    total_posts: usize,
    best_kind: Option<PostKind>,
    most_used_kind: Option<PostKind>,
) -> String {
    let Some(best) = best_kind.filter(|_| total_posts >= MIN_POSTS) else {
        return INSUFFICIENT.to_string();
    };
    let fit = if most_used_kind == Some(best) {
        FormatFit::Aligned
    } else {
        FormatFit::Misaligned
    };
    fit.as_str().to_string()
}

/// CONT_006
pub fn promoted_key(total_posts: usize, promoted_pct: Option<f64>) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    match promoted_pct {
        Some(pct) => Promotion::from_pct(pct).as_str().to_string(),
        None => UNAVAILABLE.to_string(),
    }
}

// --- Definitions ---

pub static CONTENT_MIX: TriggerDefinition = TriggerDefinition {
    id: "CONT_001",
    name: "Content mix vs. ideal",
    category: TriggerCategory::Content,
    intro: "How your split between photos, videos, links and text posts compares with what works in your industry.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "BALANCED",
            score: 90.0,
            recommendation: "Your content mix is close to what performs best for {industry} pages.",
        },
        Outcome {
            key: "SKEWED",
            score: 65.0,
            recommendation: "Your content mix is {deviation} points away from the {industry} ideal. Shift a few posts toward the formats you use less.",
        },
        Outcome {
            key: "UNBALANCED",
            score: 35.0,
            recommendation: "Your content mix is {deviation} points away from the {industry} ideal. You rely too heavily on one format. Plan a mix of photos, videos, links and text posts.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so your content mix can be assessed.",
        },
    ],
};

pub static TOP_POST: TriggerDefinition = TriggerDefinition {
    id: "CONT_002",
    name: "Top post performance",
    category: TriggerCategory::Content,
    intro: "How far your best post outperforms an average post. Standout posts show what your audience wants more of.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "EXCELLENT",
            score: 92.0,
            recommendation: "Your best post drew {ratio}x the average engagement. Study what made it work and build more posts around it.",
        },
        Outcome {
            key: "GOOD",
            score: 80.0,
            recommendation: "Your best post drew {ratio}x the average engagement. Repeat its topic or format to lift the average.",
        },
        Outcome {
            key: "MODERATE",
            score: 62.0,
            recommendation: "Your best post only slightly beats the average ({ratio}x). Experiment with bolder content to find a breakout format.",
        },
        Outcome {
            key: "LOW",
            score: 45.0,
            recommendation: "No post stands out from the rest ({ratio}x the average). Try new formats and topics to discover what resonates.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so standout content can be identified.",
        },
    ],
};

pub static VIDEO_SHARE: TriggerDefinition = TriggerDefinition {
    id: "CONT_003",
    name: "Video usage",
    category: TriggerCategory::Content,
    intro: "Video gets more reach than any other format on most pages.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "NONE",
            score: 25.0,
            recommendation: "You haven't posted any videos. Short clips filmed on a phone are enough to start.",
        },
        Outcome {
            key: "LOW",
            score: 50.0,
            recommendation: "Only {video_pct}% of your posts are videos. Aim for at least one in five.",
        },
        Outcome {
            key: "MEDIUM",
            score: 75.0,
            recommendation: "{video_pct}% of your posts are videos. A few more would help your reach.",
        },
        Outcome {
            key: "HIGH",
            score: 92.0,
            recommendation: "{video_pct}% of your posts are videos. Keep them short and put the message in the first seconds.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so your video usage can be assessed.",
        },
    ],
};

pub static LINK_SHARE: TriggerDefinition = TriggerDefinition {
    id: "CONT_004",
    name: "Link post share",
    category: TriggerCategory::Content,
    intro: "Posts that send people off the platform usually get less reach.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "LOW",
            score: 85.0,
            recommendation: "Link posts make up {link_pct}% of your content. That keeps your reach healthy.",
        },
        Outcome {
            key: "MEDIUM",
            score: 65.0,
            recommendation: "Link posts make up {link_pct}% of your content. Replace some with native photos or videos and put the link in the text.",
        },
        Outcome {
            key: "HIGH",
            score: 35.0,
            recommendation: "Link posts make up {link_pct}% of your content. Your page reads like a link feed. Publish more native content.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so your link usage can be assessed.",
        },
    ],
};

pub static FORMAT_FIT: TriggerDefinition = TriggerDefinition {
    id: "CONT_005",
    name: "Format fit",
    category: TriggerCategory::Content,
    intro: "Whether the format you post most is also the one your audience engages with most.",
    requirement: "at least 10 posts with two or more in one format",
    outcomes: &[
        Outcome {
            key: "ALIGNED",
            score: 90.0,
            recommendation: "You post {most_used_format} content most, and it is also what performs best. Keep it up.",
        },
        Outcome {
            key: "MISALIGNED",
            score: 55.0,
            recommendation: "You post {most_used_format} content most, but {best_format} posts perform best. Shift more of your posting toward {best_format}.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Not enough posts per format to compare their performance.",
        },
    ],
};

pub static PROMOTED: TriggerDefinition = TriggerDefinition {
    id: "CONT_006",
    name: "Promoted post ratio",
    category: TriggerCategory::Content,
    intro: "The share of posts boosted with paid promotion.",
    requirement: "at least 10 posts with promotion data",
    outcomes: &[
        Outcome {
            key: "NONE",
            score: 70.0,
            recommendation: "None of your posts are promoted. Boosting your best performing posts on a small budget can reach new people.",
        },
        Outcome {
            key: "BALANCED",
            score: 88.0,
            recommendation: "{promoted_pct}% of your posts are promoted. A good balance between organic and paid reach.",
        },
        Outcome {
            key: "HEAVY",
            score: 45.0,
            recommendation: "{promoted_pct}% of your posts are promoted. Heavy promotion can hide weak organic performance. Improve the content before spending more.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so promotion can be assessed.",
        },
        Outcome {
            key: UNAVAILABLE,
            score: 50.0,
            recommendation: "Promotion data isn't available for this page.",
        },
    ],
};

// --- Triggers ---

fn kind_label(kind: Option<PostKind>) -> String {
    kind.map_or_else(|| "n/a".to_string(), |k| k.to_string())
}

pub struct ContentMixFit;

impl Trigger for ContentMixFit {
    fn definition(&self) -> &'static TriggerDefinition {
        &CONTENT_MIX
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        let deviation = mix_deviation(&input.summary.kind_mix, &input.benchmark.ideal_mix);
        content_mix_key(input.summary.total_posts, deviation)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        let mix = &input.summary.kind_mix;
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("photo_pct", mix.photo),
            DebugInput::num("video_pct", mix.video),
            DebugInput::num("link_pct", mix.link),
            DebugInput::num("status_pct", mix.status),
            DebugInput::num(
                "deviation",
                mix_deviation(mix, &input.benchmark.ideal_mix),
            ),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        let deviation = mix_deviation(&input.summary.kind_mix, &input.benchmark.ideal_mix);
        vec![
            ("industry", input.benchmark.name.to_string()),
            ("deviation", format!("{deviation:.0}")),
        ]
    }
}

pub struct TopPost;

impl Trigger for TopPost {
    fn definition(&self) -> &'static TriggerDefinition {
        &TOP_POST
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        top_post_key(input.summary.total_posts, input.summary.top_to_avg_ratio)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("top_to_avg_ratio", input.summary.top_to_avg_ratio),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("ratio", format!("{:.1}", input.summary.top_to_avg_ratio))]
    }
}

pub struct VideoShare;

impl Trigger for VideoShare {
    fn definition(&self) -> &'static TriggerDefinition {
        &VIDEO_SHARE
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        video_share_key(input.summary.total_posts, input.summary.kind_mix.video)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("video_pct", input.summary.kind_mix.video),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("video_pct", format!("{:.0}", input.summary.kind_mix.video))]
    }
}

pub struct LinkShareTrigger;

impl Trigger for LinkShareTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &LINK_SHARE
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        link_share_key(input.summary.total_posts, input.summary.kind_mix.link)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("link_pct", input.summary.kind_mix.link),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("link_pct", format!("{:.0}", input.summary.kind_mix.link))]
    }
}

pub struct FormatFitTrigger;

impl Trigger for FormatFitTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &FORMAT_FIT
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        format_fit_key(
            input.summary.total_posts,
            input.summary.best_kind,
            input.summary.most_used_kind,
        )
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::new("best_kind", kind_label(input.summary.best_kind)),
            DebugInput::new("most_used_kind", kind_label(input.summary.most_used_kind)),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![
            ("best_format", kind_label(input.summary.best_kind)),
            ("most_used_format", kind_label(input.summary.most_used_kind)),
        ]
    }
}

pub struct PromotedRatio;

impl Trigger for PromotedRatio {
    fn definition(&self) -> &'static TriggerDefinition {
        &PROMOTED
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        promoted_key(input.summary.total_posts, input.summary.promoted_pct)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::opt("promoted_pct", input.summary.promoted_pct),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![(
            "promoted_pct",
            format!("{:.0}", input.summary.promoted_pct.unwrap_or(0.0)),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_post_examples() {
        assert_eq!(top_post_key(20, 3.5), "EXCELLENT");
        assert_eq!(top_post_key(20, 1.2), "LOW");
        assert_eq!(top_post_key(5, 3.5), "INSUFFICIENT");
    }

    #[test]
    fn test_top_post_boundaries() {
        assert_eq!(top_post_key(10, 3.0), "EXCELLENT");
        assert_eq!(top_post_key(10, 2.0), "GOOD");
        assert_eq!(top_post_key(10, 1.5), "MODERATE");
        assert_eq!(top_post_key(10, 1.49), "LOW");
    }

    #[test]
    fn test_mix_deviation() {
        let ideal = ContentMix { photo: 50.0, video: 25.0, link: 15.0, status: 10.0 };
        let same = KindMix { photo: 50.0, video: 25.0, link: 15.0, status: 10.0 };
        assert!(mix_deviation(&same, &ideal).abs() < 1e-9);

        let photos_only = KindMix { photo: 100.0, video: 0.0, link: 0.0, status: 0.0 };
        assert!((mix_deviation(&photos_only, &ideal) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_content_mix_bands() {
        assert_eq!(content_mix_key(9, 0.0), INSUFFICIENT);
        assert_eq!(content_mix_key(10, 15.0), "BALANCED");
        assert_eq!(content_mix_key(10, 35.0), "SKEWED");
        assert_eq!(content_mix_key(10, 35.1), "UNBALANCED");
    }

    #[test]
    fn test_video_and_link_share() {
        assert_eq!(video_share_key(10, 0.0), "NONE");
        assert_eq!(video_share_key(10, 9.9), "LOW");
        assert_eq!(video_share_key(10, 10.0), "MEDIUM");
        assert_eq!(video_share_key(10, 30.0), "HIGH");
        assert_eq!(link_share_key(10, 20.0), "LOW");
        assert_eq!(link_share_key(10, 50.0), "MEDIUM");
        assert_eq!(link_share_key(10, 50.1), "HIGH");
    }

    #[test]
    fn test_format_fit() {
        use PostKind::*;
        assert_eq!(format_fit_key(10, Some(Video), Some(Video)), "ALIGNED");
        assert_eq!(format_fit_key(10, Some(Video), Some(Photo)), "MISALIGNED");
        assert_eq!(format_fit_key(10, None, Some(Photo)), INSUFFICIENT);
        assert_eq!(format_fit_key(9, Some(Video), Some(Video)), INSUFFICIENT);
    }

    #[test]
    fn test_promoted() {
        assert_eq!(promoted_key(9, Some(10.0)), INSUFFICIENT);
        assert_eq!(promoted_key(10, None), UNAVAILABLE);
        assert_eq!(promoted_key(10, Some(0.0)), "NONE");
        assert_eq!(promoted_key(10, Some(30.0)), "BALANCED");
        assert_eq!(promoted_key(10, Some(30.1)), "HEAVY");
    }
}

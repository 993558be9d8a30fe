// TECHNICAL triggers — image quality and text formatting.

use super::{
    DebugInput, Outcome, Trigger, TriggerCategory, TriggerDefinition, TriggerInput, INSUFFICIENT,
};
use crate::metrics::summary::{RECOMMENDED_ASPECT, RECOMMENDED_MIN_WIDTH};
use crate::metrics::text::{LONG_POST_CHARS, TOO_MANY_EMOJIS};

pub const MIN_POSTS: usize = 10;
pub const MIN_IMAGES: usize = 3;
pub const MIN_LONG_POSTS: usize = 3;

// --- Dimensions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageResolution {
    Optimal,
    Acceptable,
    Poor,
}

impl ImageResolution {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p >= 80.0 => ImageResolution::Optimal,
            p if p >= 50.0 => ImageResolution::Acceptable,
            _ => ImageResolution::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageResolution::Optimal => "OPTIMAL",
            ImageResolution::Acceptable => "ACCEPTABLE",
            ImageResolution::Poor => "POOR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAspect {
    Optimal,
    Mixed,
    Poor,
}

impl ImageAspect {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p >= 70.0 => ImageAspect::Optimal,
            p if p >= 40.0 => ImageAspect::Mixed,
            _ => ImageAspect::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageAspect::Optimal => "OPTIMAL",
            ImageAspect::Mixed => "MIXED",
            ImageAspect::Poor => "POOR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLength {
    TooShort,
    Optimal,
    Long,
    TooLong,
}

impl TextLength {
    pub fn from_avg_chars(avg: f64) -> Self {
        match avg {
            a if a < 40.0 => TextLength::TooShort,
            a if a <= 250.0 => TextLength::Optimal,
            a if a <= 500.0 => TextLength::Long,
            _ => TextLength::TooLong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextLength::TooShort => "TOO_SHORT",
            TextLength::Optimal => "OPTIMAL",
            TextLength::Long => "LONG",
            TextLength::TooLong => "TOO_LONG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    Structured,
    Partial,
    WallOfText,
}

impl Structure {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p >= 70.0 => Structure::Structured,
            p if p >= 40.0 => Structure::Partial,
            _ => Structure::WallOfText,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Structure::Structured => "STRUCTURED",
            Structure::Partial => "PARTIAL",
            Structure::WallOfText => "WALL_OF_TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListUsage {
    Frequent,
    Occasional,
    Never,
}

impl ListUsage {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p >= 30.0 => ListUsage::Frequent,
            p if p > 0.0 => ListUsage::Occasional,
            _ => ListUsage::Never,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListUsage::Frequent => "FREQUENT",
            ListUsage::Occasional => "OCCASIONAL",
            ListUsage::Never => "NEVER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiLevel {
    TooFew,
    Optimal,
    TooMany,
}

impl EmojiLevel {
    /// Per-post shares are checked before the average: a page where most
    /// posts carry no emoji is TOO_FEW even if a few posts are crowded.
    pub fn classify(avg_emojis: f64, no_emoji_pct: f64, too_many_pct: f64) -> Self {
        if no_emoji_pct > 50.0 {
            EmojiLevel::TooFew
        } else if too_many_pct > 30.0 {
            EmojiLevel::TooMany
        } else if avg_emojis < 0.5 {
            EmojiLevel::TooFew
        } else if avg_emojis > 5.0 {
            EmojiLevel::TooMany
        } else {
            EmojiLevel::Optimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiLevel::TooFew => "TOO_FEW",
            EmojiLevel::Optimal => "OPTIMAL",
            EmojiLevel::TooMany => "TOO_MANY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashtagUsage {
    Absent,
    Optimal,
    Excessive,
}

impl HashtagUsage {
    pub fn from_avg(avg: f64) -> Self {
        match avg {
            a if a <= 0.0 => HashtagUsage::Absent,
            a if a <= 3.0 => HashtagUsage::Optimal,
            _ => HashtagUsage::Excessive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashtagUsage::Absent => "NONE",
            HashtagUsage::Optimal => "OPTIMAL",
            HashtagUsage::Excessive => "EXCESSIVE",
        }
    }
}

// --- Classifiers ---

/// TECH_001: share of images at least `RECOMMENDED_MIN_WIDTH` wide.
pub fn image_resolution_key(total_images: usize, recommended_pct: f64) -> String {
    if total_images < MIN_IMAGES {
        return INSUFFICIENT.to_string();
    }
    ImageResolution::from_pct(recommended_pct).as_str().to_string()
}

/// TECH_002: share of images within `RECOMMENDED_ASPECT`.
pub fn image_aspect_key(total_images: usize, recommended_pct: f64) -> String {
    if total_images < MIN_IMAGES {
        return INSUFFICIENT.to_string();
    }
    ImageAspect::from_pct(recommended_pct).as_str().to_string()
}

/// TECH_003: average characters per post.
pub fn text_length_key(total_posts: usize, avg_chars: f64) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    TextLength::from_avg_chars(avg_chars).as_str().to_string()
}

/// TECH_004: share of long posts broken into two or more paragraphs.
pub fn paragraph_structure_key(long_posts: usize, structured_pct: f64) -> String {
    if long_posts < MIN_LONG_POSTS {
        return INSUFFICIENT.to_string();
    }
    Structure::from_pct(structured_pct).as_str().to_string()
}

/// TECH_005: share of long posts that use a bullet or numbered list.
pub fn list_usage_key(long_posts: usize, list_pct: f64) -> String {
    if long_posts < MIN_LONG_POSTS {
        return INSUFFICIENT.to_string();
    }
    ListUsage::from_pct(list_pct).as_str().to_string()
}

/// TECH_006
pub fn emoji_level_key(
    total_posts: usize,
    avg_emojis: f64,
    no_emoji_pct: f64,
    too_many_pct: f64,
) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    EmojiLevel::classify(avg_emojis, no_emoji_pct, too_many_pct)
        .as_str()
        .to_string()
}

/// TECH_007: average hashtags per post.
pub fn hashtag_key(total_posts: usize, avg_hashtags: f64) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    HashtagUsage::from_avg(avg_hashtags).as_str().to_string()
}

// --- Definitions ---

pub static IMAGE_RESOLUTION: TriggerDefinition = TriggerDefinition {
    id: "TECH_001",
    name: "Image resolution",
    category: TriggerCategory::Technical,
    intro: "Low-resolution images look blurry on modern phones and get scrolled past.",
    requirement: "at least 3 images",
    outcomes: &[
        Outcome {
            key: "OPTIMAL",
            score: 92.0,
            recommendation: "{resolution_pct}% of your images are at least {min_width}px wide. They will look sharp on every screen.",
        },
        Outcome {
            key: "ACCEPTABLE",
            score: 68.0,
            recommendation: "Only {resolution_pct}% of your images are at least {min_width}px wide. Export images at full size before uploading.",
        },
        Outcome {
            key: "POOR",
            score: 30.0,
            recommendation: "Most of your images are under {min_width}px wide ({resolution_pct}% meet it). Use higher resolution photos and avoid screenshots.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Post at least 3 images so image quality can be checked.",
        },
    ],
};

pub static IMAGE_ASPECT: TriggerDefinition = TriggerDefinition {
    id: "TECH_002",
    name: "Image aspect ratio",
    category: TriggerCategory::Technical,
    intro: "Square and portrait images take up more of the feed than landscape ones.",
    requirement: "at least 3 images",
    outcomes: &[
        Outcome {
            key: "OPTIMAL",
            score: 90.0,
            recommendation: "{aspect_pct}% of your images are square or portrait (up to 4:5). They make the most of feed space.",
        },
        Outcome {
            key: "MIXED",
            score: 65.0,
            recommendation: "{aspect_pct}% of your images are square or portrait. Crop more of them to 1:1 or 4:5.",
        },
        Outcome {
            key: "POOR",
            score: 35.0,
            recommendation: "Only {aspect_pct}% of your images are square or portrait. Landscape images appear small in the feed. Crop to 1:1 or 4:5.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Post at least 3 images so image framing can be checked.",
        },
    ],
};

pub static TEXT_LENGTH: TriggerDefinition = TriggerDefinition {
    id: "TECH_003",
    name: "Text length",
    category: TriggerCategory::Technical,
    intro: "Average length of your post text.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "TOO_SHORT",
            score: 55.0,
            recommendation: "Your posts average {avg_chars} characters. Add a sentence of context or a call to action.",
        },
        Outcome {
            key: "OPTIMAL",
            score: 90.0,
            recommendation: "Your posts average {avg_chars} characters. Short enough to read in the feed, long enough to say something.",
        },
        Outcome {
            key: "LONG",
            score: 65.0,
            recommendation: "Your posts average {avg_chars} characters. Put the key message in the first two lines, before the text gets cut off.",
        },
        Outcome {
            key: "TOO_LONG",
            score: 35.0,
            recommendation: "Your posts average {avg_chars} characters. Few people read that much in a feed. Cut them down or link to a full article.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so text length can be assessed.",
        },
    ],
};

pub static PARAGRAPH_STRUCTURE: TriggerDefinition = TriggerDefinition {
    id: "TECH_004",
    name: "Paragraph structure",
    category: TriggerCategory::Technical,
    intro: "Long posts are easier to read when broken into short paragraphs.",
    requirement: "at least 3 long posts",
    outcomes: &[
        Outcome {
            key: "STRUCTURED",
            score: 90.0,
            recommendation: "{structured_pct}% of your long posts use paragraphs. They are easy to scan.",
        },
        Outcome {
            key: "PARTIAL",
            score: 62.0,
            recommendation: "Only {structured_pct}% of your long posts use paragraphs. Add blank lines between ideas.",
        },
        Outcome {
            key: "WALL_OF_TEXT",
            score: 30.0,
            recommendation: "Most of your long posts are a single block of text. Break them into short paragraphs of one or two sentences.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Not enough long posts to assess paragraph structure.",
        },
    ],
};

pub static LIST_USAGE: TriggerDefinition = TriggerDefinition {
    id: "TECH_005",
    name: "List formatting",
    category: TriggerCategory::Technical,
    intro: "Bullet and numbered lists make long posts skimmable.",
    requirement: "at least 3 long posts",
    outcomes: &[
        Outcome {
            key: "FREQUENT",
            score: 88.0,
            recommendation: "{list_pct}% of your long posts use lists. Readers can pick out the key points quickly.",
        },
        Outcome {
            key: "OCCASIONAL",
            score: 72.0,
            recommendation: "{list_pct}% of your long posts use lists. Use them whenever you share steps, tips or options.",
        },
        Outcome {
            key: "NEVER",
            score: 55.0,
            recommendation: "Your long posts never use lists. Turn steps, tips and options into bullet points.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Not enough long posts to assess list usage.",
        },
    ],
};

pub static EMOJI_LEVEL: TriggerDefinition = TriggerDefinition {
    id: "TECH_006",
    name: "Emoji level",
    category: TriggerCategory::Technical,
    intro: "A few emojis add personality and draw the eye. Too many make posts hard to read.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "TOO_FEW",
            score: 60.0,
            recommendation: "{no_emoji_pct}% of your posts have no emoji. Add one or two to highlight key points.",
        },
        Outcome {
            key: "OPTIMAL",
            score: 88.0,
            recommendation: "Your emoji use is well balanced at {avg_emojis} per post.",
        },
        Outcome {
            key: "TOO_MANY",
            score: 40.0,
            recommendation: "Your posts average {avg_emojis} emojis and {too_many_pct}% use more than {max_emojis}. Cut back so the message stays readable.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so emoji usage can be assessed.",
        },
    ],
};

pub static HASHTAGS: TriggerDefinition = TriggerDefinition {
    id: "TECH_007",
    name: "Hashtag usage",
    category: TriggerCategory::Technical,
    intro: "A few relevant hashtags help discovery. Long hashtag lists look like spam.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "NONE",
            score: 65.0,
            recommendation: "You don't use hashtags. Add one to three relevant tags, such as your brand or location.",
        },
        Outcome {
            key: "OPTIMAL",
            score: 88.0,
            recommendation: "You use {avg_hashtags} hashtags per post on average. That is the right amount.",
        },
        Outcome {
            key: "EXCESSIVE",
            score: 40.0,
            recommendation: "You use {avg_hashtags} hashtags per post on average. Keep it to three or fewer.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so hashtag usage can be assessed.",
        },
    ],
};

// --- Triggers ---

pub struct ImageResolutionTrigger;

impl Trigger for ImageResolutionTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &IMAGE_RESOLUTION
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        image_resolution_key(
            input.summary.total_images,
            input.summary.recommended_resolution_pct,
        )
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_images", input.summary.total_images),
            DebugInput::num("recommended_resolution_pct", input.summary.recommended_resolution_pct),
            DebugInput::new("min_width", RECOMMENDED_MIN_WIDTH),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![
            (
                "resolution_pct",
                format!("{:.0}", input.summary.recommended_resolution_pct),
            ),
            ("min_width", RECOMMENDED_MIN_WIDTH.to_string()),
        ]
    }
}

pub struct ImageAspectTrigger;

impl Trigger for ImageAspectTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &IMAGE_ASPECT
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        image_aspect_key(input.summary.total_images, input.summary.recommended_aspect_pct)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_images", input.summary.total_images),
            DebugInput::num("recommended_aspect_pct", input.summary.recommended_aspect_pct),
            DebugInput::new(
                "aspect_range",
                format!("{}-{}", RECOMMENDED_ASPECT.0, RECOMMENDED_ASPECT.1),
            ),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![(
            "aspect_pct",
            format!("{:.0}", input.summary.recommended_aspect_pct),
        )]
    }
}

pub struct TextLengthTrigger;

impl Trigger for TextLengthTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &TEXT_LENGTH
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        text_length_key(input.summary.total_posts, input.summary.avg_text_length)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("avg_text_length", input.summary.avg_text_length),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("avg_chars", format!("{:.0}", input.summary.avg_text_length))]
    }
}

pub struct ParagraphStructure;

impl Trigger for ParagraphStructure {
    fn definition(&self) -> &'static TriggerDefinition {
        &PARAGRAPH_STRUCTURE
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        paragraph_structure_key(input.summary.long_posts, input.summary.structured_long_pct)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("long_posts", input.summary.long_posts),
            DebugInput::new("long_post_chars", LONG_POST_CHARS),
            DebugInput::num("structured_long_pct", input.summary.structured_long_pct),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![(
            "structured_pct",
            format!("{:.0}", input.summary.structured_long_pct),
        )]
    }
}

pub struct ListUsageTrigger;

impl Trigger for ListUsageTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &LIST_USAGE
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        list_usage_key(input.summary.long_posts, input.summary.list_long_pct)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("long_posts", input.summary.long_posts),
            DebugInput::num("list_long_pct", input.summary.list_long_pct),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("list_pct", format!("{:.0}", input.summary.list_long_pct))]
    }
}

pub struct EmojiLevelTrigger;

impl Trigger for EmojiLevelTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &EMOJI_LEVEL
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        emoji_level_key(
            input.summary.total_posts,
            input.summary.avg_emojis,
            input.summary.no_emoji_pct,
            input.summary.too_many_emoji_pct,
        )
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("avg_emojis", input.summary.avg_emojis),
            DebugInput::num("no_emoji_pct", input.summary.no_emoji_pct),
            DebugInput::num("too_many_emoji_pct", input.summary.too_many_emoji_pct),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![
            ("avg_emojis", format!("{:.1}", input.summary.avg_emojis)),
            ("no_emoji_pct", format!("{:.0}", input.summary.no_emoji_pct)),
            ("too_many_pct", format!("{:.0}", input.summary.too_many_emoji_pct)),
            ("max_emojis", TOO_MANY_EMOJIS.to_string()),
        ]
    }
}

pub struct HashtagTrigger;

impl Trigger for HashtagTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &HASHTAGS
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        hashtag_key(input.summary.total_posts, input.summary.avg_hashtags)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("avg_hashtags", input.summary.avg_hashtags),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("avg_hashtags", format!("{:.1}", input.summary.avg_hashtags))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_examples() {
        assert_eq!(emoji_level_key(10, 1.0, 60.0, 5.0), "TOO_FEW");
        assert_eq!(emoji_level_key(10, 1.0, 20.0, 5.0), "OPTIMAL");
    }

    #[test]
    fn test_emoji_branch_precedence() {
        // no-emoji share wins over a crowded minority
        assert_eq!(emoji_level_key(10, 8.0, 60.0, 40.0), "TOO_FEW");
        // then the too-many share
        assert_eq!(emoji_level_key(10, 1.0, 10.0, 31.0), "TOO_MANY");
        // then the average, both ways
        assert_eq!(emoji_level_key(10, 0.4, 50.0, 0.0), "TOO_FEW");
        assert_eq!(emoji_level_key(10, 5.1, 0.0, 30.0), "TOO_MANY");
        assert_eq!(emoji_level_key(9, 1.0, 20.0, 5.0), INSUFFICIENT);
    }

    #[test]
    fn test_image_guards_use_image_count() {
        assert_eq!(image_resolution_key(2, 100.0), INSUFFICIENT);
        assert_eq!(image_resolution_key(3, 80.0), "OPTIMAL");
        assert_eq!(image_resolution_key(3, 50.0), "ACCEPTABLE");
        assert_eq!(image_resolution_key(3, 49.9), "POOR");
        assert_eq!(image_aspect_key(2, 100.0), INSUFFICIENT);
        assert_eq!(image_aspect_key(3, 70.0), "OPTIMAL");
        assert_eq!(image_aspect_key(3, 40.0), "MIXED");
        assert_eq!(image_aspect_key(3, 39.0), "POOR");
    }

    #[test]
    fn test_text_length_bands() {
        assert_eq!(text_length_key(10, 39.9), "TOO_SHORT");
        assert_eq!(text_length_key(10, 40.0), "OPTIMAL");
        assert_eq!(text_length_key(10, 250.0), "OPTIMAL");
        assert_eq!(text_length_key(10, 500.0), "LONG");
        assert_eq!(text_length_key(10, 500.1), "TOO_LONG");
    }

    #[test]
    fn test_long_post_triggers() {
        assert_eq!(paragraph_structure_key(2, 100.0), INSUFFICIENT);
        assert_eq!(paragraph_structure_key(3, 70.0), "STRUCTURED");
        assert_eq!(paragraph_structure_key(3, 40.0), "PARTIAL");
        assert_eq!(paragraph_structure_key(3, 0.0), "WALL_OF_TEXT");
        assert_eq!(list_usage_key(3, 30.0), "FREQUENT");
        assert_eq!(list_usage_key(3, 0.1), "OCCASIONAL");
        assert_eq!(list_usage_key(3, 0.0), "NEVER");
    }

    #[test]
    fn test_hashtags() {
        assert_eq!(hashtag_key(10, 0.0), "NONE");
        assert_eq!(hashtag_key(10, 3.0), "OPTIMAL");
        assert_eq!(hashtag_key(10, 3.1), "EXCESSIVE");
    }
}
